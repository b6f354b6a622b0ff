use async_trait::async_trait;

use super::chat::ChatMessage;
use super::client::ClientRecord;
use super::errors::DomainError;
use super::order::{ListResult, OrderSubmission, OrderSummary};
use super::product::Product;

/// One grayscale frame handed from the frame source to the decoder.
///
/// `luma` is expected to hold exactly `width * height` bytes in row-major
/// order. The crop and decode stages tolerate a source that violates this
/// by passing the frame through untouched and rejecting it as undecodable.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub luma: Vec<u8>,
}

/// What the frame source had to offer on this tick.
#[derive(Debug)]
pub enum FramePoll {
    Frame(Frame),
    /// Nothing decodable yet; reschedule without work.
    Pending,
    /// The source is done (file sources only; a live camera never ends).
    Ended,
}

/// A live or replayed video source. Acquired once per capture session and
/// released on every exit path.
#[async_trait]
pub trait FrameSource: Send + 'static {
    async fn acquire(&mut self) -> Result<(), DomainError>;
    async fn next_frame(&mut self) -> Result<FramePoll, DomainError>;
    fn release(&mut self);
}

/// Pure image-to-code decoding. Decode errors are "no code found".
pub trait Decoder: Send + Sync + 'static {
    fn decode(&self, frame: &Frame) -> Option<String>;
}

/// Resolves a scanned or typed code to product attributes.
#[async_trait]
pub trait InventoryLookup: Send + Sync + 'static {
    async fn find_by_code(&self, code: &str) -> Result<Product, DomainError>;
}

#[async_trait]
pub trait OrderGateway: Send + Sync + 'static {
    /// Persist a validated order; returns the created order id.
    async fn submit(&self, order: &OrderSubmission) -> Result<String, DomainError>;
    async fn list_orders(&self, page: i64, limit: i64)
        -> Result<ListResult<OrderSummary>, DomainError>;
}

#[async_trait]
pub trait ClientDirectory: Send + Sync + 'static {
    async fn list_clients(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<ListResult<ClientRecord>, DomainError>;
    async fn client_orders(&self, client_id: &str) -> Result<Vec<OrderSummary>, DomainError>;
}

/// Assistant completions, proxied through the backend.
#[async_trait]
pub trait Assistant: Send + Sync + 'static {
    async fn complete(&self, history: &[ChatMessage]) -> Result<String, DomainError>;
}
