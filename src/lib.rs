pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infrastructure;
pub mod models;

pub use application::assistant::AssistantService;
pub use application::capture::{CaptureConfig, CapturePipeline};
pub use application::order_service::{OrderDraft, OrderService, ViewState};
pub use config::{Settings, SettingsService};
pub use errors::Notice;
pub use infrastructure::backend_api::BackendClient;
pub use infrastructure::decoder::RqrrDecoder;
pub use infrastructure::frames::ImageDirSource;
