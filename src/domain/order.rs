use chrono::{DateTime, Utc};

use super::cart::CartLine;
use super::client::ClientForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayType {
    Cash,
    Card,
    Transfer,
}

impl PayType {
    pub fn as_str(self) -> &'static str {
        match self {
            PayType::Cash => "cash",
            PayType::Card => "card",
            PayType::Transfer => "transfer",
        }
    }
}

/// A validated order on its way to the backend. Built once from the draft,
/// posted, then discarded from local state.
#[derive(Debug, Clone)]
pub struct OrderSubmission {
    pub client: ClientForm,
    pub lines: Vec<CartLine>,
    pub status: OrderStatus,
    pub pay_type: PayType,
}

/// Listing row for the order browsing views.
#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub id: String,
    pub customer: String,
    pub status: String,
    pub total: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total: i64,
}
