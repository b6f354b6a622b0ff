use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::cart::CartLine;
use crate::domain::order::{OrderSubmission, OrderSummary};

/// One line of `POST /orders/new`. `model` carries the SKU; `variant` is
/// part of the contract but the cart does not track one, so it is omitted
/// when absent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub product: String,
    pub quantity: u32,
    pub price: u64,
    pub model: String,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

impl From<&CartLine> for OrderLineRequest {
    fn from(line: &CartLine) -> Self {
        Self {
            product: line.product_id.clone(),
            quantity: line.quantity,
            price: line.unit_price,
            model: line.sku.clone(),
            unit: line.unit.clone(),
            variant: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewClientPayload {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Body of `POST /orders/new`. Exactly one of `client_id` / `client` is
/// present: a reference to an existing client, or the new client to create
/// alongside the order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderRequest {
    pub customer: String,
    pub products: Vec<OrderLineRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<NewClientPayload>,
    pub status: String,
    pub pay_type: String,
}

impl From<&OrderSubmission> for NewOrderRequest {
    fn from(order: &OrderSubmission) -> Self {
        let client = &order.client;
        Self {
            customer: client.name.clone(),
            products: order.lines.iter().map(OrderLineRequest::from).collect(),
            client_id: client.client_id.clone(),
            client: if client.is_existing() {
                None
            } else {
                Some(NewClientPayload {
                    name: client.name.clone(),
                    phone: client.phone.clone(),
                    address: client.address.clone(),
                })
            },
            status: order.status.as_str().to_string(),
            pay_type: order.pay_type.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrderResponse {
    pub order_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryDto {
    pub order_id: String,
    pub customer: String,
    pub status: String,
    #[serde(default)]
    pub total: u64,
    pub created_at: DateTime<Utc>,
}

impl From<OrderSummaryDto> for OrderSummary {
    fn from(dto: OrderSummaryDto) -> Self {
        OrderSummary {
            id: dto.order_id,
            customer: dto.customer,
            status: dto.status,
            total: dto.total,
            created_at: dto.created_at,
        }
    }
}

/// Paginated listing envelope shared by the orders and clients endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub limit: i64,
}
