use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::domain::chat::ChatMessage;
use crate::domain::client::ClientRecord;
use crate::domain::errors::DomainError;
use crate::domain::order::{ListResult, OrderSubmission, OrderSummary};
use crate::domain::ports::{Assistant, ClientDirectory, InventoryLookup, OrderGateway};
use crate::domain::product::Product;
use crate::models::assistant::{ChatMessageDto, ChatReply, ChatRequest};
use crate::models::client::ClientRecordDto;
use crate::models::order::{CreatedOrderResponse, ListResponse, NewOrderRequest, OrderSummaryDto};
use crate::models::product::{ProductDto, ProductQuery};
use crate::models::stats::StatsSummary;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        DomainError::Backend(e.to_string())
    }
}

// ── Client ───────────────────────────────────────────────────────────────────

/// HTTP client for the admin backend. Implements every outbound port; all
/// persistent state lives on the other side of these calls.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, DomainError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL built segment by segment, so scanned payloads containing `/`,
    /// `?`, or spaces are percent-encoded instead of rewriting the path.
    fn url_with(&self, segments: &[&str]) -> Result<Url, DomainError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| DomainError::Internal(format!("Invalid backend URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| DomainError::Internal("Backend URL cannot carry a path".to_string()))?
            .extend(segments);
        Ok(url)
    }

    /// Paginated catalog listing for the product browsing view.
    pub async fn list_products(
        &self,
        query: &ProductQuery,
    ) -> Result<ListResult<Product>, DomainError> {
        let response = self
            .http
            .get(self.url("/products"))
            .query(query)
            .send()
            .await?;
        let list: ListResponse<ProductDto> = parse(response).await?;
        Ok(ListResult {
            items: list.items.into_iter().map(Product::from).collect(),
            total: list.total,
        })
    }

    /// Dashboard numbers; chart and PDF rendering happen client-side of
    /// this call.
    pub async fn stats_summary(&self) -> Result<StatsSummary, DomainError> {
        let response = self.http.get(self.url("/stats/summary")).send().await?;
        parse(response).await
    }
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, DomainError> {
    let status = response.status();
    if !status.is_success() {
        return Err(error_from(status, response).await);
    }
    response
        .json()
        .await
        .map_err(|e| DomainError::Backend(format!("Malformed response: {e}")))
}

/// Surface the backend's own message verbatim when the error body carries
/// one; otherwise fall back to a generic status line.
async fn error_from(status: StatusCode, response: Response) -> DomainError {
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("Request failed with status {status}"));
    DomainError::Backend(message)
}

// ── Port implementations ─────────────────────────────────────────────────────

#[async_trait]
impl InventoryLookup for BackendClient {
    async fn find_by_code(&self, code: &str) -> Result<Product, DomainError> {
        let response = self
            .http
            .get(self.url_with(&["products", "qr", "scann", code])?)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(DomainError::ProductNotFound(code.to_string()));
        }
        let dto: ProductDto = parse(response).await?;
        Ok(dto.into())
    }
}

#[async_trait]
impl OrderGateway for BackendClient {
    async fn submit(&self, order: &OrderSubmission) -> Result<String, DomainError> {
        let request = NewOrderRequest::from(order);
        let response = self
            .http
            .post(self.url("/orders/new"))
            .json(&request)
            .send()
            .await?;
        let created: CreatedOrderResponse = parse(response).await?;
        Ok(created.order_id)
    }

    async fn list_orders(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<ListResult<OrderSummary>, DomainError> {
        let response = self
            .http
            .get(self.url("/orders"))
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;
        let list: ListResponse<OrderSummaryDto> = parse(response).await?;
        Ok(ListResult {
            items: list.items.into_iter().map(OrderSummary::from).collect(),
            total: list.total,
        })
    }
}

#[async_trait]
impl ClientDirectory for BackendClient {
    async fn list_clients(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<ListResult<ClientRecord>, DomainError> {
        let response = self
            .http
            .get(self.url("/clients"))
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;
        let list: ListResponse<ClientRecordDto> = parse(response).await?;
        Ok(ListResult {
            items: list.items.into_iter().map(ClientRecord::from).collect(),
            total: list.total,
        })
    }

    async fn client_orders(&self, client_id: &str) -> Result<Vec<OrderSummary>, DomainError> {
        let response = self
            .http
            .get(self.url_with(&["clients", client_id, "orders"])?)
            .send()
            .await?;
        let rows: Vec<OrderSummaryDto> = parse(response).await?;
        Ok(rows.into_iter().map(OrderSummary::from).collect())
    }
}

#[async_trait]
impl Assistant for BackendClient {
    async fn complete(&self, history: &[ChatMessage]) -> Result<String, DomainError> {
        let request = ChatRequest {
            messages: history.iter().map(ChatMessageDto::from).collect(),
        };
        let response = self
            .http
            .post(self.url("/assistant/chat"))
            .json(&request)
            .send()
            .await?;
        let reply: ChatReply = parse(response).await?;
        Ok(reply.reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_joins_without_double_slash() {
        let client = BackendClient::new("http://localhost:4000/").expect("client builds");
        assert_eq!(client.url("/orders"), "http://localhost:4000/orders");
    }

    #[test]
    fn scanned_codes_are_percent_encoded_in_the_path() {
        let client = BackendClient::new("http://localhost:4000").expect("client builds");
        let url = client
            .url_with(&["products", "qr", "scann", "AB/1 2?"])
            .expect("valid base");
        assert_eq!(
            url.as_str(),
            "http://localhost:4000/products/qr/scann/AB%2F1%202%3F"
        );
    }

    #[test]
    fn url_with_respects_a_base_path_prefix() {
        let client = BackendClient::new("http://localhost:4000/api/").expect("client builds");
        let url = client.url_with(&["clients", "c-7", "orders"]).expect("valid base");
        assert_eq!(url.as_str(), "http://localhost:4000/api/clients/c-7/orders");
    }
}
