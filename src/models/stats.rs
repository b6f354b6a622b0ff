use serde::Deserialize;

/// Dashboard feed from `GET /stats/summary`. Chart and PDF rendering happen
/// elsewhere; this is just the numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_orders: i64,
    pub total_clients: i64,
    pub total_revenue: u64,
    #[serde(default)]
    pub top_products: Vec<TopProduct>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub title: String,
    pub sold: u64,
}
