/// The client a draft order is being built for: either a reference to an
/// existing backend record (`client_id` set) or a new client created
/// alongside the order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientForm {
    pub client_id: Option<String>,
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
}

impl ClientForm {
    pub fn is_existing(&self) -> bool {
        self.client_id.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Listing row for the client browsing and selection views.
#[derive(Debug, Clone)]
pub struct ClientRecord {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
    pub order_count: i64,
}
