use serde::Deserialize;

use crate::domain::client::ClientRecord;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecordDto {
    pub client_id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub order_count: i64,
}

impl From<ClientRecordDto> for ClientRecord {
    fn from(dto: ClientRecordDto) -> Self {
        ClientRecord {
            id: dto.client_id,
            name: dto.name,
            phone: dto.phone,
            address: dto.address,
            order_count: dto.order_count,
        }
    }
}
