use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Product record as the backend returns it from lookup and listing
/// endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub product_id: String,
    pub title: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub category: String,
    pub unit_price: u64,
    #[serde(default)]
    pub available_stock: u32,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Product {
            product_id: dto.product_id,
            title: dto.title,
            sku: dto.sku,
            category: dto.category,
            unit_price: dto.unit_price,
            available_stock: dto.available_stock,
            unit: dto.unit,
            images: dto.images,
        }
    }
}

/// Query string for `GET /products`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub page: i64,
    pub limit: i64,
}

impl ProductQuery {
    pub fn page(page: i64, limit: i64) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_deserializes_from_backend_shape() {
        let dto: ProductDto = serde_json::from_value(serde_json::json!({
            "productId": "p-9",
            "title": "Boot A",
            "sku": "M-100",
            "category": "boots",
            "unitPrice": 150000,
            "availableStock": 5,
            "unit": "pair",
            "images": ["a.jpg"]
        }))
        .expect("valid product payload");

        let product: Product = dto.into();
        assert_eq!(product.sku, "M-100");
        assert_eq!(product.unit_price, 150_000);
        assert_eq!(product.available_stock, 5);
    }

    #[test]
    fn optional_product_fields_default() {
        let dto: ProductDto = serde_json::from_value(serde_json::json!({
            "productId": "p-1",
            "title": "Boot B",
            "unitPrice": 90000
        }))
        .expect("sparse payload still parses");
        assert_eq!(dto.available_stock, 0);
        assert!(dto.images.is_empty());
    }

    #[test]
    fn query_serializes_type_keyword_and_skips_empty_filters() {
        let query = ProductQuery {
            kind: Some("sale".to_string()),
            ..ProductQuery::page(2, 20)
        };
        let value = serde_json::to_value(&query).expect("serializable");
        assert_eq!(value["type"], "sale");
        assert_eq!(value["page"], 2);
        assert!(value.get("search").is_none());
    }
}
