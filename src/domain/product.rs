/// Product attributes as resolved from the backend inventory.
///
/// Prices are integer currency units; `available_stock == 0` means the
/// backend reported no usable stock figure and quantity caps do not apply.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_id: String,
    pub title: String,
    pub sku: String,
    pub category: String,
    pub unit_price: u64,
    pub available_stock: u32,
    pub unit: String,
    pub images: Vec<String>,
}
