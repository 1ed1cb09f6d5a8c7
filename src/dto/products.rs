use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::pagination::Paginated;

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ProductsQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub category: Option<String>,
    /// `true`, `false` or blank for all products.
    pub active: Option<String>,
    /// Set by the "low stock only" checkbox.
    pub low_stock: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug)]
pub struct ProductsPageData {
    pub products: Paginated<Product>,
    pub low_stock_threshold: i32,
    pub filters: ProductsQuery,
}
