use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Price, ProductId, ProductName, StockQuantity};

/// Item sold or dispensed by the clinic (food, medication, accessories).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Price,
    pub stock_quantity: StockQuantity,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether the stock has dropped to the given threshold or below.
    #[must_use]
    pub fn is_low_stock(&self, threshold: i32) -> bool {
        self.stock_quantity.get() <= threshold
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Price,
    pub stock_quantity: StockQuantity,
    pub is_active: bool,
}

pub type UpdateProduct = NewProduct;
