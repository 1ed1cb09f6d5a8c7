use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::domain::types::{Price, ProductId, ProductName, StockQuantity, TypeConstraintError};
use crate::models::non_blank;

#[derive(Debug, Clone, Deserialize)]
/// Product record as returned by `GET /products`.
pub struct Product {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub(crate) fn default_active() -> bool {
    true
}

#[derive(Debug, Serialize)]
/// Body of `POST /products` and `PUT /products/{id}`.
pub struct ProductPayload<'a> {
    pub name: &'a str,
    pub sku: Option<&'a str>,
    pub category: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price: f64,
    pub stock_quantity: i32,
    pub is_active: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
/// Body of the `PATCH` used by active/inactive toggles.
pub struct ActivePayload {
    pub is_active: bool,
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::try_from(product.id)?,
            name: ProductName::new(product.name)?,
            sku: non_blank(product.sku),
            category: non_blank(product.category),
            description: non_blank(product.description),
            price: Price::new(product.price)?,
            stock_quantity: StockQuantity::new(product.stock_quantity)?,
            is_active: product.is_active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewProduct> for ProductPayload<'a> {
    fn from(product: &'a DomainNewProduct) -> Self {
        Self {
            name: product.name.as_str(),
            sku: product.sku.as_deref(),
            category: product.category.as_deref(),
            description: product.description.as_deref(),
            price: product.price.get(),
            stock_quantity: product.stock_quantity.get(),
            is_active: product.is_active,
        }
    }
}
