use serde::Deserialize;
use validator::Validate;

use crate::domain::product::NewProduct;
use crate::domain::types::{Price, ProductName, StockQuantity};
use crate::forms::{FormError, checkbox, number};
use crate::models::non_blank;

#[derive(Debug, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub stock_quantity: Option<String>,
    #[serde(default)]
    pub is_active: Option<String>,
}

impl TryFrom<ProductForm> for NewProduct {
    type Error = FormError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let price = number(form.price.as_deref(), FormError::InvalidPrice)?;
        let stock = number(form.stock_quantity.as_deref(), FormError::InvalidStock)?;

        Ok(NewProduct {
            is_active: checkbox(&form.is_active),
            name: ProductName::new(form.name).map_err(|_| FormError::InvalidName)?,
            sku: non_blank(form.sku),
            category: non_blank(form.category),
            description: non_blank(form.description),
            price: Price::new(price).map_err(|_| FormError::InvalidPrice)?,
            stock_quantity: StockQuantity::new(stock).map_err(|_| FormError::InvalidStock)?,
        })
    }
}
