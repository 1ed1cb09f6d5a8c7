use reqwest::Method;

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::ProductId;
use crate::models::product::{ActivePayload, Product as WireProduct, ProductPayload};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    HttpRepository, ListParams, ListQuery, Page, ProductReader, ProductWriter, QueryPairs,
    list_query_builders, sort_field,
};

sort_field!(ProductSort {
    Name => "name",
    Price => "price",
    Stock => "stock_quantity",
    CreatedAt => "created_at",
});

#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    pub params: ListParams<ProductSort>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    list_query_builders!(ProductSort);

    pub fn category(mut self, category: impl Into<String>) -> Self {
        let category = category.into().trim().to_string();
        self.category = (!category.is_empty()).then_some(category);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

impl ListQuery for ProductListQuery {
    fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        self.params.push_pairs(&mut pairs);
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(is_active) = self.is_active {
            pairs.push(("is_active", is_active.to_string()));
        }
        pairs
    }
}

impl ProductReader for HttpRepository {
    async fn get_product(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        self.fetch_one::<WireProduct, _>(&format!("products/{id}"), QueryPairs::new())
            .await
    }

    async fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Page<Product>> {
        self.fetch_page::<WireProduct, _>("products", query.query_pairs())
            .await
    }
}

impl ProductWriter for HttpRepository {
    async fn create_product(&self, new: &NewProduct) -> RepositoryResult<Product> {
        self.send::<_, WireProduct, _>(Method::POST, "products", &ProductPayload::from(new))
            .await
    }

    async fn update_product(
        &self,
        id: ProductId,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product> {
        self.send::<_, WireProduct, _>(
            Method::PUT,
            &format!("products/{id}"),
            &ProductPayload::from(updates),
        )
        .await
    }

    async fn set_product_active(
        &self,
        id: ProductId,
        is_active: bool,
    ) -> RepositoryResult<Product> {
        self.send::<_, WireProduct, _>(
            Method::PATCH,
            &format!("products/{id}"),
            &ActivePayload { is_active },
        )
        .await
    }

    async fn delete_product(&self, id: ProductId) -> RepositoryResult<()> {
        self.remove(&format!("products/{id}")).await
    }
}
