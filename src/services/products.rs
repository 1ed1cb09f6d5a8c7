//! Product catalogue workflows.
//!
//! The API cannot filter by stock level, so the "low stock" filter is applied
//! to the fetched page only; pagination metadata stays as the backend
//! reported it.

use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::ProductId;
use crate::dto::products::{ProductsPageData, ProductsQuery};
use crate::forms::ToggleActiveForm;
use crate::forms::products::ProductForm;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{ProductListQuery, ProductReader, ProductSort, ProductWriter, SortOrder};
use crate::services::{ServiceError, ServiceResult, parse_filter, parse_sort};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Stock level at or below which a product is flagged.
pub const LOW_STOCK_THRESHOLD: i32 = 5;

pub async fn load_products_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ProductsQuery,
) -> ServiceResult<ProductsPageData>
where
    R: ProductReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let (sort_by, sort_order) = parse_sort(query.sort_by.as_deref(), query.sort_order.as_deref())
        .unwrap_or((ProductSort::Name, SortOrder::Asc));

    let mut list_query = ProductListQuery::new()
        .paginate(query.page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE)
        .sort(sort_by, sort_order)
        .search(query.search.clone().unwrap_or_default())
        .category(query.category.clone().unwrap_or_default());

    if let Some(is_active) = parse_filter::<bool>(query.active.as_deref()) {
        list_query = list_query.active(is_active);
    }

    let mut products = repo.list_products(list_query).await.map_err(|err| {
        log::error!("Failed to list products: {err}");
        err
    })?;

    if parse_filter::<bool>(query.low_stock.as_deref()).unwrap_or(false) {
        products = products.retain(|product| product.is_low_stock(LOW_STOCK_THRESHOLD));
    }

    Ok(ProductsPageData {
        products: products.into(),
        low_stock_threshold: LOW_STOCK_THRESHOLD,
        filters: query,
    })
}

pub async fn load_product_modal<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.get_product(ProductId::new(product_id)?)
        .await?
        .ok_or(ServiceError::NotFound)
}

pub async fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_product = NewProduct::try_from(form)?;

    let product = repo.create_product(&new_product).await.map_err(|err| {
        log::error!("Failed to add a product: {err}");
        err
    })?;

    Ok(product)
}

pub async fn update_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: ProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let id = ProductId::new(product_id)?;
    let updates = NewProduct::try_from(form)?;

    let product = repo.update_product(id, &updates).await.map_err(|err| {
        log::error!("Failed to update product {id}: {err}");
        err
    })?;

    Ok(product)
}

/// Activates or deactivates a product through the PATCH endpoint.
pub async fn toggle_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: ToggleActiveForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let id = ProductId::new(product_id)?;

    let product = repo
        .set_product_active(id, form.is_active)
        .await
        .map_err(|err| {
            log::error!("Failed to toggle product {id}: {err}");
            err
        })?;

    Ok(product)
}

pub async fn delete_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let id = ProductId::new(product_id)?;

    repo.delete_product(id).await.map_err(|err| {
        log::error!("Failed to delete product {id}: {err}");
        err
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fake::{FakeRepository, admin_user, front_desk_user, sample_product};

    fn stocked_repo() -> FakeRepository {
        let repo = FakeRepository::default();
        repo.products.replace(vec![
            sample_product(1, "Dental chews", 2),
            sample_product(2, "Flea collar", 40),
            sample_product(3, "Kidney diet", 5),
        ]);
        repo
    }

    #[actix_web::test]
    async fn low_stock_filter_keeps_backend_totals() {
        let repo = stocked_repo();

        let data = load_products_page(
            &repo,
            &front_desk_user(),
            ProductsQuery {
                low_stock: Some("true".to_string()),
                ..ProductsQuery::default()
            },
        )
        .await
        .unwrap();

        let names: Vec<_> = data.products.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Dental chews", "Kidney diet"]);
        assert_eq!(data.products.total, 3);
    }

    #[actix_web::test]
    async fn low_stock_false_lists_everything() {
        let repo = stocked_repo();

        let data = load_products_page(
            &repo,
            &front_desk_user(),
            ProductsQuery {
                low_stock: Some("false".to_string()),
                ..ProductsQuery::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(data.products.items.len(), 3);
    }

    #[actix_web::test]
    async fn toggle_patches_active_flag() {
        let repo = stocked_repo();

        let product = toggle_product(
            &repo,
            &admin_user(),
            2,
            ToggleActiveForm { is_active: false },
        )
        .await
        .unwrap();

        assert!(!product.is_active);
        assert_eq!(
            repo.writes.borrow().as_slice(),
            ["PATCH products/2 is_active=false"]
        );
    }

    #[actix_web::test]
    async fn catalogue_changes_require_admin() {
        let repo = stocked_repo();
        let form = ProductForm {
            name: "Shampoo".to_string(),
            sku: None,
            category: None,
            description: None,
            price: Some("8".to_string()),
            stock_quantity: Some("10".to_string()),
            is_active: Some("on".to_string()),
        };

        let result = create_product(&repo, &front_desk_user(), form).await;

        assert_eq!(result.unwrap_err(), ServiceError::Unauthorized);
        assert!(repo.writes.borrow().is_empty());
    }

    #[actix_web::test]
    async fn negative_stock_is_rejected_before_the_api() {
        let repo = stocked_repo();
        let form = ProductForm {
            name: "Shampoo".to_string(),
            sku: None,
            category: None,
            description: None,
            price: Some("8".to_string()),
            stock_quantity: Some("-4".to_string()),
            is_active: None,
        };

        let result = update_product(&repo, &admin_user(), 1, form).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert!(repo.writes.borrow().is_empty());
    }

    #[actix_web::test]
    async fn inactive_filter_is_sent() {
        let repo = stocked_repo();
        repo.products.borrow_mut()[0].is_active = false;

        let data = load_products_page(
            &repo,
            &front_desk_user(),
            ProductsQuery {
                active: Some("false".to_string()),
                ..ProductsQuery::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(data.products.items.len(), 1);
    }
}
