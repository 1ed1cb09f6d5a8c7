use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::{Context, Tera};

use crate::auth::AuthenticatedUser;
use crate::dto::products::ProductsQuery;
use crate::forms::ToggleActiveForm;
use crate::forms::products::ProductForm;
use crate::models::config::ServerConfig;
use crate::repository::HttpRepository;
use crate::routes::{
    base_context, existing_id, finish_submission, modal_error, page_error, render_template,
};
use crate::services::products as products_service;

#[get("/products")]
pub async fn show_products(
    params: web::Query<ProductsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match products_service::load_products_page(repo.get_ref(), &user, params.into_inner()).await {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "products",
                &server_config.auth_service_url,
            );
            context.insert("products", &data.products);
            context.insert("low_stock_threshold", &data.low_stock_threshold);
            context.insert("filters", &data.filters);

            render_template(&tera, "products/index.html", &context)
        }
        Err(err) => page_error(err, "products", "/products"),
    }
}

#[post("/products/modal/{product_id}")]
pub async fn product_modal(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = Context::new();
    if let Some(product_id) = existing_id(product_id.into_inner()) {
        match products_service::load_product_modal(repo.get_ref(), &user, product_id).await {
            Ok(product) => context.insert("product", &product),
            Err(err) => return modal_error(err, "product"),
        }
    }
    render_template(&tera, "products/modal_body.html", &context)
}

#[post("/products/add")]
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<ProductForm>,
) -> impl Responder {
    let result = products_service::create_product(repo.get_ref(), &user, form).await;
    finish_submission(
        result,
        "Product added.",
        "Failed to add the product.",
        "/products",
    )
}

#[post("/products/{product_id}/save")]
pub async fn save_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<ProductForm>,
) -> impl Responder {
    let result =
        products_service::update_product(repo.get_ref(), &user, product_id.into_inner(), form)
            .await;
    finish_submission(
        result,
        "Product saved.",
        "Failed to save the product.",
        "/products",
    )
}

#[post("/products/{product_id}/toggle")]
pub async fn toggle_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<ToggleActiveForm>,
) -> impl Responder {
    let result =
        products_service::toggle_product(repo.get_ref(), &user, product_id.into_inner(), form)
            .await;
    finish_submission(
        result,
        "Product status changed.",
        "Failed to change the product status.",
        "/products",
    )
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    let result =
        products_service::delete_product(repo.get_ref(), &user, product_id.into_inner()).await;
    finish_submission(
        result,
        "Product deleted.",
        "Failed to delete the product.",
        "/products",
    )
}
