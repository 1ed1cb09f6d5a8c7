use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::{Context, Tera};

use crate::auth::AuthenticatedUser;
use crate::dto::clinic_services::ServicesQuery;
use crate::forms::ToggleActiveForm;
use crate::forms::clinic_services::ServiceForm;
use crate::models::config::ServerConfig;
use crate::repository::HttpRepository;
use crate::routes::{
    base_context, existing_id, finish_submission, modal_error, page_error, render_template,
};
use crate::services::clinic_services as services_service;

#[get("/services")]
pub async fn show_services(
    params: web::Query<ServicesQuery>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match services_service::load_services_page(repo.get_ref(), &user, params.into_inner()).await {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "services",
                &server_config.auth_service_url,
            );
            context.insert("services", &data.services);
            context.insert("filters", &data.filters);

            render_template(&tera, "services/index.html", &context)
        }
        Err(err) => page_error(err, "services", "/services"),
    }
}

#[post("/services/modal/{service_id}")]
pub async fn service_modal(
    service_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = Context::new();
    if let Some(service_id) = existing_id(service_id.into_inner()) {
        match services_service::load_service_modal(repo.get_ref(), &user, service_id).await {
            Ok(service) => context.insert("service", &service),
            Err(err) => return modal_error(err, "service"),
        }
    }
    render_template(&tera, "services/modal_body.html", &context)
}

#[post("/services/add")]
pub async fn add_service(
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<ServiceForm>,
) -> impl Responder {
    let result = services_service::create_service(repo.get_ref(), &user, form).await;
    finish_submission(
        result,
        "Service added.",
        "Failed to add the service.",
        "/services",
    )
}

#[post("/services/{service_id}/save")]
pub async fn save_service(
    service_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<ServiceForm>,
) -> impl Responder {
    let result =
        services_service::update_service(repo.get_ref(), &user, service_id.into_inner(), form)
            .await;
    finish_submission(
        result,
        "Service saved.",
        "Failed to save the service.",
        "/services",
    )
}

#[post("/services/{service_id}/toggle")]
pub async fn toggle_service(
    service_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<ToggleActiveForm>,
) -> impl Responder {
    let result =
        services_service::toggle_service(repo.get_ref(), &user, service_id.into_inner(), form)
            .await;
    finish_submission(
        result,
        "Service status changed.",
        "Failed to change the service status.",
        "/services",
    )
}

#[post("/services/{service_id}/delete")]
pub async fn delete_service(
    service_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    let result =
        services_service::delete_service(repo.get_ref(), &user, service_id.into_inner()).await;
    finish_submission(
        result,
        "Service deleted.",
        "Failed to delete the service.",
        "/services",
    )
}
