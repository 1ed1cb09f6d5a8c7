use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Utc;
use tera::{Context, Tera};

use crate::auth::AuthenticatedUser;
use crate::dto::clients::ClientsQuery;
use crate::forms::clients::ClientForm;
use crate::models::config::ServerConfig;
use crate::repository::HttpRepository;
use crate::routes::{
    base_context, existing_id, finish_submission, modal_error, page_error, render_template,
};
use crate::services::clients as clients_service;

#[get("/clients")]
pub async fn show_clients(
    params: web::Query<ClientsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match clients_service::load_clients_page(repo.get_ref(), &user, params.into_inner()).await {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "clients",
                &server_config.auth_service_url,
            );
            context.insert("clients", &data.clients);
            context.insert("filters", &data.filters);

            render_template(&tera, "clients/index.html", &context)
        }
        Err(err) => page_error(err, "clients", "/clients"),
    }
}

#[get("/clients/{client_id}")]
pub async fn show_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match clients_service::load_client_page(repo.get_ref(), &user, client_id.into_inner()).await {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "clients",
                &server_config.auth_service_url,
            );
            let ages = data
                .pets
                .iter()
                .map(|pet| pet.age_years(Utc::now().date_naive()))
                .collect::<Vec<_>>();
            context.insert("client", &data.client);
            context.insert("pets", &data.pets);
            context.insert("pet_ages", &ages);
            context.insert("appointments", &data.recent_appointments);

            render_template(&tera, "clients/client.html", &context)
        }
        Err(err) => page_error(err, "client", "/clients"),
    }
}

/// Client modal body; `0` opens an empty form.
#[post("/clients/modal/{client_id}")]
pub async fn client_modal(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = Context::new();
    if let Some(client_id) = existing_id(client_id.into_inner()) {
        match clients_service::load_client_modal(repo.get_ref(), &user, client_id).await {
            Ok(client) => context.insert("client", &client),
            Err(err) => return modal_error(err, "client"),
        }
    }
    render_template(&tera, "clients/modal_body.html", &context)
}

#[post("/clients/add")]
pub async fn add_client(
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<ClientForm>,
) -> impl Responder {
    let result = clients_service::create_client(repo.get_ref(), &user, form).await;
    let back = match &result {
        Ok(client) => format!("/clients/{}", client.id),
        Err(_) => "/clients".to_string(),
    };
    finish_submission(result, "Client added.", "Failed to add the client.", &back)
}

#[post("/clients/{client_id}/save")]
pub async fn save_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<ClientForm>,
) -> impl Responder {
    let client_id = client_id.into_inner();
    let result = clients_service::update_client(repo.get_ref(), &user, client_id, form).await;
    finish_submission(
        result,
        "Client saved.",
        "Failed to save the client.",
        &format!("/clients/{client_id}"),
    )
}

#[post("/clients/{client_id}/delete")]
pub async fn delete_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    let client_id = client_id.into_inner();
    let result = clients_service::delete_client(repo.get_ref(), &user, client_id).await;
    let back = match &result {
        Ok(()) => "/clients".to_string(),
        Err(_) => format!("/clients/{client_id}"),
    };
    finish_submission(result, "Client deleted.", "Failed to delete the client.", &back)
}
