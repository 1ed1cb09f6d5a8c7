#![allow(async_fn_in_trait)]

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::middleware::RedirectUnauthorized;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::HttpRepository;
#[cfg(feature = "server")]
use crate::routes::api::{api_v1_client_pets, api_v1_clients, api_v1_services, api_v1_staff};
#[cfg(feature = "server")]
use crate::routes::appointments::{
    add_appointment, appointment_modal, change_appointment_status, delete_appointment,
    save_appointment, show_appointments,
};
#[cfg(feature = "server")]
use crate::routes::clients::{
    add_client, client_modal, delete_client, save_client, show_client, show_clients,
};
#[cfg(feature = "server")]
use crate::routes::clinic_services::{
    add_service, delete_service, save_service, service_modal, show_services, toggle_service,
};
#[cfg(feature = "server")]
use crate::routes::main::{logout, not_assigned, show_index};
#[cfg(feature = "server")]
use crate::routes::pets::{add_pet, delete_pet, pet_modal, save_pet, show_pets};
#[cfg(feature = "server")]
use crate::routes::products::{
    add_product, delete_product, product_modal, save_product, show_products, toggle_product,
};
#[cfg(feature = "server")]
use crate::routes::staff::{
    add_staff, delete_staff, save_staff, show_staff, staff_modal, toggle_staff,
};

pub mod domain;
pub mod models;

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod pagination;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

pub const SERVICE_ACCESS_ROLE: &str = "clinic";
pub const SERVICE_ADMIN_ROLE: &str = "clinic_admin";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = HttpRepository::from_config(&server_config)
        .map_err(|e| std::io::Error::other(format!("Failed to build the API client: {e}")))?;

    log::info!("Using clinic API at {}", repo.base_url());

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(not_assigned)
            .service(
                web::scope("/api")
                    .service(api_v1_clients)
                    .service(api_v1_client_pets)
                    .service(api_v1_services)
                    .service(api_v1_staff),
            )
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_index)
                    .service(show_appointments)
                    .service(appointment_modal)
                    .service(add_appointment)
                    .service(save_appointment)
                    .service(change_appointment_status)
                    .service(delete_appointment)
                    .service(show_clients)
                    .service(client_modal)
                    .service(add_client)
                    .service(show_client)
                    .service(save_client)
                    .service(delete_client)
                    .service(show_pets)
                    .service(pet_modal)
                    .service(add_pet)
                    .service(save_pet)
                    .service(delete_pet)
                    .service(show_products)
                    .service(product_modal)
                    .service(add_product)
                    .service(save_product)
                    .service(toggle_product)
                    .service(delete_product)
                    .service(show_services)
                    .service(service_modal)
                    .service(add_service)
                    .service(save_service)
                    .service(toggle_service)
                    .service(delete_service)
                    .service(show_staff)
                    .service(staff_modal)
                    .service(add_staff)
                    .service(save_staff)
                    .service(toggle_staff)
                    .service(delete_staff)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
