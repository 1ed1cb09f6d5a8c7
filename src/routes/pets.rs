use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::{Context, Tera};

use crate::auth::AuthenticatedUser;
use crate::dto::pets::PetsQuery;
use crate::forms::pets::PetForm;
use crate::models::config::ServerConfig;
use crate::repository::HttpRepository;
use crate::routes::{
    base_context, existing_id, finish_submission, modal_error, page_error, render_template,
    return_path,
};
use crate::services::pets as pets_service;

#[derive(Deserialize)]
struct PetModalParams {
    client_id: Option<i32>,
}

#[get("/pets")]
pub async fn show_pets(
    params: web::Query<PetsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match pets_service::load_pets_page(repo.get_ref(), &user, params.into_inner()).await {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "pets",
                &server_config.auth_service_url,
            );
            context.insert("pets", &data.pets);
            context.insert("filters", &data.filters);

            render_template(&tera, "pets/index.html", &context)
        }
        Err(err) => page_error(err, "pets", "/pets"),
    }
}

/// Pet modal body; `0` opens an empty form, optionally for `?client_id=`.
#[post("/pets/modal/{pet_id}")]
pub async fn pet_modal(
    pet_id: web::Path<i32>,
    params: web::Query<PetModalParams>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match pets_service::load_pet_modal(
        repo.get_ref(),
        &user,
        existing_id(pet_id.into_inner()),
        params.client_id,
    )
    .await
    {
        Ok(data) => {
            let mut context = Context::new();
            context.insert("pet", &data.pet);
            context.insert("owner", &data.owner);
            render_template(&tera, "pets/modal_body.html", &context)
        }
        Err(err) => modal_error(err, "pet"),
    }
}

#[post("/pets/add")]
pub async fn add_pet(
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<PetForm>,
) -> impl Responder {
    let back = return_path(form.return_to.as_deref(), "/pets").to_string();
    let result = pets_service::create_pet(repo.get_ref(), &user, form).await;
    finish_submission(result, "Pet added.", "Failed to add the pet.", &back)
}

#[post("/pets/{pet_id}/save")]
pub async fn save_pet(
    pet_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<PetForm>,
) -> impl Responder {
    let back = return_path(form.return_to.as_deref(), "/pets").to_string();
    let result = pets_service::update_pet(repo.get_ref(), &user, pet_id.into_inner(), form).await;
    finish_submission(result, "Pet saved.", "Failed to save the pet.", &back)
}

#[post("/pets/{pet_id}/delete")]
pub async fn delete_pet(
    pet_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    let result = pets_service::delete_pet(repo.get_ref(), &user, pet_id.into_inner()).await;
    finish_submission(result, "Pet deleted.", "Failed to delete the pet.", "/pets")
}
