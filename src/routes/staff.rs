use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::{Context, Tera};

use crate::auth::AuthenticatedUser;
use crate::dto::staff::StaffQuery;
use crate::forms::ToggleActiveForm;
use crate::forms::staff::UserForm;
use crate::models::config::ServerConfig;
use crate::repository::HttpRepository;
use crate::routes::{
    base_context, existing_id, finish_submission, modal_error, page_error, render_template,
};
use crate::services::staff::{self as staff_service, STAFF_ROLES};

#[get("/staff")]
pub async fn show_staff(
    params: web::Query<StaffQuery>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match staff_service::load_staff_page(repo.get_ref(), &user, params.into_inner()).await {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "staff",
                &server_config.auth_service_url,
            );
            context.insert("users", &data.users);
            context.insert("roles", &data.roles);
            context.insert("filters", &data.filters);

            render_template(&tera, "staff/index.html", &context)
        }
        Err(err) => page_error(err, "staff", "/staff"),
    }
}

#[post("/staff/modal/{user_id}")]
pub async fn staff_modal(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = Context::new();
    context.insert("roles", &STAFF_ROLES);
    if let Some(user_id) = existing_id(user_id.into_inner()) {
        match staff_service::load_user_modal(repo.get_ref(), &user, user_id).await {
            Ok(member) => context.insert("member", &member),
            Err(err) => return modal_error(err, "staff"),
        }
    }
    render_template(&tera, "staff/modal_body.html", &context)
}

#[post("/staff/add")]
pub async fn add_staff(
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<UserForm>,
) -> impl Responder {
    let result = staff_service::create_user(repo.get_ref(), &user, form).await;
    finish_submission(
        result,
        "Staff member added.",
        "Failed to add the staff member.",
        "/staff",
    )
}

#[post("/staff/{user_id}/save")]
pub async fn save_staff(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<UserForm>,
) -> impl Responder {
    let result = staff_service::update_user(repo.get_ref(), &user, user_id.into_inner(), form).await;
    finish_submission(
        result,
        "Staff member saved.",
        "Failed to save the staff member.",
        "/staff",
    )
}

#[post("/staff/{user_id}/toggle")]
pub async fn toggle_staff(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<ToggleActiveForm>,
) -> impl Responder {
    let result = staff_service::toggle_user(repo.get_ref(), &user, user_id.into_inner(), form).await;
    finish_submission(
        result,
        "Staff member status changed.",
        "Failed to change the staff member status.",
        "/staff",
    )
}

#[post("/staff/{user_id}/delete")]
pub async fn delete_staff(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    let result = staff_service::delete_user(repo.get_ref(), &user, user_id.into_inner()).await;
    finish_submission(
        result,
        "Staff member deleted.",
        "Failed to delete the staff member.",
        "/staff",
    )
}
