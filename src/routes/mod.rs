//! HTTP handlers of the console and the helpers they share.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::auth::AuthenticatedUser;
use crate::services::{ServiceError, ServiceResult};

pub mod api;
pub mod appointments;
pub mod clients;
pub mod clinic_services;
pub mod main;
pub mod pets;
pub mod products;
pub mod staff;

/// Maps a flash message level to the Bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// `303 See Other` to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Context every full page template expects: alerts, the current user, the
/// active navigation entry and the link back to the auth service.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
    home_url: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("current_page", current_page);
    context.insert("home_url", home_url);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Redirect target after a successful save: the page the modal was opened
/// from when it is a local path, otherwise `fallback`.
pub fn return_path<'a>(requested: Option<&'a str>, fallback: &'a str) -> &'a str {
    match requested {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => fallback,
    }
}

/// Flashes the outcome of a modal form submission and redirects to `back`.
///
/// Validation and backend messages are shown as they are; anything unexpected
/// is logged and replaced by `failure`.
pub fn finish_submission<T>(
    result: ServiceResult<T>,
    success: &str,
    failure: &str,
    back: &str,
) -> HttpResponse {
    match result {
        Ok(_) => {
            FlashMessage::success(success).send();
            redirect(back)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(back)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("The record no longer exists.").send();
            redirect(back)
        }
        Err(err) => {
            log::error!("{failure}: {err}");
            FlashMessage::error(failure).send();
            redirect(back)
        }
    }
}

/// Response for a full page whose data could not be loaded.
///
/// Only a bad filter sends the user back to `path`, which carries no query
/// string. A page the backend refuses to list is never redirected to itself.
pub fn page_error(err: ServiceError, page: &str, path: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        ServiceError::Filter(message) => {
            FlashMessage::error(message).send();
            redirect(path)
        }
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Form(message) => {
            log::error!("The API rejected the {page} page request: {message}");
            HttpResponse::BadGateway().finish()
        }
        err => {
            log::error!("Failed to load the {page} page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Response for a modal body that could not be loaded.
pub fn modal_error(err: ServiceError, modal: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            log::error!("Unauthorized to load the {modal} modal.");
            HttpResponse::Forbidden().finish()
        }
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        err => {
            log::error!("Failed to load the {modal} modal: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Modal routes use `0` for "new record".
pub fn existing_id(id: i32) -> Option<i32> {
    (id != 0).then_some(id)
}
