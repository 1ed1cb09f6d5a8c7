//! JSON endpoints refreshing the booking modal's dropdowns.

use actix_web::{HttpResponse, Responder, get, web};

use crate::auth::AuthenticatedUser;
use crate::dto::api::OptionsQuery;
use crate::repository::HttpRepository;
use crate::services::{ServiceError, booking as booking_service};

fn api_error(err: ServiceError, what: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().finish(),
        ServiceError::TypeConstraint(_) => HttpResponse::BadRequest().finish(),
        err => {
            log::error!("Failed to list {what}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/clients")]
pub async fn api_v1_clients(
    params: web::Query<OptionsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    match booking_service::search_clients_api(repo.get_ref(), &user, params.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => api_error(err, "clients"),
    }
}

#[get("/v1/clients/{client_id}/pets")]
pub async fn api_v1_client_pets(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    match booking_service::list_client_pets_api(repo.get_ref(), &user, client_id.into_inner())
        .await
    {
        Ok(pets) => HttpResponse::Ok().json(pets),
        Err(err) => api_error(err, "pets"),
    }
}

#[get("/v1/services")]
pub async fn api_v1_services(
    params: web::Query<OptionsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    match booking_service::search_services_api(repo.get_ref(), &user, params.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => api_error(err, "services"),
    }
}

#[get("/v1/staff")]
pub async fn api_v1_staff(
    params: web::Query<OptionsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    match booking_service::search_staff_api(repo.get_ref(), &user, params.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => api_error(err, "staff"),
    }
}
