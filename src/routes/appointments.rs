use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::{Context, Tera};

use crate::auth::AuthenticatedUser;
use crate::dto::appointments::{AppointmentsQuery, BookingQuery};
use crate::forms::appointments::{AppointmentForm, AppointmentStatusForm};
use crate::models::config::ServerConfig;
use crate::repository::HttpRepository;
use crate::routes::{
    base_context, existing_id, finish_submission, modal_error, page_error, render_template,
    return_path,
};
use crate::services::appointments as appointments_service;

#[get("/appointments")]
pub async fn show_appointments(
    params: web::Query<AppointmentsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match appointments_service::load_appointments_page(repo.get_ref(), &user, params.into_inner())
        .await
    {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "appointments",
                &server_config.auth_service_url,
            );
            context.insert("appointments", &data.appointments);
            context.insert("veterinarians", &data.veterinarians);
            context.insert("statuses", data.statuses);
            context.insert("filters", &data.filters);

            render_template(&tera, "appointments/index.html", &context)
        }
        Err(err) => page_error(err, "appointments", "/appointments"),
    }
}

/// Booking modal body. Re-requested with the current dropdown state whenever a
/// dependent field changes; `0` opens an empty booking.
#[post("/appointments/modal/{appointment_id}")]
pub async fn appointment_modal(
    appointment_id: web::Path<i32>,
    params: web::Query<BookingQuery>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let booking = params.into_inner();
    match appointments_service::load_appointment_modal(
        repo.get_ref(),
        &user,
        existing_id(appointment_id.into_inner()),
        booking.clone(),
    )
    .await
    {
        Ok(data) => {
            let mut context = Context::new();
            context.insert("appointment", &data.appointment);
            context.insert("options", &data.options);
            context.insert("statuses", data.statuses);
            context.insert("booking", &booking);
            render_template(&tera, "appointments/modal_body.html", &context)
        }
        Err(err) => modal_error(err, "appointment"),
    }
}

#[post("/appointments/add")]
pub async fn add_appointment(
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<AppointmentForm>,
) -> impl Responder {
    let back = return_path(form.return_to.as_deref(), "/appointments").to_string();
    let result = appointments_service::create_appointment(repo.get_ref(), &user, form).await;
    finish_submission(
        result,
        "Appointment booked.",
        "Failed to book the appointment.",
        &back,
    )
}

#[post("/appointments/{appointment_id}/save")]
pub async fn save_appointment(
    appointment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<AppointmentForm>,
) -> impl Responder {
    let back = return_path(form.return_to.as_deref(), "/appointments").to_string();
    let result = appointments_service::update_appointment(
        repo.get_ref(),
        &user,
        appointment_id.into_inner(),
        form,
    )
    .await;
    finish_submission(
        result,
        "Appointment updated.",
        "Failed to update the appointment.",
        &back,
    )
}

#[post("/appointments/{appointment_id}/status")]
pub async fn change_appointment_status(
    appointment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
    web::Form(form): web::Form<AppointmentStatusForm>,
) -> impl Responder {
    let result = appointments_service::change_appointment_status(
        repo.get_ref(),
        &user,
        appointment_id.into_inner(),
        form,
    )
    .await;
    finish_submission(
        result,
        "Appointment status changed.",
        "Failed to change the appointment status.",
        "/appointments",
    )
}

#[post("/appointments/{appointment_id}/delete")]
pub async fn delete_appointment(
    appointment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<HttpRepository>,
) -> impl Responder {
    let result =
        appointments_service::delete_appointment(repo.get_ref(), &user, appointment_id.into_inner())
            .await;
    finish_submission(
        result,
        "Appointment deleted.",
        "Failed to delete the appointment.",
        "/appointments",
    )
}
