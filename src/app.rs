use crate::handlers::{self, admin, booking};
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(booking::index))
        .route("/slots", get(booking::day_panel))
        .route("/book", get(booking::show_booking).post(booking::submit_booking))
        .route("/admin", get(admin::appointments))
        .route("/admin/appointments/:id", get(admin::appointment_details))
        .route("/admin/appointments/:id/cancel", post(admin::cancel_appointment))
        .route("/admin/services", get(admin::services).post(admin::create_service))
        .route("/admin/services/:id", post(admin::update_service))
        .route("/admin/services/:id/delete", post(admin::delete_service))
        .route("/admin/availability", get(admin::availability).post(admin::create_availability))
        .route("/admin/availability/:id", post(admin::update_availability))
        .route("/admin/availability/:id/delete", post(admin::delete_availability))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(state)
}
