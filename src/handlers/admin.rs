use crate::admin::{AppointmentFilter, AvailabilityInput, FormState, Listing, ServiceInput};
use crate::errors::AppError;
use crate::forms::checkbox;
use crate::handlers::{load_services, parse_id};
use crate::i18n::Messages;
use crate::models::{AppointmentQuery, AvailabilityRule};
use crate::state::AppState;
use crate::ui::admin::{
    AppointmentDetailsPage, AppointmentDetailsView, AppointmentsPage, AppointmentsView,
    AvailabilityPage, AvailabilityView, ServicesPage, ServicesView,
};
use crate::ui::{self, Notice, NoticeLevel, href};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct AppointmentsQuery {
    date: Option<String>,
    status: Option<String>,
    notice: Option<String>,
}

pub async fn appointments(
    State(state): State<AppState>,
    Query(query): Query<AppointmentsQuery>,
) -> Response {
    let filter = AppointmentFilter::parse(query.date.as_deref(), query.status.as_deref());
    let notices = Notice::from_query(query.notice.as_deref(), state.page.messages());
    appointments_page(&state, filter, notices).await
}

async fn appointments_page(state: &AppState, filter: AppointmentFilter, notices: Vec<Notice>) -> Response {
    let messages = state.page.messages();
    let appointments = Listing::from_result(
        state.api.list_appointments(&filter.query()).await,
        messages.appointments_failed,
        messages,
    );
    let page = AppointmentsPage {
        filter,
        appointments,
        notices,
    };
    ui::render(StatusCode::OK, &AppointmentsView::new(&state.page, page))
}

pub async fn appointment_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let messages = state.page.messages();

    let (appointment, notices) = match state.api.list_appointments(&AppointmentQuery::default()).await {
        Ok(appointments) => (appointments.into_iter().find(|item| item.id == id), Vec::new()),
        Err(err) => {
            warn!(id, "could not load appointment: {err}");
            (None, vec![Notice::error(err.user_message(messages.appointments_failed, messages))])
        }
    };
    let status = if appointment.is_none() && notices.is_empty() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };

    let page = AppointmentDetailsPage { appointment, notices };
    Ok(ui::render(status, &AppointmentDetailsView::new(&state.page, page)))
}

/// Cancel request. `date` and `status` echo the list filter the action was
/// taken from.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CancelForm {
    cancel_all: Option<String>,
    date: Option<String>,
    status: Option<String>,
}

impl CancelForm {
    fn filter(&self) -> AppointmentFilter {
        AppointmentFilter::parse(self.date.as_deref(), self.status.as_deref())
    }

    /// Appointment list location with the submitted filter preserved.
    fn back_to_list(&self, notice: &str) -> String {
        let mut params = Vec::new();
        for (name, value) in [("date", &self.date), ("status", &self.status)] {
            if let Some(value) = value.as_deref().map(str::trim).filter(|value| !value.is_empty()) {
                params.push((name, value));
            }
        }
        params.push(("notice", notice));
        href("/admin", &params)
    }
}

pub async fn cancel_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<CancelForm>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let messages = state.page.messages();
    let cancel_all = checkbox(&form.cancel_all);

    match state.api.cancel_appointment(id, cancel_all).await {
        Ok(()) => {
            info!(id, cancel_all, "appointment cancelled");
            Ok(Redirect::to(&form.back_to_list("appointment_cancelled")).into_response())
        }
        Err(err) => {
            warn!(id, "cancel failed: {err}");
            let notice = Notice::error(err.user_message(messages.cancel_failed, messages));
            Ok(appointments_page(&state, form.filter(), vec![notice]).await)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PanelQuery {
    new: Option<String>,
    edit: Option<String>,
    notice: Option<String>,
}

impl PanelQuery {
    fn edit_id(&self) -> Option<i64> {
        self.edit.as_deref().and_then(|raw| parse_id(raw).ok())
    }
}

fn missing_record(messages: &Messages) -> Notice {
    Notice {
        level: NoticeLevel::Warning,
        message: messages.record_missing.to_string(),
    }
}

pub async fn services(State(state): State<AppState>, Query(query): Query<PanelQuery>) -> Response {
    let messages = state.page.messages();
    let services = load_services(&state.api, messages).await;
    let mut notices = Notice::from_query(query.notice.as_deref(), messages);

    let form = match query.edit_id() {
        Some(id) => {
            let found = services
                .items()
                .iter()
                .find(|service| service.id == id)
                .map(|service| FormState::new(Some(id), ServiceInput::from_service(service)));
            if found.is_none() && matches!(services, Listing::Ready(_)) {
                notices.push(missing_record(messages));
            }
            found
        }
        None => query.new.is_some().then(|| FormState::new(None, ServiceInput::blank())),
    };

    let page = ServicesPage {
        services,
        form,
        notices,
    };
    ui::render(StatusCode::OK, &ServicesView::new(&state.page, page))
}

async fn services_page(
    state: &AppState,
    status: StatusCode,
    form: Option<FormState<ServiceInput>>,
    notices: Vec<Notice>,
) -> Response {
    let services = load_services(&state.api, state.page.messages()).await;
    let page = ServicesPage {
        services,
        form,
        notices,
    };
    ui::render(status, &ServicesView::new(&state.page, page))
}

pub async fn create_service(State(state): State<AppState>, Form(input): Form<ServiceInput>) -> Response {
    save_service(&state, None, input).await
}

pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<ServiceInput>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    Ok(save_service(&state, Some(id), input).await)
}

async fn save_service(state: &AppState, editing: Option<i64>, input: ServiceInput) -> Response {
    let messages = state.page.messages();
    let payload = match input.validate(messages) {
        Ok(payload) => payload,
        Err(errors) => {
            let form = FormState::new(editing, input).with_errors(errors);
            return services_page(state, StatusCode::UNPROCESSABLE_ENTITY, Some(form), Vec::new()).await;
        }
    };

    let result = match editing {
        Some(id) => state.api.update_service(id, &payload).await,
        None => state.api.create_service(&payload).await,
    };
    match result {
        Ok(()) => {
            info!(?editing, name = %payload.name, "service saved");
            Redirect::to(&href("/admin/services", &[("notice", "service_saved")])).into_response()
        }
        Err(err) => {
            warn!(?editing, "saving service failed: {err}");
            let notice = Notice::error(err.user_message(messages.service_save_failed, messages));
            let form = FormState::new(editing, input);
            services_page(state, StatusCode::OK, Some(form), vec![notice]).await
        }
    }
}

pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let messages = state.page.messages();

    match state.api.delete_service(id).await {
        Ok(()) => {
            info!(id, "service deleted");
            Ok(Redirect::to(&href("/admin/services", &[("notice", "service_deleted")])).into_response())
        }
        Err(err) => {
            warn!(id, "deleting service failed: {err}");
            let notice = Notice::error(err.user_message(messages.service_delete_failed, messages));
            Ok(services_page(&state, StatusCode::OK, None, vec![notice]).await)
        }
    }
}

async fn load_rules(state: &AppState) -> Listing<AvailabilityRule> {
    let messages = state.page.messages();
    Listing::from_result(state.api.list_availability().await, messages.availability_failed, messages)
}

pub async fn availability(State(state): State<AppState>, Query(query): Query<PanelQuery>) -> Response {
    let messages = state.page.messages();
    let rules = load_rules(&state).await;
    let mut notices = Notice::from_query(query.notice.as_deref(), messages);

    let form = match query.edit_id() {
        Some(id) => {
            let found = rules
                .items()
                .iter()
                .find(|rule| rule.id == id)
                .map(|rule| FormState::new(Some(id), AvailabilityInput::from_rule(rule)));
            if found.is_none() && matches!(rules, Listing::Ready(_)) {
                notices.push(missing_record(messages));
            }
            found
        }
        None => query.new.is_some().then(|| FormState::new(None, AvailabilityInput::blank())),
    };

    let page = AvailabilityPage {
        rules,
        form,
        notices,
    };
    ui::render(StatusCode::OK, &AvailabilityView::new(&state.page, page))
}

async fn availability_page(
    state: &AppState,
    status: StatusCode,
    form: Option<FormState<AvailabilityInput>>,
    notices: Vec<Notice>,
) -> Response {
    let rules = load_rules(state).await;
    let page = AvailabilityPage { rules, form, notices };
    ui::render(status, &AvailabilityView::new(&state.page, page))
}

pub async fn create_availability(
    State(state): State<AppState>,
    Form(input): Form<AvailabilityInput>,
) -> Response {
    save_availability(&state, None, input).await
}

pub async fn update_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<AvailabilityInput>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    Ok(save_availability(&state, Some(id), input).await)
}

async fn save_availability(state: &AppState, editing: Option<i64>, input: AvailabilityInput) -> Response {
    let messages = state.page.messages();
    let payload = match input.validate(messages) {
        Ok(payload) => payload,
        Err(errors) => {
            let form = FormState::new(editing, input).with_errors(errors);
            return availability_page(state, StatusCode::UNPROCESSABLE_ENTITY, Some(form), Vec::new()).await;
        }
    };

    let result = match editing {
        Some(id) => state.api.update_availability(id, &payload).await,
        None => state.api.create_availability(&payload).await,
    };
    match result {
        Ok(()) => {
            info!(?editing, day = payload.day_of_week, "availability saved");
            Redirect::to(&href("/admin/availability", &[("notice", "availability_saved")])).into_response()
        }
        Err(err) => {
            warn!(?editing, "saving availability failed: {err}");
            let notice = Notice::error(err.user_message(messages.availability_save_failed, messages));
            let form = FormState::new(editing, input);
            availability_page(state, StatusCode::OK, Some(form), vec![notice]).await
        }
    }
}

pub async fn delete_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let messages = state.page.messages();

    match state.api.delete_availability(id).await {
        Ok(()) => {
            info!(id, "availability deleted");
            Ok(Redirect::to(&href("/admin/availability", &[("notice", "availability_deleted")])).into_response())
        }
        Err(err) => {
            warn!(id, "deleting availability failed: {err}");
            let notice = Notice::error(err.user_message(messages.availability_delete_failed, messages));
            Ok(availability_page(&state, StatusCode::OK, None, vec![notice]).await)
        }
    }
}
