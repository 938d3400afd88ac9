//! Admin pages: appointments, services and availability.

use crate::admin::{
    AppointmentFilter, AvailabilityInput, FormState, Listing, ServiceInput, StatusFilter,
    series_preview,
};
use crate::dates::{date_key, long_date};
use crate::i18n::Messages;
use crate::models::{Appointment, AppointmentStatus, AvailabilityRule, Service};
use crate::ui::{
    FieldView, InlineAlert, Notice, NoticeLevel, OptionView, PageContext, Shell, href, price,
    recurrence_label,
};
use askama::Template;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminTab {
    Appointments,
    Services,
    Availability,
}

impl AdminTab {
    const ALL: [AdminTab; 3] = [Self::Appointments, Self::Services, Self::Availability];

    fn path(self) -> &'static str {
        match self {
            Self::Appointments => "/admin",
            Self::Services => "/admin/services",
            Self::Availability => "/admin/availability",
        }
    }

    fn label(self, messages: &Messages) -> &'static str {
        match self {
            Self::Appointments => messages.tab_appointments,
            Self::Services => messages.tab_services,
            Self::Availability => messages.tab_availability,
        }
    }
}

pub struct TabView {
    href: &'static str,
    label: &'static str,
    active: bool,
}

fn tabs(messages: &Messages, active: AdminTab) -> Vec<TabView> {
    AdminTab::ALL
        .into_iter()
        .map(|tab| TabView {
            href: tab.path(),
            label: tab.label(messages),
            active: tab == active,
        })
        .collect()
}

fn admin_shell(ctx: &PageContext, active: AdminTab, notices: Vec<Notice>) -> Shell {
    let messages = ctx.messages();
    let title = format!("{} · {}", active.label(messages), messages.admin_title);
    Shell::new(ctx, title, notices)
}

/// Inline notice for a list that failed to load or has nothing to show.
fn list_alert<T>(listing: &Listing<T>, empty: &'static str) -> Option<InlineAlert> {
    match listing {
        Listing::Failed(message) => Some(InlineAlert::new(NoticeLevel::Error, message.as_str())),
        Listing::Ready(items) if items.is_empty() => Some(InlineAlert::new(NoticeLevel::Info, empty)),
        Listing::Ready(_) => None,
    }
}

fn status_label(status: AppointmentStatus, messages: &Messages) -> &'static str {
    match status {
        AppointmentStatus::Active => messages.status_active,
        AppointmentStatus::Cancelled => messages.status_cancelled,
        AppointmentStatus::Completed => messages.status_completed,
    }
}

fn is_part_of_series(appointment: &Appointment) -> bool {
    appointment.recurrence.is_recurring() || appointment.parent_appointment_id.is_some()
}

pub struct AppointmentsPage {
    pub filter: AppointmentFilter,
    pub appointments: Listing<Appointment>,
    pub notices: Vec<Notice>,
}

pub struct AppointmentRow {
    id: i64,
    date: String,
    time: String,
    client: String,
    phone: String,
    service: String,
    status: &'static str,
    status_label: &'static str,
    recurrence_label: Option<&'static str>,
    cancellable: bool,
}

impl AppointmentRow {
    fn new(messages: &Messages, appointment: &Appointment) -> Self {
        Self {
            id: appointment.id,
            date: date_key(appointment.date),
            time: appointment.time.clone(),
            client: appointment.client.clone(),
            phone: appointment.phone.clone(),
            service: appointment
                .service_name
                .clone()
                .unwrap_or_else(|| messages.not_applicable.to_string()),
            status: appointment.status.as_str(),
            status_label: status_label(appointment.status, messages),
            recurrence_label: appointment
                .recurrence
                .is_recurring()
                .then(|| recurrence_label(appointment.recurrence, messages)),
            cancellable: appointment.status == AppointmentStatus::Active,
        }
    }
}

/// Appointment list. Cancel forms carry the current filter so the list
/// comes back the same way after the action.
#[derive(Template)]
#[template(path = "admin/appointments.html")]
pub struct AppointmentsView {
    shell: Shell,
    m: &'static Messages,
    tabs: Vec<TabView>,
    filter_date: String,
    filter_status: &'static str,
    status_options: Vec<OptionView>,
    alert: Option<InlineAlert>,
    rows: Vec<AppointmentRow>,
}

impl AppointmentsView {
    pub fn new(ctx: &PageContext, page: AppointmentsPage) -> Self {
        let messages = ctx.messages();
        let filter = page.filter;
        let status_options = [
            (StatusFilter::All, messages.status_all),
            (StatusFilter::Only(AppointmentStatus::Active), messages.status_active),
            (StatusFilter::Only(AppointmentStatus::Cancelled), messages.status_cancelled),
            (StatusFilter::Only(AppointmentStatus::Completed), messages.status_completed),
        ]
        .into_iter()
        .map(|(status, label)| OptionView::new(status.as_param(), label, status == filter.status))
        .collect();

        Self {
            shell: admin_shell(ctx, AdminTab::Appointments, page.notices),
            m: messages,
            tabs: tabs(messages, AdminTab::Appointments),
            filter_date: filter.date.map(date_key).unwrap_or_default(),
            filter_status: filter.status.as_param(),
            status_options,
            alert: list_alert(&page.appointments, messages.appointments_empty),
            rows: page
                .appointments
                .items()
                .iter()
                .map(|appointment| AppointmentRow::new(messages, appointment))
                .collect(),
        }
    }
}

pub struct AppointmentDetailsPage {
    pub appointment: Option<Appointment>,
    pub notices: Vec<Notice>,
}

pub struct DetailRow {
    label: &'static str,
    value: String,
}

pub struct SeriesDate {
    key: String,
    display: String,
}

pub struct AppointmentDetails {
    id: i64,
    rows: Vec<DetailRow>,
    series: Vec<SeriesDate>,
    cancellable: bool,
    offer_series: bool,
}

impl AppointmentDetails {
    fn new(ctx: &PageContext, appointment: &Appointment) -> Self {
        let messages = ctx.messages();
        let not_applicable = || messages.not_applicable.to_string();
        let row = |label, value| DetailRow { label, value };

        let mut rows = vec![
            row(messages.col_date, long_date(appointment.date, ctx.locale)),
            row(messages.col_time, appointment.time.clone()),
            row(messages.col_client, appointment.client.clone()),
            row(messages.col_phone, appointment.phone.clone()),
            row(
                messages.col_service,
                appointment.service_name.clone().unwrap_or_else(not_applicable),
            ),
            row(messages.col_status, status_label(appointment.status, messages).to_string()),
            row(
                messages.recurrence_label,
                recurrence_label(appointment.recurrence, messages).to_string(),
            ),
        ];
        if let Some(end) = appointment.recurrence_end.filter(|_| appointment.recurrence.is_recurring()) {
            rows.push(row(messages.recurrence_until, long_date(end, ctx.locale)));
        }
        rows.push(row(
            messages.notes_label,
            appointment
                .notes
                .clone()
                .filter(|notes| !notes.trim().is_empty())
                .unwrap_or_else(not_applicable),
        ));

        Self {
            id: appointment.id,
            rows,
            series: series_preview(appointment)
                .into_iter()
                .map(|date| SeriesDate {
                    key: date_key(date),
                    display: long_date(date, ctx.locale),
                })
                .collect(),
            cancellable: appointment.status == AppointmentStatus::Active,
            offer_series: is_part_of_series(appointment),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/appointment_details.html")]
pub struct AppointmentDetailsView {
    shell: Shell,
    m: &'static Messages,
    tabs: Vec<TabView>,
    details: Option<AppointmentDetails>,
}

impl AppointmentDetailsView {
    pub fn new(ctx: &PageContext, page: AppointmentDetailsPage) -> Self {
        let messages = ctx.messages();
        Self {
            shell: admin_shell(ctx, AdminTab::Appointments, page.notices),
            m: messages,
            tabs: tabs(messages, AdminTab::Appointments),
            details: page
                .appointment
                .as_ref()
                .map(|appointment| AppointmentDetails::new(ctx, appointment)),
        }
    }
}

pub struct ServicesPage {
    pub services: Listing<Service>,
    pub form: Option<FormState<ServiceInput>>,
    pub notices: Vec<Notice>,
}

pub struct ServiceRow {
    id: i64,
    name: String,
    description: String,
    duration: String,
    price: String,
    state: &'static str,
    state_label: &'static str,
    edit_href: String,
}

impl ServiceRow {
    fn new(messages: &Messages, service: &Service) -> Self {
        let (state, state_label) = if service.active {
            ("active", messages.active)
        } else {
            ("disabled", messages.inactive)
        };
        Self {
            id: service.id,
            name: service.name.clone(),
            description: service
                .description
                .clone()
                .unwrap_or_else(|| messages.not_applicable.to_string()),
            duration: format!("{} {}", service.duration, messages.minutes),
            price: price(service.price),
            state,
            state_label,
            edit_href: href("/admin/services", &[("edit", service.id.to_string().as_str())]),
        }
    }
}

pub struct ServiceFormView {
    title: &'static str,
    action: String,
    invalid: bool,
    name: FieldView,
    description: FieldView,
    duration: FieldView,
    price: FieldView,
    active: bool,
}

impl ServiceFormView {
    fn new(messages: &Messages, form: &FormState<ServiceInput>) -> Self {
        let (title, action) = match form.editing {
            Some(id) => (messages.edit_service, format!("/admin/services/{id}")),
            None => (messages.new_service, "/admin/services".to_string()),
        };
        let input = &form.input;
        let errors = &form.errors;
        Self {
            title,
            action,
            invalid: !errors.is_empty(),
            name: FieldView::new(messages.col_name, "name", input.name.as_str(), errors),
            description: FieldView::new(messages.col_description, "description", input.description.as_str(), errors),
            duration: FieldView::new(messages.col_duration, "duration", input.duration.as_str(), errors),
            price: FieldView::new(messages.col_price, "price", input.price.as_str(), errors),
            active: input.is_active(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/services.html")]
pub struct ServicesView {
    shell: Shell,
    m: &'static Messages,
    tabs: Vec<TabView>,
    form: Option<ServiceFormView>,
    alert: Option<InlineAlert>,
    rows: Vec<ServiceRow>,
}

impl ServicesView {
    pub fn new(ctx: &PageContext, page: ServicesPage) -> Self {
        let messages = ctx.messages();
        Self {
            shell: admin_shell(ctx, AdminTab::Services, page.notices),
            m: messages,
            tabs: tabs(messages, AdminTab::Services),
            form: page.form.as_ref().map(|form| ServiceFormView::new(messages, form)),
            alert: list_alert(&page.services, messages.services_empty),
            rows: page
                .services
                .items()
                .iter()
                .map(|service| ServiceRow::new(messages, service))
                .collect(),
        }
    }
}

pub struct AvailabilityPage {
    pub rules: Listing<AvailabilityRule>,
    pub form: Option<FormState<AvailabilityInput>>,
    pub notices: Vec<Notice>,
}

pub struct AvailabilityCard {
    id: i64,
    day: &'static str,
    summary: String,
    enabled: bool,
    edit_href: String,
}

impl AvailabilityCard {
    fn new(messages: &Messages, rule: &AvailabilityRule) -> Self {
        Self {
            id: rule.id,
            day: messages.weekday(rule.day_of_week).unwrap_or(messages.not_applicable),
            summary: format!(
                "{} - {} · {} {}",
                rule.start_time, rule.end_time, rule.duration_minutes, messages.minutes
            ),
            enabled: rule.enabled,
            edit_href: href("/admin/availability", &[("edit", rule.id.to_string().as_str())]),
        }
    }
}

pub struct AvailabilityFormView {
    title: &'static str,
    action: String,
    invalid: bool,
    day: FieldView,
    days: Vec<OptionView>,
    start: FieldView,
    end: FieldView,
    duration: FieldView,
    enabled: bool,
}

impl AvailabilityFormView {
    fn new(messages: &Messages, form: &FormState<AvailabilityInput>) -> Self {
        let (title, action) = match form.editing {
            Some(id) => (messages.edit_availability, format!("/admin/availability/{id}")),
            None => (messages.new_availability, "/admin/availability".to_string()),
        };
        let input = &form.input;
        let errors = &form.errors;
        let days = messages
            .weekdays
            .iter()
            .enumerate()
            .map(|(day, name)| {
                let value = day.to_string();
                let selected = input.day_of_week.trim() == value;
                OptionView::new(value, *name, selected)
            })
            .collect();
        Self {
            title,
            action,
            invalid: !errors.is_empty(),
            day: FieldView::new(messages.day_label, "day_of_week", input.day_of_week.as_str(), errors),
            days,
            start: FieldView::new(messages.start_label, "start_time", input.start_time.as_str(), errors),
            end: FieldView::new(messages.end_label, "end_time", input.end_time.as_str(), errors),
            duration: FieldView::new(
                messages.slot_duration_label,
                "duration_minutes",
                input.duration_minutes.as_str(),
                errors,
            ),
            enabled: input.is_enabled(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/availability.html")]
pub struct AvailabilityView {
    shell: Shell,
    m: &'static Messages,
    tabs: Vec<TabView>,
    form: Option<AvailabilityFormView>,
    alert: Option<InlineAlert>,
    cards: Vec<AvailabilityCard>,
}

impl AvailabilityView {
    pub fn new(ctx: &PageContext, page: AvailabilityPage) -> Self {
        let messages = ctx.messages();
        Self {
            shell: admin_shell(ctx, AdminTab::Availability, page.notices),
            m: messages,
            tabs: tabs(messages, AdminTab::Availability),
            form: page.form.as_ref().map(|form| AvailabilityFormView::new(messages, form)),
            alert: list_alert(&page.rules, messages.availability_empty),
            cards: page
                .rules
                .items()
                .iter()
                .map(|rule| AvailabilityCard::new(messages, rule))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::DisplayLocale;
    use crate::models::Recurrence;
    use chrono::NaiveDate;

    fn ctx() -> PageContext {
        PageContext {
            locale: DisplayLocale::Spanish,
            dismiss_ms: 5000,
        }
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn appointment(id: i64, status: AppointmentStatus, recurrence: Recurrence) -> Appointment {
        Appointment {
            id,
            date: ymd(2024, 3, 15),
            time: "09:00".into(),
            client: "Ana".into(),
            phone: "600123123".into(),
            service_id: 1,
            service_name: Some("Corte".into()),
            recurrence,
            recurrence_end: recurrence.is_recurring().then(|| ymd(2024, 3, 29)),
            parent_appointment_id: None,
            status,
            notes: None,
        }
    }

    fn appointments_html(filter: AppointmentFilter, appointments: Listing<Appointment>) -> String {
        AppointmentsView::new(
            &ctx(),
            AppointmentsPage {
                filter,
                appointments,
                notices: Vec::new(),
            },
        )
        .render()
        .unwrap()
    }

    #[test]
    fn appointments_table_offers_cancel_for_active_only() {
        let html = appointments_html(
            AppointmentFilter::parse(None, Some("all")),
            Listing::Ready(vec![
                appointment(1, AppointmentStatus::Active, Recurrence::Weekly),
                appointment(2, AppointmentStatus::Cancelled, Recurrence::None),
            ]),
        );
        assert!(html.contains(r#"action="/admin/appointments/1/cancel""#));
        assert!(!html.contains(r#"action="/admin/appointments/2/cancel""#));
        assert!(html.contains("badge badge-cancelled"));
        assert!(html.contains("badge badge-recurrence"));
        assert!(html.contains(r#"<option value="all" selected>"#));
        assert!(html.contains(r#"<a class="tab active" href="/admin" aria-current="page">"#));
    }

    #[test]
    fn cancel_forms_carry_the_current_filter() {
        let html = appointments_html(
            AppointmentFilter::parse(Some("2024-03-15"), Some("all")),
            Listing::Ready(vec![appointment(1, AppointmentStatus::Active, Recurrence::None)]),
        );
        assert!(html.contains(r#"<input type="hidden" name="date" value="2024-03-15">"#));
        assert!(html.contains(r#"<input type="hidden" name="status" value="all">"#));
    }

    #[test]
    fn empty_and_failed_appointment_lists() {
        let messages = ctx().messages();
        let empty = appointments_html(AppointmentFilter::parse(None, None), Listing::Ready(Vec::new()));
        assert!(empty.contains(messages.appointments_empty));
        assert!(!empty.contains(r#"<table id="appointments">"#));

        let failed = appointments_html(
            AppointmentFilter::parse(None, None),
            Listing::Failed("Error al conectar con el servidor".into()),
        );
        assert!(failed.contains(r#"<div class="alert alert-error">Error al conectar con el servidor</div>"#));
    }

    #[test]
    fn client_names_are_escaped() {
        let mut booked = appointment(1, AppointmentStatus::Active, Recurrence::None);
        booked.client = "<script>alert(1)</script>".into();
        let html = appointments_html(AppointmentFilter::parse(None, None), Listing::Ready(vec![booked]));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert(1)"));
    }

    #[test]
    fn details_show_series_and_series_cancel() {
        let view = AppointmentDetailsView::new(
            &ctx(),
            AppointmentDetailsPage {
                appointment: Some(appointment(4, AppointmentStatus::Active, Recurrence::Weekly)),
                notices: Vec::new(),
            },
        );
        let html = view.render().unwrap();
        assert!(html.contains(r#"data-date="2024-03-22""#));
        assert!(html.contains(r#"data-date="2024-03-29""#));
        assert!(html.contains(r#"name="cancel_all""#));
        assert!(html.contains("viernes, 29 de marzo de 2024"));
    }

    #[test]
    fn details_of_missing_record() {
        let view = AppointmentDetailsView::new(
            &ctx(),
            AppointmentDetailsPage {
                appointment: None,
                notices: Vec::new(),
            },
        );
        assert!(view.render().unwrap().contains(ctx().messages().record_missing));
    }

    #[test]
    fn service_form_posts_to_update_when_editing() {
        let service = Service {
            id: 9,
            name: "Tinte".into(),
            description: Some("Color completo".into()),
            duration: 90,
            price: 30.0,
            active: true,
        };
        let view = ServicesView::new(
            &ctx(),
            ServicesPage {
                services: Listing::Ready(vec![service.clone()]),
                form: Some(FormState::new(Some(9), ServiceInput::from_service(&service))),
                notices: Vec::new(),
            },
        );
        let html = view.render().unwrap();
        assert!(html.contains(r#"action="/admin/services/9""#));
        assert!(html.contains(r#"action="/admin/services/9/delete""#));
        assert!(html.contains("$30.00"));
        assert!(html.contains(r#"value="Tinte""#));
        assert!(html.contains(r#"id="active" checked>"#));
    }

    #[test]
    fn availability_cards_name_the_day() {
        let rule = AvailabilityRule {
            id: 3,
            day_of_week: 4,
            start_time: "09:00".into(),
            end_time: "18:00".into(),
            duration_minutes: 60,
            enabled: false,
        };
        let view = AvailabilityView::new(
            &ctx(),
            AvailabilityPage {
                rules: Listing::Ready(vec![rule]),
                form: Some(FormState::new(None, AvailabilityInput::blank())),
                notices: Vec::new(),
            },
        );
        let html = view.render().unwrap();
        assert!(html.contains("<h3>Viernes</h3>"));
        assert!(html.contains("09:00 - 18:00"));
        assert!(html.contains("availability-day disabled"));
        assert!(html.contains(r#"<option value="0" selected>Lunes</option>"#));
        assert!(html.contains(r#"action="/admin/availability""#));
    }
}
