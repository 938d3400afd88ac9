use crate::booking::{BookingInput, SlotList};
use crate::dates::DateNavigator;
use crate::forms::FieldErrors;
use crate::handlers::load_services;
use crate::state::AppState;
use crate::ui::booking::{BookingDialog, BookingPage, BookingPageView, DayPanelView};
use crate::ui::{self, Notice, href};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    date: Option<String>,
    notice: Option<String>,
}

pub async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Response {
    let navigator = DateNavigator::from_key(query.date.as_deref());
    let slots = SlotList::load(&state.api, navigator.current()).await;
    let notices = Notice::from_query(query.notice.as_deref(), state.page.messages());

    let booking = BookingPage {
        navigator,
        slots,
        selected: None,
        dialog: None,
        notices,
    };
    ui::render(StatusCode::OK, &BookingPageView::new(&state.page, booking))
}

#[derive(Debug, Deserialize)]
pub struct DayPanelQuery {
    date: Option<String>,
    seq: Option<u64>,
}

pub async fn day_panel(
    State(state): State<AppState>,
    Query(query): Query<DayPanelQuery>,
) -> Response {
    let navigator = DateNavigator::from_key(query.date.as_deref());
    let slots = SlotList::load(&state.api, navigator.current()).await;
    let panel = DayPanelView::new(&state.page, navigator, &slots, None, query.seq);
    ui::render(StatusCode::OK, &panel)
}

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    date: Option<String>,
    time: Option<String>,
}

pub async fn show_booking(
    State(state): State<AppState>,
    Query(query): Query<SlotQuery>,
) -> Response {
    let messages = state.page.messages();
    let navigator = DateNavigator::from_key(query.date.as_deref());
    let time = query.time.unwrap_or_default().trim().to_string();

    let (slots, services) = tokio::join!(
        SlotList::load(&state.api, navigator.current()),
        load_services(&state.api, messages)
    );

    let mut booking = BookingPage {
        navigator,
        slots,
        selected: None,
        dialog: None,
        notices: Vec::new(),
    };
    if booking.slots.is_available(&time) {
        booking.dialog = Some(BookingDialog::new(
            BookingInput::for_slot(navigator.current(), &time),
            services,
        ));
        booking.selected = Some(time);
    } else {
        booking.notices.push(Notice::error(messages.slot_taken));
    }

    ui::render(StatusCode::OK, &BookingPageView::new(&state.page, booking))
}

pub async fn submit_booking(
    State(state): State<AppState>,
    Form(input): Form<BookingInput>,
) -> Response {
    let messages = state.page.messages();

    let payload = match input.validate(messages) {
        Ok(payload) => payload,
        Err(errors) => {
            info!(fields = errors.len(), "booking form rejected");
            return rerender(&state, input, errors, None, StatusCode::UNPROCESSABLE_ENTITY).await;
        }
    };

    match state.api.create_appointment(&payload).await {
        Ok(()) => {
            info!(date = %payload.date, time = %payload.time, recurrence = %payload.recurrence, "appointment booked");
            let notice = if payload.recurrence.is_recurring() {
                "booked_recurring"
            } else {
                "booked"
            };
            Redirect::to(&href("/", &[("date", payload.date.as_str()), ("notice", notice)])).into_response()
        }
        Err(err) => {
            warn!(date = %payload.date, time = %payload.time, "booking failed: {err}");
            let message = err.user_message(messages.booking_failed, messages);
            rerender(&state, input, FieldErrors::new(), Some(message), StatusCode::OK).await
        }
    }
}

/// Booking page with the dialog reopened on the submitted values. A
/// submission whose date cannot be read gets today's page and a banner
/// instead, since there is no day to reopen the dialog on.
async fn rerender(
    state: &AppState,
    input: BookingInput,
    errors: FieldErrors,
    error: Option<String>,
    status: StatusCode,
) -> Response {
    let messages = state.page.messages();

    let Some(date) = input.booking_date() else {
        warn!(date = %input.date, "booking submitted with unreadable date");
        let navigator = DateNavigator::today();
        let booking = BookingPage {
            navigator,
            slots: SlotList::load(&state.api, navigator.current()).await,
            selected: None,
            dialog: None,
            notices: vec![Notice::error(messages.date_invalid)],
        };
        return ui::render(status, &BookingPageView::new(&state.page, booking));
    };

    let navigator = DateNavigator::new(date);
    let (slots, services) = tokio::join!(
        SlotList::load(&state.api, date),
        load_services(&state.api, messages)
    );

    let selected = Some(input.time.clone()).filter(|time| !time.is_empty());
    let booking = BookingPage {
        navigator,
        slots,
        selected,
        dialog: Some(BookingDialog {
            input,
            errors,
            services,
            error,
        }),
        notices: Vec::new(),
    };
    ui::render(status, &BookingPageView::new(&state.page, booking))
}
