//! Public booking page: date navigator, slot grid and the booking dialog.

use crate::admin::Listing;
use crate::booking::{BookingInput, SlotList, recurrence_end_rule};
use crate::dates::{DateNavigator, date_key, long_date};
use crate::forms::FieldErrors;
use crate::i18n::Messages;
use crate::models::{Recurrence, Service, TimeSlot};
use crate::ui::{
    FieldView, InlineAlert, Notice, NoticeLevel, OptionView, PageContext, Shell, href, price,
    recurrence_label,
};
use askama::Template;
use chrono::NaiveDate;

pub struct BookingPage {
    pub navigator: DateNavigator,
    pub slots: SlotList,
    pub selected: Option<String>,
    pub dialog: Option<BookingDialog>,
    pub notices: Vec<Notice>,
}

pub struct BookingDialog {
    pub input: BookingInput,
    pub errors: FieldErrors,
    pub services: Listing<Service>,
    /// Backend failure shown above the form.
    pub error: Option<String>,
}

impl BookingDialog {
    pub fn new(input: BookingInput, services: Listing<Service>) -> Self {
        Self {
            input,
            errors: FieldErrors::new(),
            services,
            error: None,
        }
    }
}

#[derive(Template)]
#[template(path = "booking.html")]
pub struct BookingPageView {
    shell: Shell,
    m: &'static Messages,
    panel: DayPanelView,
    dialog: Option<BookingDialogView>,
}

impl BookingPageView {
    pub fn new(ctx: &PageContext, booking: BookingPage) -> Self {
        let messages = ctx.messages();
        let panel = DayPanelView::new(
            ctx,
            booking.navigator,
            &booking.slots,
            booking.selected.as_deref(),
            None,
        );
        let dialog = booking
            .dialog
            .map(|dialog| BookingDialogView::new(ctx, booking.navigator.current(), dialog));
        Self {
            shell: Shell::new(ctx, messages.booking_title, booking.notices),
            m: messages,
            panel,
            dialog,
        }
    }
}

pub struct NavLink {
    key: String,
    href: String,
}

impl NavLink {
    fn to(date: NaiveDate) -> Self {
        let key = date_key(date);
        Self {
            href: href("/", &[("date", key.as_str())]),
            key,
        }
    }
}

pub struct SlotView {
    time: String,
    /// Booking link; occupied slots have none.
    href: Option<String>,
    selected: bool,
}

impl SlotView {
    fn new(date: NaiveDate, slot: &TimeSlot, selected: bool) -> Self {
        let link = slot.available.then(|| {
            href("/book", &[("date", date_key(date).as_str()), ("time", slot.time.as_str())])
        });
        Self {
            time: slot.time.clone(),
            href: link,
            selected: selected && slot.available,
        }
    }

    pub fn class(&self) -> &'static str {
        if self.selected {
            "time-slot available selected"
        } else {
            "time-slot available"
        }
    }
}

/// Day panel, rendered inside the booking page and alone as the fragment the
/// page script swaps in place. `seq` is echoed so the script can drop stale
/// responses.
#[derive(Template)]
#[template(path = "day_panel.html")]
pub struct DayPanelView {
    m: &'static Messages,
    seq: u64,
    prev: NavLink,
    next: NavLink,
    current_key: String,
    current_display: String,
    slots: Vec<SlotView>,
    alert: Option<InlineAlert>,
}

impl DayPanelView {
    pub fn new(
        ctx: &PageContext,
        navigator: DateNavigator,
        slots: &SlotList,
        selected: Option<&str>,
        seq: Option<u64>,
    ) -> Self {
        let messages = ctx.messages();
        let date = navigator.current();
        let alert = match slots {
            SlotList::Ready(_) => None,
            SlotList::Empty => Some(InlineAlert::new(NoticeLevel::Info, messages.slots_empty)),
            SlotList::Unavailable => Some(InlineAlert::new(NoticeLevel::Warning, messages.slots_unavailable)),
            SlotList::Failed => Some(InlineAlert::new(NoticeLevel::Error, messages.slots_failed)),
        };
        Self {
            m: messages,
            seq: seq.unwrap_or(0),
            prev: NavLink::to(navigator.prev().current()),
            next: NavLink::to(navigator.next().current()),
            current_key: navigator.key(),
            current_display: navigator.display(ctx.locale),
            slots: slots
                .slots()
                .iter()
                .map(|slot| SlotView::new(date, slot, selected == Some(slot.time.as_str())))
                .collect(),
            alert,
        }
    }
}

fn service_label(service: &Service, minutes: &str) -> String {
    format!(
        "{} ({} {} - {})",
        service.name,
        service.duration,
        minutes,
        price(service.price)
    )
}

#[derive(Template)]
#[template(path = "booking_dialog.html")]
pub struct BookingDialogView {
    m: &'static Messages,
    heading: String,
    close_href: String,
    error: Option<String>,
    form_invalid: bool,
    date: String,
    time: String,
    client: FieldView,
    phone: FieldView,
    service: FieldView,
    services: Vec<OptionView>,
    services_error: Option<String>,
    recurrence: FieldView,
    recurrence_options: Vec<OptionView>,
    recurrence_end: FieldView,
    end_min: String,
    end_required: bool,
    notes: FieldView,
}

impl BookingDialogView {
    /// `date` is the booking date the dialog was opened for; the hidden date
    /// field always carries it.
    pub fn new(ctx: &PageContext, date: NaiveDate, dialog: BookingDialog) -> Self {
        let messages = ctx.messages();
        let BookingDialog {
            input,
            errors,
            services,
            error,
        } = dialog;
        let recurrence = input.recurrence_kind();
        let end_rule = recurrence_end_rule(date, recurrence);

        let options = services
            .items()
            .iter()
            .filter(|service| service.active)
            .map(|service| {
                let id = service.id.to_string();
                let selected = input.service_id.trim() == id;
                OptionView::new(id, service_label(service, messages.minutes), selected)
            })
            .collect();
        let services_error = match services {
            Listing::Failed(message) => Some(message),
            Listing::Ready(_) => None,
        };
        let recurrence_options = Recurrence::ALL
            .into_iter()
            .map(|kind| OptionView::new(kind.as_str(), recurrence_label(kind, messages), kind == recurrence))
            .collect();
        let day = date_key(date);

        Self {
            m: messages,
            heading: format!("{} {} {}", long_date(date, ctx.locale), messages.at_time, input.time),
            close_href: href("/", &[("date", day.as_str())]),
            error,
            form_invalid: !errors.is_empty(),
            time: input.time.clone(),
            client: FieldView::new(messages.client_label, "client", input.client.as_str(), &errors),
            phone: FieldView::new(messages.phone_label, "phone", input.phone.as_str(), &errors),
            service: FieldView::new(messages.service_label, "service_id", input.service_id.trim(), &errors),
            services: options,
            services_error,
            recurrence: FieldView::new(messages.recurrence_label, "recurrence", recurrence.as_str(), &errors),
            recurrence_options,
            recurrence_end: FieldView::new(
                messages.recurrence_end_label,
                "recurrence_end",
                input.recurrence_end.as_str(),
                &errors,
            ),
            end_min: date_key(end_rule.min),
            end_required: end_rule.required,
            notes: FieldView::new(messages.notes_label, "notes", input.notes.as_str(), &errors),
            date: day,
        }
    }
}
