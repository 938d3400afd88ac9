pub mod admin;
pub mod booking;

use crate::forms::FieldErrors;
use crate::i18n::{DisplayLocale, Messages};
use crate::models::Recurrence;
use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

/// Per-deployment rendering settings shared by every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext {
    pub locale: DisplayLocale,
    pub dismiss_ms: u64,
}

impl PageContext {
    pub fn messages(&self) -> &'static Messages {
        self.locale.messages()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn class(self) -> &'static str {
        match self {
            NoticeLevel::Success => "alert alert-success",
            NoticeLevel::Info => "alert alert-info",
            NoticeLevel::Warning => "alert alert-warning",
            NoticeLevel::Error => "alert alert-error",
        }
    }

    pub fn role(self) -> &'static str {
        match self {
            NoticeLevel::Error => "alert",
            _ => "status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Success notices carried across a redirect as `?notice=<code>`.
    pub fn from_code(code: &str, messages: &Messages) -> Option<Self> {
        let message = match code {
            "booked" => messages.booked,
            "booked_recurring" => messages.booked_recurring,
            "appointment_cancelled" => messages.appointment_cancelled,
            "service_saved" => messages.service_saved,
            "service_deleted" => messages.service_deleted,
            "availability_saved" => messages.availability_saved,
            "availability_deleted" => messages.availability_deleted,
            _ => return None,
        };
        Some(Self::success(message))
    }

    pub fn from_query(code: Option<&str>, messages: &Messages) -> Vec<Self> {
        code.and_then(|code| Self::from_code(code, messages))
            .into_iter()
            .collect()
    }
}

/// Path plus URL-encoded query string.
pub fn href(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{path}?{query}")
}

/// Renders a page template, answering 500 when rendering fails.
pub fn render<T: Template>(status: StatusCode, template: &T) -> Response {
    match template.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(err) => {
            error!("template render error: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Layout data shared by every full page.
pub struct Shell {
    pub lang: &'static str,
    pub title: String,
    pub notices: Vec<Notice>,
    pub dismiss_ms: u64,
}

impl Shell {
    pub fn new(ctx: &PageContext, title: impl Into<String>, notices: Vec<Notice>) -> Self {
        Self {
            lang: ctx.locale.html_lang(),
            title: title.into(),
            notices,
            dismiss_ms: ctx.dismiss_ms,
        }
    }
}

/// Non-dismissable notice rendered inside a panel.
pub struct InlineAlert {
    pub class: &'static str,
    pub message: String,
}

impl InlineAlert {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            class: level.class(),
            message: message.into(),
        }
    }
}

/// One form control: its submitted value and the validation message, if any.
pub struct FieldView {
    pub label: &'static str,
    pub value: String,
    pub error: Option<&'static str>,
}

impl FieldView {
    pub fn new(label: &'static str, name: &str, value: impl Into<String>, errors: &FieldErrors) -> Self {
        Self {
            label,
            value: value.into(),
            error: errors.get(name),
        }
    }

    pub fn invalid(&self) -> bool {
        self.error.is_some()
    }

    pub fn class(&self) -> &'static str {
        if self.invalid() { "field invalid" } else { "field" }
    }
}

pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl OptionView {
    pub fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }
}

pub fn recurrence_label(recurrence: Recurrence, messages: &Messages) -> &'static str {
    match recurrence {
        Recurrence::None => messages.recurrence_none,
        Recurrence::Weekly => messages.recurrence_weekly,
        Recurrence::Monthly => messages.recurrence_monthly,
    }
}

pub fn price(value: f64) -> String {
    format!("${value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Template)]
    #[template(
        source = "{% extends \"layout.html\" %}{% block content %}<p>body</p>{% endblock %}",
        ext = "html"
    )]
    struct Blank {
        shell: Shell,
    }

    fn blank(dismiss_ms: u64, notices: Vec<Notice>) -> String {
        let ctx = PageContext {
            locale: DisplayLocale::English,
            dismiss_ms,
        };
        Blank {
            shell: Shell::new(&ctx, "Title <x>", notices),
        }
        .render()
        .unwrap()
    }

    #[test]
    fn href_encodes_query_values() {
        assert_eq!(href("/", &[]), "/");
        assert_eq!(
            href("/book", &[("date", "2024-03-15"), ("time", "09:00")]),
            "/book?date=2024-03-15&time=09%3A00"
        );
        assert_eq!(href("/x", &[("q", "a&b c")]), "/x?q=a%26b+c");
    }

    #[test]
    fn notice_codes_map_to_success_messages() {
        let messages = DisplayLocale::Spanish.messages();
        let notice = Notice::from_code("booked", messages).unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, messages.booked);
        assert!(Notice::from_code("<script>", messages).is_none());
        assert!(Notice::from_query(None, messages).is_empty());
    }

    #[test]
    fn banners_dismiss_themselves() {
        let html = blank(4000, vec![Notice::error("boom <b>")]);
        assert!(html.contains(r#"class="alert alert-error" role="alert" data-dismiss-after="4000""#));
        assert!(html.contains("<span>boom &lt;b&gt;</span>"));
    }

    #[test]
    fn field_marks_invalid_controls() {
        let mut errors = FieldErrors::new();
        errors.insert("phone", "bad phone");
        let phone = FieldView::new("Phone", "phone", "12", &errors);
        assert!(phone.invalid());
        assert_eq!(phone.class(), "field invalid");
        assert_eq!(phone.error, Some("bad phone"));

        let client = FieldView::new("Name", "client", "Ana", &errors);
        assert_eq!(client.class(), "field");
        assert_eq!(client.error, None);
    }

    #[test]
    fn page_shell_sets_language_and_embeds_assets() {
        let html = blank(5000, vec![Notice::success("saved")]);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="en">"#));
        assert!(html.contains("<title>Title &lt;x&gt;</title>"));
        assert!(html.contains("alert alert-success"));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains("latestSeq"));
        assert!(html.contains("--accent"));
    }

    #[test]
    fn script_errors_use_configured_dismiss_delay() {
        let html = blank(1200, Vec::new());
        assert!(html.contains(r#"id="notices" data-dismiss-ms="1200""#));
        assert!(html.contains("notice.dataset.dismissAfter = notices.dataset.dismissMs;"));
        assert!(!html.contains("5000"));
    }

    #[test]
    fn restored_pages_release_busy_forms() {
        let html = blank(5000, Vec::new());
        let restore = html
            .split("addEventListener('pageshow'")
            .nth(1)
            .expect("pageshow handler");
        assert!(restore.contains("event.persisted"));
        assert!(restore.contains("delete form.dataset.busy;"));
        assert!(restore.contains("button.disabled = false;"));
        assert!(restore.contains("button.textContent = button.dataset.idleLabel;"));
        assert!(html.contains("button.dataset.idleLabel = button.textContent;"));
    }
}
