//! Field-level validation shared by the booking and admin forms.

use crate::i18n::Messages;
use std::collections::BTreeMap;

/// Validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Trimmed, non-empty text of at most `max_chars` characters.
pub fn required_text(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    max_chars: usize,
    messages: &Messages,
) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, messages.field_required);
        return None;
    }
    optional_text(errors, field, value, max_chars, messages)
}

pub fn optional_text(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    max_chars: usize,
    messages: &Messages,
) -> Option<String> {
    let value = value.trim();
    if value.chars().count() > max_chars {
        errors.insert(field, messages.text_too_long);
        return None;
    }
    Some(value.to_string())
}

/// 7 to 15 digits with an optional leading `+`; spaces, dashes and
/// parentheses are ignored.
pub fn is_valid_phone(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|ch| !ch.is_whitespace() && !matches!(ch, '-' | '(' | ')'))
        .collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    (7..=15).contains(&digits.len()) && digits.chars().all(|ch| ch.is_ascii_digit())
}

/// Slot and service lengths accepted by the backend.
pub const MIN_DURATION_MINUTES: u32 = 15;
pub const MAX_DURATION_MINUTES: u32 = 480;

pub fn duration_minutes(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    messages: &Messages,
) -> Option<u32> {
    match value.trim().parse::<u32>() {
        Ok(minutes) if (MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) => {
            Some(minutes)
        }
        _ => {
            errors.insert(field, messages.duration_invalid);
            None
        }
    }
}

/// HTML checkboxes submit `on` when ticked and nothing otherwise.
pub fn checkbox(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|value| !value.is_empty() && value != "false")
}
