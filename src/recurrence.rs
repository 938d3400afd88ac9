use crate::models::Recurrence;
use chrono::{Days, Months, NaiveDate};

/// Follow-up dates of a recurring series, excluding `start`, up to and
/// including `end`. Monthly steps are applied cumulatively, so a series that
/// starts on the 31st stays on the clamped day after the first short month.
pub fn occurrences(start: NaiveDate, kind: Recurrence, end: NaiveDate) -> Vec<NaiveDate> {
    let step = |date: NaiveDate| match kind {
        Recurrence::None => None,
        Recurrence::Weekly => date.checked_add_days(Days::new(7)),
        Recurrence::Monthly => date.checked_add_months(Months::new(1)),
    };

    let mut dates = Vec::new();
    let mut current = start;
    while let Some(next) = step(current) {
        if next > end {
            break;
        }
        dates.push(next);
        current = next;
    }
    dates
}
