use crate::i18n::DisplayLocale;
use chrono::{Days, Local, NaiveDate, NaiveTime};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";
const CLOCK_FORMAT: &str = "%H:%M";

/// Machine-readable day key, e.g. `2024-03-05`. Never localized.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn parse_date_key(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_KEY_FORMAT).ok()
}

pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), CLOCK_FORMAT).ok()
}

pub fn clock_key(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

pub fn long_date(date: NaiveDate, locale: DisplayLocale) -> String {
    date.format_localized(locale.long_date_format(), locale.chrono_locale())
        .to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn day_after(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}

pub fn day_before(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(1)).unwrap_or(date)
}

/// The booking page's current day. Moves one day per step, unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateNavigator {
    current: NaiveDate,
}

impl DateNavigator {
    pub fn new(current: NaiveDate) -> Self {
        Self { current }
    }

    pub fn today() -> Self {
        Self::new(today())
    }

    /// Falls back to today when the key is missing or malformed.
    pub fn from_key(key: Option<&str>) -> Self {
        key.and_then(parse_date_key)
            .map(Self::new)
            .unwrap_or_else(Self::today)
    }

    pub fn current(&self) -> NaiveDate {
        self.current
    }

    pub fn next(&self) -> Self {
        Self::new(day_after(self.current))
    }

    pub fn prev(&self) -> Self {
        Self::new(day_before(self.current))
    }

    pub fn key(&self) -> String {
        date_key(self.current)
    }

    pub fn display(&self, locale: DisplayLocale) -> String {
        long_date(self.current, locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn date_key_is_zero_padded() {
        assert_eq!(date_key(ymd(2024, 3, 5)), "2024-03-05");
        assert_eq!(date_key(ymd(2024, 12, 31)), "2024-12-31");
        assert_eq!(date_key(ymd(987, 1, 1)), "0987-01-01");
    }

    #[test]
    fn date_key_ignores_display_locale() {
        let date = ymd(2024, 3, 15);
        assert_eq!(date_key(date), "2024-03-15");
        assert_ne!(long_date(date, DisplayLocale::Spanish), date_key(date));
        assert_eq!(parse_date_key(&date_key(date)), Some(date));
    }

    #[test]
    fn parse_date_key_rejects_garbage() {
        assert_eq!(parse_date_key("15/03/2024"), None);
        assert_eq!(parse_date_key("2024-02-30"), None);
        assert_eq!(parse_date_key(""), None);
        assert_eq!(parse_date_key(" 2024-03-15 "), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn forward_then_back_returns_to_same_key() {
        for start in [ymd(2024, 3, 15), ymd(2024, 2, 29), ymd(2023, 12, 31), ymd(2024, 1, 1)] {
            let nav = DateNavigator::new(start);
            assert_eq!(nav.next().prev().key(), nav.key());
            assert_eq!(nav.prev().next().key(), nav.key());
        }
    }

    #[test]
    fn navigation_crosses_month_and_year_boundaries() {
        let nav = DateNavigator::new(ymd(2023, 12, 31));
        assert_eq!(nav.next().key(), "2024-01-01");
        let nav = DateNavigator::new(ymd(2024, 3, 1));
        assert_eq!(nav.prev().key(), "2024-02-29");
    }

    #[test]
    fn from_key_falls_back_to_today() {
        assert_eq!(DateNavigator::from_key(Some("2024-03-15")).current(), ymd(2024, 3, 15));
        assert_eq!(DateNavigator::from_key(Some("tomorrow")).current(), today());
        assert_eq!(DateNavigator::from_key(None).current(), today());
    }

    #[test]
    fn long_date_follows_locale() {
        let date = ymd(2024, 3, 15);
        assert_eq!(long_date(date, DisplayLocale::Spanish), "viernes, 15 de marzo de 2024");
        assert_eq!(long_date(date, DisplayLocale::English), "Friday, March 15, 2024");
    }

    #[test]
    fn clock_round_trips_hours_and_minutes() {
        let time = parse_clock("09:15").unwrap();
        assert_eq!(clock_key(time), "09:15");
        assert_eq!(parse_clock("9am"), None);
        assert_eq!(parse_clock("25:00"), None);
    }
}
