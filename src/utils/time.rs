use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M %p", "%I:%M%p"];

/// Interview slot as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A specific instant, either given in full or assembled from date and time.
    At(DateTime<Utc>),
    /// A bare calendar day with no usable time of day.
    Day(NaiveDate),
}

impl Slot {
    pub fn instant(self) -> DateTime<Utc> {
        match self {
            Slot::At(at) => at,
            Slot::Day(day) => day.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    /// Day-only slots are past once the whole day has gone by.
    pub fn is_past(self, reference: DateTime<Utc>) -> bool {
        match self {
            Slot::At(at) => at < reference,
            Slot::Day(day) => day < reference.date_naive(),
        }
    }
}

/// Parses a date string (RFC 3339, `YYYY-MM-DD[ T]HH:MM[:SS]` or a bare
/// `YYYY-MM-DD`) plus an optional separate time of day. Naive values are UTC.
pub fn parse_slot(date: &str, time: Option<&str>) -> Option<Slot> {
    let date = date.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(date) {
        return Some(Slot::At(at.with_timezone(&Utc)));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(date, fmt) {
            return Some(Slot::At(naive.and_utc()));
        }
    }
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    match time.map(str::trim).filter(|t| !t.is_empty()).and_then(parse_time) {
        Some(t) => Some(Slot::At(day.and_time(t).and_utc())),
        None => Some(Slot::Day(day)),
    }
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn parses_rfc3339_and_naive_datetimes() {
        let expected = Utc.with_ymd_and_hms(2025, 6, 20, 9, 30, 0).unwrap();
        assert_eq!(parse_slot("2025-06-20T09:30:00Z", None), Some(Slot::At(expected)));
        assert_eq!(parse_slot("2025-06-20T09:30", None), Some(Slot::At(expected)));
        assert_eq!(parse_slot("2025-06-20 09:30:00", None), Some(Slot::At(expected)));
    }

    #[test]
    fn combines_date_with_separate_time() {
        let expected = Utc.with_ymd_and_hms(2025, 6, 20, 14, 5, 0).unwrap();
        assert_eq!(parse_slot("2025-06-20", Some("14:05")), Some(Slot::At(expected)));
        assert_eq!(parse_slot("2025-06-20", Some("2:05 PM")), Some(Slot::At(expected)));
    }

    #[test]
    fn unparseable_time_keeps_the_day() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        assert_eq!(parse_slot("2025-06-20", Some("after lunch")), Some(Slot::Day(day)));
        assert_eq!(parse_slot("next tuesday", None), None);
    }

    #[test]
    fn today_without_time_is_not_past() {
        let today = parse_slot("2025-06-15", None).unwrap();
        assert!(!today.is_past(reference()));
        let yesterday = parse_slot("2025-06-14", None).unwrap();
        assert!(yesterday.is_past(reference()));
        let this_morning = parse_slot("2025-06-15", Some("08:00")).unwrap();
        assert!(this_morning.is_past(reference()));
    }
}
