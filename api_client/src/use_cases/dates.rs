use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, Utc};

// Calendar date format used by the search filters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
// `M/D/YYYY  H:MM:SS AM`; the double space is part of the format.
const DISPLAY_FORMAT: &str = "%-m/%-d/%Y  %-I:%M:%S %p";
// How far back the default search window reaches.
pub const MONTH_AGO_DAYS: u64 = 30;

pub fn today() -> String {
    format_date(Local::now().date_naive())
}

pub fn month_ago() -> String {
    days_ago(MONTH_AGO_DAYS)
}

pub fn days_ago(days: u64) -> String {
    format_date(days_before(Local::now().date_naive(), days))
}

pub fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

// Renders an API timestamp for tables, using its UTC fields.
// Empty or unparseable input renders as an empty string.
pub fn display_date_time(iso: &str) -> String {
    let iso = iso.trim();
    if iso.is_empty() {
        return String::new();
    }

    match parse_timestamp(iso) {
        Some(instant) => format_display(instant),
        None => {
            tracing::debug!(input = %iso, "unparseable timestamp");
            String::new()
        }
    }
}

pub fn format_display(instant: DateTime<Utc>) -> String {
    instant.format(DISPLAY_FORMAT).to_string()
}

pub fn parse_timestamp(iso: &str) -> Option<DateTime<Utc>> {
    let normalized = strip_fraction(iso).replacen(' ', "T", 1);

    if let Ok(instant) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(instant.with_timezone(&Utc));
    }
    // No zone marker: the fields are already UTC.
    if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    parse_date(&normalized).and_then(|date| date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc()))
}

// Drops a `.123456` run that sits between the seconds and the zone marker.
fn strip_fraction(iso: &str) -> String {
    let Some(time_start) = iso.find(['T', ' ']) else {
        return iso.to_string();
    };
    let Some(dot) = iso[time_start..].find('.').map(|offset| time_start + offset) else {
        return iso.to_string();
    };
    let digits = iso[dot + 1..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    format!("{}{}", &iso[..dot], &iso[dot + 1 + digits..])
}
