//! Date helper functions
//!
//! Publication dates render in a fixed locale: two-digit day, lowercase
//! abbreviated Portuguese month name, four-digit year. The exact output is
//! part of the page contract and covered by golden tests.

use chrono::{DateTime, Datelike, TimeZone};

/// Abbreviated month names, pt-BR, index 0 = January
const MONTHS_ABBR_PT_BR: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Format a publication date as e.g. `"25 mar 2021"`.
pub fn format_published<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    let month = MONTHS_ABBR_PT_BR[date.month0() as usize];
    format!("{:02} {} {}", date.day(), month, date.year())
}

/// Generate a `<time>` HTML element with a machine-readable datetime.
pub fn time_tag<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let datetime = date.format("%Y-%m-%dT%H:%M:%S%:z").to_string();
    format!(
        r#"<time datetime="{}">{}</time>"#,
        datetime,
        format_published(date)
    )
}
