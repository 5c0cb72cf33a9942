//! Card text formatting helpers.
//!
//! The stocks feed renders prices, volumes and timestamps on every card;
//! these helpers centralize the formatting the site variants each
//! hand-rolled.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Format a price with a dollar sign and two decimal places.
pub fn format_currency(value: f64) -> String {
    format!("${value:.2}")
}

/// Format an integer with thousands separators.
pub fn format_volume(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render a wire timestamp as a short human-readable form
/// (e.g. `Aug 7, 2:30 PM`).
///
/// Backends disagree on timestamp formats; anything unparseable is passed
/// through unchanged rather than breaking the card.
pub fn format_timestamp(raw: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .map(|naive| naive.and_utc())
        });

    match parsed {
        Ok(dt) => dt.format("%b %-d, %-I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}
