//! Display formatting for money, timestamps and payment methods.

use chrono::{DateTime, Local, Locale, NaiveDate, NaiveDateTime, TimeZone};

/// Locale used for timestamps in the sales table.
const DATE_LOCALE: Locale = Locale::es_ES;

/// Long-form date/time pattern (day, short month, year, 24h time).
const DATE_PATTERN: &str = "%-d %b %Y, %H:%M";

/// Naive layouts the backend has been seen to emit.
const NAIVE_LAYOUTS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse decimal text into a finite number.
pub fn parse_amount(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `$` plus two decimals, or `N/A` when the text is not a number.
pub fn format_currency(text: &str) -> String {
    format_amount(parse_amount(text))
}

/// Same as [`format_currency`] for an already parsed value.
pub fn format_amount(amount: Option<f64>) -> String {
    match amount {
        Some(v) => format!("${v:.2}"),
        None => "N/A".to_string(),
    }
}

/// Render a backend timestamp in local time, or return it unchanged if unparseable.
pub fn format_datetime(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format_localized(DATE_PATTERN, DATE_LOCALE).to_string(),
        None => raw.to_string(),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }

    let naive = NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    // Zone-less timestamps are taken as local wall time.
    Local.from_local_datetime(&naive).earliest()
}

/// Decorative icon category for a payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentIcon {
    Cash,
    CreditCard,
    StoreCredit,
    Other,
}

/// Map a payment method name (case-insensitive) to its icon.
pub fn payment_icon(method: &str) -> PaymentIcon {
    match method.to_lowercase().as_str() {
        "cash" => PaymentIcon::Cash,
        "credit card" => PaymentIcon::CreditCard,
        "store credit" => PaymentIcon::StoreCredit,
        _ => PaymentIcon::Other,
    }
}
