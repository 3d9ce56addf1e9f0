//! Display helpers for IPO record values
//!
//! These are pure lookups shared by the terminal view and the one-shot
//! commands, so both render a record identically.

use crate::record::FieldValue;

/// Placeholder shown for absent values
pub const PLACEHOLDER: &str = "-";

/// Currency prefix used for monetary fields
pub const CURRENCY: &str = "₹";

/// Maximum fraction digits kept when grouping numbers
const MAX_FRACTION_DIGITS: usize = 3;

/// Format a number the way an en-US locale displays it: thousands
/// separators, at most three fraction digits, trailing zeros dropped.
///
/// Examples: 1500 -> "1,500", 72.5 -> "72.5", 1234.56789 -> "1,234.568"
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let (int_part, frac_part) = round_half_expand(n.abs());
    let frac_part = frac_part.trim_end_matches('0');

    let chars: Vec<char> = int_part.chars().collect();
    let mut result = String::new();
    if n < 0.0 {
        result.push('-');
    }
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(*c);
    }

    if !frac_part.is_empty() {
        result.push('.');
        result.push_str(frac_part);
    }
    result
}

/// Digits of a finite, non-negative `n` rounded to `MAX_FRACTION_DIGITS`,
/// with ties going away from zero. Works on the exact decimal expansion of
/// the double, so 72.0625 rounds up while 1.0005 (stored just below) does not.
fn round_half_expand(n: f64) -> (String, String) {
    // Every f64 has at most 1074 fraction digits
    let exact = format!("{:.1100}", n);
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(MAX_FRACTION_DIGITS))
        .map(|b| b - b'0')
        .collect();
    let round_up = frac_part
        .as_bytes()
        .get(MAX_FRACTION_DIGITS)
        .is_some_and(|b| *b >= b'5');

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let text: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
    let split = text.len() - MAX_FRACTION_DIGITS;
    (text[..split].to_string(), text[split..].to_string())
}

/// Format a field value for display.
///
/// Absent values become a dash. Numbers get field-specific units: the issue
/// size is in crores, price and GMP are rupee amounts, the subscription
/// figure is a percentage; any other number is only grouped. Text passes
/// through untouched.
pub fn format_value(key: &str, value: &FieldValue) -> String {
    match value {
        FieldValue::Absent => PLACEHOLDER.to_string(),
        FieldValue::Text(s) => s.clone(),
        FieldValue::Number(n) => {
            let grouped = format_number(*n);
            match key {
                "ipo_size" => format!("{} {} Cr", CURRENCY, grouped),
                "ipo_price" | "ipo_gmp" => format!("{} {}", CURRENCY, grouped),
                "subscription_percent" => format!("{}%", grouped),
                _ => grouped,
            }
        },
    }
}

/// Visual category of an IPO status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Active,
    Closed,
    Upcoming,
    Unknown,
}

/// Map a status string to its category, ignoring case.
pub fn status_category(status: Option<&str>) -> StatusCategory {
    match status.map(str::to_lowercase).as_deref() {
        Some("active") => StatusCategory::Active,
        Some("close") => StatusCategory::Closed,
        Some("upcoming") => StatusCategory::Upcoming,
        _ => StatusCategory::Unknown,
    }
}

/// Icon category shown next to a field label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldIcon {
    Monetary,
    Percentage,
    Date,
    Trend,
}

impl FieldIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            FieldIcon::Monetary => "$",
            FieldIcon::Percentage => "%",
            FieldIcon::Date => "◷",
            FieldIcon::Trend => "↗",
        }
    }
}

pub fn field_icon(key: &str) -> Option<FieldIcon> {
    match key {
        "ipo_price" | "ipo_size" | "ipo_gmp" => Some(FieldIcon::Monetary),
        "subscription_percent" => Some(FieldIcon::Percentage),
        "open_date" | "close_date" | "gmp_updated_date" => Some(FieldIcon::Date),
        "status" => Some(FieldIcon::Trend),
        _ => None,
    }
}

/// Human label for an API field name (e.g., "gmp_updated_date" -> "Gmp Updated Date")
pub fn field_label(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
