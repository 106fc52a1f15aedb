use crate::models::AddedDate;
use chrono::NaiveDate;

const DATE_UNAVAILABLE: &str = "Date unavailable";

/// Format a price as whole pounds with thousands separators, e.g. `£250,000`
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push('£');

    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

/// Human-readable added date, e.g. `15 December 2024`
pub fn format_added_date(added: &AddedDate) -> String {
    if added.day == 0 || added.month.trim().is_empty() || added.year == 0 {
        return DATE_UNAVAILABLE.to_string();
    }
    format!("{} {} {}", added.day, added.month, added.year)
}

/// Coarse age of a listing relative to `today`
pub fn time_since_added(added: &AddedDate, today: NaiveDate) -> String {
    let Some(date) = added.to_date() else {
        return DATE_UNAVAILABLE.to_string();
    };

    let days = (today - date).num_days().abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=29 => format!("{} weeks ago", days / 7),
        30..=364 => format!("{} months ago", days / 30),
        _ => format!("{} years ago", days / 365),
    }
}
