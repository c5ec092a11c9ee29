use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("int pattern compiles"));

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
    )
    .expect("email pattern compiles")
});

static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone pattern compiles"));

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Integer literal within `[min, max]`
pub fn parse_int(input: &str, min: i64, max: i64) -> Option<i64> {
    if !INT.is_match(input) {
        return None;
    }
    input
        .trim_start_matches('+')
        .parse::<i64>()
        .ok()
        .filter(|n| (min..=max).contains(n))
}

/// `true`/`false`/`1`/`0`
pub fn parse_boolean(input: &str) -> Option<bool> {
    match input {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

pub fn is_email(input: &str) -> bool {
    input.len() <= 254 && EMAIL.is_match(input)
}

/// Optional `+` followed by 7-15 digits. Single spaces or dashes between
/// digit groups are allowed.
pub fn is_mobile_phone(input: &str) -> bool {
    if input.contains("  ") || input.contains("--") || input.ends_with([' ', '-']) {
        return false;
    }
    let compact: String = input.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    PHONE.is_match(&compact)
}

/// Calendar date in `YYYY-MM-DD` or `YYYY/MM/DD`
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
}
