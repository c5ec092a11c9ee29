// handlers/mod.rs - Route handlers, one module per resource

pub mod health;
pub mod practitioners;
pub mod schedules;

pub(crate) const PAGE_MESSAGE: &str = "The page parameter must be a non-negative numeric value";
pub(crate) const SIZE_MESSAGE: &str =
    "The size parameter must be a numeric value and at least its value must be 1";

/// Path ids that are not positive 32-bit integers cannot name a row, so
/// callers treat them the same as an unknown id.
pub(crate) fn parse_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_positive_integers_only() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("-3"), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("99999999999"), None);
    }
}
