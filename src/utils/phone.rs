use regex::Regex;
use std::sync::OnceLock;

static MOBILE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Reduces a raw phone string to bare subscriber digits: strips all
/// non-digit characters, then one leading "60" country code or "0" trunk
/// prefix. The result is the equality key used to match a request to a
/// participant regardless of how the number was formatted on entry.
pub fn normalize(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if let Some(rest) = digits.strip_prefix("60") {
        return rest.to_string();
    }
    if let Some(rest) = digits.strip_prefix('0') {
        return rest.to_string();
    }
    digits
}

/// Malaysian mobile format: optional "+", then "60" or a leading "0",
/// then "1", then 8-9 further digits.
pub fn is_valid_mobile(raw: &str) -> bool {
    let re = MOBILE_PATTERN
        .get_or_init(|| Regex::new(r"^(\+?60|0)1[0-9]{8,9}$").expect("valid mobile pattern"));
    re.is_match(raw)
}

/// Non-empty normalized output is the "looks like a phone number" gate
/// for the request portals.
pub fn looks_like_phone(raw: &str) -> bool {
    !normalize(raw).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_country_and_trunk_prefixes() {
        assert_eq!(normalize("+60123456789"), "123456789");
        assert_eq!(normalize("0123456789"), "123456789");
        assert_eq!(normalize("123456789"), "123456789");
    }

    #[test]
    fn normalize_ignores_formatting() {
        assert_eq!(normalize("+60 12-345 6789"), "123456789");
        assert_eq!(normalize("(012) 345-6789"), "123456789");
    }

    #[test]
    fn normalize_empty_is_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("abc"), "");
    }

    #[test]
    fn normalize_strips_only_one_prefix() {
        // "060..." loses the trunk zero, not the 60 that follows.
        assert_eq!(normalize("0601234"), "601234");
    }

    #[test]
    fn valid_mobile_accepts_common_formats() {
        assert!(is_valid_mobile("0123456789"));
        assert!(is_valid_mobile("+60123456789"));
        assert!(is_valid_mobile("60123456789"));
        assert!(is_valid_mobile("01234567890"));
    }

    #[test]
    fn valid_mobile_rejects_garbage() {
        assert!(!is_valid_mobile("12345"));
        assert!(!is_valid_mobile("abcdefgh"));
        assert!(!is_valid_mobile("0223456789"));
        assert!(!is_valid_mobile(""));
    }
}
