//! Camel-case to dash-case conversion for CSS property names.

use std::sync::LazyLock;

use regex::Regex;

/// A capitalized word preceded by any character.
static FIRST_CAP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("invalid first-cap regex"));

/// A capital following a lowercase letter or digit.
static ALL_CAP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("invalid all-cap regex"));

/// Convert a camel-cased name to dash-case.
///
/// Runs of capitals are split from a following capitalized word before
/// lowercasing, and double dashes collapse to one.
///
/// # Examples
///
/// ```
/// use tagtree::camel_to_dash;
///
/// assert_eq!(camel_to_dash("backgroundColor"), "background-color");
/// assert_eq!(camel_to_dash("HTTPServer"), "http-server");
/// ```
pub fn camel_to_dash(camel_cased: &str) -> String {
    let words = FIRST_CAP_PATTERN.replace_all(camel_cased, "$1-$2");
    let dashed = ALL_CAP_PATTERN.replace_all(&words, "$1-$2").to_lowercase();
    dashed.replace("--", "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_camel_case() {
        assert_eq!(camel_to_dash("backgroundColor"), "background-color");
        assert_eq!(camel_to_dash("borderTopLeftRadius"), "border-top-left-radius");
    }

    #[test]
    fn test_lowercase_unchanged() {
        assert_eq!(camel_to_dash("color"), "color");
        assert_eq!(camel_to_dash(""), "");
    }

    #[test]
    fn test_capital_runs_split() {
        assert_eq!(camel_to_dash("HTTPServer"), "http-server");
        assert_eq!(camel_to_dash("getHTTPResponseCode"), "get-http-response-code");
    }

    #[test]
    fn test_vendor_prefix() {
        assert_eq!(camel_to_dash("MozTransition"), "moz-transition");
        assert_eq!(camel_to_dash("WebkitBoxShadow"), "webkit-box-shadow");
    }

    #[test]
    fn test_digits_before_capital() {
        assert_eq!(camel_to_dash("h1Title"), "h1-title");
    }

    #[test]
    fn test_double_dash_collapsed() {
        assert_eq!(camel_to_dash("Foo-Bar"), "foo-bar");
        assert_eq!(camel_to_dash("already-dashed"), "already-dashed");
    }
}
