//! WhatsApp deep-link construction.
//!
//! Builds `https://wa.me/<digits>?text=<encoded>` links for the order
//! hand-off. Nothing here performs I/O - opening the link is the caller's
//! side effect, kept separate so it can be stubbed in tests.

/// Fallback destination used when no usable number is available.
pub const DEFAULT_NUMBER: &str = "5491127797320";

/// Strip everything but ASCII digits from a phone number.
///
/// `wa.me` accepts international numbers without the leading `+`, spaces, or
/// dashes, so `+54 9 11 2779-7320` becomes `5491127797320`.
#[must_use]
pub fn normalize_phone(number: &str) -> String {
    number.chars().filter(char::is_ascii_digit).collect()
}

/// Build a WhatsApp deep link for the given destination and message text.
///
/// The destination is reduced to digits; when nothing remains the link falls
/// back to [`DEFAULT_NUMBER`] so the result is always usable. Empty text
/// yields a bare link with no query string; otherwise the text is
/// percent-encoded into `?text=`.
#[must_use]
pub fn wa_link(number: &str, text: &str) -> String {
    let mut digits = normalize_phone(number);
    if digits.is_empty() {
        digits = DEFAULT_NUMBER.to_string();
    }

    let base = format!("https://wa.me/{digits}");
    if text.is_empty() {
        return base;
    }
    format!("{base}?text={}", urlencoding::encode(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_formatting() {
        assert_eq!(normalize_phone("+54 9 11 2779-7320"), "5491127797320");
        assert_eq!(normalize_phone("(011) 4555-0199"), "01145550199");
        assert_eq!(normalize_phone("5491127797320"), "5491127797320");
    }

    #[test]
    fn test_normalize_empty_and_non_digit_input() {
        assert_eq!(normalize_phone(""), "");
        assert_eq!(normalize_phone("+- ()"), "");
    }

    #[test]
    fn test_link_without_text_has_no_query() {
        assert_eq!(
            wa_link("+54 9 11 2779-7320", ""),
            "https://wa.me/5491127797320"
        );
    }

    #[test]
    fn test_link_falls_back_to_default_number() {
        assert_eq!(
            wa_link("", "hola"),
            format!("https://wa.me/{DEFAULT_NUMBER}?text=hola")
        );
        assert_eq!(wa_link("abc", ""), format!("https://wa.me/{DEFAULT_NUMBER}"));
    }

    #[test]
    fn test_text_is_percent_encoded() {
        let link = wa_link("5491127797320", "New order:\nKit C x2");
        assert_eq!(
            link,
            "https://wa.me/5491127797320?text=New%20order%3A%0AKit%20C%20x2"
        );
    }
}
