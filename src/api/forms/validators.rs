//! Field validators shared by the forms

/// Trimmed value, `None` when missing or blank
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

/// Good enough to catch typos; delivery is the real check
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

/// Letter first, then letters, digits, dots or underscores
pub fn is_username(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        }
        _ => false,
    }
}

pub fn is_word_chars(value: &str) -> bool {
    value.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Checkbox semantics: present and not "" / "false" / "n"
pub fn checkbox(value: &Option<String>) -> bool {
    match value.as_deref().map(str::trim) {
        None | Some("") => false,
        Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "false" | "n" | "no" | "off" | "0"),
    }
}

pub fn parse_int<T: std::str::FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present() {
        assert_eq!(present(&Some("  dog ".into())), Some("dog"));
        assert_eq!(present(&Some("   ".into())), None);
        assert_eq!(present(&None), None);
    }

    #[test]
    fn test_email_shape() {
        assert!(is_email("jen@example.org"));
        assert!(!is_email("jen.example.org"));
        assert!(!is_email("jen@localhost"));
        assert!(!is_email("jen @example.org"));
        assert!(!is_email("@example.org"));
    }

    #[test]
    fn test_username_shape() {
        assert!(is_username("test_user"));
        assert!(is_username("b.meson2"));
        assert!(!is_username("2fast"));
        assert!(!is_username("has space"));
        assert!(!is_username(""));
    }

    #[test]
    fn test_word_chars() {
        assert!(is_word_chars("T666"));
        assert!(is_word_chars(""));
        assert!(!is_word_chars("THIS IS NOT VALID"));
    }

    #[test]
    fn test_checkbox() {
        assert!(checkbox(&Some("y".into())));
        assert!(checkbox(&Some("True".into())));
        assert!(!checkbox(&Some("".into())));
        assert!(!checkbox(&Some("false".into())));
        assert!(!checkbox(&None));
    }

    #[test]
    fn test_length_counts_chars() {
        assert!(length_between("ééé", 3, 3));
        assert!(!length_between("weak", 8, 64));
    }
}
