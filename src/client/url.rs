//! Request URL resolution

use compact_str::{format_compact, CompactString};

/// Check whether a URL is absolute.
///
/// A URL is absolute when it begins with `<scheme>://` or is protocol-relative
/// (`//`). Scheme names follow RFC 3986: a letter followed by any combination
/// of letters, digits, `+`, `-` or `.`.
pub fn is_absolute_url(url: &str) -> bool {
    if url.starts_with("//") {
        return true;
    }

    match url.find("://") {
        Some(idx) if idx > 0 => {
            let scheme = &url[..idx];
            let mut chars = scheme.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        },
        _ => false,
    }
}

/// Join a base URL and a relative path with exactly one slash.
pub fn combine_urls(base_url: &str, relative_url: &str) -> CompactString {
    if relative_url.is_empty() {
        return base_url.into();
    }

    format_compact!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        relative_url.trim_start_matches('/')
    )
}

/// Resolve the URL a request should be sent to.
///
/// Absolute URLs pass through untouched; anything else is combined with the
/// base URL when one is set.
pub fn resolve_url(requested_url: &str, base_url: Option<&str>) -> CompactString {
    match base_url {
        Some(base) if !base.is_empty() && !is_absolute_url(requested_url) => {
            combine_urls(base, requested_url)
        },
        _ => requested_url.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url_detection() {
        assert!(is_absolute_url("https://api.example.com"));
        assert!(is_absolute_url("http://api.example.com/v1"));
        assert!(is_absolute_url("custom+scheme.v2://host"));
        assert!(is_absolute_url("//cdn.example.com/img.png"));

        assert!(!is_absolute_url("users"));
        assert!(!is_absolute_url("/users"));
        assert!(!is_absolute_url("://missing-scheme"));
        assert!(!is_absolute_url("1http://leading-digit"));
        assert!(!is_absolute_url(""));
    }

    #[test]
    fn test_combine_urls_normalizes_slashes() {
        assert_eq!(combine_urls("https://api.example.com/v1", "users"), "https://api.example.com/v1/users");
        assert_eq!(combine_urls("https://api.example.com/v1/", "/users"), "https://api.example.com/v1/users");
        assert_eq!(combine_urls("https://api.example.com/v1//", "//users"), "https://api.example.com/v1/users");
    }

    #[test]
    fn test_combine_urls_empty_path_yields_base() {
        assert_eq!(combine_urls("https://api.example.com/v1", ""), "https://api.example.com/v1");
    }

    #[test]
    fn test_resolve_url_prefixes_relative_paths() {
        let base = Some("https://api.example.com/v1");
        assert_eq!(resolve_url("users", base), "https://api.example.com/v1/users");
        assert_eq!(resolve_url("/users", base), "https://api.example.com/v1/users");
    }

    #[test]
    fn test_resolve_url_passes_absolute_urls_through() {
        let base = Some("https://api.example.com/v1");
        assert_eq!(resolve_url("https://other.example.com/x", base), "https://other.example.com/x");
        assert_eq!(resolve_url("//cdn.example.com/img.png", base), "//cdn.example.com/img.png");
    }

    #[test]
    fn test_resolve_url_without_base() {
        assert_eq!(resolve_url("users", None), "users");
        assert_eq!(resolve_url("users", Some("")), "users");
    }
}
