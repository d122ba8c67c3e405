//! The language preference cookie.

use axum::http::{header, HeaderMap};
use chrono::{Duration, Utc};

/// Six months
pub const COOKIE_MAX_AGE_DAYS: i64 = 180;

/// Read a cookie value from all `Cookie` headers of a request.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value storing the preferred language for six months.
pub fn language_cookie(name: &str, language: &str, secure: bool) -> String {
    let expires = Utc::now() + Duration::days(COOKIE_MAX_AGE_DAYS);
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; Expires={}; SameSite=Strict",
        name,
        language,
        COOKIE_MAX_AGE_DAYS * 24 * 60 * 60,
        expires.format("%a, %d %b %Y %H:%M:%S GMT")
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes a stored preference.
pub fn expired_language_cookie(name: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; SameSite=Strict",
        name
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(cookies: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        headers
    }

    // ==================== read_cookie Tests ====================

    #[test]
    fn test_read_cookie_single() {
        let headers = headers_with(&["I18N_LANGUAGE=de"]);
        assert_eq!(read_cookie(&headers, "I18N_LANGUAGE"), Some("de".to_string()));
    }

    #[test]
    fn test_read_cookie_among_others() {
        let headers = headers_with(&["session=abc; I18N_LANGUAGE=fr; theme=dark"]);
        assert_eq!(read_cookie(&headers, "I18N_LANGUAGE"), Some("fr".to_string()));
    }

    #[test]
    fn test_read_cookie_across_headers() {
        let headers = headers_with(&["session=abc", "I18N_LANGUAGE=\"en\""]);
        assert_eq!(read_cookie(&headers, "I18N_LANGUAGE"), Some("en".to_string()));
    }

    #[test]
    fn test_read_cookie_missing_or_empty() {
        assert_eq!(read_cookie(&HeaderMap::new(), "I18N_LANGUAGE"), None);
        assert_eq!(read_cookie(&headers_with(&["I18N_LANGUAGE="]), "I18N_LANGUAGE"), None);
        assert_eq!(read_cookie(&headers_with(&["LANGUAGE=de"]), "I18N_LANGUAGE"), None);
    }

    // ==================== language_cookie Tests ====================

    #[test]
    fn test_language_cookie_attributes() {
        let cookie = language_cookie("I18N_LANGUAGE", "de", false);

        assert!(cookie.starts_with("I18N_LANGUAGE=de; "));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=15552000"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains(" GMT"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_language_cookie_secure() {
        let cookie = language_cookie("I18N_LANGUAGE", "de", true);
        assert!(cookie.ends_with("; Secure"));
    }

    // ==================== expired_language_cookie Tests ====================

    #[test]
    fn test_expired_language_cookie() {
        let cookie = expired_language_cookie("I18N_LANGUAGE", false);
        assert!(cookie.starts_with("I18N_LANGUAGE=; Path=/; Max-Age=0;"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(!cookie.contains("Secure"));

        assert!(expired_language_cookie("I18N_LANGUAGE", true).ends_with("; Secure"));
    }
}
