use super::AppState;
use crate::i18n::cookie::{expired_language_cookie, language_cookie, read_cookie};
use crate::i18n::extract_language_from_path;
use axum::extract::{Path, Query, State};
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
pub struct SwitchParams {
    next: Option<String>,
}

/// `GET /_language/:lang?next=/path` stores the preference (when the site
/// negotiates by cookie) and sends the visitor to the translation of
/// `next` in `lang`, or to the language root.
pub async fn switch_language(
    State(state): State<AppState>,
    Path(requested): Path<String>,
    Query(params): Query<SwitchParams>,
    headers: HeaderMap,
) -> Response {
    let settings = state.client.fetch_site_settings().await;
    let Some(language) = settings.find_available(&requested).map(str::to_string) else {
        return (StatusCode::NOT_FOUND, "Unknown language").into_response();
    };

    let next = params
        .next
        .as_deref()
        .filter(|next| is_site_relative(next))
        .unwrap_or("/");
    let next_path = next.split(['?', '#']).next().unwrap_or(next);

    let location = if next_path == "/" {
        format!("/{}/", language)
    } else if extract_language_from_path(next_path, &settings.available_languages)
        == Some(language.as_str())
    {
        next.to_string()
    } else {
        let translations = state.client.fetch_content_translations(next_path).await;
        match translations.sibling(&language) {
            Some(sibling) => state.client.relative_path(&sibling.id),
            None => format!("/{}/", language),
        }
    };

    info!("Language switched to '{}', continuing at {}", language, location);
    let mut response = (StatusCode::SEE_OTHER, [(LOCATION, location)]).into_response();

    // A stored preference outranks the path on later requests: replace it
    // or remove it.
    let name = &state.config.language_cookie;
    let secure = state.config.is_https() || forwarded_https(&headers);
    let cookie = if settings.use_cookie_negotiation {
        Some(language_cookie(name, &language, secure))
    } else if read_cookie(&headers, name).is_some() {
        debug!("Removing stored language preference");
        Some(expired_language_cookie(name, secure))
    } else {
        None
    };

    if let Some(cookie) = cookie {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => warn!("Cannot set language cookie for '{}': {}", language, e),
        }
    }

    response
}

/// Local paths only: no scheme, no protocol-relative `//host`.
fn is_site_relative(next: &str) -> bool {
    next.starts_with('/') && !next.starts_with("//") && !next.starts_with("/\\")
}

fn forwarded_https(headers: &HeaderMap) -> bool {
    headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .is_some_and(|proto| proto.trim().eq_ignore_ascii_case("https"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_site_relative() {
        assert!(is_site_relative("/"));
        assert!(is_site_relative("/de/kontakt?x=1"));
        assert!(!is_site_relative("//evil.example.org/"));
        assert!(!is_site_relative("/\\evil.example.org"));
        assert!(!is_site_relative("https://evil.example.org/"));
        assert!(!is_site_relative("de/kontakt"));
        assert!(!is_site_relative(""));
    }

    #[test]
    fn test_forwarded_https() {
        let mut headers = HeaderMap::new();
        assert!(!forwarded_https(&headers));

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https, http"));
        assert!(forwarded_https(&headers));

        headers.insert("x-forwarded-proto", HeaderValue::from_static("http"));
        assert!(!forwarded_https(&headers));
    }
}
