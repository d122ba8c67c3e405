use super::{AppState, INTERNAL_PREFIXES};
use crate::i18n::cookie::read_cookie;
use crate::redirect::{self, proxy, Outcome, RedirectRequest};
use axum::extract::{Request, State};
use axum::http::header::{ACCEPT_LANGUAGE, LOCATION};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Runs ahead of every handler: binary downloads are proxied, then GET and
/// HEAD requests for content go through the language redirect decision.
pub async fn intercept(State(state): State<AppState>, request: Request, next: Next) -> Response {
    // Owned copies: the request body is not `Sync`, so no borrow of the
    // request may live across an await.
    let path = request.uri().path().to_string();

    if proxy::is_binary_path(&path) {
        let target = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| path.clone());
        return proxy::forward(&state.client, &target).await;
    }

    if is_internal(&path) || !matches!(*request.method(), Method::GET | Method::HEAD) {
        return next.run(request).await;
    }

    let cookie = read_cookie(request.headers(), &state.config.language_cookie);
    let accept = request
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let outcome = redirect::decide(
        &state.client,
        &RedirectRequest {
            path: &path,
            cookie_language: cookie.as_deref(),
            accept_language: accept.as_deref(),
        },
    )
    .await;

    match outcome {
        Outcome::Redirect { status, location } => (status, [(LOCATION, location)]).into_response(),
        Outcome::Continue => next.run(request).await,
    }
}

fn is_internal(path: &str) -> bool {
    INTERNAL_PREFIXES
        .iter()
        .any(|prefix| {
            path == prefix.trim_end_matches('/') || (prefix.ends_with('/') && path.starts_with(prefix))
        })
}
