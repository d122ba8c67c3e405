//! Per-request language redirects.
//!
//! [`decide`] runs before page rendering and either lets the request
//! through or answers with a temporary redirect:
//!
//! - the site root goes to `/{lang}/`, negotiated from the preference
//!   cookie, `Accept-Language`, and the site default
//! - any other path with a preference cookie goes to the translation of
//!   the current content in the preferred language, when one exists
//!
//! The gateway calls are fail-soft, so every failure ends in
//! [`Outcome::Continue`].

pub mod proxy;

use crate::api::PloneClient;
use crate::i18n::{detect_language, extract_language_from_path, LanguageSettings, TranslationSet};
use axum::http::StatusCode;
use std::future::Future;
use tracing::{debug, info};

/// Result of the redirect decision for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Redirect { status: StatusCode, location: String },
}

impl Outcome {
    pub fn temporary(location: impl Into<String>) -> Self {
        Outcome::Redirect {
            status: StatusCode::TEMPORARY_REDIRECT,
            location: location.into(),
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Outcome::Redirect { .. })
    }
}

/// The language data the redirect decision depends on.
///
/// Implementations must not fail: unavailable data is reported as
/// single-language settings or an empty translation set.
pub trait LanguageGateway {
    fn site_settings(&self) -> impl Future<Output = LanguageSettings> + Send;

    fn content_translations(
        &self,
        content_path: &str,
    ) -> impl Future<Output = TranslationSet> + Send;

    /// Site-relative path for an absolute content URL
    fn relative_path(&self, absolute_url: &str) -> String;
}

impl LanguageGateway for PloneClient {
    fn site_settings(&self) -> impl Future<Output = LanguageSettings> + Send {
        self.fetch_site_settings()
    }

    fn content_translations(
        &self,
        content_path: &str,
    ) -> impl Future<Output = TranslationSet> + Send {
        self.fetch_content_translations(content_path)
    }

    fn relative_path(&self, absolute_url: &str) -> String {
        PloneClient::relative_path(self, absolute_url)
    }
}

/// What the redirect decision looks at in a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedirectRequest<'a> {
    pub path: &'a str,
    pub cookie_language: Option<&'a str>,
    pub accept_language: Option<&'a str>,
}

pub async fn decide<G: LanguageGateway>(gateway: &G, request: &RedirectRequest<'_>) -> Outcome {
    if request.path == "/" {
        root_redirect(gateway, request).await
    } else {
        translation_redirect(gateway, request).await
    }
}

async fn root_redirect<G: LanguageGateway>(gateway: &G, request: &RedirectRequest<'_>) -> Outcome {
    let settings = gateway.site_settings().await;
    if !settings.is_multilingual() {
        return Outcome::Continue;
    }

    let language = detect_language(
        request.cookie_language,
        request.accept_language,
        &settings.available_languages,
        settings.use_request_negotiation,
        &settings.default_language,
    );

    info!("Redirecting site root to /{}/", language);
    Outcome::temporary(format!("/{}/", language))
}

async fn translation_redirect<G: LanguageGateway>(
    gateway: &G,
    request: &RedirectRequest<'_>,
) -> Outcome {
    // Without a stated preference there is nothing to negotiate; skip the
    // settings fetch entirely.
    let Some(cookie_language) = request.cookie_language else {
        return Outcome::Continue;
    };

    let settings = gateway.site_settings().await;
    if !settings.is_multilingual() {
        return Outcome::Continue;
    }
    let Some(preferred) = settings.find_available(cookie_language) else {
        debug!("Ignoring preference cookie for unavailable language '{}'", cookie_language);
        return Outcome::Continue;
    };
    if extract_language_from_path(request.path, &settings.available_languages) == Some(preferred) {
        return Outcome::Continue;
    }

    let content_path = request.path.trim_end_matches('/');
    let translations = gateway.content_translations(content_path).await;
    let Some(sibling) = translations.sibling(preferred) else {
        debug!("No '{}' translation of {}", preferred, request.path);
        return Outcome::Continue;
    };

    let location = gateway.relative_path(&sibling.id);
    info!("Redirecting {} to its '{}' translation {}", request.path, preferred, location);
    Outcome::temporary(location)
}
