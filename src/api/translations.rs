use super::PloneClient;
use crate::error::GatewayError;
use crate::i18n::{TranslationSet, TranslationsResponse};
use tracing::warn;

/// Traversal segment the API is usually mounted under; content ids omit it.
const API_TRAVERSAL: &str = "/++api++";

impl PloneClient {
    /// Fetch the translation siblings of the content at `content_path`.
    ///
    /// Never fails: any error yields an empty set, meaning no translation
    /// is known and no redirect is possible.
    pub async fn fetch_content_translations(&self, content_path: &str) -> TranslationSet {
        match self.try_fetch_content_translations(content_path).await {
            Ok(set) => set,
            Err(e) => {
                warn!("No translations for {}: {}", content_path, e);
                TranslationSet::default()
            }
        }
    }

    async fn try_fetch_content_translations(
        &self,
        content_path: &str,
    ) -> Result<TranslationSet, GatewayError> {
        let url = format!("{}/@translations", self.endpoint(content_path));
        let response: TranslationsResponse = self.get_json(&url).await?;
        Ok(response.into())
    }

    /// [`extract_relative_path_from_url`] against this client's API base.
    pub fn relative_path(&self, absolute_url: &str) -> String {
        extract_relative_path_from_url(absolute_url, &self.api_base)
    }
}

/// Turn an absolute content URL into a site-relative path.
///
/// The API base is stripped with and without its `/++api++` segment. URLs
/// outside the API are returned unchanged.
pub fn extract_relative_path_from_url(absolute_url: &str, api_base: &str) -> String {
    let base = api_base.trim_end_matches('/');
    let public_base = base.strip_suffix(API_TRAVERSAL).unwrap_or(base);

    for prefix in [base, public_base] {
        if prefix.is_empty() {
            continue;
        }
        let Some(rest) = absolute_url.strip_prefix(prefix) else {
            continue;
        };

        if rest.is_empty() {
            return "/".to_string();
        }
        if rest.starts_with('/') {
            return rest.to_string();
        }
        if rest.starts_with('?') || rest.starts_with('#') {
            return format!("/{}", rest);
        }
    }

    absolute_url.to_string()
}
