//! Site-wide language configuration and per-content translation siblings.

use serde::Deserialize;

/// Language used when the site settings cannot be fetched.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Language configuration of the site, fetched from `@site` on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSettings {
    /// Available language codes in site order (never empty)
    pub available_languages: Vec<String>,

    /// Default language (always a member of `available_languages`)
    pub default_language: String,

    /// Whether the preference cookie is written by the language switcher
    pub use_cookie_negotiation: bool,

    /// Whether `Accept-Language` is honored
    pub use_request_negotiation: bool,
}

impl LanguageSettings {
    /// Build settings, repairing the invariants: an empty list becomes the
    /// fallback language and a missing default is prepended.
    pub fn new(
        available_languages: Vec<String>,
        default_language: impl Into<String>,
        use_cookie_negotiation: bool,
        use_request_negotiation: bool,
    ) -> Self {
        let mut default_language = default_language.into();
        let mut available: Vec<String> = Vec::with_capacity(available_languages.len());
        for code in available_languages {
            let code = code.trim().to_string();
            if !code.is_empty() && !available.contains(&code) {
                available.push(code);
            }
        }

        if default_language.trim().is_empty() {
            default_language = available
                .first()
                .cloned()
                .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string());
        }
        if !available.contains(&default_language) {
            available.insert(0, default_language.clone());
        }

        Self {
            available_languages: available,
            default_language,
            use_cookie_negotiation,
            use_request_negotiation,
        }
    }

    /// Single-language settings that never trigger a redirect.
    pub fn fallback() -> Self {
        Self::new(vec![FALLBACK_LANGUAGE.to_string()], FALLBACK_LANGUAGE, false, false)
    }

    /// Sites with fewer than two languages never redirect.
    pub fn is_multilingual(&self) -> bool {
        self.available_languages.len() >= 2
    }

    /// The available code matching `code` case-insensitively, as spelled
    /// in the settings.
    pub fn find_available(&self, code: &str) -> Option<&str> {
        self.available_languages
            .iter()
            .find(|c| c.eq_ignore_ascii_case(code.trim()))
            .map(String::as_str)
    }
}

/// Wire shape of the `@site` endpoint (only the language fields).
#[derive(Debug, Deserialize)]
pub(crate) struct SiteResponse {
    #[serde(rename = "plone.available_languages", default)]
    pub available_languages: Vec<String>,

    #[serde(rename = "plone.default_language", default)]
    pub default_language: Option<String>,

    #[serde(rename = "plone.use_cookie_negotiation", default)]
    pub use_cookie_negotiation: bool,

    #[serde(rename = "plone.use_request_negotiation", default)]
    pub use_request_negotiation: bool,
}

impl From<SiteResponse> for LanguageSettings {
    fn from(site: SiteResponse) -> Self {
        if site.available_languages.is_empty() && site.default_language.is_none() {
            return LanguageSettings::fallback();
        }

        LanguageSettings::new(
            site.available_languages,
            site.default_language.unwrap_or_default(),
            site.use_cookie_negotiation,
            site.use_request_negotiation,
        )
    }
}

/// A sibling of a content object in another language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Translation {
    /// Absolute URL of the sibling
    #[serde(rename = "@id", alias = "id")]
    pub id: String,

    /// Language code of the sibling
    pub language: String,
}

/// Translation siblings of one content object, at most one per language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationSet {
    items: Vec<Translation>,
}

impl TranslationSet {
    /// Build a set; when a language appears twice the first sibling wins.
    pub fn from_items(items: impl IntoIterator<Item = Translation>) -> Self {
        let mut set = Self::default();
        for item in items {
            if set.sibling(&item.language).is_none() {
                set.items.push(item);
            }
        }
        set
    }

    pub fn sibling(&self, language: &str) -> Option<&Translation> {
        self.items.iter().find(|t| t.language == language)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Translation> {
        self.items.iter()
    }
}

/// The `@translations` endpoint answers with a bare list or an `items` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TranslationsResponse {
    List(Vec<Translation>),
    Envelope {
        #[serde(default)]
        items: Vec<Translation>,
    },
}

impl From<TranslationsResponse> for TranslationSet {
    fn from(response: TranslationsResponse) -> Self {
        match response {
            TranslationsResponse::List(items) | TranslationsResponse::Envelope { items } => {
                TranslationSet::from_items(items)
            }
        }
    }
}
