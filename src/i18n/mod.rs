//! Internationalization: language negotiation and localized chrome.
//!
//! # Architecture
//!
//! - `detector`: pure negotiation from cookie, `Accept-Language`, and settings
//! - `settings`: site language settings and translation siblings
//! - `cookie`: reading and writing the language preference cookie
//! - `strings`: localized strings for the page shell and block views

pub mod cookie;
mod detector;
mod settings;
mod strings;

pub use detector::{detect_language, extract_language_from_path, parse_accept_language};
pub(crate) use settings::{SiteResponse, TranslationsResponse};
pub use settings::{LanguageSettings, Translation, TranslationSet, FALLBACK_LANGUAGE};
pub use strings::LanguageStrings;
