//! Language detection from the preference cookie, the `Accept-Language`
//! header, and the site's language settings.
//!
//! Everything here is pure: no I/O, no errors. Unusable input degrades to
//! "no preference found".

use std::cmp::Ordering;

/// One weighted entry of an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq)]
struct WeightedTag {
    tag: String,
    quality: f32,
}

/// Parse an `Accept-Language` header into language tags ordered by
/// descending `q` weight.
///
/// Ties keep header order, entries without `q` weigh 1.0. Entries with
/// `q=0`, an unparsable weight, or an invalid language range are dropped.
pub fn parse_accept_language(header: &str) -> Vec<String> {
    let mut entries: Vec<WeightedTag> = header
        .split(',')
        .filter_map(parse_entry)
        .collect();

    // stable: equal weights stay in header order
    entries.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));

    entries.into_iter().map(|entry| entry.tag).collect()
}

fn parse_entry(raw: &str) -> Option<WeightedTag> {
    let mut parts = raw.split(';');
    let tag = parts.next()?.trim();
    if !is_language_range(tag) {
        return None;
    }

    let mut quality = 1.0_f32;
    for param in parts {
        let param = param.trim();
        if let Some(value) = param.strip_prefix("q=").or_else(|| param.strip_prefix("Q=")) {
            quality = value.trim().parse().ok()?;
        }
    }

    if !(quality > 0.0 && quality <= 1.0) {
        return None;
    }

    Some(WeightedTag {
        tag: tag.to_string(),
        quality,
    })
}

/// `*` or `alpha{1,8}(-alphanum{1,8})*`
fn is_language_range(tag: &str) -> bool {
    if tag == "*" {
        return true;
    }

    let mut subtags = tag.split('-');
    let primary_ok = subtags
        .next()
        .is_some_and(|p| (1..=8).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphabetic()));

    primary_ok
        && subtags.all(|s| (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// Find `candidate` in `available`, ignoring ASCII case. Returns the
/// spelling used by the site.
fn find_available<'a>(candidate: &str, available: &'a [String]) -> Option<&'a str> {
    available
        .iter()
        .find(|code| code.eq_ignore_ascii_case(candidate))
        .map(String::as_str)
}

/// Resolve the language to serve.
///
/// Priority, first match wins:
/// 1. `cookie_lang` when it is an available language (regardless of
///    `use_request_negotiation`)
/// 2. `Accept-Language` tags by weight, exact match first and then the
///    primary subtag, only when `use_request_negotiation` is set
/// 3. `default_language`
pub fn detect_language(
    cookie_lang: Option<&str>,
    accept_language: Option<&str>,
    available_languages: &[String],
    use_request_negotiation: bool,
    default_language: &str,
) -> String {
    if let Some(code) = cookie_lang.and_then(|c| find_available(c, available_languages)) {
        return code.to_string();
    }

    if use_request_negotiation {
        if let Some(header) = accept_language {
            for tag in parse_accept_language(header) {
                if let Some(code) = find_available(&tag, available_languages) {
                    return code.to_string();
                }

                let primary = tag.split('-').next().unwrap_or(&tag);
                if let Some(code) = find_available(primary, available_languages) {
                    return code.to_string();
                }
            }
        }
    }

    default_language.to_string()
}

/// The language encoded in the first path segment, if it is an available one.
///
/// `/de/ueber-uns` yields `de`; `/` and `/ueber-uns` yield `None`.
pub fn extract_language_from_path<'a>(
    pathname: &str,
    available_languages: &'a [String],
) -> Option<&'a str> {
    let first = pathname.trim_start_matches('/').split('/').next()?;
    if first.is_empty() {
        return None;
    }

    available_languages
        .iter()
        .find(|code| code.as_str() == first)
        .map(String::as_str)
}
