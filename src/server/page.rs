//! Content page handler and the HTML document around the blocks.

use super::AppState;
use crate::api::NavItem;
use crate::blocks::views::{attr, text};
use crate::blocks::{prefetch_listings, render_blocks, ContentNode, PaginationContext, RenderContext};
use crate::i18n::{extract_language_from_path, LanguageSettings, LanguageStrings};
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use tracing::{debug, warn};
use url::Url;

pub async fn render_page(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let path = uri.path();
    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or(path);
    let Ok(url) = Url::parse(&format!("{}{}", state.config.public_url, target)) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let client = &state.client;
    let (content, navigation, settings) = tokio::join!(
        client.fetch_content(path),
        client.fetch_navigation(path, state.config.navigation_depth),
        client.fetch_site_settings(),
    );

    let page = match content {
        Ok(page) => page,
        Err(e) if e.is_not_found() => {
            debug!("No content at {}", path);
            let language = path_language(path, &settings);
            return error_page(StatusCode::NOT_FOUND, language, &settings, path);
        }
        Err(e) => {
            warn!("Content fetch failed for {}: {}", path, e);
            let language = path_language(path, &settings);
            return error_page(StatusCode::BAD_GATEWAY, language, &settings, path);
        }
    };

    let language = page
        .language_code()
        .unwrap_or_else(|| path_language(path, &settings))
        .to_string();
    let strings = LanguageStrings::for_code(&language);

    let pagination = PaginationContext::for_tree(&page.tree);
    let listings = prefetch_listings(
        client,
        &page.tree,
        &pagination,
        &url,
        path,
        state.config.listing_page_size,
    )
    .await;

    let ctx = RenderContext {
        path,
        url: &url,
        page: &page,
        api_base: client.api_base(),
        language: &language,
        listings: &listings,
        pagination: &pagination,
        variations: &state.variations,
        strings,
    };
    let body = render_blocks(&page.tree, &state.blocks, &ctx).await;

    let shell = Shell {
        language: &language,
        title: &page.title,
        strings,
        settings: &settings,
        path,
    };
    let menu = navigation_menu(&navigation, &ctx, strings);
    Html(shell.document(&menu, &page_main(&page, &body))).into_response()
}

/// Language of a path without content: its first segment, else the default.
fn path_language<'a>(path: &str, settings: &'a LanguageSettings) -> &'a str {
    extract_language_from_path(path, &settings.available_languages)
        .unwrap_or(&settings.default_language)
}

fn page_main(page: &ContentNode, body: &str) -> String {
    let kind = page.kind.to_lowercase().replace(' ', "-");
    format!(
        "<main id=\"main\" class=\"content-type-{}\">{}</main>",
        attr(&kind),
        body
    )
}

fn error_page(status: StatusCode, language: &str, settings: &LanguageSettings, path: &str) -> Response {
    let strings = LanguageStrings::for_code(language);
    let (title, message) = if status == StatusCode::NOT_FOUND {
        (strings.not_found_title, strings.not_found_body)
    } else {
        (strings.error_title, strings.error_body)
    };

    let shell = Shell {
        language,
        title,
        strings,
        settings,
        path,
    };
    let main = format!(
        "<main id=\"main\" class=\"error-page\"><h1>{}</h1><p>{}</p></main>",
        text(title),
        text(message)
    );
    (status, Html(shell.document("", &main))).into_response()
}

/// The document around the main content.
struct Shell<'a> {
    language: &'a str,
    title: &'a str,
    strings: &'static LanguageStrings,
    settings: &'a LanguageSettings,
    path: &'a str,
}

impl Shell<'_> {
    fn document(&self, navigation: &str, main: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"{}\"><head><meta charset=\"utf-8\">\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
             <title>{}</title></head><body><header>{}{}</header>{}</body></html>",
            attr(self.language),
            text(self.title),
            navigation,
            self.language_switcher(),
            main
        )
    }

    /// Links through `/_language/{code}` so the choice is remembered.
    fn language_switcher(&self) -> String {
        if !self.settings.is_multilingual() {
            return String::new();
        }

        let next: String = url::form_urlencoded::byte_serialize(self.path.as_bytes()).collect();
        let mut out = format!(
            "<nav class=\"language-switcher\" aria-label=\"{}\"><ul>",
            attr(self.strings.language_switcher_label)
        );
        for code in &self.settings.available_languages {
            let current = if code == self.language {
                " aria-current=\"true\""
            } else {
                ""
            };
            out.push_str(&format!(
                "<li><a href=\"/_language/{}?next={}\" hreflang=\"{}\" lang=\"{}\"{}>{}</a></li>",
                attr(code),
                next,
                attr(code),
                attr(code),
                current,
                text(&LanguageStrings::native_name_for(code))
            ));
        }
        out.push_str("</ul></nav>");
        out
    }
}

fn navigation_menu(items: &[NavItem], ctx: &RenderContext<'_>, strings: &LanguageStrings) -> String {
    if items.is_empty() {
        return String::new();
    }
    format!(
        "<nav class=\"navigation\" aria-label=\"{}\">{}</nav>",
        attr(strings.navigation_label),
        navigation_list(items, ctx)
    )
}

fn navigation_list(items: &[NavItem], ctx: &RenderContext<'_>) -> String {
    let mut out = String::from("<ul>");
    for item in items {
        let href = ctx.site_path(&item.id);
        let current = if href == ctx.path { " aria-current=\"page\"" } else { "" };
        out.push_str(&format!(
            "<li><a href=\"{}\"{}>{}</a>",
            attr(&href),
            current,
            text(&item.title)
        ));
        if !item.items.is_empty() {
            out.push_str(&navigation_list(&item.items, ctx));
        }
        out.push_str("</li>");
    }
    out.push_str("</ul>");
    out
}
