use super::{attr, text, BlockProps, BlockView};
use crate::blocks::listing::{ListingPage, SEARCH_TEXT_PARAM};

/// Paginated catalog results rendered through a variation template.
pub struct ListingView;

impl BlockView for ListingView {
    fn render(&self, props: &BlockProps<'_>) -> String {
        let variation = props
            .ctx
            .variations
            .resolve_id(props.block.str_field("variation"));

        let mut inner = String::new();
        if let Some(headline) = props.block.str_field("headline") {
            inner.push_str(&format!("<h2 class=\"headline\">{}</h2>", text(headline)));
        }
        inner.push_str(&render_results(props));

        props.wrap("div", Some(variation), &inner)
    }
}

/// A search form plus the results of the current search.
pub struct SearchView;

impl BlockView for SearchView {
    fn render(&self, props: &BlockProps<'_>) -> String {
        let ctx = props.ctx;
        let term = ctx
            .url
            .query_pairs()
            .find(|(name, _)| name == SEARCH_TEXT_PARAM)
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();

        let mut inner = String::new();
        if let Some(headline) = props.block.str_field("headline") {
            inner.push_str(&format!("<h2 class=\"headline\">{}</h2>", text(headline)));
        }
        inner.push_str(&format!(
            "<form class=\"search-form\" method=\"get\" action=\"{}\">\
             <label>{}<input type=\"search\" name=\"{}\" value=\"{}\"></label>\
             <button type=\"submit\">{}</button></form>",
            attr(ctx.path),
            text(ctx.strings.search_label),
            SEARCH_TEXT_PARAM,
            attr(&term),
            text(ctx.strings.search_button)
        ));
        inner.push_str(&render_results(props));

        props.wrap("div", None, &inner)
    }
}

fn render_results(props: &BlockProps<'_>) -> String {
    let ctx = props.ctx;
    let message = |body: &str| format!("<p class=\"listing-message\">{}</p>", text(body));

    let Some(listing) = ctx.listings.get(props.key) else {
        return message(ctx.strings.results_unavailable);
    };
    let Some(results) = &listing.results else {
        return message(ctx.strings.results_unavailable);
    };
    if results.items.is_empty() {
        return message(ctx.strings.no_results);
    }

    let variation = ctx.variations.resolve(props.block.str_field("variation"));
    let mut out = variation.render(&results.items, ctx);
    out.push_str(&pagination_nav(props, listing));
    out
}

fn pagination_nav(props: &BlockProps<'_>, listing: &ListingPage) -> String {
    let ctx = props.ctx;
    let total_pages = listing.total_pages();
    if total_pages <= 1 {
        return String::new();
    }

    let base = ctx.request_target();
    let link = |page: u32, rel: &str, label: &str| {
        format!(
            "<a rel=\"{}\" href=\"{}\">{}</a>",
            rel,
            attr(&ctx.pagination.page_url(base, page, props.key)),
            text(label)
        )
    };

    let current = listing.page.min(total_pages);
    let mut nav = format!(
        "<nav class=\"pagination\" aria-label=\"{}\">",
        attr(ctx.strings.pagination_label)
    );
    if current > 1 {
        nav.push_str(&link(current - 1, "prev", ctx.strings.previous_page));
    }
    nav.push_str(&format!(
        "<span class=\"current\">{} / {}</span>",
        current, total_pages
    ));
    if current < total_pages {
        nav.push_str(&link(current + 1, "next", ctx.strings.next_page));
    }
    nav.push_str("</nav>");
    nav
}
