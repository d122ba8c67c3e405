//! Alternative templates for listing results.
//!
//! A listing block names its template in `variation`. Unknown or missing
//! names resolve to the default template, never to nothing.

use super::renderer::RenderContext;
use super::views::{attr, text};
use crate::api::ListingItem;
use chrono::{DateTime, NaiveDateTime};
use std::collections::HashMap;
use std::sync::Arc;

pub const DEFAULT_VARIATION: &str = "default";

pub trait ListingVariation: Send + Sync {
    fn render(&self, items: &[ListingItem], ctx: &RenderContext<'_>) -> String;
}

pub type VariationHandle = Arc<dyn ListingVariation>;

pub struct VariationRegistry {
    entries: HashMap<String, VariationHandle>,
    default: VariationHandle,
}

impl VariationRegistry {
    pub fn new(default: impl ListingVariation + 'static) -> Self {
        let default: VariationHandle = Arc::new(default);
        let mut entries = HashMap::new();
        entries.insert(DEFAULT_VARIATION.to_string(), default.clone());
        Self { entries, default }
    }

    pub fn standard() -> Self {
        let mut registry = Self::new(DefaultVariation);
        registry.register("summary", SummaryVariation);
        registry.register("imageGallery", ImageGalleryVariation);
        registry
    }

    pub fn register(&mut self, id: &str, variation: impl ListingVariation + 'static) {
        self.entries.insert(id.to_string(), Arc::new(variation));
    }

    /// Name of the template that `requested` resolves to.
    pub fn resolve_id<'a>(&self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(id) if self.entries.contains_key(id) => id,
            _ => DEFAULT_VARIATION,
        }
    }

    pub fn resolve(&self, requested: Option<&str>) -> VariationHandle {
        requested
            .and_then(|id| self.entries.get(id))
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }
}

impl std::fmt::Debug for VariationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("VariationRegistry").field("variations", &ids).finish()
    }
}

/// Plain list of linked titles with descriptions.
pub struct DefaultVariation;

impl ListingVariation for DefaultVariation {
    fn render(&self, items: &[ListingItem], ctx: &RenderContext<'_>) -> String {
        let mut out = String::from("<ul class=\"listing-items\">");
        for item in items {
            out.push_str(&format!(
                "<li class=\"listing-item\"><a href=\"{}\">{}</a>",
                attr(&ctx.site_path(&item.id)),
                text(&item.title)
            ));
            if !item.description.is_empty() {
                out.push_str(&format!("<p>{}</p>", text(&item.description)));
            }
            out.push_str("</li>");
        }
        out.push_str("</ul>");
        out
    }
}

/// Cards with lead image, effective date, and description.
pub struct SummaryVariation;

impl ListingVariation for SummaryVariation {
    fn render(&self, items: &[ListingItem], ctx: &RenderContext<'_>) -> String {
        let mut out = String::from("<div class=\"listing-cards\">");
        for item in items {
            let href = ctx.site_path(&item.id);
            out.push_str(&format!("<article class=\"card\"><a href=\"{}\">", attr(&href)));
            if let Some(src) = image_src(item, &href, "preview") {
                out.push_str(&format!(
                    "<img src=\"{}\" alt=\"\" loading=\"lazy\">",
                    attr(&src)
                ));
            }
            out.push_str(&format!("<h3>{}</h3></a>", text(&item.title)));
            if let Some((datetime, label)) = item.effective.as_deref().and_then(format_date) {
                out.push_str(&format!(
                    "<time datetime=\"{}\">{}</time>",
                    attr(&datetime),
                    text(&label)
                ));
            }
            if !item.description.is_empty() {
                out.push_str(&format!("<p>{}</p>", text(&item.description)));
            }
            out.push_str("</article>");
        }
        out.push_str("</div>");
        out
    }
}

/// Image grid; items without an image are left out.
pub struct ImageGalleryVariation;

impl ListingVariation for ImageGalleryVariation {
    fn render(&self, items: &[ListingItem], ctx: &RenderContext<'_>) -> String {
        let mut out = String::from("<div class=\"image-gallery\">");
        for item in items {
            let href = ctx.site_path(&item.id);
            let Some(src) = image_src(item, &href, "large") else {
                continue;
            };
            out.push_str(&format!(
                "<figure><a href=\"{}\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\"></a><figcaption>{}</figcaption></figure>",
                attr(&href),
                attr(&src),
                attr(&item.title),
                text(&item.title)
            ));
        }
        out.push_str("</div>");
        out
    }
}

fn image_src(item: &ListingItem, href: &str, scale: &str) -> Option<String> {
    if !item.has_image() || !href.starts_with('/') {
        return None;
    }
    let field = item.image_field.as_deref().unwrap_or("image");
    Some(format!(
        "{}/@@images/{}/{}",
        href.trim_end_matches('/'),
        field,
        scale
    ))
}

/// `(machine date, display date)` for an effective date. Catalog dates come
/// with or without an offset; the unset sentinel year 1969 is ignored.
fn format_date(raw: &str) -> Option<(String, String)> {
    let naive = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;

    if naive.format("%Y").to_string() == "1969" {
        return None;
    }
    Some((
        naive.format("%Y-%m-%d").to_string(),
        naive.format("%d.%m.%Y").to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::renderer::test_support::Fixtures;
    use crate::blocks::ContentNode;

    fn item(id: &str, title: &str, image: Option<&str>, effective: Option<&str>) -> ListingItem {
        ListingItem {
            id: format!("http://backend{}", id),
            kind: "News Item".to_string(),
            title: title.to_string(),
            description: String::new(),
            effective: effective.map(str::to_string),
            image_field: image.map(str::to_string),
        }
    }

    // ==================== Resolution Tests ====================

    #[test]
    fn test_resolve_falls_back_to_default() {
        let registry = VariationRegistry::standard();
        assert_eq!(registry.resolve_id(None), "default");
        assert_eq!(registry.resolve_id(Some("carousel")), "default");
        assert_eq!(registry.resolve_id(Some("summary")), "summary");

        let fixtures = Fixtures::new(ContentNode::default());
        let ctx = fixtures.context();
        let items = vec![item("/en/a", "A", None, None)];
        assert_eq!(
            registry.resolve(Some("carousel")).render(&items, &ctx),
            registry.resolve(None).render(&items, &ctx)
        );
    }

    // ==================== Template Tests ====================

    #[test]
    fn test_default_variation_list() {
        let fixtures = Fixtures::new(ContentNode::default());
        let items = vec![item("/en/a", "A & B", None, None)];
        let html = DefaultVariation.render(&items, &fixtures.context());
        assert_eq!(
            html,
            "<ul class=\"listing-items\"><li class=\"listing-item\"><a href=\"/en/a\">A &amp; B</a></li></ul>"
        );
    }

    #[test]
    fn test_summary_variation_card() {
        let fixtures = Fixtures::new(ContentNode::default());
        let items = vec![item(
            "/en/news/a",
            "A",
            Some("image"),
            Some("2024-05-01T10:30:00+00:00"),
        )];
        let html = SummaryVariation.render(&items, &fixtures.context());

        assert!(html.contains("<img src=\"/en/news/a/@@images/image/preview\""));
        assert!(html.contains("<time datetime=\"2024-05-01\">01.05.2024</time>"));
    }

    #[test]
    fn test_gallery_skips_items_without_image() {
        let fixtures = Fixtures::new(ContentNode::default());
        let items = vec![
            item("/en/pics/a", "A", Some("image"), None),
            item("/en/pics/b", "B", None, None),
        ];
        let html = ImageGalleryVariation.render(&items, &fixtures.context());
        assert_eq!(html.matches("<figure>").count(), 1);
        assert!(html.contains("/en/pics/a/@@images/image/large"));
    }

    #[test]
    fn test_format_date_variants() {
        assert_eq!(
            format_date("2023-12-24T18:00:00"),
            Some(("2023-12-24".to_string(), "24.12.2023".to_string()))
        );
        assert_eq!(format_date("1969-12-31T00:00:00+00:00"), None);
        assert_eq!(format_date("None"), None);
    }
}
