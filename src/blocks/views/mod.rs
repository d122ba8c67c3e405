//! HTML views for each block type.
//!
//! Views are plain synchronous renderers: all network data a view needs
//! (listing results, grid children) is resolved before `render` is called.

mod fallback;
mod grid;
mod listing;
mod media;
mod table;
mod teaser;
mod text;

pub use fallback::FallbackView;
pub use grid::GridView;
pub use listing::{ListingView, SearchView};
pub use media::{ImageView, MapsView, VideoView};
pub use table::{TableView, TocView};
pub use teaser::TeaserView;
pub use text::{render_slate, slate_plaintext, DescriptionView, HtmlView, SlateView, TitleView};

use super::model::BlockInstance;
use super::renderer::RenderContext;
use serde_json::Value;

/// Renders one block instance to an HTML fragment.
pub trait BlockView: Send + Sync {
    fn render(&self, props: &BlockProps<'_>) -> String;
}

/// Everything a view gets to see.
pub struct BlockProps<'a> {
    pub key: &'a str,
    pub block: &'a BlockInstance,
    pub ctx: &'a RenderContext<'a>,
    /// Already rendered child blocks (grid columns), in layout order
    pub children: &'a [String],
}

impl BlockProps<'_> {
    /// `<{element} class="block {tag}[ extra]" id="{key}">{inner}</{element}>`
    pub fn wrap(&self, element: &str, extra_class: Option<&str>, inner: &str) -> String {
        let tag = self.block.kind();
        let class = match extra_class {
            Some(extra) => format!("block {} {}", tag.tag(), extra),
            None => format!("block {}", tag.tag()),
        };
        format!(
            "<{element} class=\"{}\" id=\"{}\">{}</{element}>",
            attr(&class),
            attr(self.key),
            inner,
            element = element
        )
    }
}

pub(crate) fn text(value: &str) -> String {
    html_escape::encode_text(value).into_owned()
}

pub(crate) fn attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

/// Target of a link field: a plain string, an object with `@id`, or a
/// list whose first object has one.
pub(crate) fn link_target(value: &Value) -> Option<&str> {
    match value {
        Value::String(url) => Some(url.as_str()).filter(|url| !url.is_empty()),
        Value::Object(map) => map.get("@id").and_then(Value::as_str),
        Value::Array(items) => items.first().and_then(link_target),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escaping() {
        assert_eq!(text("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
        assert_eq!(attr("a\"b"), "a&quot;b");
    }

    #[test]
    fn test_link_target_shapes() {
        assert_eq!(link_target(&json!("http://b/x")), Some("http://b/x"));
        assert_eq!(link_target(&json!("")), None);
        assert_eq!(link_target(&json!({"@id": "http://b/y"})), Some("http://b/y"));
        assert_eq!(
            link_target(&json!([{"@id": "http://b/z", "title": "Z"}])),
            Some("http://b/z")
        );
        assert_eq!(link_target(&json!([])), None);
        assert_eq!(link_target(&json!(3)), None);
    }
}
