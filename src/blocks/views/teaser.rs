use super::{attr, text, BlockProps, BlockView};
use serde_json::Value;

/// A linked card pointing at another content object.
pub struct TeaserView;

impl BlockView for TeaserView {
    fn render(&self, props: &BlockProps<'_>) -> String {
        let block = props.block;
        let target = match block.get("href") {
            Some(Value::Array(items)) => items.first(),
            Some(value @ Value::Object(_)) => Some(value),
            _ => None,
        };
        let Some(target) = target else {
            return props.wrap("div", None, "");
        };
        let Some(id) = target.get("@id").and_then(Value::as_str) else {
            return props.wrap("div", None, "");
        };

        let target_str = |key: &str| {
            target
                .get(key)
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
        };
        let title = block
            .str_field("title")
            .or_else(|| target_str("title"))
            .unwrap_or_default();
        let description = block
            .str_field("description")
            .or_else(|| target_str("description"))
            .unwrap_or_default();

        let href = props.ctx.site_path(id);
        let mut inner = format!("<a href=\"{}\">", attr(&href));

        let has_image = target
            .get("hasPreviewImage")
            .and_then(Value::as_bool)
            .unwrap_or(false)
            || target_str("image_field").is_some();
        if has_image && href.starts_with('/') {
            let field = target_str("image_field").unwrap_or("preview_image");
            inner.push_str(&format!(
                "<img src=\"{}/@@images/{}/teaser\" alt=\"\" loading=\"lazy\">",
                attr(href.trim_end_matches('/')),
                attr(field)
            ));
        }

        if let Some(head) = block.str_field("head_title") {
            inner.push_str(&format!("<span class=\"headline\">{}</span>", text(head)));
        }
        inner.push_str(&format!("<h2>{}</h2>", text(title)));
        if !description.is_empty() {
            inner.push_str(&format!("<p>{}</p>", text(description)));
        }
        inner.push_str("</a>");

        props.wrap("div", None, &inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::renderer::test_support::{render_one, Fixtures};
    use crate::blocks::{BlockInstance, ContentNode};
    use serde_json::json;

    #[test]
    fn test_teaser_uses_target_metadata() {
        let fixtures = Fixtures::new(ContentNode::default());
        let block = BlockInstance::new(
            "teaser",
            json!({"href": [{
                "@id": "http://backend/en/news/launch",
                "title": "Launch",
                "description": "We are live",
                "image_field": "image"
            }]}),
        );

        let html = render_one(&TeaserView, "t", &block, &fixtures.context());
        assert_eq!(
            html,
            "<div class=\"block teaser\" id=\"t\"><a href=\"/en/news/launch\">\
             <img src=\"/en/news/launch/@@images/image/teaser\" alt=\"\" loading=\"lazy\">\
             <h2>Launch</h2><p>We are live</p></a></div>"
        );
    }

    #[test]
    fn test_teaser_block_overrides() {
        let fixtures = Fixtures::new(ContentNode::default());
        let block = BlockInstance::new(
            "teaser",
            json!({
                "title": "Custom",
                "href": [{"@id": "http://backend/en/a", "title": "Original"}]
            }),
        );
        let html = render_one(&TeaserView, "t", &block, &fixtures.context());
        assert!(html.contains("<h2>Custom</h2>"));
        assert!(!html.contains("Original"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_teaser_without_target_is_empty() {
        let fixtures = Fixtures::new(ContentNode::default());
        let block = BlockInstance::new("teaser", json!({"href": []}));
        let html = render_one(&TeaserView, "t", &block, &fixtures.context());
        assert_eq!(html, "<div class=\"block teaser\" id=\"t\"></div>");
    }
}
