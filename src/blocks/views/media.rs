use super::{attr, link_target, BlockProps, BlockView};
use crate::error::LoadError;
use regex::Regex;

/// Image scale requested for each block size
fn scale_for(size: Option<&str>) -> &'static str {
    match size {
        Some("s") => "mini",
        Some("m") => "preview",
        _ => "large",
    }
}

pub struct ImageView;

impl BlockView for ImageView {
    fn render(&self, props: &BlockProps<'_>) -> String {
        let block = props.block;
        let Some(url) = block.str_field("url") else {
            return props.wrap("figure", None, "");
        };

        let site_url = props.ctx.site_path(url);
        // Images stored in the site go through the binary proxy; external
        // images are linked directly.
        let src = if site_url.starts_with('/') {
            let field = block.str_field("image_field").unwrap_or("image");
            format!(
                "{}/@@images/{}/{}",
                site_url.trim_end_matches('/'),
                field,
                scale_for(block.str_field("size"))
            )
        } else {
            site_url
        };

        let alt = block.str_field("alt").unwrap_or_default();
        let mut inner = format!(
            "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
            attr(&src),
            attr(alt)
        );

        if let Some(href) = block.get("href").and_then(link_target) {
            inner = format!(
                "<a href=\"{}\">{}</a>",
                attr(&props.ctx.site_path(href)),
                inner
            );
        }

        let align = block.str_field("align").map(|align| format!("align-{}", align));
        props.wrap("figure", align.as_deref(), &inner)
    }
}

/// Video embeds for YouTube, Vimeo, or a plain video file.
pub struct VideoView {
    youtube: Regex,
    vimeo: Regex,
}

impl VideoView {
    pub fn load() -> Result<Self, LoadError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| LoadError::new("video", e.to_string()))
        };

        Ok(Self {
            youtube: compile(
                r"(?:youtube\.com/(?:watch\?(?:.*&)?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{6,})",
            )?,
            vimeo: compile(r"vimeo\.com/(?:video/)?(\d+)")?,
        })
    }

    fn embed_url(&self, url: &str) -> Option<String> {
        if let Some(captures) = self.youtube.captures(url) {
            return Some(format!("https://www.youtube-nocookie.com/embed/{}", &captures[1]));
        }
        if let Some(captures) = self.vimeo.captures(url) {
            return Some(format!("https://player.vimeo.com/video/{}", &captures[1]));
        }
        None
    }
}

impl BlockView for VideoView {
    fn render(&self, props: &BlockProps<'_>) -> String {
        let Some(url) = props.block.str_field("url") else {
            return props.wrap("div", None, "");
        };

        let inner = match self.embed_url(url) {
            Some(embed) => format!(
                "<iframe src=\"{}\" allow=\"fullscreen\" allowfullscreen loading=\"lazy\"></iframe>",
                attr(&embed)
            ),
            None => format!(
                "<video src=\"{}\" controls preload=\"metadata\"></video>",
                attr(&props.ctx.site_path(url))
            ),
        };
        props.wrap("div", None, &inner)
    }
}

/// Embedded map (the block stores the provider's embed URL).
pub struct MapsView;

impl BlockView for MapsView {
    fn render(&self, props: &BlockProps<'_>) -> String {
        let Some(url) = props.block.str_field("url") else {
            return props.wrap("div", None, "");
        };
        let title = props.block.str_field("title").unwrap_or("Map");

        props.wrap(
            "div",
            None,
            &format!(
                "<iframe src=\"{}\" title=\"{}\" loading=\"lazy\" referrerpolicy=\"no-referrer-when-downgrade\"></iframe>",
                attr(url),
                attr(title)
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::renderer::test_support::{render_one, Fixtures};
    use crate::blocks::{BlockInstance, ContentNode};
    use serde_json::json;

    // ==================== Image Tests ====================

    #[test]
    fn test_image_goes_through_binary_proxy() {
        let fixtures = Fixtures::new(ContentNode::default());
        let block = BlockInstance::new(
            "image",
            json!({"url": "http://backend/en/logo.png", "alt": "Logo", "size": "m", "align": "left"}),
        );

        let html = render_one(&ImageView, "i", &block, &fixtures.context());
        assert_eq!(
            html,
            "<figure class=\"block image align-left\" id=\"i\">\
             <img src=\"/en/logo.png/@@images/image/preview\" alt=\"Logo\" loading=\"lazy\"></figure>"
        );
    }

    #[test]
    fn test_image_external_and_linked() {
        let fixtures = Fixtures::new(ContentNode::default());
        let block = BlockInstance::new(
            "image",
            json!({
                "url": "https://cdn.example.org/pic.jpg",
                "href": [{"@id": "http://backend/en/gallery"}]
            }),
        );

        let html = render_one(&ImageView, "i", &block, &fixtures.context());
        assert!(html.contains("<a href=\"/en/gallery\"><img src=\"https://cdn.example.org/pic.jpg\""));
    }

    #[test]
    fn test_image_without_url_is_empty() {
        let fixtures = Fixtures::new(ContentNode::default());
        let html = render_one(
            &ImageView,
            "i",
            &BlockInstance::new("image", json!({})),
            &fixtures.context(),
        );
        assert_eq!(html, "<figure class=\"block image\" id=\"i\"></figure>");
    }

    // ==================== Video Tests ====================

    #[test]
    fn test_video_embeds() {
        let view = VideoView::load().expect("patterns compile");

        assert_eq!(
            view.embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ")
        );
        assert_eq!(
            view.embed_url("https://youtu.be/dQw4w9WgXcQ?t=10").as_deref(),
            Some("https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ")
        );
        assert_eq!(
            view.embed_url("https://vimeo.com/76979871").as_deref(),
            Some("https://player.vimeo.com/video/76979871")
        );
        assert_eq!(view.embed_url("http://backend/en/clip.mp4"), None);
    }

    #[test]
    fn test_video_file_falls_back_to_video_element() {
        let fixtures = Fixtures::new(ContentNode::default());
        let view = VideoView::load().unwrap();
        let block = BlockInstance::new("video", json!({"url": "http://backend/en/clip.mp4"}));

        let html = render_one(&view, "v", &block, &fixtures.context());
        assert!(html.contains("<video src=\"/en/clip.mp4\" controls"));
    }

    // ==================== Maps Tests ====================

    #[test]
    fn test_maps_iframe() {
        let fixtures = Fixtures::new(ContentNode::default());
        let block = BlockInstance::new(
            "maps",
            json!({"url": "https://www.google.com/maps/embed?pb=1&x=\"y\"", "title": "Office"}),
        );
        let html = render_one(&MapsView, "m", &block, &fixtures.context());
        assert!(html.contains("title=\"Office\""));
        assert!(html.contains("pb=1&amp;x=&quot;y&quot;"));
    }
}
