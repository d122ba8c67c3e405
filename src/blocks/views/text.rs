use super::{attr, text, BlockProps, BlockView};
use crate::blocks::renderer::RenderContext;
use serde_json::Value;

/// Rich text stored as a slate node tree.
pub struct SlateView;

impl BlockView for SlateView {
    fn render(&self, props: &BlockProps<'_>) -> String {
        let nodes = props
            .block
            .get("value")
            .and_then(Value::as_array)
            .filter(|nodes| !nodes.is_empty());

        let inner = match nodes {
            Some(nodes) => render_slate(nodes, props.ctx),
            None => match props.block.str_field("plaintext") {
                Some(plain) => format!("<p>{}</p>", text(plain)),
                None => String::new(),
            },
        };
        props.wrap("div", None, &inner)
    }
}

pub struct TitleView;

impl BlockView for TitleView {
    fn render(&self, props: &BlockProps<'_>) -> String {
        props.wrap(
            "h1",
            Some("documentFirstHeading"),
            &text(&props.ctx.page.title),
        )
    }
}

pub struct DescriptionView;

impl BlockView for DescriptionView {
    fn render(&self, props: &BlockProps<'_>) -> String {
        props.wrap(
            "p",
            Some("documentDescription"),
            &text(&props.ctx.page.description),
        )
    }
}

/// Editor-supplied HTML. Only site editors can create these blocks, so the
/// markup is emitted as-is.
pub struct HtmlView;

impl BlockView for HtmlView {
    fn render(&self, props: &BlockProps<'_>) -> String {
        let html = props
            .block
            .get("html")
            .and_then(Value::as_str)
            .unwrap_or_default();
        props.wrap("div", None, html)
    }
}

/// Render a list of slate nodes to HTML.
pub fn render_slate(nodes: &[Value], ctx: &RenderContext<'_>) -> String {
    let mut out = String::new();
    for node in nodes {
        render_node(node, ctx, &mut out);
    }
    out
}

fn render_node(node: &Value, ctx: &RenderContext<'_>, out: &mut String) {
    if let Some(leaf) = node.get("text").and_then(Value::as_str) {
        render_leaf(node, leaf, out);
        return;
    }

    let children = node
        .get("children")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let kind = node.get("type").and_then(Value::as_str).unwrap_or_default();

    if kind == "link" {
        let href = node
            .get("data")
            .and_then(|data| data.get("url"))
            .and_then(Value::as_str)
            .map(|url| ctx.site_path(url));
        match href {
            Some(href) => {
                out.push_str(&format!("<a href=\"{}\">", attr(&href)));
                for child in children {
                    render_node(child, ctx, out);
                }
                out.push_str("</a>");
            }
            None => {
                for child in children {
                    render_node(child, ctx, out);
                }
            }
        }
        return;
    }

    let element = match kind {
        "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "blockquote" | "ul" | "ol" | "li"
        | "strong" | "em" | "u" | "del" | "s" | "code" | "sub" | "sup" => Some(kind),
        "b" => Some("strong"),
        "i" => Some("em"),
        _ => None,
    };

    if let Some(element) = element {
        out.push_str(&format!("<{}>", element));
    }
    for child in children {
        render_node(child, ctx, out);
    }
    if let Some(element) = element {
        out.push_str(&format!("</{}>", element));
    }
}

fn render_leaf(node: &Value, leaf: &str, out: &mut String) {
    let marks: Vec<&str> = [
        ("bold", "strong"),
        ("italic", "em"),
        ("underline", "u"),
        ("strikethrough", "del"),
        ("code", "code"),
    ]
    .into_iter()
    .filter(|(mark, _)| node.get(*mark).and_then(Value::as_bool).unwrap_or(false))
    .map(|(_, element)| element)
    .collect();

    for element in &marks {
        out.push_str(&format!("<{}>", element));
    }
    out.push_str(&text(leaf).replace('\n', "<br>"));
    for element in marks.iter().rev() {
        out.push_str(&format!("</{}>", element));
    }
}

/// Concatenated text of a slate node tree.
pub fn slate_plaintext(nodes: &[Value]) -> String {
    fn collect(node: &Value, out: &mut String) {
        if let Some(leaf) = node.get("text").and_then(Value::as_str) {
            out.push_str(leaf);
            return;
        }
        if let Some(children) = node.get("children").and_then(Value::as_array) {
            for child in children {
                collect(child, out);
            }
        }
    }

    let mut out = String::new();
    for node in nodes {
        collect(node, &mut out);
    }
    out
}
