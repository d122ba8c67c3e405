use super::{text, BlockProps, BlockView};

/// Column layout. The renderer has already rendered the columns.
pub struct GridView;

impl BlockView for GridView {
    fn render(&self, props: &BlockProps<'_>) -> String {
        let mut inner = String::new();

        if let Some(headline) = props.block.str_field("headline") {
            inner.push_str(&format!("<h2 class=\"headline\">{}</h2>", text(headline)));
        }

        inner.push_str(&format!(
            "<div class=\"grid-columns columns-{}\">",
            props.children.len()
        ));
        for child in props.children {
            inner.push_str("<div class=\"grid-column\">");
            inner.push_str(child);
            inner.push_str("</div>");
        }
        inner.push_str("</div>");

        props.wrap("div", None, &inner)
    }
}
