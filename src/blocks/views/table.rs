use super::{attr, render_slate, slate_plaintext, text, BlockProps, BlockView};
use crate::blocks::BlockInstance;
use serde_json::Value;

/// Table whose cells hold slate content.
pub struct TableView;

const TABLE_FLAGS: [&str; 5] = ["striped", "compact", "celled", "basic", "fixed"];

impl BlockView for TableView {
    fn render(&self, props: &BlockProps<'_>) -> String {
        let table = props.block.get("table");
        let rows = table
            .and_then(|table| table.get("rows"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        if rows.is_empty() {
            return props.wrap("div", None, "");
        }

        let flag = |name: &str| {
            table
                .and_then(|table| table.get(name))
                .and_then(Value::as_bool)
                .unwrap_or(false)
        };

        let mut classes = vec!["ui", "table"];
        classes.extend(TABLE_FLAGS.into_iter().filter(|name| flag(name)));

        let (head, body) = if flag("hideHeaders") {
            (None, rows)
        } else {
            (rows.first(), &rows[1..])
        };

        let mut inner = format!("<table class=\"{}\">", classes.join(" "));
        if let Some(head) = head {
            inner.push_str("<thead>");
            self.render_row(head, true, props, &mut inner);
            inner.push_str("</thead>");
        }
        inner.push_str("<tbody>");
        for row in body {
            self.render_row(row, false, props, &mut inner);
        }
        inner.push_str("</tbody></table>");

        props.wrap("div", None, &inner)
    }
}

impl TableView {
    fn render_row(&self, row: &Value, in_head: bool, props: &BlockProps<'_>, out: &mut String) {
        out.push_str("<tr>");
        let cells = row.get("cells").and_then(Value::as_array);
        for cell in cells.into_iter().flatten() {
            let header = in_head || cell.get("type").and_then(Value::as_str) == Some("header");
            let element = if header { "th" } else { "td" };
            let content = cell
                .get("value")
                .and_then(Value::as_array)
                .map(|nodes| render_slate(nodes, props.ctx))
                .unwrap_or_default();
            out.push_str(&format!("<{0}>{1}</{0}>", element, content));
        }
        out.push_str("</tr>");
    }
}

/// Links to the heading blocks of the page, in layout order.
pub struct TocView;

const DEFAULT_LEVELS: [&str; 2] = ["h2", "h3"];

impl BlockView for TocView {
    fn render(&self, props: &BlockProps<'_>) -> String {
        let levels: Vec<&str> = match props.block.get("levels").and_then(Value::as_array) {
            Some(levels) if !levels.is_empty() => levels.iter().filter_map(Value::as_str).collect(),
            _ => DEFAULT_LEVELS.to_vec(),
        };

        // Grid columns are searched one level deep.
        let mut entries = String::new();
        for (key, block) in props.ctx.page.tree.ordered() {
            if block.kind().is_grid() {
                if let Some(columns) = block.nested() {
                    for (column_key, column) in columns.ordered() {
                        entries.push_str(&toc_entry(column_key, column, &levels).unwrap_or_default());
                    }
                }
                continue;
            }
            entries.push_str(&toc_entry(key, block, &levels).unwrap_or_default());
        }

        let title = props
            .block
            .str_field("title")
            .unwrap_or(props.ctx.strings.table_of_contents);
        let heading = if props.block.bool_field("hide_title") {
            String::new()
        } else {
            format!("<h2>{}</h2>", text(title))
        };

        props.wrap(
            "nav",
            None,
            &format!("{}<ul>{}</ul>", heading, entries),
        )
    }
}

/// Table of contents line for a slate heading at one of `levels`.
fn toc_entry(key: &str, block: &BlockInstance, levels: &[&str]) -> Option<String> {
    if block.tag != "slate" {
        return None;
    }
    let first = block.get("value")?.as_array()?.first()?;
    let level = first.get("type").and_then(Value::as_str)?;
    if !levels.contains(&level) {
        return None;
    }

    let label = slate_plaintext(std::slice::from_ref(first));
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    Some(format!(
        "<li class=\"toc-{}\"><a href=\"#{}\">{}</a></li>",
        attr(level),
        attr(key),
        text(label)
    ))
}
