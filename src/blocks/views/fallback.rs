use super::{attr, text, BlockProps, BlockView};

/// Stand-in for block types without a view at the current depth, visible
/// so editors notice the gap.
pub struct FallbackView;

impl BlockView for FallbackView {
    fn render(&self, props: &BlockProps<'_>) -> String {
        let tag = &props.block.tag;
        format!(
            "<div class=\"block unknown\" data-block-type=\"{}\" id=\"{}\"><p>{}: {}</p></div>",
            attr(tag),
            attr(props.key),
            text(props.ctx.strings.unknown_block),
            text(tag)
        )
    }
}
