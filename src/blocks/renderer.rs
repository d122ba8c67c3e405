//! Block tree rendering.
//!
//! Walks a layout in order, resolves each block's view through the current
//! [`BlockScope`], and recurses into grid columns with a scope that no
//! longer offers grids. Output order is always layout order.

use super::listing::PrefetchedListings;
use super::model::{BlockInstance, BlockTree, ContentNode};
use super::pagination::PaginationContext;
use super::registry::{BlockRegistry, BlockScope};
use super::variations::VariationRegistry;
use super::views::{BlockProps, BlockView, FallbackView};
use crate::api::extract_relative_path_from_url;
use crate::i18n::LanguageStrings;
use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::debug;
use url::{Position, Url};

/// Request-wide data shared by every view of one page render.
pub struct RenderContext<'a> {
    /// Site-relative path of the page
    pub path: &'a str,
    /// Public request URL, including the query string
    pub url: &'a Url,
    pub page: &'a ContentNode,
    pub api_base: &'a str,
    pub language: &'a str,
    pub listings: &'a PrefetchedListings,
    pub pagination: &'a PaginationContext,
    pub variations: &'a VariationRegistry,
    pub strings: &'static LanguageStrings,
}

impl RenderContext<'_> {
    /// Site-relative form of a content URL; foreign URLs are kept.
    pub fn site_path(&self, url: &str) -> String {
        extract_relative_path_from_url(url, self.api_base)
    }

    /// `path?query#fragment` of the current request
    pub fn request_target(&self) -> &str {
        &self.url[Position::BeforePath..]
    }
}

/// Render `tree` with every registered block type available.
pub async fn render_blocks(
    tree: &BlockTree,
    registry: &BlockRegistry,
    ctx: &RenderContext<'_>,
) -> String {
    let scope = registry.scope();
    render_fragments(tree, &scope, ctx).await.concat()
}

/// One HTML fragment per rendered block, in layout order.
pub fn render_fragments<'s>(
    tree: &'s BlockTree,
    scope: &'s BlockScope<'s>,
    ctx: &'s RenderContext<'s>,
) -> BoxFuture<'s, Vec<String>> {
    async move {
        let mut fragments = Vec::with_capacity(tree.layout().len());
        for key in tree.layout() {
            let Some(block) = tree.blocks.get(key) else {
                debug!("Skipping layout key '{}' without block data", key);
                continue;
            };
            fragments.push(render_block(key, block, scope, ctx).await);
        }
        fragments
    }
    .boxed()
}

async fn render_block(
    key: &str,
    block: &BlockInstance,
    scope: &BlockScope<'_>,
    ctx: &RenderContext<'_>,
) -> String {
    let kind = block.kind();

    let Some(view) = scope.resolve(kind.tag()).await else {
        debug!("No view for block '{}' of type '{}'", key, block.tag);
        return FallbackView.render(&BlockProps {
            key,
            block,
            ctx,
            children: &[],
        });
    };

    let children = match (kind.is_grid(), block.nested()) {
        (true, Some(nested)) => {
            let columns = scope.without(kind.tag());
            render_fragments(&nested, &columns, ctx).await
        }
        _ => Vec::new(),
    };

    view.render(&BlockProps {
        key,
        block,
        ctx,
        children: &children,
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::Fixtures;
    use super::*;
    use crate::blocks::registry::RegistryEntry;
    use crate::error::LoadError;
    use serde_json::json;

    fn page(value: serde_json::Value) -> ContentNode {
        serde_json::from_value(value).expect("valid page")
    }

    #[tokio::test]
    async fn test_render_follows_layout_order() {
        let node = page(json!({
            "@id": "http://backend/en/page",
            "title": "Page",
            "blocks": {
                "a": {"@type": "slate", "plaintext": "first"},
                "b": {"@type": "slate", "plaintext": "second"},
                "c": {"@type": "slate", "plaintext": "third"}
            },
            "blocks_layout": {"items": ["c", "a", "b"]}
        }));
        let fixtures = Fixtures::new(node);
        let ctx = fixtures.context();

        let html = render_blocks(&ctx.page.tree, &BlockRegistry::standard(), &ctx).await;

        let third = html.find("third").unwrap();
        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(third < first && first < second);
    }

    #[tokio::test]
    async fn test_render_skips_dangling_keys_and_marks_unknown_types() {
        let node = page(json!({
            "@id": "http://backend/en/page",
            "blocks": {
                "known": {"@type": "slate", "plaintext": "ok"},
                "odd": {"@type": "countUp"}
            },
            "blocks_layout": {"items": ["ghost", "known", "odd"]}
        }));
        let fixtures = Fixtures::new(node);
        let ctx = fixtures.context();

        let fragments = render_fragments(
            &ctx.page.tree,
            &BlockRegistry::standard().scope(),
            &ctx,
        )
        .await;

        assert_eq!(fragments.len(), 2);
        assert!(fragments[0].contains("<p>ok</p>"));
        assert!(fragments[1].contains("data-block-type=\"countUp\""));
    }

    #[tokio::test]
    async fn test_nested_grid_renders_as_unknown() {
        let node = page(json!({
            "@id": "http://backend/en/page",
            "blocks": {
                "outer": {
                    "@type": "gridBlock",
                    "blocks": {
                        "col": {"@type": "slate", "plaintext": "column"},
                        "inner": {
                            "@type": "gridBlock",
                            "blocks": {"deep": {"@type": "slate", "plaintext": "hidden"}},
                            "blocks_layout": {"items": ["deep"]}
                        }
                    },
                    "blocks_layout": {"items": ["col", "inner"]}
                }
            },
            "blocks_layout": {"items": ["outer"]}
        }));
        let fixtures = Fixtures::new(node);
        let ctx = fixtures.context();

        let html = render_blocks(&ctx.page.tree, &BlockRegistry::standard(), &ctx).await;

        assert_eq!(html.matches("class=\"block gridBlock\"").count(), 1);
        assert_eq!(html.matches("class=\"grid-columns").count(), 1);
        assert!(html.contains("data-block-type=\"gridBlock\""));
        assert!(html.contains("<p>column</p>"));
        assert!(!html.contains("hidden"));
    }

    #[tokio::test]
    async fn test_deferred_views_render_like_ready_ones() {
        let node = page(json!({
            "@id": "http://backend/en/page",
            "blocks": {
                "m": {"@type": "maps", "url": "https://maps.example.org/embed"}
            },
            "blocks_layout": {"items": ["m"]}
        }));
        let fixtures = Fixtures::new(node);
        let ctx = fixtures.context();

        let html = render_blocks(&ctx.page.tree, &BlockRegistry::standard(), &ctx).await;
        assert!(html.contains("<iframe src=\"https://maps.example.org/embed\""));
    }

    #[tokio::test]
    async fn test_failed_loader_renders_fallback() {
        let node = page(json!({
            "@id": "http://backend/en/page",
            "blocks": {"v": {"@type": "video", "url": "https://youtu.be/abcdefgh"}},
            "blocks_layout": {"items": ["v"]}
        }));
        let fixtures = Fixtures::new(node);
        let ctx = fixtures.context();

        let mut registry = BlockRegistry::standard();
        registry.register(
            "video",
            RegistryEntry::deferred(|| async {
                Err::<FallbackView, _>(LoadError::new("video", "player script missing"))
            }),
        );

        let html = render_blocks(&ctx.page.tree, &registry, &ctx).await;
        assert!(html.contains("class=\"block unknown\" data-block-type=\"video\""));
    }
}
