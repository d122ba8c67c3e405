//! Block view registry.
//!
//! Maps block type tags to views. An entry is either a view that is ready
//! to use or a loader that builds the view the first time it is needed
//! (heavier views compile patterns or tables up front). Both forms resolve
//! through the same async [`BlockRegistry::resolve_component`].

use super::model::BlockKind;
use super::views::{self, BlockView};
use crate::error::LoadError;
use futures::future::BoxFuture;
use futures::{FutureExt, TryFutureExt};
use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

pub type ViewHandle = Arc<dyn BlockView>;

pub type ViewLoader =
    Arc<dyn Fn() -> BoxFuture<'static, Result<ViewHandle, LoadError>> + Send + Sync>;

pub enum RegistryEntry {
    Ready(ViewHandle),
    Deferred {
        loader: ViewLoader,
        /// Holds the view after the first successful load; failures are retried
        cell: OnceCell<ViewHandle>,
    },
}

impl RegistryEntry {
    pub fn ready(view: impl BlockView + 'static) -> Self {
        RegistryEntry::Ready(Arc::new(view))
    }

    pub fn deferred<F, Fut, V>(load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, LoadError>> + Send + 'static,
        V: BlockView + 'static,
    {
        let loader: ViewLoader =
            Arc::new(move || load().map_ok(|view| Arc::new(view) as ViewHandle).boxed());
        RegistryEntry::Deferred {
            loader,
            cell: OnceCell::new(),
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, RegistryEntry::Deferred { .. })
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEntry::Ready(_) => f.write_str("Ready"),
            RegistryEntry::Deferred { cell, .. } => f
                .debug_struct("Deferred")
                .field("loaded", &cell.initialized())
                .finish(),
        }
    }
}

/// Process-wide map from block type tag to view. Built once at start-up,
/// read-only afterwards.
#[derive(Debug, Default)]
pub struct BlockRegistry {
    entries: HashMap<String, RegistryEntry>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in block view.
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register("slate", RegistryEntry::ready(views::SlateView));
        registry.register("title", RegistryEntry::ready(views::TitleView));
        registry.register("description", RegistryEntry::ready(views::DescriptionView));
        registry.register("image", RegistryEntry::ready(views::ImageView));
        registry.register("teaser", RegistryEntry::ready(views::TeaserView));
        registry.register("gridBlock", RegistryEntry::ready(views::GridView));
        registry.register("listing", RegistryEntry::ready(views::ListingView));
        registry.register("search", RegistryEntry::ready(views::SearchView));
        registry.register("html", RegistryEntry::ready(views::HtmlView));

        registry.register(
            "video",
            RegistryEntry::deferred(|| async { views::VideoView::load() }),
        );
        registry.register(
            "maps",
            RegistryEntry::deferred(|| async { Ok(views::MapsView) }),
        );
        registry.register(
            "slateTable",
            RegistryEntry::deferred(|| async { Ok(views::TableView) }),
        );
        registry.register(
            "toc",
            RegistryEntry::deferred(|| async { Ok(views::TocView) }),
        );

        registry
    }

    /// Register (or replace) the entry for `tag`. Aliases such as `table`
    /// are stored under their canonical tag.
    pub fn register(&mut self, tag: &str, entry: RegistryEntry) {
        self.entries.insert(canonical(tag), entry);
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(&canonical(tag))
    }

    /// Whether resolving `tag` may need to await a loader.
    pub fn is_async_type(&self, tag: &str) -> bool {
        self.entries
            .get(&canonical(tag))
            .is_some_and(RegistryEntry::is_deferred)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// The view for a ready entry, without awaiting. Deferred and unknown
    /// tags give `None`.
    pub fn resolve_now(&self, tag: &str) -> Option<ViewHandle> {
        match self.entries.get(&canonical(tag))? {
            RegistryEntry::Ready(view) => Some(view.clone()),
            RegistryEntry::Deferred { .. } => None,
        }
    }

    /// The view for `tag`. Unknown tags and failed loads give `None`.
    pub async fn resolve_component(&self, tag: &str) -> Option<ViewHandle> {
        match self.entries.get(&canonical(tag))? {
            RegistryEntry::Ready(view) => Some(view.clone()),
            RegistryEntry::Deferred { loader, cell } => {
                match cell.get_or_try_init(|| loader()).await {
                    Ok(view) => Some(view.clone()),
                    Err(e) => {
                        warn!("{}", e);
                        None
                    }
                }
            }
        }
    }

    /// Unrestricted scope for a top-level render.
    pub fn scope(&self) -> BlockScope<'_> {
        BlockScope {
            registry: self,
            excluded: BTreeSet::new(),
        }
    }
}

fn canonical(tag: &str) -> String {
    BlockKind::from_tag(tag).tag().to_string()
}

/// The block types available at one nesting depth.
///
/// Containers hand their children a narrower scope (a grid column cannot
/// host another grid); tags outside the scope resolve to nothing and
/// render as unknown blocks.
#[derive(Debug, Clone)]
pub struct BlockScope<'r> {
    registry: &'r BlockRegistry,
    excluded: BTreeSet<String>,
}

impl<'r> BlockScope<'r> {
    pub fn without(&self, tag: &str) -> BlockScope<'r> {
        let mut excluded = self.excluded.clone();
        excluded.insert(canonical(tag));
        BlockScope {
            registry: self.registry,
            excluded,
        }
    }

    pub fn allows(&self, tag: &str) -> bool {
        !self.excluded.contains(&canonical(tag)) && self.registry.contains(tag)
    }

    pub async fn resolve(&self, tag: &str) -> Option<ViewHandle> {
        if self.excluded.contains(&canonical(tag)) {
            debug!("Block type '{}' is not available at this depth", tag);
            return None;
        }
        self.registry.resolve_component(tag).await
    }
}
