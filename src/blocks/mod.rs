//! Block model, registries, and rendering.
//!
//! # Architecture
//!
//! - `model`: content objects and their block trees
//! - `registry`: block type tag to view, ready or loaded on first use
//! - `variations`: listing templates with a guaranteed default
//! - `pagination`: per-block page parameters in the URL
//! - `listing`: concurrent prefetch of listing and search results
//! - `renderer`: ordered, recursive rendering of a block tree
//! - `views`: the HTML of each block type

pub mod listing;
mod model;
pub mod pagination;
pub mod registry;
pub mod renderer;
pub mod variations;
pub mod views;

pub use listing::{prefetch_listings, ListingPage, PrefetchedListings};
pub use model::{BlockInstance, BlockKind, BlockMap, BlockTree, ContentNode, Layout, LanguageToken};
pub use pagination::{
    build_page_url, page_param_name, parse_page_for_block, resolve_block_count, PaginationContext,
    PAGINATED_TYPES,
};
pub use registry::{BlockRegistry, BlockScope, RegistryEntry, ViewHandle};
pub use renderer::{render_blocks, RenderContext};
pub use variations::{VariationRegistry, DEFAULT_VARIATION};
pub use views::{BlockProps, BlockView};
