//! URL query parameters for paginated blocks.
//!
//! A page with a single listing uses the plain `page` parameter. As soon as
//! two or more paginated blocks share a page, each one gets its own
//! `page-{slug}` parameter derived from its block key so they never
//! clobber each other.

use super::model::{BlockInstance, BlockKind, BlockMap, BlockTree};
use std::collections::HashMap;
use url::Url;

/// Block types whose current page lives in the URL
pub const PAGINATED_TYPES: [&str; 2] = ["listing", "search"];

/// Parameter used when at most one paginated block is on the page
pub const SIMPLE_PAGE_PARAM: &str = "page";

fn is_paginated(block: &BlockInstance) -> bool {
    PAGINATED_TYPES.contains(&block.kind().tag())
}

/// Paginated blocks in render order, looking one level into grids.
pub fn paginated_blocks(blocks: &BlockMap, layout: &[String]) -> Vec<(String, BlockInstance)> {
    let mut found = Vec::new();

    for key in layout {
        let Some(block) = blocks.get(key) else {
            continue;
        };

        if is_paginated(block) {
            found.push((key.clone(), block.clone()));
        } else if block.kind() == BlockKind::Grid {
            let Some(nested) = block.nested() else {
                continue;
            };
            let BlockTree {
                mut blocks,
                blocks_layout,
            } = nested;
            for child_key in blocks_layout.items {
                if let Some(child) = blocks.remove(&child_key) {
                    if is_paginated(&child) {
                        found.push((child_key, child));
                    }
                }
            }
        }
    }

    found
}

/// Number of paginated blocks on a page (one level into grids).
pub fn resolve_block_count(blocks: &BlockMap, layout: &[String]) -> usize {
    paginated_blocks(blocks, layout).len()
}

/// `page` for a lone paginated block, `page-{slug}` otherwise.
pub fn page_param_name(block_key: &str, total_paginated: usize) -> String {
    if total_paginated <= 1 {
        return SIMPLE_PAGE_PARAM.to_string();
    }
    format!("page-{}", slugify(block_key))
}

/// Lowercase, runs of whitespace/hyphens become `_`, anything else outside
/// `[a-z0-9_]` is dropped.
fn slugify(key: &str) -> String {
    let mut slug = String::with_capacity(key.len());
    let mut in_separator = false;

    for c in key.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() || c == '-' {
            if !in_separator {
                slug.push('_');
                in_separator = true;
            }
            continue;
        }
        in_separator = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            slug.push(c);
        }
    }

    slug
}

/// Current page of `block_key`; anything unusable reads as page 1.
pub fn parse_page_for_block(url: &Url, block_key: &str, total_paginated: usize) -> u32 {
    parse_page_param(url, &page_param_name(block_key, total_paginated))
}

/// URL for `page` of `block_key`, keeping every other query parameter.
pub fn build_page_url(base: &str, page: u32, block_key: &str, total_paginated: usize) -> String {
    build_page_url_with_param(base, page, &page_param_name(block_key, total_paginated))
}

fn parse_page_param(url: &Url, param: &str) -> u32 {
    url.query_pairs()
        .find(|(name, _)| name == param)
        .and_then(|(_, value)| value.trim().parse::<i64>().ok())
        .filter(|page| *page > 0)
        .map(|page| u32::try_from(page).unwrap_or(u32::MAX))
        .unwrap_or(1)
}

/// Works on the raw query string so untouched parameters keep their exact
/// encoding. Accepts absolute URLs and site-relative `path?query#fragment`.
fn build_page_url_with_param(base: &str, page: u32, param: &str) -> String {
    let (rest, fragment) = match base.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (base, None),
    };
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, query),
        None => (rest, ""),
    };

    let replacement = (page > 1).then(|| format!("{}={}", param, page));
    let mut placed = false;
    let mut segments: Vec<String> = Vec::new();

    for segment in query.split('&').filter(|segment| !segment.is_empty()) {
        if segment_name(segment) == param {
            if let (Some(replacement), false) = (&replacement, placed) {
                segments.push(replacement.clone());
                placed = true;
            }
            continue;
        }
        segments.push(segment.to_string());
    }

    if let (Some(replacement), false) = (replacement, placed) {
        segments.push(replacement);
    }

    let mut url = path.to_string();
    if !segments.is_empty() {
        url.push('?');
        url.push_str(&segments.join("&"));
    }
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

fn segment_name(segment: &str) -> String {
    url::form_urlencoded::parse(segment.as_bytes())
        .next()
        .map(|(name, _)| name.into_owned())
        .unwrap_or_default()
}

/// Parameter names for every paginated block of one page render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginationContext {
    total: usize,
    params: HashMap<String, String>,
}

impl PaginationContext {
    /// Assign names in render order. Keys that slugify to the same name get
    /// a numeric suffix so names stay unique on the page.
    pub fn for_tree(tree: &BlockTree) -> Self {
        let blocks = paginated_blocks(&tree.blocks, tree.layout());
        let total = blocks.len();
        let mut params = HashMap::with_capacity(total);
        let mut taken: Vec<String> = Vec::with_capacity(total);

        for (key, _) in blocks {
            let base = page_param_name(&key, total);
            let mut name = base.clone();
            let mut n = 2;
            while taken.contains(&name) {
                name = format!("{}_{}", base, n);
                n += 1;
            }
            taken.push(name.clone());
            params.insert(key, name);
        }

        Self { total, params }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn param_for(&self, block_key: &str) -> Option<&str> {
        self.params.get(block_key).map(String::as_str)
    }

    fn param_or_derived(&self, block_key: &str) -> String {
        self.param_for(block_key)
            .map(str::to_string)
            .unwrap_or_else(|| page_param_name(block_key, self.total))
    }

    pub fn current_page(&self, url: &Url, block_key: &str) -> u32 {
        parse_page_param(url, &self.param_or_derived(block_key))
    }

    pub fn page_url(&self, base: &str, page: u32, block_key: &str) -> String {
        build_page_url_with_param(base, page, &self.param_or_derived(block_key))
    }
}
