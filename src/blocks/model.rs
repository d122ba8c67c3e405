//! Content objects and their block trees as delivered by the content API.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

pub type BlockMap = HashMap<String, BlockInstance>;

/// Block types the front end knows by name.
///
/// The registry stays keyed by tag so new types can be added without
/// touching this enum; `Other` carries everything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Slate,
    Title,
    Description,
    Image,
    Teaser,
    Grid,
    Listing,
    Search,
    Video,
    Maps,
    Table,
    Toc,
    Html,
    Other(String),
}

impl BlockKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "slate" => BlockKind::Slate,
            "title" => BlockKind::Title,
            "description" => BlockKind::Description,
            "image" => BlockKind::Image,
            "teaser" => BlockKind::Teaser,
            "gridBlock" => BlockKind::Grid,
            "listing" => BlockKind::Listing,
            "search" => BlockKind::Search,
            "video" => BlockKind::Video,
            "maps" => BlockKind::Maps,
            "slateTable" | "table" => BlockKind::Table,
            "toc" => BlockKind::Toc,
            "html" => BlockKind::Html,
            other => BlockKind::Other(other.to_string()),
        }
    }

    /// Canonical tag (aliases collapse onto one spelling)
    pub fn tag(&self) -> &str {
        match self {
            BlockKind::Slate => "slate",
            BlockKind::Title => "title",
            BlockKind::Description => "description",
            BlockKind::Image => "image",
            BlockKind::Teaser => "teaser",
            BlockKind::Grid => "gridBlock",
            BlockKind::Listing => "listing",
            BlockKind::Search => "search",
            BlockKind::Video => "video",
            BlockKind::Maps => "maps",
            BlockKind::Table => "slateTable",
            BlockKind::Toc => "toc",
            BlockKind::Html => "html",
            BlockKind::Other(tag) => tag,
        }
    }

    /// Listing and search blocks keep their current page in the URL
    pub fn is_paginated(&self) -> bool {
        matches!(self, BlockKind::Listing | BlockKind::Search)
    }

    pub fn is_grid(&self) -> bool {
        matches!(self, BlockKind::Grid)
    }
}

/// One block of a page: a type tag plus its free-form data.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BlockInstance {
    #[serde(rename = "@type", default)]
    pub tag: String,

    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl BlockInstance {
    pub fn new(tag: impl Into<String>, data: Value) -> Self {
        let data = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            tag: tag.into(),
            data,
        }
    }

    pub fn kind(&self) -> BlockKind {
        BlockKind::from_tag(&self.tag)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// String field, `None` when missing, not a string, or blank
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn bool_field(&self, key: &str) -> bool {
        self.data.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// The nested block tree of a container block (grid columns).
    pub fn nested(&self) -> Option<BlockTree> {
        let blocks = self.data.get("blocks")?;
        let layout = self.data.get("blocks_layout").cloned().unwrap_or(Value::Null);

        let mut nested = Map::new();
        nested.insert("blocks".to_string(), blocks.clone());
        nested.insert("blocks_layout".to_string(), layout);

        match serde_json::from_value(Value::Object(nested)) {
            Ok(tree) => Some(tree),
            Err(e) => {
                debug!("Ignoring malformed nested blocks of '{}': {}", self.tag, e);
                None
            }
        }
    }
}

/// Ordered block keys.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub items: Vec<String>,
}

/// A block map plus the layout that orders it. Keys missing from the
/// layout are never rendered.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BlockTree {
    #[serde(default)]
    pub blocks: BlockMap,

    #[serde(default, deserialize_with = "layout_or_default")]
    pub blocks_layout: Layout,
}

fn layout_or_default<'de, D>(deserializer: D) -> Result<Layout, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Layout>::deserialize(deserializer)?.unwrap_or_default())
}

impl BlockTree {
    pub fn new(blocks: BlockMap, layout: Vec<String>) -> Self {
        Self {
            blocks,
            blocks_layout: Layout { items: layout },
        }
    }

    pub fn layout(&self) -> &[String] {
        &self.blocks_layout.items
    }

    /// Blocks in layout order; dangling keys are skipped.
    pub fn ordered(&self) -> impl Iterator<Item = (&str, &BlockInstance)> {
        self.blocks_layout
            .items
            .iter()
            .filter_map(|key| self.blocks.get(key).map(|block| (key.as_str(), block)))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LanguageToken {
    pub token: String,
}

/// A content object (page) from the content API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContentNode {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@type", default)]
    pub kind: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub language: Option<LanguageToken>,

    #[serde(default)]
    pub review_state: Option<String>,

    #[serde(default)]
    pub effective: Option<String>,

    #[serde(flatten)]
    pub tree: BlockTree,
}

impl ContentNode {
    pub fn language_code(&self) -> Option<&str> {
        self.language
            .as_ref()
            .map(|language| language.token.as_str())
            .filter(|token| !token.is_empty())
    }
}
