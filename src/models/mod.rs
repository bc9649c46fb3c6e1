use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

/// Opaque block identifier.
///
/// Assigned once at creation and never reused; every lookup, update, delete and
/// reorder keys on it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// DOM id of the block's editable region.
    pub fn dom_id(&self) -> String {
        format!("block-{}", self.0)
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BlockType {
    Paragraph,
    #[serde(rename = "heading-1")]
    #[strum(serialize = "heading-1")]
    Heading1,
    #[serde(rename = "heading-2")]
    #[strum(serialize = "heading-2")]
    Heading2,
    #[serde(rename = "heading-3")]
    #[strum(serialize = "heading-3")]
    Heading3,
    BulletList,
    OrderedList,
    CheckList,
    Blockquote,
    Code,
    Image,
    Video,
    Module,
    Divider,
}

impl BlockType {
    /// Types whose payload lives in `module_data` rather than `content`.
    pub fn carries_module_data(self) -> bool {
        matches!(self, BlockType::Module | BlockType::Video)
    }

    /// Types that are always inserted as a new block from the menus, never
    /// converted into in place.
    pub fn inserts_new_block(self) -> bool {
        matches!(
            self,
            BlockType::Divider | BlockType::Video | BlockType::Module
        )
    }

    /// Types rendered with an editable text region.
    pub fn is_text(self) -> bool {
        !matches!(
            self,
            BlockType::Divider | BlockType::Video | BlockType::Module
        )
    }
}

/// Widget-owned payload of a module or video block.
///
/// The editor stores and forwards it but never looks inside; each widget keeps
/// its own typed view (see `crate::modules`).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(transparent)]
pub struct ModuleData(serde_json::Value);

impl ModuleData {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn empty() -> Self {
        Self(serde_json::Value::Object(Default::default()))
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for ModuleData {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,

    #[serde(rename = "type")]
    pub block_type: BlockType,

    /// Sanitized inline HTML produced by in-place editing.
    #[serde(default)]
    pub content: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub checked: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_data: Option<ModuleData>,
}

impl Block {
    /// A text block with content, used for seeded documents.
    pub fn text(block_type: BlockType, content: &str) -> Self {
        Self {
            id: BlockId::new(),
            block_type,
            content: content.to_string(),
            checked: false,
            module_type: None,
            module_data: None,
        }
    }
}

/// Partial update merged into a block by `blocks::update`.
///
/// `None` leaves a field alone. The nested options on `module_type` and
/// `module_data` allow clearing: `Some(None)` removes the value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockPatch {
    pub block_type: Option<BlockType>,
    pub content: Option<String>,
    pub checked: Option<bool>,
    pub module_type: Option<Option<String>>,
    pub module_data: Option<Option<ModuleData>>,
}

impl BlockPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn module_data(data: ModuleData) -> Self {
        Self {
            module_data: Some(Some(data)),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A game the document can be written for.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Game {
    pub id: String,
    pub name: String,
    /// Icon name, resolved by the selector.
    pub icon: String,
    /// Module kinds that belong to this game.
    pub modules: Vec<String>,
    /// Theme color class for the preview header.
    pub color: String,
}
