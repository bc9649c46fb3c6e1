use crate::models::{Block, BlockType, Game};
use crate::storage::{load_string_from_storage, save_string_to_storage, PREVIEW_CONTENT_KEY};
use crate::util::strip_tags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const UNTITLED: &str = "Untitled Document";

/// Read-only snapshot handed from the editor to the preview page.
///
/// This is the document's exchange format: `{ "blocks": [...], "game": ... }`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PreviewContent {
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub game: Option<Game>,
}

#[derive(Error, Debug)]
pub(crate) enum SnapshotError {
    #[error("no preview content has been saved")]
    Missing,

    #[error("preview content is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("could not write preview content to localStorage")]
    StorageUnavailable,
}

impl PreviewContent {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Plain text of the first top-level heading, else a placeholder.
    pub fn title(&self) -> String {
        self.blocks
            .iter()
            .find(|b| b.block_type == BlockType::Heading1)
            .map(|b| strip_tags(&b.content).trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string())
    }
}

pub(crate) fn save_preview(content: &PreviewContent) -> Result<(), SnapshotError> {
    let json = content.to_json()?;
    if !save_string_to_storage(PREVIEW_CONTENT_KEY, &json) {
        return Err(SnapshotError::StorageUnavailable);
    }
    tracing::info!(blocks = content.blocks.len(), "preview snapshot saved");
    Ok(())
}

pub(crate) fn load_preview() -> Result<PreviewContent, SnapshotError> {
    let json = load_string_from_storage(PREVIEW_CONTENT_KEY).ok_or(SnapshotError::Missing)?;
    PreviewContent::from_json(&json)
}
