//! Block list operations.
//!
//! Everything here is a deterministic transformation of an ordered block
//! sequence. The `*_in_place` forms mutate a `Vec<Block>` and report whether
//! anything changed; the plain forms take the list by value and hand back the
//! new list.

use crate::models::{Block, BlockId, BlockPatch, BlockType, ModuleData};
use serde_json::json;

pub const DEFAULT_MODULE_TYPE: &str = "tft-builder";
pub const DEFAULT_VIDEO_TYPE: &str = "youtube";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Seed payload for a game module. Widgets rely on these keys existing.
pub fn default_module_data(module_type: Option<&str>) -> ModuleData {
    let value = match module_type {
        Some("tft-builder") => json!({ "champions": [], "synergies": [] }),
        Some("lol-champions") => json!({ "champions": [], "roles": [] }),
        Some("lol-items") => json!({ "items": [] }),
        Some("lol-runes") => json!({ "primaryPath": null, "secondaryPath": null, "runes": [] }),
        Some("lol-abilities") => json!({ "championId": "", "abilities": [] }),
        Some("valorant-agents") => json!({ "agents": [], "roles": [] }),
        Some("bg3-builder") => json!({ "character": {}, "abilities": [] }),
        _ => json!({}),
    };
    ModuleData::new(value)
}

/// Seed payload for a video embed.
pub fn default_video_data(module_type: Option<&str>) -> ModuleData {
    let value = match module_type {
        Some("youtube") => json!({ "videoId": "", "title": "" }),
        Some("twitch") => json!({ "channelId": "" }),
        Some("instagram") => json!({ "postId": "" }),
        _ => json!({}),
    };
    ModuleData::new(value)
}

/// Default payload for `block_type`, or `None` for types without one.
pub fn default_data_for(block_type: BlockType, module_type: Option<&str>) -> Option<ModuleData> {
    match block_type {
        BlockType::Module => Some(default_module_data(module_type)),
        BlockType::Video => Some(default_video_data(module_type)),
        _ => None,
    }
}

pub fn create_block(block_type: BlockType, module_type: Option<&str>) -> Block {
    let carries = block_type.carries_module_data();
    Block {
        id: BlockId::new(),
        block_type,
        content: String::new(),
        checked: false,
        module_type: if carries {
            module_type.map(str::to_string)
        } else {
            None
        },
        module_data: default_data_for(block_type, module_type),
    }
}

pub fn position(blocks: &[Block], id: &BlockId) -> Option<usize> {
    blocks.iter().position(|b| &b.id == id)
}

pub fn find<'a>(blocks: &'a [Block], id: &BlockId) -> Option<&'a Block> {
    blocks.iter().find(|b| &b.id == id)
}

/// Insert `block` right after `after_id`, or at the end when the anchor is
/// missing. Returns the index the block landed at.
pub fn insert_after_in_place(
    blocks: &mut Vec<Block>,
    block: Block,
    after_id: Option<&BlockId>,
) -> usize {
    let idx = after_id
        .and_then(|id| position(blocks, id))
        .map(|i| i + 1)
        .unwrap_or(blocks.len());
    blocks.insert(idx, block);
    idx
}

/// Remove the block with `id`. Never removes the last remaining block.
pub fn remove_in_place(blocks: &mut Vec<Block>, id: &BlockId) -> bool {
    if blocks.len() <= 1 {
        return false;
    }
    let before = blocks.len();
    blocks.retain(|b| &b.id != id);
    blocks.len() != before
}

pub fn apply_patch(block: &mut Block, patch: &BlockPatch) {
    if let Some(t) = patch.block_type {
        block.block_type = t;
    }
    if let Some(c) = &patch.content {
        block.content = c.clone();
    }
    if let Some(checked) = patch.checked {
        block.checked = checked;
    }
    if let Some(mt) = &patch.module_type {
        block.module_type = mt.clone();
    }
    if let Some(md) = &patch.module_data {
        block.module_data = md.clone();
    }
}

pub fn update_in_place(blocks: &mut [Block], id: &BlockId, patch: &BlockPatch) -> bool {
    if let Some(b) = blocks.iter_mut().find(|b| &b.id == id) {
        apply_patch(b, patch);
        true
    } else {
        false
    }
}

/// Swap the block with its neighbour in `direction`.
pub fn move_in_place(blocks: &mut [Block], id: &BlockId, direction: Direction) -> bool {
    let Some(idx) = position(blocks, id) else {
        return false;
    };
    let swap_idx = match direction {
        Direction::Up if idx > 0 => idx - 1,
        Direction::Down if idx + 1 < blocks.len() => idx + 1,
        _ => return false,
    };
    blocks.swap(idx, swap_idx);
    true
}

/// Splice move: take the element at `from` and reinsert it at `to`.
///
/// `from` past the end is a no-op. `to` is clamped, so `to >= len` moves the
/// element to the end.
pub fn reorder_in_place(blocks: &mut Vec<Block>, from: usize, to: usize) -> bool {
    if from >= blocks.len() {
        return false;
    }
    let moved = blocks.remove(from);
    let to = to.min(blocks.len());
    blocks.insert(to, moved);
    from != to
}

pub fn insert_after(mut blocks: Vec<Block>, block: Block, after_id: Option<&BlockId>) -> Vec<Block> {
    insert_after_in_place(&mut blocks, block, after_id);
    blocks
}

pub fn remove(mut blocks: Vec<Block>, id: &BlockId) -> Vec<Block> {
    remove_in_place(&mut blocks, id);
    blocks
}

pub fn update(mut blocks: Vec<Block>, id: &BlockId, patch: &BlockPatch) -> Vec<Block> {
    update_in_place(&mut blocks, id, patch);
    blocks
}

pub fn move_block(mut blocks: Vec<Block>, id: &BlockId, direction: Direction) -> Vec<Block> {
    move_in_place(&mut blocks, id, direction);
    blocks
}

pub fn reorder(mut blocks: Vec<Block>, from: usize, to: usize) -> Vec<Block> {
    reorder_in_place(&mut blocks, from, to);
    blocks
}

/// The document a fresh editor session opens with.
pub fn initial_blocks() -> Vec<Block> {
    vec![
        Block::text(BlockType::Heading1, "Welcome to MultiGame Editor"),
        Block::text(
            BlockType::Paragraph,
            "This is a versatile, feature-rich text editor with a modular system that supports multiple games and content types.",
        ),
        Block::text(BlockType::Heading2, "Getting Started"),
        Block::text(
            BlockType::Paragraph,
            "Click anywhere to start typing, or use the + button to add new content.",
        ),
        Block::text(
            BlockType::BulletList,
            "Try formatting your text with the toolbar that appears when you select text.",
        ),
        Block::text(
            BlockType::BulletList,
            "Use the slash command by typing / to access quick actions.",
        ),
        Block::text(
            BlockType::BulletList,
            "Try the new contextual editing - when a line is empty, a small menu will appear.",
        ),
        Block::text(BlockType::Heading2, "Game Modules"),
        Block::text(
            BlockType::Paragraph,
            "Try out different game modules by clicking the + button or using the slash command. Each game has its own specific modules.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(content: &str) -> Block {
        Block::text(BlockType::Paragraph, content)
    }

    fn ids(blocks: &[Block]) -> Vec<String> {
        blocks.iter().map(|b| b.content.clone()).collect()
    }

    fn abc() -> Vec<Block> {
        vec![para("A"), para("B"), para("C")]
    }

    #[test]
    fn test_create_tft_module_default_shape() {
        let b = create_block(BlockType::Module, Some("tft-builder"));
        assert_eq!(b.content, "");
        assert_eq!(b.module_type.as_deref(), Some("tft-builder"));
        assert_eq!(
            b.module_data.expect("module data").into_value(),
            json!({ "champions": [], "synergies": [] })
        );
    }

    #[test]
    fn test_default_shapes_are_independent_values() {
        let mut a = create_block(BlockType::Module, Some("tft-builder"));
        let b = create_block(BlockType::Module, Some("tft-builder"));
        a.module_data = Some(ModuleData::new(json!({ "champions": ["Ahri"], "synergies": [] })));
        assert_eq!(
            b.module_data.expect("module data").into_value(),
            json!({ "champions": [], "synergies": [] })
        );
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_default_module_table() {
        let cases = [
            ("lol-champions", json!({ "champions": [], "roles": [] })),
            ("lol-items", json!({ "items": [] })),
            (
                "lol-runes",
                json!({ "primaryPath": null, "secondaryPath": null, "runes": [] }),
            ),
            ("lol-abilities", json!({ "championId": "", "abilities": [] })),
            ("valorant-agents", json!({ "agents": [], "roles": [] })),
            ("bg3-builder", json!({ "character": {}, "abilities": [] })),
            ("unknown-kind", json!({})),
        ];
        for (kind, expected) in cases {
            assert_eq!(default_module_data(Some(kind)).into_value(), expected, "{kind}");
        }
        assert_eq!(default_module_data(None).into_value(), json!({}));
    }

    #[test]
    fn test_default_video_table() {
        assert_eq!(
            default_video_data(Some("youtube")).into_value(),
            json!({ "videoId": "", "title": "" })
        );
        assert_eq!(default_video_data(Some("twitch")).into_value(), json!({ "channelId": "" }));
        assert_eq!(default_video_data(Some("instagram")).into_value(), json!({ "postId": "" }));
        assert_eq!(default_video_data(Some("vimeo")).into_value(), json!({}));
    }

    #[test]
    fn test_create_text_block_drops_module_type() {
        let b = create_block(BlockType::Heading1, Some("tft-builder"));
        assert!(b.module_type.is_none());
        assert!(b.module_data.is_none());
        assert!(!b.checked);
    }

    #[test]
    fn test_insert_after_anchor() {
        let list = abc();
        let anchor = list[0].id.clone();
        let out = insert_after(list, para("X"), Some(&anchor));
        assert_eq!(ids(&out), vec!["A", "X", "B", "C"]);
    }

    #[test]
    fn test_insert_after_missing_or_unknown_anchor_appends() {
        let out = insert_after(abc(), para("X"), None);
        assert_eq!(ids(&out), vec!["A", "B", "C", "X"]);

        let out = insert_after(abc(), para("Y"), Some(&BlockId::from("nope")));
        assert_eq!(ids(&out), vec!["A", "B", "C", "Y"]);
    }

    #[test]
    fn test_remove_keeps_last_block() {
        let single = vec![para("A")];
        let id = single[0].id.clone();
        let out = remove(single, &id);
        assert_eq!(ids(&out), vec!["A"]);
    }

    #[test]
    fn test_remove_by_id() {
        let list = abc();
        let id = list[1].id.clone();
        let out = remove(list, &id);
        assert_eq!(ids(&out), vec!["A", "C"]);
    }

    #[test]
    fn test_remove_unknown_id_reports_no_change() {
        let mut list = abc();
        assert!(!remove_in_place(&mut list, &BlockId::from("nope")));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_update_merges_patch_and_keeps_id() {
        let list = abc();
        let id = list[2].id.clone();
        let patch = BlockPatch {
            block_type: Some(BlockType::CheckList),
            checked: Some(true),
            ..Default::default()
        };
        let out = update(list, &id, &patch);
        assert_eq!(out[2].id, id);
        assert_eq!(out[2].block_type, BlockType::CheckList);
        assert!(out[2].checked);
        assert_eq!(out[2].content, "C");
    }

    #[test]
    fn test_update_can_clear_module_fields() {
        let mut b = create_block(BlockType::Video, Some("youtube"));
        apply_patch(
            &mut b,
            &BlockPatch {
                block_type: Some(BlockType::Paragraph),
                module_type: Some(None),
                module_data: Some(None),
                ..Default::default()
            },
        );
        assert!(b.module_type.is_none());
        assert!(b.module_data.is_none());
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut list = abc();
        let before = list.clone();
        assert!(!update_in_place(&mut list, &BlockId::from("nope"), &BlockPatch::content("x")));
        assert_eq!(list, before);
    }

    #[test]
    fn test_move_up_and_down() {
        let list = abc();
        let b = list[1].id.clone();
        let out = move_block(list, &b, Direction::Up);
        assert_eq!(ids(&out), vec!["B", "A", "C"]);
        let out = move_block(out, &b, Direction::Down);
        assert_eq!(ids(&out), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_move_at_boundaries_is_noop() {
        let mut list = abc();
        let first = list[0].id.clone();
        let last = list[2].id.clone();
        assert!(!move_in_place(&mut list, &first, Direction::Up));
        assert!(!move_in_place(&mut list, &last, Direction::Down));
        assert!(!move_in_place(&mut list, &BlockId::from("nope"), Direction::Down));
        assert_eq!(ids(&list), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_reorder_front_to_back() {
        let out = reorder(abc(), 0, 2);
        assert_eq!(ids(&out), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_reorder_round_trip() {
        let list = abc();
        for i in 0..3 {
            for j in 0..3 {
                if i == j {
                    continue;
                }
                let back = reorder(reorder(list.clone(), i, j), j, i);
                assert_eq!(back, list, "reorder {i} -> {j} -> {i}");
            }
        }
    }

    #[test]
    fn test_reorder_past_end_moves_to_end() {
        let out = reorder(abc(), 0, 3);
        assert_eq!(ids(&out), vec!["B", "C", "A"]);
        let out = reorder(abc(), 1, 99);
        assert_eq!(ids(&out), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_reorder_invalid_source_is_noop() {
        let mut list = abc();
        assert!(!reorder_in_place(&mut list, 3, 0));
        assert_eq!(ids(&list), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_initial_document_has_unique_ids() {
        let blocks = initial_blocks();
        assert_eq!(blocks.len(), 9);
        assert_eq!(blocks[0].block_type, BlockType::Heading1);
        let mut seen = std::collections::HashSet::new();
        assert!(blocks.iter().all(|b| seen.insert(b.id.clone())));
    }
}
