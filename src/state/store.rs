use crate::blocks::{self, Direction};
use crate::models::{Block, BlockId, BlockPatch, BlockType, Game, ModuleData};
use crate::preview::PreviewContent;
use std::sync::Arc;

/// Focus transfer that must wait until the target block is rendered.
///
/// The rendering layer takes it with [`EditorStore::take_pending_focus`] after
/// committing the new tree, focuses `#block-{id}` and puts the caret at the end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusRequest {
    pub block_id: BlockId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    BlockAdded { id: BlockId, index: usize },
    BlockDeleted { id: BlockId, index: usize },
    BlockUpdated { id: BlockId },
    BlocksReordered,
    FocusChanged { id: Option<BlockId> },
    FocusRequested { id: BlockId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

pub type Observer = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

/// Mutation surface the per-block controller and the drag protocol drive.
///
/// Implemented by the plain [`EditorStore`] and by the reactive
/// `EditorHandle`, so controller logic is identical in tests and in the DOM.
pub trait EditorActions {
    fn set_focused_block_id(&mut self, id: Option<BlockId>);
    fn request_focus(&mut self, id: &BlockId);
    fn update_block_content(&mut self, id: &BlockId, content: &str) -> bool;
    fn add_block(
        &mut self,
        block_type: BlockType,
        after_id: Option<&BlockId>,
        module_type: Option<&str>,
    ) -> BlockId;
    fn delete_block(&mut self, id: &BlockId) -> bool;
    fn change_block_type(
        &mut self,
        id: &BlockId,
        new_type: BlockType,
        module_type: Option<&str>,
    ) -> bool;
    fn reorder_blocks(&mut self, from: usize, to: usize) -> bool;
}

/// Authoritative document state for one editor session.
#[derive(Clone)]
pub struct EditorStore {
    blocks: Vec<Block>,
    focused_block_id: Option<BlockId>,
    pending_focus: Option<FocusRequest>,
    revision: u64,
    next_subscription: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl std::fmt::Debug for EditorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorStore")
            .field("blocks", &self.blocks.len())
            .field("focused_block_id", &self.focused_block_id)
            .field("pending_focus", &self.pending_focus)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorStore {
    /// A session seeded with the welcome document.
    pub fn new() -> Self {
        Self::with_blocks(blocks::initial_blocks())
    }

    /// A session over `blocks`. An empty list gets a single paragraph so the
    /// document is never empty.
    pub fn with_blocks(mut blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            blocks.push(blocks::create_block(BlockType::Paragraph, None));
        }
        Self {
            blocks,
            focused_block_id: None,
            pending_focus: None,
            revision: 0,
            next_subscription: 0,
            observers: Vec::new(),
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        blocks::find(&self.blocks, id)
    }

    pub fn index_of(&self, id: &BlockId) -> Option<usize> {
        blocks::position(&self.blocks, id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn focused_block_id(&self) -> Option<&BlockId> {
        self.focused_block_id.as_ref()
    }

    pub fn pending_focus(&self) -> Option<&FocusRequest> {
        self.pending_focus.as_ref()
    }

    /// Bumped on every change that observers are told about.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, observer: impl Fn(&StoreEvent) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Arc::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    fn emit(&mut self, event: StoreEvent) {
        self.revision += 1;
        for (_, observer) in &self.observers {
            observer(&event);
        }
    }

    /// Insert an already-built block after `after_id` (or at the end) and
    /// schedule focus for it.
    pub fn insert_block(&mut self, block: Block, after_id: Option<&BlockId>) -> BlockId {
        let id = block.id.clone();
        let index = blocks::insert_after_in_place(&mut self.blocks, block, after_id);
        tracing::debug!(block_id = %id, index, "block added");
        self.emit(StoreEvent::BlockAdded {
            id: id.clone(),
            index,
        });
        self.request_focus(&id);
        id
    }

    pub fn move_block_up(&mut self, id: &BlockId) -> bool {
        self.move_block(id, Direction::Up)
    }

    pub fn move_block_down(&mut self, id: &BlockId) -> bool {
        self.move_block(id, Direction::Down)
    }

    fn move_block(&mut self, id: &BlockId, direction: Direction) -> bool {
        if !blocks::move_in_place(&mut self.blocks, id, direction) {
            tracing::debug!(block_id = %id, ?direction, "move ignored");
            return false;
        }
        self.emit(StoreEvent::BlocksReordered);
        true
    }

    pub fn toggle_check_list_item(&mut self, id: &BlockId) -> bool {
        let Some(checked) = self.block(id).map(|b| !b.checked) else {
            tracing::debug!(block_id = %id, "toggle on unknown block ignored");
            return false;
        };
        let patch = BlockPatch {
            checked: Some(checked),
            ..Default::default()
        };
        self.patch(id, &patch)
    }

    /// Replace a module block's payload. Widgets write back only through here.
    pub fn update_module_data(&mut self, id: &BlockId, data: ModuleData) -> bool {
        self.patch(id, &BlockPatch::module_data(data))
    }

    fn patch(&mut self, id: &BlockId, patch: &BlockPatch) -> bool {
        if !blocks::update_in_place(&mut self.blocks, id, patch) {
            tracing::debug!(block_id = %id, "update on unknown block ignored");
            return false;
        }
        self.emit(StoreEvent::BlockUpdated { id: id.clone() });
        true
    }

    /// Post-render hook: move the pending request into the focus pointer.
    ///
    /// A request whose block has vanished in the meantime is dropped.
    pub fn take_pending_focus(&mut self) -> Option<FocusRequest> {
        let req = self.pending_focus.take()?;
        if self.block(&req.block_id).is_none() {
            tracing::debug!(block_id = %req.block_id, "focus target vanished");
            return None;
        }
        self.set_focused_block_id(Some(req.block_id.clone()));
        Some(req)
    }

    pub fn snapshot(&self, game: Option<Game>) -> PreviewContent {
        PreviewContent {
            blocks: self.blocks.clone(),
            game,
        }
    }
}

impl EditorActions for EditorStore {
    fn set_focused_block_id(&mut self, id: Option<BlockId>) {
        if self.focused_block_id == id {
            return;
        }
        self.focused_block_id = id.clone();
        self.emit(StoreEvent::FocusChanged { id });
    }

    fn request_focus(&mut self, id: &BlockId) {
        self.pending_focus = Some(FocusRequest {
            block_id: id.clone(),
        });
        self.emit(StoreEvent::FocusRequested { id: id.clone() });
    }

    fn update_block_content(&mut self, id: &BlockId, content: &str) -> bool {
        self.patch(id, &BlockPatch::content(content))
    }

    fn add_block(
        &mut self,
        block_type: BlockType,
        after_id: Option<&BlockId>,
        module_type: Option<&str>,
    ) -> BlockId {
        self.insert_block(blocks::create_block(block_type, module_type), after_id)
    }

    fn delete_block(&mut self, id: &BlockId) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::debug!(block_id = %id, "delete on unknown block ignored");
            return false;
        };
        if !blocks::remove_in_place(&mut self.blocks, id) {
            tracing::debug!(block_id = %id, "refusing to delete the last block");
            return false;
        }
        tracing::debug!(block_id = %id, index, "block deleted");
        self.emit(StoreEvent::BlockDeleted {
            id: id.clone(),
            index,
        });

        if self.focused_block_id.as_ref() == Some(id) {
            self.set_focused_block_id(None);
        }
        let next = index.min(self.blocks.len().saturating_sub(1));
        match self.blocks.get(next).map(|b| b.id.clone()) {
            Some(next_id) => self.request_focus(&next_id),
            None => self.pending_focus = None,
        }
        true
    }

    fn change_block_type(
        &mut self,
        id: &BlockId,
        new_type: BlockType,
        module_type: Option<&str>,
    ) -> bool {
        let patch = match new_type {
            BlockType::Module | BlockType::Video => {
                let fallback = if new_type == BlockType::Module {
                    blocks::DEFAULT_MODULE_TYPE
                } else {
                    blocks::DEFAULT_VIDEO_TYPE
                };
                let resolved = module_type.unwrap_or(fallback);
                BlockPatch {
                    block_type: Some(new_type),
                    module_type: Some(Some(resolved.to_string())),
                    module_data: Some(blocks::default_data_for(new_type, Some(resolved))),
                    ..Default::default()
                }
            }
            _ => BlockPatch {
                block_type: Some(new_type),
                module_type: Some(None),
                module_data: Some(None),
                ..Default::default()
            },
        };
        self.patch(id, &patch)
    }

    fn reorder_blocks(&mut self, from: usize, to: usize) -> bool {
        if !blocks::reorder_in_place(&mut self.blocks, from, to) {
            tracing::debug!(from, to, "reorder ignored");
            return false;
        }
        self.emit(StoreEvent::BlocksReordered);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    fn para(content: &str) -> Block {
        Block::text(BlockType::Paragraph, content)
    }

    fn store_of(contents: &[&str]) -> EditorStore {
        EditorStore::with_blocks(contents.iter().map(|c| para(c)).collect())
    }

    fn contents(store: &EditorStore) -> Vec<String> {
        store.blocks().iter().map(|b| b.content.clone()).collect()
    }

    #[test]
    fn test_scenario_add_heading_after_paragraph() {
        let mut store = store_of(&[""]);
        let p0 = store.blocks()[0].id.clone();

        let h1 = store.add_block(BlockType::Heading1, Some(&p0), None);

        assert_eq!(store.len(), 2);
        assert_eq!(store.blocks()[0].id, p0);
        assert_eq!(store.blocks()[1].id, h1);
        assert_eq!(store.blocks()[1].block_type, BlockType::Heading1);
        assert_eq!(store.blocks()[1].content, "");
        assert_eq!(
            store.pending_focus(),
            Some(&FocusRequest {
                block_id: h1.clone()
            })
        );
        // Focus moves only once the render layer commits the block.
        assert_eq!(store.focused_block_id(), None);
        assert_eq!(store.take_pending_focus().map(|r| r.block_id), Some(h1.clone()));
        assert_eq!(store.focused_block_id(), Some(&h1));
        assert!(store.pending_focus().is_none());
    }

    #[test]
    fn test_scenario_reorder_first_to_last() {
        let mut store = store_of(&["A", "B", "C"]);
        assert!(store.reorder_blocks(0, 2));
        assert_eq!(contents(&store), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_scenario_delete_sole_block_refused() {
        let mut store = store_of(&["A"]);
        let a = store.blocks()[0].id.clone();
        assert!(!store.delete_block(&a));
        assert_eq!(contents(&store), vec!["A"]);
        assert_eq!(store.blocks()[0].id, a);
    }

    #[test]
    fn test_scenario_delete_focused_last_block_moves_focus_back() {
        let mut store = store_of(&["A", "B"]);
        let a = store.blocks()[0].id.clone();
        let b = store.blocks()[1].id.clone();
        store.set_focused_block_id(Some(b.clone()));

        assert!(store.delete_block(&b));
        assert_eq!(contents(&store), vec!["A"]);
        store.take_pending_focus();
        assert_eq!(store.focused_block_id(), Some(&a));
    }

    #[test]
    fn test_delete_middle_focuses_successor() {
        let mut store = store_of(&["A", "B", "C"]);
        let b = store.blocks()[1].id.clone();
        let c = store.blocks()[2].id.clone();
        assert!(store.delete_block(&b));
        assert_eq!(store.pending_focus().map(|r| &r.block_id), Some(&c));
    }

    #[test]
    fn test_scenario_retype_module_to_lol_items() {
        let mut store = EditorStore::with_blocks(vec![blocks::create_block(
            BlockType::Module,
            Some("tft-builder"),
        )]);
        let m = store.blocks()[0].id.clone();
        store.update_module_data(&m, ModuleData::new(json!({ "champions": ["Jinx"], "synergies": [] })));

        assert!(store.change_block_type(&m, BlockType::Module, Some("lol-items")));

        let block = store.block(&m).expect("block");
        assert_eq!(block.module_type.as_deref(), Some("lol-items"));
        assert_eq!(
            block.module_data.clone().expect("data").into_value(),
            json!({ "items": [] })
        );
    }

    #[test]
    fn test_change_type_falls_back_to_default_kinds() {
        let mut store = store_of(&["A", "B"]);
        let a = store.blocks()[0].id.clone();
        let b = store.blocks()[1].id.clone();

        store.change_block_type(&a, BlockType::Module, None);
        store.change_block_type(&b, BlockType::Video, None);

        assert_eq!(store.block(&a).and_then(|x| x.module_type.as_deref()), Some("tft-builder"));
        assert_eq!(store.block(&b).and_then(|x| x.module_type.as_deref()), Some("youtube"));
        assert_eq!(
            store.block(&b).and_then(|x| x.module_data.clone()).map(ModuleData::into_value),
            Some(json!({ "videoId": "", "title": "" }))
        );
    }

    #[test]
    fn test_change_to_text_type_keeps_content_and_drops_module_fields() {
        let mut store = store_of(&["hello"]);
        let a = store.blocks()[0].id.clone();
        store.toggle_check_list_item(&a);
        store.change_block_type(&a, BlockType::Video, Some("twitch"));

        assert!(store.change_block_type(&a, BlockType::Heading2, None));

        let block = store.block(&a).expect("block");
        assert_eq!(block.block_type, BlockType::Heading2);
        assert_eq!(block.content, "hello");
        assert!(block.checked);
        assert!(block.module_type.is_none());
        assert!(block.module_data.is_none());
    }

    #[test]
    fn test_updates_preserve_ids_length_and_order() {
        let mut store = store_of(&["A", "B", "C"]);
        let ids_before: Vec<BlockId> = store.blocks().iter().map(|b| b.id.clone()).collect();
        let b = ids_before[1].clone();

        store.update_block_content(&b, "<b>bold</b>");
        store.toggle_check_list_item(&b);
        store.change_block_type(&b, BlockType::Module, Some("lol-runes"));
        store.update_module_data(&b, ModuleData::new(json!({ "runes": [8005] })));

        let ids_after: Vec<BlockId> = store.blocks().iter().map(|b| b.id.clone()).collect();
        assert_eq!(ids_before, ids_after);
    }

    #[test]
    fn test_toggle_flips_checked() {
        let mut store = store_of(&["task"]);
        let a = store.blocks()[0].id.clone();
        store.change_block_type(&a, BlockType::CheckList, None);
        assert!(store.toggle_check_list_item(&a));
        assert!(store.block(&a).map(|b| b.checked).unwrap_or(false));
        store.toggle_check_list_item(&a);
        assert!(!store.block(&a).map(|b| b.checked).unwrap_or(true));
    }

    #[test]
    fn test_unknown_ids_are_silent_noops() {
        let mut store = store_of(&["A", "B"]);
        let ghost = BlockId::from("ghost");
        let rev = store.revision();

        assert!(!store.update_block_content(&ghost, "x"));
        assert!(!store.toggle_check_list_item(&ghost));
        assert!(!store.change_block_type(&ghost, BlockType::Code, None));
        assert!(!store.update_module_data(&ghost, ModuleData::empty()));
        assert!(!store.delete_block(&ghost));
        assert!(!store.move_block_up(&ghost));

        assert_eq!(store.revision(), rev);
        assert_eq!(contents(&store), vec!["A", "B"]);
    }

    #[test]
    fn test_delete_sequence_never_empties_document() {
        let mut store = store_of(&["A", "B", "C", "D"]);
        for _ in 0..10 {
            let first = store.blocks()[0].id.clone();
            store.delete_block(&first);
            let last = store.blocks()[store.len() - 1].id.clone();
            store.delete_block(&last);
            assert!(!store.is_empty());
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_move_wrappers() {
        let mut store = store_of(&["A", "B", "C"]);
        let c = store.blocks()[2].id.clone();
        assert!(store.move_block_up(&c));
        assert_eq!(contents(&store), vec!["A", "C", "B"]);
        assert!(store.move_block_down(&c));
        assert!(!store.move_block_down(&c));
        assert_eq!(contents(&store), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_pending_focus_for_vanished_block_is_dropped() {
        let mut store = store_of(&["A", "B"]);
        let a = store.blocks()[0].id.clone();
        let new_id = store.add_block(BlockType::Paragraph, Some(&a), None);
        // Another path removes the block before the render layer runs.
        store.blocks.retain(|b| b.id != new_id);
        assert!(store.take_pending_focus().is_none());
        assert_eq!(store.focused_block_id(), None);
    }

    #[test]
    fn test_observers_are_notified_synchronously() {
        let mut store = store_of(&["A"]);
        let seen: Arc<Mutex<Vec<StoreEvent>>> = Arc::new(Mutex::new(vec![]));
        let sink = seen.clone();
        let sub = store.subscribe(move |e| sink.lock().expect("lock").push(e.clone()));

        let a = store.blocks()[0].id.clone();
        store.update_block_content(&a, "x");
        let added = store.add_block(BlockType::Divider, Some(&a), None);

        {
            let events = seen.lock().expect("lock");
            assert_eq!(events[0], StoreEvent::BlockUpdated { id: a.clone() });
            assert_eq!(
                events[1],
                StoreEvent::BlockAdded {
                    id: added.clone(),
                    index: 1
                }
            );
            assert_eq!(events[2], StoreEvent::FocusRequested { id: added });
        }

        assert!(store.unsubscribe(sub));
        store.update_block_content(&a, "y");
        assert_eq!(seen.lock().expect("lock").len(), 3);
    }

    #[test]
    fn test_empty_seed_gets_a_paragraph() {
        let store = EditorStore::with_blocks(vec![]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.blocks()[0].block_type, BlockType::Paragraph);
    }

    #[test]
    fn test_snapshot_carries_blocks_and_game() {
        let store = store_of(&["A"]);
        let snap = store.snapshot(None);
        assert_eq!(snap.blocks, store.blocks());
        assert!(snap.game.is_none());
    }
}
