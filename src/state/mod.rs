pub(crate) mod store;

pub use store::{EditorActions, EditorStore, FocusRequest};

use crate::blocks;
use crate::models::{Block, BlockId, BlockType, Game, ModuleData};
use crate::preview::PreviewContent;
use crate::storage::{load_json_from_storage, save_json_to_storage, SELECTED_GAME_KEY};
use leptos::prelude::*;

#[derive(Clone)]
pub(crate) struct AppState {
    /// Game the document is written for. Drives the slash menu's module group
    /// and the preview header.
    pub selected_game: RwSignal<Option<Game>>,
}

impl AppState {
    pub fn new() -> Self {
        let stored_game = load_json_from_storage::<Game>(SELECTED_GAME_KEY);
        Self {
            selected_game: RwSignal::new(stored_game),
        }
    }

    pub fn select_game(&self, game: Option<Game>) {
        match &game {
            Some(g) => {
                tracing::info!(game = %g.id, "game selected");
                save_json_to_storage(SELECTED_GAME_KEY, g);
            }
            None => {
                tracing::info!("game cleared");
                crate::storage::remove_from_storage(SELECTED_GAME_KEY);
            }
        }
        self.selected_game.set(game);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

/// Reactive handle to the editor session's store.
///
/// Created by the editor page and passed down as a prop; reads are tracked so
/// views re-render on change, writes go through the store's operations.
#[derive(Clone, Copy)]
pub struct EditorHandle {
    store: RwSignal<EditorStore>,
}

impl EditorHandle {
    pub fn new(store: EditorStore) -> Self {
        Self {
            store: RwSignal::new(store),
        }
    }

    pub fn blocks(&self) -> Vec<Block> {
        self.store.with(|s| s.blocks().to_vec())
    }

    pub fn block(&self, id: &BlockId) -> Option<Block> {
        self.store.with(|s| s.block(id).cloned())
    }

    /// For building views without subscribing them to the whole document.
    pub fn block_untracked(&self, id: &BlockId) -> Option<Block> {
        self.store.with_untracked(|s| s.block(id).cloned())
    }

    pub fn block_ids(&self) -> Vec<BlockId> {
        self.store
            .with(|s| s.blocks().iter().map(|b| b.id.clone()).collect())
    }

    pub fn len(&self) -> usize {
        self.store.with(|s| s.len())
    }

    pub fn index_of(&self, id: &BlockId) -> Option<usize> {
        self.store.with(|s| s.index_of(id))
    }

    pub fn focused_block_id(&self) -> Option<BlockId> {
        self.store.with(|s| s.focused_block_id().cloned())
    }

    pub fn pending_focus(&self) -> Option<FocusRequest> {
        self.store.with(|s| s.pending_focus().cloned())
    }

    /// Consumed by the post-render hook; never tracked.
    pub fn take_pending_focus(&self) -> Option<FocusRequest> {
        self.store.try_update(|s| s.take_pending_focus()).flatten()
    }

    pub fn toggle_check_list_item(&self, id: &BlockId) -> bool {
        self.store
            .try_update(|s| s.toggle_check_list_item(id))
            .unwrap_or(false)
    }

    pub fn update_module_data(&self, id: &BlockId, data: ModuleData) -> bool {
        self.store
            .try_update(|s| s.update_module_data(id, data))
            .unwrap_or(false)
    }

    pub fn move_block_up(&self, id: &BlockId) -> bool {
        self.store
            .try_update(|s| s.move_block_up(id))
            .unwrap_or(false)
    }

    pub fn move_block_down(&self, id: &BlockId) -> bool {
        self.store
            .try_update(|s| s.move_block_down(id))
            .unwrap_or(false)
    }

    pub fn snapshot(&self, game: Option<Game>) -> PreviewContent {
        self.store.with_untracked(|s| s.snapshot(game))
    }
}

impl EditorActions for EditorHandle {
    fn set_focused_block_id(&mut self, id: Option<BlockId>) {
        // Skip the write when nothing changes so focus churn doesn't re-render.
        let same = self
            .store
            .with_untracked(|s| s.focused_block_id() == id.as_ref());
        if !same {
            self.store.update(|s| s.set_focused_block_id(id));
        }
    }

    fn request_focus(&mut self, id: &BlockId) {
        self.store.update(|s| s.request_focus(id));
    }

    fn update_block_content(&mut self, id: &BlockId, content: &str) -> bool {
        // Typing must not re-render the block being edited; the DOM already
        // holds the text.
        self.store
            .try_update_untracked(|s| s.update_block_content(id, content))
            .unwrap_or(false)
    }

    fn add_block(
        &mut self,
        block_type: BlockType,
        after_id: Option<&BlockId>,
        module_type: Option<&str>,
    ) -> BlockId {
        let block = blocks::create_block(block_type, module_type);
        let id = block.id.clone();
        self.store.update(|s| {
            s.insert_block(block, after_id);
        });
        id
    }

    fn delete_block(&mut self, id: &BlockId) -> bool {
        self.store
            .try_update(|s| s.delete_block(id))
            .unwrap_or(false)
    }

    fn change_block_type(
        &mut self,
        id: &BlockId,
        new_type: BlockType,
        module_type: Option<&str>,
    ) -> bool {
        self.store
            .try_update(|s| s.change_block_type(id, new_type, module_type))
            .unwrap_or(false)
    }

    fn reorder_blocks(&mut self, from: usize, to: usize) -> bool {
        self.store
            .try_update(|s| s.reorder_blocks(from, to))
            .unwrap_or(false)
    }
}
