use crate::state::EditorActions;

/// List-level drag-and-drop reorder state.
///
/// `drop_target_index == len` means "after the last block".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragState {
    dragged_index: Option<usize>,
    drop_target_index: Option<usize>,
}

impl DragState {
    pub fn dragged_index(&self) -> Option<usize> {
        self.dragged_index
    }

    pub fn drop_target_index(&self) -> Option<usize> {
        self.drop_target_index
    }

    pub fn is_dragging(&self, index: usize) -> bool {
        self.dragged_index == Some(index)
    }

    /// Whether the insertion line should show at `index`.
    pub fn is_drop_target(&self, index: usize) -> bool {
        self.drop_target_index == Some(index)
    }

    pub fn drag_start(&mut self, index: usize) {
        self.dragged_index = Some(index);
        self.drop_target_index = None;
    }

    /// Returns true when the target moved.
    pub fn drag_over(&mut self, index: usize) -> bool {
        match self.dragged_index {
            Some(dragged) if dragged != index => {
                let changed = self.drop_target_index != Some(index);
                self.drop_target_index = Some(index);
                changed
            }
            _ => false,
        }
    }

    /// Commit the move, if any, and reset. Returns whether the list changed.
    pub fn drop<A: EditorActions + ?Sized>(&mut self, actions: &mut A) -> bool {
        let moved = match (self.dragged_index, self.drop_target_index) {
            (Some(from), Some(to)) if from != to => actions.reorder_blocks(from, to),
            _ => false,
        };
        self.drag_end();
        moved
    }

    /// Cancelled drag: reset without touching the list.
    pub fn drag_end(&mut self) {
        self.dragged_index = None;
        self.drop_target_index = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Block, BlockType};
    use crate::state::EditorStore;

    fn store_of(contents: &[&str]) -> EditorStore {
        EditorStore::with_blocks(
            contents
                .iter()
                .map(|c| Block::text(BlockType::Paragraph, c))
                .collect(),
        )
    }

    fn contents(store: &EditorStore) -> Vec<&str> {
        store.blocks().iter().map(|b| b.content.as_str()).collect()
    }

    #[test]
    fn test_drag_and_drop_reorders() {
        let mut store = store_of(&["A", "B", "C"]);
        let mut drag = DragState::default();

        drag.drag_start(0);
        assert!(drag.drag_over(2));
        assert!(drag.is_drop_target(2));
        assert!(drag.drop(&mut store));

        assert_eq!(contents(&store), vec!["B", "C", "A"]);
        assert_eq!(drag, DragState::default());
    }

    #[test]
    fn test_drag_over_self_sets_no_target() {
        let mut drag = DragState::default();
        drag.drag_start(1);
        assert!(!drag.drag_over(1));
        assert_eq!(drag.drop_target_index(), None);
    }

    #[test]
    fn test_drag_over_without_drag_is_ignored() {
        let mut drag = DragState::default();
        assert!(!drag.drag_over(0));
        assert_eq!(drag.drop_target_index(), None);
    }

    #[test]
    fn test_drop_onto_self_clears_without_moving() {
        let mut store = store_of(&["A", "B"]);
        let rev = store.revision();
        let mut drag = DragState::default();
        drag.drag_start(0);
        assert!(!drag.drop(&mut store));
        assert_eq!(store.revision(), rev);
        assert_eq!(drag.dragged_index(), None);
    }

    #[test]
    fn test_drop_past_end_moves_to_end() {
        let mut store = store_of(&["A", "B", "C"]);
        let mut drag = DragState::default();
        drag.drag_start(0);
        drag.drag_over(3);
        assert!(drag.drop(&mut store));
        assert_eq!(contents(&store), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_drag_end_cancels() {
        let mut store = store_of(&["A", "B"]);
        let mut drag = DragState::default();
        drag.drag_start(0);
        drag.drag_over(1);
        drag.drag_end();
        assert!(!drag.drop(&mut store));
        assert_eq!(contents(&store), vec!["A", "B"]);
    }

    #[test]
    fn test_repeated_drag_over_reports_change_once() {
        let mut drag = DragState::default();
        drag.drag_start(0);
        assert!(drag.drag_over(2));
        assert!(!drag.drag_over(2));
        assert!(drag.drag_over(1));
        assert!(drag.is_dragging(0));
    }
}
