use super::surface::{Rect, TextSurface};
use crate::menus::{self, ChoiceOutcome, FormatAction, MenuChoice, Point, ToolbarOutcome};
use crate::models::{BlockId, BlockType};
use crate::state::EditorActions;
use crate::util::strip_tags;

/// The one contextual menu a block may have open.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum OpenMenu {
    #[default]
    None,
    Slash(Point),
    Floating(Point),
    FormatToolbar(Point),
}

#[derive(Clone, Copy, Debug)]
pub struct KeyInput<'a> {
    pub key: &'a str,
    pub shift: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Default,
    PreventDefault,
}

pub(crate) fn slash_anchor(rect: Rect, scroll_y: f64) -> Point {
    Point::new(rect.left, rect.bottom() + scroll_y)
}

pub(crate) fn floating_anchor(rect: Rect) -> Point {
    Point::new(rect.left + 20.0, rect.top - 10.0)
}

pub(crate) fn toolbar_anchor(rect: Rect, scroll_y: f64) -> Point {
    Point::new(rect.left + rect.width / 2.0, rect.top + scroll_y)
}

pub(crate) fn plus_button_anchor(block_rect: Rect, scroll_y: f64) -> Point {
    Point::new(block_rect.left, block_rect.bottom() + scroll_y + 10.0)
}

/// Per-block interaction state machine.
///
/// Reads the editable region only through [`TextSurface`] and mutates the
/// document only through [`EditorActions`].
#[derive(Clone, Debug, PartialEq)]
pub struct BlockInteraction {
    block_id: BlockId,
    has_focus: bool,
    is_empty: bool,
    menu: OpenMenu,
}

impl BlockInteraction {
    pub fn new(block_id: BlockId, content: &str) -> Self {
        Self {
            block_id,
            has_focus: false,
            is_empty: strip_tags(content).trim().is_empty(),
            menu: OpenMenu::None,
        }
    }

    pub fn block_id(&self) -> &BlockId {
        &self.block_id
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    pub fn menu(&self) -> OpenMenu {
        self.menu
    }

    pub fn close_menus(&mut self) {
        self.menu = OpenMenu::None;
    }

    fn open_slash(&mut self, surface: &impl TextSurface) {
        self.menu = OpenMenu::Slash(slash_anchor(surface.region_rect(), surface.scroll_y()));
    }

    pub fn on_focus(&mut self, surface: &impl TextSurface, actions: &mut impl EditorActions) {
        self.has_focus = true;
        actions.set_focused_block_id(Some(self.block_id.clone()));

        self.is_empty = surface.text_content().trim().is_empty();
        if self.is_empty {
            self.menu = OpenMenu::Floating(floating_anchor(surface.region_rect()));
        } else if matches!(self.menu, OpenMenu::Floating(_)) {
            self.menu = OpenMenu::None;
        }
    }

    pub fn on_input(&mut self, surface: &impl TextSurface, actions: &mut impl EditorActions) {
        let text = surface.text_content();
        actions.update_block_content(&self.block_id, &surface.html_content());
        self.is_empty = text.trim().is_empty();

        // Only a lone slash triggers, so typing URLs doesn't.
        if text == "/" {
            self.open_slash(surface);
        }
    }

    pub fn on_key_down(
        &mut self,
        key: KeyInput<'_>,
        surface: &impl TextSurface,
        actions: &mut impl EditorActions,
    ) -> KeyOutcome {
        match key.key {
            "Enter" if !key.shift => {
                actions.add_block(BlockType::Paragraph, Some(&self.block_id), None);
                KeyOutcome::PreventDefault
            }
            "Backspace" if surface.text_content().is_empty() => {
                actions.delete_block(&self.block_id);
                KeyOutcome::PreventDefault
            }
            "/" => {
                self.open_slash(surface);
                KeyOutcome::Default
            }
            "Escape" => {
                self.close_menus();
                KeyOutcome::Default
            }
            "ArrowUp" | "ArrowDown" => KeyOutcome::Default,
            _ => {
                if self.is_empty && matches!(self.menu, OpenMenu::Floating(_)) {
                    self.menu = OpenMenu::None;
                }
                KeyOutcome::Default
            }
        }
    }

    /// A selection opens the toolbar; a plain click closes it.
    pub fn on_mouse_up(&mut self, surface: &impl TextSurface) {
        match surface.selection() {
            Some(sel) if !sel.collapsed => {
                self.menu = OpenMenu::FormatToolbar(toolbar_anchor(sel.rect, surface.scroll_y()));
            }
            _ => self.close_toolbar(),
        }
    }

    /// `focus_moved_into_menu` is true when the element receiving focus lives
    /// inside the floating menu or the toolbar, so its click can still land.
    /// The slash menu survives a blur because its search box takes focus.
    pub fn on_blur(&mut self, focus_moved_into_menu: bool) {
        self.has_focus = false;
        if focus_moved_into_menu {
            return;
        }
        if matches!(self.menu, OpenMenu::Floating(_) | OpenMenu::FormatToolbar(_)) {
            self.menu = OpenMenu::None;
        }
    }

    /// Click-outside for the toolbar. Leaves any other menu alone.
    pub fn close_toolbar(&mut self) {
        if matches!(self.menu, OpenMenu::FormatToolbar(_)) {
            self.menu = OpenMenu::None;
        }
    }

    /// The hover "+" control: open the slash menu just below the whole block.
    pub fn on_plus_button(&mut self, block_rect: Rect, scroll_y: f64) {
        self.menu = OpenMenu::Slash(plus_button_anchor(block_rect, scroll_y));
    }

    pub fn on_menu_choice(
        &mut self,
        choice: MenuChoice,
        surface: &impl TextSurface,
        actions: &mut impl EditorActions,
    ) -> ChoiceOutcome {
        let outcome = menus::resolve_choice(actions, &self.block_id, choice);
        match outcome {
            ChoiceOutcome::OpenSlashMenu => self.open_slash(surface),
            _ => self.close_menus(),
        }
        outcome
    }

    pub fn on_format(
        &mut self,
        action: FormatAction,
        actions: &mut impl EditorActions,
    ) -> ToolbarOutcome {
        let outcome = menus::apply_format(actions, &self.block_id, action);
        if outcome == ToolbarOutcome::Close {
            self.close_menus();
        }
        outcome
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::editor::surface::SelectionInfo;
    use crate::menus::InlineFormat;
    use crate::models::Block;
    use crate::state::EditorStore;
    use std::cell::{Cell, RefCell};

    pub(crate) struct FakeSurface {
        pub html: RefCell<String>,
        pub rect: Rect,
        pub scroll: f64,
        pub selection: Option<SelectionInfo>,
        pub focused: Cell<bool>,
    }

    impl FakeSurface {
        pub fn with_text(text: &str) -> Self {
            Self {
                html: RefCell::new(text.to_string()),
                rect: Rect::new(100.0, 200.0, 400.0, 24.0),
                scroll: 50.0,
                selection: None,
                focused: Cell::new(false),
            }
        }

        pub fn type_text(&self, text: &str) {
            *self.html.borrow_mut() = text.to_string();
        }
    }

    impl TextSurface for FakeSurface {
        fn text_content(&self) -> String {
            strip_tags(&self.html.borrow())
        }

        fn html_content(&self) -> String {
            self.html.borrow().clone()
        }

        fn region_rect(&self) -> Rect {
            self.rect
        }

        fn scroll_y(&self) -> f64 {
            self.scroll
        }

        fn selection(&self) -> Option<SelectionInfo> {
            self.selection
        }

        fn focus_at_end(&self) {
            self.focused.set(true);
        }
    }

    fn setup(contents: &[&str]) -> (EditorStore, Vec<BlockId>) {
        let blocks: Vec<Block> = contents
            .iter()
            .map(|c| Block::text(BlockType::Paragraph, c))
            .collect();
        let ids = blocks.iter().map(|b| b.id.clone()).collect();
        (EditorStore::with_blocks(blocks), ids)
    }

    fn key(k: &str) -> KeyInput<'_> {
        KeyInput {
            key: k,
            shift: false,
        }
    }

    #[test]
    fn test_focus_on_empty_block_opens_floating_menu() {
        let (mut store, ids) = setup(&[""]);
        let surface = FakeSurface::with_text("");
        let mut ctl = BlockInteraction::new(ids[0].clone(), "");

        ctl.on_focus(&surface, &mut store);

        assert!(ctl.has_focus());
        assert!(ctl.is_empty());
        assert_eq!(ctl.menu(), OpenMenu::Floating(Point::new(120.0, 190.0)));
        assert_eq!(store.focused_block_id(), Some(&ids[0]));
    }

    #[test]
    fn test_focus_on_non_empty_block_opens_nothing() {
        let (mut store, ids) = setup(&["hello"]);
        let surface = FakeSurface::with_text("hello");
        let mut ctl = BlockInteraction::new(ids[0].clone(), "hello");

        ctl.on_focus(&surface, &mut store);
        assert_eq!(ctl.menu(), OpenMenu::None);
        assert!(!ctl.is_empty());
    }

    #[test]
    fn test_lone_slash_opens_slash_menu_below_region() {
        let (mut store, ids) = setup(&[""]);
        let surface = FakeSurface::with_text("/");
        let mut ctl = BlockInteraction::new(ids[0].clone(), "");

        ctl.on_input(&surface, &mut store);

        assert_eq!(ctl.menu(), OpenMenu::Slash(Point::new(100.0, 274.0)));
        assert_eq!(store.blocks()[0].content, "/");
    }

    #[test]
    fn test_slash_inside_text_does_not_trigger() {
        let (mut store, ids) = setup(&[""]);
        let surface = FakeSurface::with_text("https://example.com/a");
        let mut ctl = BlockInteraction::new(ids[0].clone(), "");

        ctl.on_input(&surface, &mut store);
        assert_eq!(ctl.menu(), OpenMenu::None);
        assert!(!ctl.is_empty());
    }

    #[test]
    fn test_input_stores_markup() {
        let (mut store, ids) = setup(&[""]);
        let surface = FakeSurface::with_text("<b>bold</b> move");
        let mut ctl = BlockInteraction::new(ids[0].clone(), "");
        ctl.on_input(&surface, &mut store);
        assert_eq!(store.blocks()[0].content, "<b>bold</b> move");
    }

    #[test]
    fn test_enter_adds_paragraph_after_any_type() {
        let (mut store, ids) = setup(&["title", "next"]);
        store.change_block_type(&ids[0], BlockType::Heading1, None);
        let surface = FakeSurface::with_text("title");
        let mut ctl = BlockInteraction::new(ids[0].clone(), "title");

        let outcome = ctl.on_key_down(key("Enter"), &surface, &mut store);

        assert_eq!(outcome, KeyOutcome::PreventDefault);
        assert_eq!(store.len(), 3);
        assert_eq!(store.blocks()[1].block_type, BlockType::Paragraph);
        assert_eq!(store.blocks()[2].id, ids[1]);
    }

    #[test]
    fn test_shift_enter_is_a_line_break() {
        let (mut store, ids) = setup(&["a"]);
        let surface = FakeSurface::with_text("a");
        let mut ctl = BlockInteraction::new(ids[0].clone(), "a");
        let outcome = ctl.on_key_down(
            KeyInput {
                key: "Enter",
                shift: true,
            },
            &surface,
            &mut store,
        );
        assert_eq!(outcome, KeyOutcome::Default);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_backspace_on_empty_deletes_block() {
        let (mut store, ids) = setup(&["a", ""]);
        let surface = FakeSurface::with_text("");
        let mut ctl = BlockInteraction::new(ids[1].clone(), "");

        let outcome = ctl.on_key_down(key("Backspace"), &surface, &mut store);

        assert_eq!(outcome, KeyOutcome::PreventDefault);
        assert_eq!(store.len(), 1);
        assert_eq!(store.pending_focus().map(|r| &r.block_id), Some(&ids[0]));
    }

    #[test]
    fn test_backspace_with_text_is_left_to_the_browser() {
        let (mut store, ids) = setup(&["a", "b"]);
        let surface = FakeSurface::with_text("b");
        let mut ctl = BlockInteraction::new(ids[1].clone(), "b");
        assert_eq!(
            ctl.on_key_down(key("Backspace"), &surface, &mut store),
            KeyOutcome::Default
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_slash_key_and_escape() {
        let (mut store, ids) = setup(&["x"]);
        let surface = FakeSurface::with_text("x");
        let mut ctl = BlockInteraction::new(ids[0].clone(), "x");

        ctl.on_key_down(key("/"), &surface, &mut store);
        assert!(matches!(ctl.menu(), OpenMenu::Slash(_)));

        ctl.on_key_down(key("Escape"), &surface, &mut store);
        assert_eq!(ctl.menu(), OpenMenu::None);
    }

    #[test]
    fn test_typing_dismisses_floating_menu_but_arrows_do_not() {
        let (mut store, ids) = setup(&[""]);
        let surface = FakeSurface::with_text("");
        let mut ctl = BlockInteraction::new(ids[0].clone(), "");
        ctl.on_focus(&surface, &mut store);

        ctl.on_key_down(key("ArrowDown"), &surface, &mut store);
        assert!(matches!(ctl.menu(), OpenMenu::Floating(_)));

        ctl.on_key_down(key("a"), &surface, &mut store);
        assert_eq!(ctl.menu(), OpenMenu::None);
    }

    #[test]
    fn test_mouse_up_with_selection_opens_toolbar() {
        let (_, ids) = setup(&["some text"]);
        let mut surface = FakeSurface::with_text("some text");
        let mut ctl = BlockInteraction::new(ids[0].clone(), "some text");

        surface.selection = Some(SelectionInfo {
            collapsed: true,
            rect: Rect::default(),
        });
        ctl.on_mouse_up(&surface);
        assert_eq!(ctl.menu(), OpenMenu::None);

        surface.selection = Some(SelectionInfo {
            collapsed: false,
            rect: Rect::new(100.0, 200.0, 80.0, 20.0),
        });
        ctl.on_mouse_up(&surface);
        assert_eq!(ctl.menu(), OpenMenu::FormatToolbar(Point::new(140.0, 250.0)));
    }

    fn with_toolbar(text: &str) -> (EditorStore, FakeSurface, BlockInteraction) {
        let (store, ids) = setup(&[text]);
        let mut surface = FakeSurface::with_text(text);
        surface.selection = Some(SelectionInfo {
            collapsed: false,
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
        });
        let mut ctl = BlockInteraction::new(ids[0].clone(), text);
        ctl.on_mouse_up(&surface);
        assert!(matches!(ctl.menu(), OpenMenu::FormatToolbar(_)));
        (store, surface, ctl)
    }

    #[test]
    fn test_plain_click_closes_toolbar() {
        let (_, mut surface, mut ctl) = with_toolbar("some text");

        surface.selection = Some(SelectionInfo {
            collapsed: true,
            rect: Rect::default(),
        });
        ctl.on_mouse_up(&surface);
        assert_eq!(ctl.menu(), OpenMenu::None);
    }

    #[test]
    fn test_click_without_selection_closes_toolbar() {
        let (_, mut surface, mut ctl) = with_toolbar("some text");
        surface.selection = None;
        ctl.on_mouse_up(&surface);
        assert_eq!(ctl.menu(), OpenMenu::None);
    }

    #[test]
    fn test_leaving_block_closes_toolbar() {
        let (_, _, mut ctl) = with_toolbar("some text");
        ctl.on_blur(false);
        assert_eq!(ctl.menu(), OpenMenu::None);
    }

    #[test]
    fn test_blur_into_toolbar_keeps_it_open() {
        let (_, _, mut ctl) = with_toolbar("some text");
        ctl.on_blur(true);
        assert!(matches!(ctl.menu(), OpenMenu::FormatToolbar(_)));
    }

    #[test]
    fn test_close_toolbar_leaves_slash_menu_open() {
        let (mut store, ids) = setup(&["x"]);
        let surface = FakeSurface::with_text("x");
        let mut ctl = BlockInteraction::new(ids[0].clone(), "x");
        ctl.on_key_down(key("/"), &surface, &mut store);

        ctl.close_toolbar();
        assert!(matches!(ctl.menu(), OpenMenu::Slash(_)));
    }

    #[test]
    fn test_escape_closes_floating_menu() {
        let (mut store, ids) = setup(&[""]);
        let surface = FakeSurface::with_text("");
        let mut ctl = BlockInteraction::new(ids[0].clone(), "");
        ctl.on_focus(&surface, &mut store);
        assert!(matches!(ctl.menu(), OpenMenu::Floating(_)));

        let outcome = ctl.on_key_down(key("Escape"), &surface, &mut store);
        assert_eq!(outcome, KeyOutcome::Default);
        assert_eq!(ctl.menu(), OpenMenu::None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_escape_closes_format_toolbar() {
        let (mut store, surface, mut ctl) = with_toolbar("some text");

        ctl.on_key_down(key("Escape"), &surface, &mut store);
        assert_eq!(ctl.menu(), OpenMenu::None);
        assert_eq!(store.blocks()[0].content, "some text");
    }

    #[test]
    fn test_blur_into_floating_menu_keeps_it_open() {
        let (mut store, ids) = setup(&[""]);
        let surface = FakeSurface::with_text("");
        let mut ctl = BlockInteraction::new(ids[0].clone(), "");
        ctl.on_focus(&surface, &mut store);

        ctl.on_blur(true);
        assert!(matches!(ctl.menu(), OpenMenu::Floating(_)));
        assert!(!ctl.has_focus());

        ctl.on_blur(false);
        assert_eq!(ctl.menu(), OpenMenu::None);
    }

    #[test]
    fn test_blur_leaves_slash_menu_alone() {
        let (mut store, ids) = setup(&[""]);
        let surface = FakeSurface::with_text("/");
        let mut ctl = BlockInteraction::new(ids[0].clone(), "");
        ctl.on_input(&surface, &mut store);
        ctl.on_blur(false);
        assert!(matches!(ctl.menu(), OpenMenu::Slash(_)));
    }

    #[test]
    fn test_floating_plus_escalates_to_slash_menu() {
        let (mut store, ids) = setup(&[""]);
        let surface = FakeSurface::with_text("");
        let mut ctl = BlockInteraction::new(ids[0].clone(), "");
        ctl.on_focus(&surface, &mut store);

        let outcome = ctl.on_menu_choice(MenuChoice::ShowSlashMenu, &surface, &mut store);

        assert_eq!(outcome, ChoiceOutcome::OpenSlashMenu);
        assert_eq!(ctl.menu(), OpenMenu::Slash(Point::new(100.0, 274.0)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_menu_choice_retypes_and_closes() {
        let (mut store, ids) = setup(&["/"]);
        let surface = FakeSurface::with_text("/");
        let mut ctl = BlockInteraction::new(ids[0].clone(), "/");
        ctl.on_input(&surface, &mut store);

        ctl.on_menu_choice(MenuChoice::block(BlockType::CheckList), &surface, &mut store);

        assert_eq!(ctl.menu(), OpenMenu::None);
        assert_eq!(store.blocks()[0].block_type, BlockType::CheckList);
        assert_eq!(store.pending_focus().map(|r| &r.block_id), Some(&ids[0]));
    }

    #[test]
    fn test_plus_button_anchors_below_block() {
        let (_, ids) = setup(&["x"]);
        let mut ctl = BlockInteraction::new(ids[0].clone(), "x");
        ctl.on_plus_button(Rect::new(10.0, 100.0, 300.0, 40.0), 5.0);
        assert_eq!(ctl.menu(), OpenMenu::Slash(Point::new(10.0, 155.0)));
    }

    #[test]
    fn test_format_block_shortcut_closes_toolbar() {
        let (mut store, ids) = setup(&["x"]);
        let mut surface = FakeSurface::with_text("x");
        surface.selection = Some(SelectionInfo {
            collapsed: false,
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
        });
        let mut ctl = BlockInteraction::new(ids[0].clone(), "x");
        ctl.on_mouse_up(&surface);

        ctl.on_format(FormatAction::Inline(InlineFormat::Italic), &mut store);
        assert!(matches!(ctl.menu(), OpenMenu::FormatToolbar(_)));

        ctl.on_format(FormatAction::Block(BlockType::Heading3), &mut store);
        assert_eq!(ctl.menu(), OpenMenu::None);
        assert_eq!(store.blocks()[0].block_type, BlockType::Heading3);
    }
}
