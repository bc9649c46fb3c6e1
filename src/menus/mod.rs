pub(crate) mod components;

use crate::game::module_allowed;
use crate::models::{BlockId, BlockType, Game};
use crate::state::EditorActions;

/// Pixel position of a menu's top-left corner in page coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What a menu entry does when picked.
///
/// `ShowSlashMenu` is a menu-only signal; it never reaches a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    ShowSlashMenu,
    Block {
        block_type: BlockType,
        module_type: Option<&'static str>,
    },
}

impl MenuChoice {
    pub const fn block(block_type: BlockType) -> Self {
        Self::Block {
            block_type,
            module_type: None,
        }
    }

    pub const fn with_module(block_type: BlockType, module_type: &'static str) -> Self {
        Self::Block {
            block_type,
            module_type: Some(module_type),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuGroup {
    Basic,
    Media,
    GameModules,
}

impl MenuGroup {
    pub fn label(self) -> &'static str {
        match self {
            MenuGroup::Basic => "Basic Blocks",
            MenuGroup::Media => "Media",
            MenuGroup::GameModules => "Game Modules",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub description: &'static str,
    /// Icon name resolved by the view layer.
    pub icon: &'static str,
    pub group: MenuGroup,
    pub choice: MenuChoice,
}

impl MenuItem {
    const fn new(
        label: &'static str,
        description: &'static str,
        icon: &'static str,
        group: MenuGroup,
        choice: MenuChoice,
    ) -> Self {
        Self {
            label,
            description,
            icon,
            group,
            choice,
        }
    }

    /// Stable key for keyed lists.
    pub fn key(&self) -> String {
        format!("{}:{}", self.group.label(), self.label)
    }

    pub fn module_type(&self) -> Option<&'static str> {
        match self.choice {
            MenuChoice::Block { module_type, .. } => module_type,
            MenuChoice::ShowSlashMenu => None,
        }
    }

    /// Case-insensitive substring match over label and description.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.label.to_lowercase().contains(&q) || self.description.to_lowercase().contains(&q)
    }
}

use MenuGroup::{Basic, GameModules, Media};

const SLASH_CATALOG: &[MenuItem] = &[
    MenuItem::new("Text", "Just start writing with plain text", "type", Basic, MenuChoice::block(BlockType::Paragraph)),
    MenuItem::new("Heading 1", "Big section heading", "heading-1", Basic, MenuChoice::block(BlockType::Heading1)),
    MenuItem::new("Heading 2", "Medium section heading", "heading-2", Basic, MenuChoice::block(BlockType::Heading2)),
    MenuItem::new("Heading 3", "Small section heading", "heading-3", Basic, MenuChoice::block(BlockType::Heading3)),
    MenuItem::new("Bullet List", "Create a simple bullet list", "list", Basic, MenuChoice::block(BlockType::BulletList)),
    MenuItem::new("Numbered List", "Create a numbered list", "list-ordered", Basic, MenuChoice::block(BlockType::OrderedList)),
    MenuItem::new("Check List", "Create a checklist", "check-square", Basic, MenuChoice::block(BlockType::CheckList)),
    MenuItem::new("Quote", "Insert a quotation or citation", "quote", Basic, MenuChoice::block(BlockType::Blockquote)),
    MenuItem::new("Code", "Add a code snippet", "code", Basic, MenuChoice::block(BlockType::Code)),
    MenuItem::new("Image", "Upload or embed an image", "image", Basic, MenuChoice::block(BlockType::Image)),
    MenuItem::new("Divider", "Insert a visual divider", "minus", Basic, MenuChoice::block(BlockType::Divider)),
    MenuItem::new("YouTube", "Embed a YouTube video", "youtube", Media, MenuChoice::with_module(BlockType::Video, "youtube")),
    MenuItem::new("Twitch", "Embed a Twitch stream", "twitch", Media, MenuChoice::with_module(BlockType::Video, "twitch")),
    MenuItem::new("Instagram", "Embed Instagram content", "instagram", Media, MenuChoice::with_module(BlockType::Video, "instagram")),
    MenuItem::new("TFT Team Comp Builder", "Insert TFT team builder module", "gamepad", GameModules, MenuChoice::with_module(BlockType::Module, "tft-builder")),
    MenuItem::new("LoL Champions Overview", "Insert League of Legends champion overview", "swords", GameModules, MenuChoice::with_module(BlockType::Module, "lol-champions")),
    MenuItem::new("LoL Items", "Insert League of Legends item list", "swords", GameModules, MenuChoice::with_module(BlockType::Module, "lol-items")),
    MenuItem::new("LoL Runes", "Insert League of Legends rune page", "swords", GameModules, MenuChoice::with_module(BlockType::Module, "lol-runes")),
    MenuItem::new("LoL Abilities", "Insert League of Legends champion abilities", "swords", GameModules, MenuChoice::with_module(BlockType::Module, "lol-abilities")),
    MenuItem::new("Valorant Agent Guide", "Insert Valorant agent guide module", "target", GameModules, MenuChoice::with_module(BlockType::Module, "valorant-agents")),
    MenuItem::new("Baldur's Gate Character Builder", "Insert BG3 character builder module", "dices", GameModules, MenuChoice::with_module(BlockType::Module, "bg3-builder")),
];

pub fn slash_catalog() -> &'static [MenuItem] {
    SLASH_CATALOG
}

/// Catalog entries visible for `query` under the selected game, in menu order.
pub fn filter_catalog(query: &str, game: Option<&Game>) -> Vec<MenuItem> {
    SLASH_CATALOG
        .iter()
        .filter(|item| item.matches(query))
        .filter(|item| match (item.group, item.module_type()) {
            (GameModules, Some(mt)) => module_allowed(game, mt),
            _ => true,
        })
        .copied()
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlashKeyOutcome {
    /// Key isn't ours; let it through.
    Ignored,
    Moved,
    Commit(MenuChoice),
    Close,
}

/// Live state of an open slash menu.
#[derive(Clone, Debug, PartialEq)]
pub struct SlashMenuState {
    query: String,
    game: Option<Game>,
    items: Vec<MenuItem>,
    highlighted: usize,
}

impl SlashMenuState {
    pub fn new(game: Option<Game>) -> Self {
        let items = filter_catalog("", game.as_ref());
        Self {
            query: String::new(),
            game,
            items,
            highlighted: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn highlighted_item(&self) -> Option<&MenuItem> {
        self.items.get(self.highlighted)
    }

    pub fn set_query(&mut self, query: &str) {
        if self.query == query {
            return;
        }
        self.query = query.to_string();
        self.items = filter_catalog(query, self.game.as_ref());
        self.highlighted = 0;
    }

    pub fn set_game(&mut self, game: Option<Game>) {
        self.game = game;
        self.items = filter_catalog(&self.query, self.game.as_ref());
        self.highlighted = 0;
    }

    /// Visible items split by group, each with its index in the flat list.
    pub fn grouped(&self) -> Vec<(MenuGroup, Vec<(usize, MenuItem)>)> {
        let mut out: Vec<(MenuGroup, Vec<(usize, MenuItem)>)> = Vec::new();
        for (i, item) in self.items.iter().enumerate() {
            match out.last_mut() {
                Some((group, list)) if *group == item.group => list.push((i, *item)),
                _ => out.push((item.group, vec![(i, *item)])),
            }
        }
        out
    }

    pub fn move_down(&mut self) {
        if !self.items.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.items.len();
        }
    }

    pub fn move_up(&mut self) {
        let len = self.items.len();
        if len > 0 {
            self.highlighted = (self.highlighted + len - 1) % len;
        }
    }

    pub fn hover(&mut self, index: usize) {
        if index < self.items.len() {
            self.highlighted = index;
        }
    }

    pub fn commit(&self) -> Option<MenuChoice> {
        self.highlighted_item().map(|item| item.choice)
    }

    pub fn handle_key(&mut self, key: &str) -> SlashKeyOutcome {
        match key {
            "ArrowDown" => {
                self.move_down();
                SlashKeyOutcome::Moved
            }
            "ArrowUp" => {
                self.move_up();
                SlashKeyOutcome::Moved
            }
            "Enter" => match self.commit() {
                Some(choice) => SlashKeyOutcome::Commit(choice),
                None => SlashKeyOutcome::Ignored,
            },
            "Escape" => SlashKeyOutcome::Close,
            _ => SlashKeyOutcome::Ignored,
        }
    }
}

const FLOATING_QUICK_ITEMS: &[MenuItem] = &[
    MenuItem::new("Text", "", "type", Basic, MenuChoice::block(BlockType::Paragraph)),
    MenuItem::new("Heading 1", "", "heading-1", Basic, MenuChoice::block(BlockType::Heading1)),
    MenuItem::new("Heading 2", "", "heading-2", Basic, MenuChoice::block(BlockType::Heading2)),
    MenuItem::new("Bullet List", "", "list", Basic, MenuChoice::block(BlockType::BulletList)),
    MenuItem::new("Numbered List", "", "list-ordered", Basic, MenuChoice::block(BlockType::OrderedList)),
    MenuItem::new("Quote", "", "quote", Basic, MenuChoice::block(BlockType::Blockquote)),
    MenuItem::new("Code", "", "code", Basic, MenuChoice::block(BlockType::Code)),
    MenuItem::new("Image", "", "image", Basic, MenuChoice::block(BlockType::Image)),
    MenuItem::new("Video", "", "youtube", Media, MenuChoice::with_module(BlockType::Video, "youtube")),
    MenuItem::new("Game Module", "", "gamepad", GameModules, MenuChoice::with_module(BlockType::Module, "tft-builder")),
];

const FLOATING_EMPTY_LINE: &[MenuItem] = &[MenuItem::new(
    "Add content",
    "",
    "plus",
    Basic,
    MenuChoice::ShowSlashMenu,
)];

/// Entries of the floating menu. An empty line gets the single "+" that
/// escalates to the slash menu.
pub fn floating_items(empty_line: bool) -> &'static [MenuItem] {
    if empty_line {
        FLOATING_EMPTY_LINE
    } else {
        FLOATING_QUICK_ITEMS
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChoiceOutcome {
    /// Open the full slash menu at the same anchor.
    OpenSlashMenu,
    Inserted(BlockId),
    Retyped,
    /// The block vanished before the choice landed.
    Ignored,
}

/// Apply a menu pick to `block_id`.
///
/// Dividers, videos and modules always go in as a new block after the current
/// one; everything else converts the block in place and refocuses it.
pub fn resolve_choice<A: EditorActions + ?Sized>(
    actions: &mut A,
    block_id: &BlockId,
    choice: MenuChoice,
) -> ChoiceOutcome {
    match choice {
        MenuChoice::ShowSlashMenu => ChoiceOutcome::OpenSlashMenu,
        MenuChoice::Block {
            block_type,
            module_type,
        } if block_type.inserts_new_block() => {
            ChoiceOutcome::Inserted(actions.add_block(block_type, Some(block_id), module_type))
        }
        MenuChoice::Block {
            block_type,
            module_type,
        } => {
            if !actions.change_block_type(block_id, block_type, module_type) {
                return ChoiceOutcome::Ignored;
            }
            actions.request_focus(block_id);
            ChoiceOutcome::Retyped
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InlineFormat {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    Link,
}

impl InlineFormat {
    pub const ALL: [InlineFormat; 6] = [
        InlineFormat::Bold,
        InlineFormat::Italic,
        InlineFormat::Underline,
        InlineFormat::Strikethrough,
        InlineFormat::Code,
        InlineFormat::Link,
    ];

    pub fn tooltip(self) -> &'static str {
        match self {
            InlineFormat::Bold => "Bold (Ctrl+B)",
            InlineFormat::Italic => "Italic (Ctrl+I)",
            InlineFormat::Underline => "Underline (Ctrl+U)",
            InlineFormat::Strikethrough => "Strikethrough",
            InlineFormat::Code => "Code (Ctrl+E)",
            InlineFormat::Link => "Insert Link (Ctrl+K)",
        }
    }

    /// `document.execCommand` name. Code and link need a value and are
    /// handled by the view.
    pub fn command(self) -> &'static str {
        match self {
            InlineFormat::Bold => "bold",
            InlineFormat::Italic => "italic",
            InlineFormat::Underline => "underline",
            InlineFormat::Strikethrough => "strikeThrough",
            InlineFormat::Code => "insertHTML",
            InlineFormat::Link => "createLink",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    pub const ALL: [Alignment; 4] = [
        Alignment::Left,
        Alignment::Center,
        Alignment::Right,
        Alignment::Justify,
    ];

    pub fn tooltip(self) -> &'static str {
        match self {
            Alignment::Left => "Align Left",
            Alignment::Center => "Align Center",
            Alignment::Right => "Align Right",
            Alignment::Justify => "Justify",
        }
    }

    pub fn command(self) -> &'static str {
        match self {
            Alignment::Left => "justifyLeft",
            Alignment::Center => "justifyCenter",
            Alignment::Right => "justifyRight",
            Alignment::Justify => "justifyFull",
        }
    }
}

/// Block conversions offered on the format toolbar.
pub const TOOLBAR_BLOCK_SHORTCUTS: [(BlockType, &str); 6] = [
    (BlockType::Heading1, "Heading 1"),
    (BlockType::Heading2, "Heading 2"),
    (BlockType::Heading3, "Heading 3"),
    (BlockType::BulletList, "Bullet List"),
    (BlockType::OrderedList, "Numbered List"),
    (BlockType::Blockquote, "Quote"),
];

/// The toolbar floats this far above the selection's top edge.
pub const TOOLBAR_OFFSET_Y: f64 = 45.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatAction {
    Inline(InlineFormat),
    Align(Alignment),
    Block(BlockType),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolbarOutcome {
    /// Run the command on the live selection; the toolbar stays.
    ExecCommand(&'static str),
    Close,
}

/// Toolbar position for a selection anchor.
pub fn toolbar_position(anchor: Point) -> Point {
    Point::new(anchor.x, anchor.y - TOOLBAR_OFFSET_Y)
}

/// Apply a toolbar action. Block shortcuts go through the store; inline and
/// alignment formats never touch it.
pub fn apply_format<A: EditorActions + ?Sized>(
    actions: &mut A,
    block_id: &BlockId,
    action: FormatAction,
) -> ToolbarOutcome {
    match action {
        FormatAction::Inline(f) => ToolbarOutcome::ExecCommand(f.command()),
        FormatAction::Align(a) => ToolbarOutcome::ExecCommand(a.command()),
        FormatAction::Block(t) => {
            actions.change_block_type(block_id, t, None);
            ToolbarOutcome::Close
        }
    }
}
