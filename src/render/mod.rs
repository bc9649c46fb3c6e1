use crate::models::{Block, BlockType};

/// How a block is drawn. Unknown module kinds still get `Module`; the widget
/// layer decides what to show for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderKind {
    Text,
    CheckList,
    Divider,
    Video,
    Module,
}

pub fn render_kind(block_type: BlockType) -> RenderKind {
    match block_type {
        BlockType::CheckList => RenderKind::CheckList,
        BlockType::Divider => RenderKind::Divider,
        BlockType::Video => RenderKind::Video,
        BlockType::Module => RenderKind::Module,
        _ => RenderKind::Text,
    }
}

/// Wrapper classes for a block inside the editor.
pub fn editor_class(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Heading1 => "text-3xl font-bold",
        BlockType::Heading2 => "text-2xl font-bold",
        BlockType::Heading3 => "text-xl font-bold",
        BlockType::BulletList => "list-disc ml-6",
        BlockType::OrderedList => "list-decimal ml-6",
        BlockType::Blockquote => "pl-4 border-l-2 border-primary/50 italic",
        BlockType::Code => "font-mono bg-secondary p-4 rounded",
        _ => "",
    }
}

/// Classes for the read-only preview.
pub fn preview_class(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Heading1 => "text-4xl font-bold mb-6 mt-8",
        BlockType::Heading2 => "text-3xl font-bold mb-4 mt-6",
        BlockType::Heading3 => "text-2xl font-bold mb-3 mt-5",
        BlockType::Paragraph => "text-lg mb-4 leading-relaxed",
        BlockType::BulletList => "list-disc ml-6 mb-4",
        BlockType::OrderedList => "list-decimal ml-6 mb-4",
        BlockType::Blockquote => "border-l-4 border-primary pl-4 italic my-4",
        BlockType::Code => "bg-muted p-4 rounded-md my-4 overflow-x-auto",
        BlockType::Divider => "my-8 border-border",
        _ => "mb-4",
    }
}

/// Hint shown in an empty editable region.
pub fn placeholder(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Heading1 => "Heading 1",
        BlockType::Heading2 => "Heading 2",
        BlockType::Heading3 => "Heading 3",
        BlockType::BulletList | BlockType::OrderedList => "List item",
        BlockType::CheckList => "To-do",
        BlockType::Blockquote => "Quote",
        BlockType::Code => "Code",
        BlockType::Image => "Paste an image URL",
        _ => "Type '/' for commands",
    }
}

/// Icon name for the block-type badge in the hover controls.
pub fn block_icon(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Heading1 => "heading-1",
        BlockType::Heading2 => "heading-2",
        BlockType::Heading3 => "heading-3",
        BlockType::BulletList => "list",
        BlockType::OrderedList => "list-ordered",
        BlockType::CheckList => "check-square",
        BlockType::Blockquote => "quote",
        BlockType::Code => "code",
        _ => "type",
    }
}

/// Human name of a module or embed kind.
pub fn module_title(module_type: Option<&str>) -> &'static str {
    match module_type {
        Some("tft-builder") => "TFT Team Comp Builder",
        Some("lol-champions") => "LoL Champions Overview",
        Some("lol-items") => "LoL Items",
        Some("lol-runes") => "LoL Runes",
        Some("lol-abilities") => "LoL Abilities",
        Some("valorant-agents") => "Valorant Agents Guide",
        Some("bg3-builder") => "Baldur's Gate Character Builder",
        Some("youtube") => "YouTube Video Embed",
        Some("twitch") => "Twitch Stream Embed",
        Some("instagram") => "Instagram Post Embed",
        _ => "Unknown module type",
    }
}

pub fn youtube_embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", urlencoding::encode(video_id))
}

pub(crate) const IMAGE_PLACEHOLDER: &str = "https://placehold.co/600x400?text=Image";

/// Image blocks keep their URL as content.
pub fn image_src(block: &Block) -> String {
    let src = crate::util::strip_tags(&block.content);
    let src = src.trim();
    if src.is_empty() {
        IMAGE_PLACEHOLDER.to_string()
    } else {
        src.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_render_kind_dispatch() {
        assert_eq!(render_kind(BlockType::Paragraph), RenderKind::Text);
        assert_eq!(render_kind(BlockType::Image), RenderKind::Text);
        assert_eq!(render_kind(BlockType::CheckList), RenderKind::CheckList);
        assert_eq!(render_kind(BlockType::Module), RenderKind::Module);
        assert_eq!(render_kind(BlockType::Video), RenderKind::Video);
        assert_eq!(render_kind(BlockType::Divider), RenderKind::Divider);
    }

    #[test]
    fn test_text_kinds_are_exactly_the_editable_types() {
        for t in BlockType::iter() {
            let editable = matches!(render_kind(t), RenderKind::Text | RenderKind::CheckList);
            assert_eq!(editable, t.is_text(), "{t:?}");
        }
    }

    #[test]
    fn test_editor_classes() {
        assert_eq!(editor_class(BlockType::Heading1), "text-3xl font-bold");
        assert_eq!(editor_class(BlockType::Code), "font-mono bg-secondary p-4 rounded");
        assert_eq!(editor_class(BlockType::Paragraph), "");
    }

    #[test]
    fn test_module_titles() {
        assert_eq!(module_title(Some("lol-items")), "LoL Items");
        assert_eq!(module_title(Some("mystery")), "Unknown module type");
        assert_eq!(module_title(None), "Unknown module type");
    }

    #[test]
    fn test_image_src_falls_back_to_placeholder() {
        let mut b = Block::text(BlockType::Image, "  ");
        assert_eq!(image_src(&b), IMAGE_PLACEHOLDER);
        b.content = "https://img.example/a.png".to_string();
        assert_eq!(image_src(&b), "https://img.example/a.png");
    }

    #[test]
    fn test_youtube_embed_url() {
        assert_eq!(
            youtube_embed_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
    }
}
