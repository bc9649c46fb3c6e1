use super::{
    floating_items, Alignment, FormatAction, InlineFormat, MenuChoice, MenuItem, Point,
    SlashKeyOutcome, SlashMenuState, TOOLBAR_BLOCK_SHORTCUTS,
};
use crate::components::ui::Input;
use crate::models::{BlockType, Game};
use icons::{
    AlignCenter, AlignJustify, AlignLeft, AlignRight, Bold, Code, Crown, Dices, Gamepad2,
    Heading1, Heading2, Heading3, Image, Instagram, Italic, Link, List, ListOrdered, Minus, Plus,
    Quote, SquareCheck, Strikethrough, Swords, Target, Twitch, Type, Underline, Youtube,
};
use leptos::ev;
use leptos::html;
use leptos::portal::Portal;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;
use wasm_bindgen::JsCast;

/// Lucide icon for a menu or block-type icon name.
#[component]
pub fn MenuIcon(#[prop(into)] name: String) -> impl IntoView {
    let class = "size-4 shrink-0";
    match name.as_str() {
        "heading-1" => view! { <Heading1 class=class /> }.into_any(),
        "heading-2" => view! { <Heading2 class=class /> }.into_any(),
        "heading-3" => view! { <Heading3 class=class /> }.into_any(),
        "list" => view! { <List class=class /> }.into_any(),
        "list-ordered" => view! { <ListOrdered class=class /> }.into_any(),
        "check-square" => view! { <SquareCheck class=class /> }.into_any(),
        "quote" => view! { <Quote class=class /> }.into_any(),
        "code" => view! { <Code class=class /> }.into_any(),
        "image" => view! { <Image class=class /> }.into_any(),
        "minus" => view! { <Minus class=class /> }.into_any(),
        "youtube" => view! { <Youtube class=class /> }.into_any(),
        "twitch" => view! { <Twitch class=class /> }.into_any(),
        "instagram" => view! { <Instagram class=class /> }.into_any(),
        "gamepad" => view! { <Gamepad2 class=class /> }.into_any(),
        "swords" => view! { <Swords class=class /> }.into_any(),
        "target" => view! { <Target class=class /> }.into_any(),
        "dices" => view! { <Dices class=class /> }.into_any(),
        "chess" => view! { <Crown class=class /> }.into_any(),
        "plus" => view! { <Plus class=class /> }.into_any(),
        _ => view! { <Type class=class /> }.into_any(),
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Run a toolbar command against the live selection.
///
/// Links prompt for a URL; inline code wraps the selected text.
pub(crate) fn exec_format_command(action: FormatAction, command: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(doc) = window
        .document()
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
    else {
        return;
    };

    let value = match action {
        FormatAction::Inline(InlineFormat::Link) => {
            match window.prompt_with_message("Enter URL") {
                Ok(Some(url)) if !url.trim().is_empty() => Some(url),
                _ => return,
            }
        }
        FormatAction::Inline(InlineFormat::Code) => {
            let text = window
                .get_selection()
                .ok()
                .flatten()
                .map(|s| String::from(s.to_string()))
                .unwrap_or_default();
            if text.is_empty() {
                return;
            }
            Some(format!("<code>{}</code>", escape_html(&text)))
        }
        _ => None,
    };

    let ran = match value {
        Some(v) => doc.exec_command_with_show_ui_and_value(command, false, &v),
        None => doc.exec_command(command),
    };
    if ran.is_err() {
        tracing::debug!(command, "execCommand rejected");
    }
}

fn inside(node_ref: NodeRef<html::Div>, ev: &web_sys::Event) -> bool {
    let target = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Node>().ok());
    match (node_ref.get_untracked(), target) {
        (Some(menu), Some(target)) => menu.contains(Some(&target)),
        _ => false,
    }
}

#[component]
fn SlashMenuRow(
    index: usize,
    item: MenuItem,
    state: RwSignal<SlashMenuState>,
    on_select: Callback<MenuChoice>,
) -> impl IntoView {
    let active = move || state.with(|s| s.highlighted() == index);
    view! {
        <div
            class=move || {
                if active() {
                    "flex items-center gap-2 px-3 py-2 text-sm cursor-pointer rounded-sm bg-accent"
                } else {
                    "flex items-center gap-2 px-3 py-2 text-sm cursor-pointer rounded-sm"
                }
            }
            on:mouseenter=move |_| state.update(|s| s.hover(index))
            on:mousedown=move |ev: web_sys::MouseEvent| ev.prevent_default()
            on:click=move |_| on_select.run(item.choice)
        >
            <div class="flex items-center justify-center w-8 h-8 rounded bg-secondary">
                <MenuIcon name=item.icon />
            </div>
            <div class="flex flex-col">
                <span class="font-medium">{item.label}</span>
                <span class="text-xs text-muted-foreground">{item.description}</span>
            </div>
        </div>
    }
}

/// The "/" command palette.
///
/// The search box takes focus on open. Arrow keys, Enter and Escape are read
/// from a window listener so they work wherever the caret is. `on_close`
/// receives `true` when dismissed with Escape, `false` on click-outside.
#[component]
pub fn SlashMenu(
    at: Point,
    game: Option<Game>,
    on_select: Callback<MenuChoice>,
    on_close: Callback<bool>,
) -> impl IntoView {
    let state = RwSignal::new(SlashMenuState::new(game));
    let query: RwSignal<String> = RwSignal::new(String::new());
    let menu_ref: NodeRef<html::Div> = NodeRef::new();
    let search_ref: NodeRef<html::Input> = NodeRef::new();

    Effect::new(move |_| {
        let q = query.get();
        state.update(|s| s.set_query(&q));
    });

    // Runs again once the portal has mounted the input.
    Effect::new(move |_| {
        if let Some(input) = search_ref.get() {
            if input.focus().is_err() {
                tracing::debug!("slash menu search box refused focus");
            }
        }
    });

    let key_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        let key = ev.key();
        if !matches!(key.as_str(), "ArrowDown" | "ArrowUp" | "Enter" | "Escape") {
            return;
        }
        let Some(outcome) = state.try_update(|s| s.handle_key(&key)) else {
            return;
        };
        match outcome {
            SlashKeyOutcome::Ignored => {}
            SlashKeyOutcome::Moved => ev.prevent_default(),
            SlashKeyOutcome::Commit(choice) => {
                ev.prevent_default();
                on_select.run(choice);
            }
            SlashKeyOutcome::Close => {
                ev.prevent_default();
                on_close.run(true);
            }
        }
    });
    let click_handle = window_event_listener(ev::mousedown, move |ev: web_sys::MouseEvent| {
        if !inside(menu_ref, &ev) {
            on_close.run(false);
        }
    });
    on_cleanup(move || {
        key_handle.remove();
        click_handle.remove();
    });

    let style = format!("left: {}px; top: {}px;", at.x, at.y);

    view! {
        <Portal>
            <div
                node_ref=menu_ref
                class="slash-menu absolute z-50 w-72 rounded-md border bg-popover text-popover-foreground shadow-md"
                style=style.clone()
            >
                <div class="p-2 border-b">
                    <Input
                        bind_value=query
                        placeholder="Search for blocks..."
                        class="h-8"
                        node_ref=search_ref
                    />
                </div>
                <div class="max-h-[320px] overflow-y-auto p-1">
                    {move || {
                        let groups = state.with(|s| s.grouped());
                        if groups.is_empty() {
                            return view! {
                                <p class="py-6 text-center text-sm text-muted-foreground">"No results found."</p>
                            }
                                .into_any();
                        }
                        groups
                            .into_iter()
                            .map(|(group, rows)| {
                                view! {
                                    <div class="py-1">
                                        <div class="px-2 py-1.5 text-xs font-medium text-muted-foreground">
                                            {group.label()}
                                        </div>
                                        {rows
                                            .into_iter()
                                            .map(|(index, item)| {
                                                view! {
                                                    <SlashMenuRow
                                                        index=index
                                                        item=item
                                                        state=state
                                                        on_select=on_select
                                                    />
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </div>
            </div>
        </Portal>
    }
}

/// Quick-insert strip shown next to a focused block.
#[component]
pub fn FloatingMenu(at: Point, empty_line: bool, on_select: Callback<MenuChoice>) -> impl IntoView {
    let style = format!("left: {}px; top: {}px;", at.x, at.y);
    let items = floating_items(empty_line);

    view! {
        <Portal>
            <div
                class="floating-menu fixed z-40 flex items-center gap-1 rounded-md border bg-popover p-1 shadow-md"
                style=style.clone()
                on:mousedown=move |ev: web_sys::MouseEvent| ev.prevent_default()
            >
                {items
                    .iter()
                    .map(|item| {
                        let choice = item.choice;
                        view! {
                            <button
                                class="flex items-center gap-1 rounded px-2 py-1 text-xs hover:bg-accent"
                                title=item.label
                                on:click=move |_| on_select.run(choice)
                            >
                                <MenuIcon name=item.icon />
                                {empty_line.then_some(item.label)}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </Portal>
    }
}

fn inline_icon(f: InlineFormat) -> AnyView {
    let class = "size-4";
    match f {
        InlineFormat::Bold => view! { <Bold class=class /> }.into_any(),
        InlineFormat::Italic => view! { <Italic class=class /> }.into_any(),
        InlineFormat::Underline => view! { <Underline class=class /> }.into_any(),
        InlineFormat::Strikethrough => view! { <Strikethrough class=class /> }.into_any(),
        InlineFormat::Code => view! { <Code class=class /> }.into_any(),
        InlineFormat::Link => view! { <Link class=class /> }.into_any(),
    }
}

fn align_icon(a: Alignment) -> AnyView {
    let class = "size-4";
    match a {
        Alignment::Left => view! { <AlignLeft class=class /> }.into_any(),
        Alignment::Center => view! { <AlignCenter class=class /> }.into_any(),
        Alignment::Right => view! { <AlignRight class=class /> }.into_any(),
        Alignment::Justify => view! { <AlignJustify class=class /> }.into_any(),
    }
}

fn shortcut_icon(t: BlockType) -> &'static str {
    crate::render::block_icon(t)
}

const TOOL_BUTTON: &str = "inline-flex items-center justify-center h-8 w-8 rounded hover:bg-accent";
const TOOL_BUTTON_ACTIVE: &str =
    "inline-flex items-center justify-center h-8 w-8 rounded bg-accent text-accent-foreground";

/// Selection toolbar. Buttons swallow mousedown so the selection survives the
/// click; a mousedown anywhere else closes it.
#[component]
pub fn FormatToolbar(
    at: Point,
    active_type: Signal<Option<BlockType>>,
    on_action: Callback<FormatAction>,
    on_close: Callback<()>,
) -> impl IntoView {
    let style = format!("left: {}px; top: {}px;", at.x, at.y);
    let keep_selection = move |ev: web_sys::MouseEvent| ev.prevent_default();
    let toolbar_ref: NodeRef<html::Div> = NodeRef::new();

    let click_handle = window_event_listener(ev::mousedown, move |ev: web_sys::MouseEvent| {
        if !inside(toolbar_ref, &ev) {
            on_close.run(());
        }
    });
    on_cleanup(move || click_handle.remove());

    view! {
        <Portal>
            <div
                node_ref=toolbar_ref
                class="format-toolbar absolute z-50 -translate-x-1/2 flex items-center gap-0.5 rounded-md border bg-popover p-1 shadow-md"
                style=style.clone()
                on:mousedown=keep_selection
            >
                {InlineFormat::ALL
                    .into_iter()
                    .map(|f| {
                        view! {
                            <button
                                class=TOOL_BUTTON
                                title=f.tooltip()
                                on:click=move |_| on_action.run(FormatAction::Inline(f))
                            >
                                {inline_icon(f)}
                            </button>
                        }
                    })
                    .collect_view()}
                <div class="mx-1 h-6 w-px bg-border"></div>
                {Alignment::ALL
                    .into_iter()
                    .map(|a| {
                        view! {
                            <button
                                class=TOOL_BUTTON
                                title=a.tooltip()
                                on:click=move |_| on_action.run(FormatAction::Align(a))
                            >
                                {align_icon(a)}
                            </button>
                        }
                    })
                    .collect_view()}
                <div class="mx-1 h-6 w-px bg-border"></div>
                {TOOLBAR_BLOCK_SHORTCUTS
                    .into_iter()
                    .map(|(t, label)| {
                        view! {
                            <button
                                class=move || {
                                    if active_type.get() == Some(t) { TOOL_BUTTON_ACTIVE } else { TOOL_BUTTON }
                                }
                                title=label
                                on:click=move |_| on_action.run(FormatAction::Block(t))
                            >
                                <MenuIcon name=shortcut_icon(t) />
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </Portal>
    }
}
