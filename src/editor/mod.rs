pub mod drag;
pub mod interaction;
pub mod surface;

use crate::menus::components::{exec_format_command, FloatingMenu, FormatToolbar, MenuIcon, SlashMenu};
use crate::menus::{toolbar_position, ChoiceOutcome, FormatAction, MenuChoice, ToolbarOutcome};
use crate::models::{BlockId, BlockType};
use crate::modules::{ModuleBlock, VideoBlock};
use crate::render::{block_icon, editor_class, placeholder, render_kind, RenderKind};
use crate::state::{AppContext, EditorActions, EditorHandle};
use drag::DragState;
use icons::{ArrowDown, ArrowUp, Check, GripVertical, Plus, Trash2};
use interaction::{BlockInteraction, KeyInput, KeyOutcome, OpenMenu};
use leptos::html;
use leptos::prelude::*;
use surface::{DomSurface, Rect, TextSurface};
use wasm_bindgen::JsCast;

/// Keys the open slash menu consumes from its window listener. Its search box
/// normally has focus; these cover the case where the caret is back in the block.
const SLASH_MENU_KEYS: [&str; 4] = ["ArrowDown", "ArrowUp", "Enter", "Escape"];

/// Run `f` on a copy of the controller state and publish it only if it changed,
/// so keystrokes that don't move a menu don't re-render one.
fn drive<R>(interaction: RwSignal<BlockInteraction>, f: impl FnOnce(&mut BlockInteraction) -> R) -> R {
    let mut ix = interaction.get_untracked();
    let out = f(&mut ix);
    if interaction.with_untracked(|cur| *cur != ix) {
        interaction.set(ix);
    }
    out
}

/// Run on the next tick, after the current render has committed.
fn next_tick(f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        wasm_bindgen::closure::Closure::once_into_js(f)
            .as_ref()
            .unchecked_ref(),
        0,
    );
}

/// The document surface: one row per block, in store order.
#[component]
pub fn BlockEditor(handle: EditorHandle) -> impl IntoView {
    let drag: RwSignal<DragState> = RwSignal::new(DragState::default());

    // Deferred focus after create / retype / delete.
    Effect::new(move |_| {
        if handle.pending_focus().is_none() {
            return;
        }
        next_tick(move || {
            let Some(req) = handle.take_pending_focus() else {
                return;
            };
            match DomSurface::for_block(&req.block_id) {
                Some(surface) => surface.focus_at_end(),
                None => tracing::debug!(block = %req.block_id, "focus target has no editable region"),
            }
        });
    });

    let tail_index = move || handle.len();

    view! {
        <div class="editor-blocks flex flex-col">
            <For each=move || handle.block_ids() key=|id| id.clone() let:block_id>
                <EditorBlockView handle=handle block_id=block_id drag=drag />
            </For>
            <div
                class="h-8"
                on:dragover=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    let mut d = drag.get_untracked();
                    if d.drag_over(tail_index()) {
                        drag.set(d);
                    }
                }
                on:drop=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    let mut d = drag.get_untracked();
                    let mut h = handle;
                    d.drop(&mut h);
                    drag.set(d);
                }
            >
                <Show when=move || drag.with(|d| d.is_drop_target(tail_index()))>
                    <div class="h-0.5 w-full rounded bg-primary"></div>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn EditorBlockView(
    handle: EditorHandle,
    block_id: BlockId,
    drag: RwSignal<DragState>,
) -> impl IntoView {
    let selected_game = expect_context::<AppContext>().0.selected_game;
    let id_sv = StoredValue::new(block_id.clone());

    let index = Memo::new(move |_| id_sv.with_value(|id| handle.index_of(id)).unwrap_or(0));
    let block_type = Memo::new(move |_| {
        id_sv
            .with_value(|id| handle.block(id))
            .map(|b| b.block_type)
            .unwrap_or(BlockType::Paragraph)
    });
    let checked = Memo::new(move |_| {
        id_sv
            .with_value(|id| handle.block(id))
            .is_some_and(|b| b.checked)
    });

    let initial = handle
        .block_untracked(&block_id)
        .map(|b| b.content)
        .unwrap_or_default();
    let interaction = RwSignal::new(BlockInteraction::new(block_id, &initial));
    let menu = Memo::new(move |_| interaction.with(|i| i.menu()));
    let hovering: RwSignal<bool> = RwSignal::new(false);

    let row_ref: NodeRef<html::Div> = NodeRef::new();
    let editable_ref: NodeRef<html::Div> = NodeRef::new();

    // Text blocks answer through their editable region; the rest through the row.
    let surface = move || -> Option<DomSurface> {
        editable_ref
            .get_untracked()
            .filter(|el| el.is_connected())
            .map(|el| DomSurface::new(el.into()))
            .or_else(|| row_ref.get_untracked().map(|el| DomSurface::new(el.into())))
    };

    let on_focus = move |_: web_sys::FocusEvent| {
        let Some(s) = surface() else { return };
        let mut h = handle;
        drive(interaction, |ix| ix.on_focus(&s, &mut h));
    };
    let on_input = move |_: web_sys::Event| {
        let Some(s) = surface() else { return };
        let mut h = handle;
        drive(interaction, |ix| ix.on_input(&s, &mut h));
    };
    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let key = ev.key();
        let slash_open = matches!(interaction.with_untracked(|i| i.menu()), OpenMenu::Slash(_));
        if slash_open && SLASH_MENU_KEYS.contains(&key.as_str()) {
            return;
        }
        let Some(s) = surface() else { return };
        let mut h = handle;
        let input = KeyInput {
            key: &key,
            shift: ev.shift_key(),
        };
        if drive(interaction, |ix| ix.on_key_down(input, &s, &mut h)) == KeyOutcome::PreventDefault {
            ev.prevent_default();
        }
    };
    let on_mouseup = move |_: web_sys::MouseEvent| {
        let Some(s) = surface() else { return };
        drive(interaction, |ix| ix.on_mouse_up(&s));
    };
    let on_blur = move |ev: web_sys::FocusEvent| {
        let into_menu = ev
            .related_target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest(".floating-menu, .format-toolbar").ok().flatten())
            .is_some();
        drive(interaction, |ix| ix.on_blur(into_menu));
    };

    let on_menu_select = Callback::new(move |choice: MenuChoice| {
        let Some(s) = surface() else { return };
        let mut h = handle;
        let outcome = drive(interaction, |ix| ix.on_menu_choice(choice, &s, &mut h));
        if let ChoiceOutcome::Inserted(id) = outcome {
            tracing::debug!(block = %id, "inserted from menu");
        }
    });
    // Escape from the slash menu's search box hands focus back to the block.
    let on_menu_close = Callback::new(move |from_keyboard: bool| {
        drive(interaction, |ix| ix.close_menus());
        if from_keyboard {
            let mut h = handle;
            id_sv.with_value(|id| h.request_focus(id));
        }
    });
    let on_toolbar_close = Callback::new(move |_: ()| {
        drive(interaction, |ix| ix.close_toolbar());
    });
    let on_format = Callback::new(move |action: FormatAction| {
        let mut h = handle;
        if let ToolbarOutcome::ExecCommand(cmd) = drive(interaction, |ix| ix.on_format(action, &mut h)) {
            exec_format_command(action, cmd);
            // execCommand doesn't fire `input` on every browser.
            if let Some(s) = surface() {
                id_sv.with_value(|id| h.update_block_content(id, &s.html_content()));
            }
        }
    });
    let on_plus = move |_: web_sys::MouseEvent| {
        let Some(row) = row_ref.get_untracked() else { return };
        let rect: Rect = row.get_bounding_client_rect().into();
        let scroll_y = web_sys::window()
            .and_then(|w| w.scroll_y().ok())
            .unwrap_or(0.0);
        drive(interaction, |ix| ix.on_plus_button(rect, scroll_y));
    };

    let text_region = move |extra: &'static str| {
        let bt = block_type.get_untracked();
        let html = id_sv
            .with_value(|id| handle.block_untracked(id))
            .map(|b| b.content)
            .unwrap_or_default();
        let class = format!(
            "outline-none w-full min-h-[1.5em] empty:before:content-[attr(data-placeholder)] empty:before:text-muted-foreground {} {}",
            editor_class(bt),
            extra
        );
        view! {
            <div
                node_ref=editable_ref
                id=id_sv.with_value(|id| id.dom_id())
                class=class
                contenteditable="true"
                data-placeholder=placeholder(bt)
                inner_html=html
                on:focus=on_focus
                on:input=on_input
                on:keydown=on_keydown
                on:mouseup=on_mouseup
                on:blur=on_blur
            ></div>
        }
    };

    let body = move || match render_kind(block_type.get()) {
        RenderKind::Text => text_region("").into_any(),
        RenderKind::CheckList => {
            view! {
                <div class="flex items-start gap-2">
                    <button
                        class="mt-1 flex h-4 w-4 shrink-0 items-center justify-center rounded border border-primary"
                        title="Toggle"
                        on:click=move |_| {
                            id_sv.with_value(|id| handle.toggle_check_list_item(id));
                        }
                    >
                        <Show when=move || checked.get()>
                            <Check class="h-3 w-3" />
                        </Show>
                    </button>
                    {move || {
                        let done = if checked.get() { "line-through text-muted-foreground" } else { "" };
                        text_region(done)
                    }}
                </div>
            }
                .into_any()
        }
        RenderKind::Divider => view! { <hr class="my-4 border-border" /> }.into_any(),
        RenderKind::Video => {
            view! { <VideoBlock handle=handle block_id=id_sv.get_value() /> }.into_any()
        }
        RenderKind::Module => {
            view! { <ModuleBlock handle=handle block_id=id_sv.get_value() /> }.into_any()
        }
    };

    let menus = move || match menu.get() {
        OpenMenu::None => None,
        OpenMenu::Slash(at) => Some(
            view! {
                <SlashMenu
                    at=at
                    game=selected_game.get_untracked()
                    on_select=on_menu_select
                    on_close=on_menu_close
                />
            }
            .into_any(),
        ),
        OpenMenu::Floating(at) => Some(
            view! {
                <FloatingMenu
                    at=at
                    empty_line=interaction.with_untracked(|i| i.is_empty())
                    on_select=on_menu_select
                />
            }
            .into_any(),
        ),
        OpenMenu::FormatToolbar(at) => Some(
            view! {
                <FormatToolbar
                    at=toolbar_position(at)
                    active_type=Signal::derive(move || Some(block_type.get()))
                    on_action=on_format
                    on_close=on_toolbar_close
                />
            }
            .into_any(),
        ),
    };

    view! {
        <div>
            <Show when=move || drag.with(|d| d.is_drop_target(index.get()))>
                <div class="h-0.5 w-full rounded bg-primary"></div>
            </Show>
            <div
                node_ref=row_ref
                class=move || {
                    if drag.with(|d| d.is_dragging(index.get())) {
                        "group relative flex items-start gap-2 py-1 opacity-50"
                    } else {
                        "group relative flex items-start gap-2 py-1"
                    }
                }
                on:mouseenter=move |_| hovering.set(true)
                on:mouseleave=move |_| hovering.set(false)
                on:dragover=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    let mut d = drag.get_untracked();
                    if d.drag_over(index.get_untracked()) {
                        drag.set(d);
                    }
                }
                on:drop=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    let mut d = drag.get_untracked();
                    let mut h = handle;
                    d.drop(&mut h);
                    drag.set(d);
                }
            >
                <BlockControls
                    handle=handle
                    block_id=id_sv.get_value()
                    index=index
                    block_type=block_type
                    visible=hovering
                    drag=drag
                />
                <div class="flex-1 min-w-0">{body}</div>
                <button
                    class=move || {
                        if hovering.get() {
                            "mt-1 rounded p-0.5 text-muted-foreground hover:bg-accent"
                        } else {
                            "mt-1 rounded p-0.5 invisible"
                        }
                    }
                    title="Add content"
                    on:click=on_plus
                >
                    <Plus class="h-4 w-4" />
                </button>
            </div>
            {menus}
        </div>
    }
}

/// Hover controls on the left of a block.
#[component]
fn BlockControls(
    handle: EditorHandle,
    block_id: BlockId,
    index: Memo<usize>,
    block_type: Memo<BlockType>,
    visible: RwSignal<bool>,
    drag: RwSignal<DragState>,
) -> impl IntoView {
    let id_sv = StoredValue::new(block_id);
    let is_first = move || index.get() == 0;
    let is_last = move || index.get() + 1 >= handle.len();

    view! {
        <div class=move || {
            if visible.get() {
                "flex items-center gap-0.5 pt-1 text-muted-foreground"
            } else {
                "flex items-center gap-0.5 pt-1 invisible"
            }
        }>
            <div
                class="cursor-grab rounded p-0.5 hover:bg-accent"
                title="Drag to reorder"
                draggable="true"
                on:dragstart=move |ev: web_sys::DragEvent| {
                    if let Some(dt) = ev.data_transfer() {
                        dt.set_effect_allowed("move");
                        let _ = id_sv.with_value(|id| dt.set_data("text/plain", id.as_str()));
                    }
                    drag.update(|d| d.drag_start(index.get_untracked()));
                }
                on:dragend=move |_| drag.update(|d| d.drag_end())
            >
                <GripVertical class="h-4 w-4" />
            </div>
            <button
                class="rounded p-0.5 hover:bg-accent disabled:opacity-30"
                title="Move up"
                disabled=is_first
                on:click=move |_| {
                    id_sv.with_value(|id| handle.move_block_up(id));
                }
            >
                <ArrowUp class="h-4 w-4" />
            </button>
            <button
                class="rounded p-0.5 hover:bg-accent disabled:opacity-30"
                title="Move down"
                disabled=is_last
                on:click=move |_| {
                    id_sv.with_value(|id| handle.move_block_down(id));
                }
            >
                <ArrowDown class="h-4 w-4" />
            </button>
            <button
                class="rounded p-0.5 hover:bg-accent hover:text-destructive"
                title="Delete block"
                on:click=move |_| {
                    let mut h = handle;
                    id_sv.with_value(|id| h.delete_block(id));
                }
            >
                <Trash2 class="h-4 w-4" />
            </button>
            <span class="ml-1 rounded bg-secondary p-0.5" title=move || block_type.get().as_ref().to_string()>
                {move || view! { <MenuIcon name=block_icon(block_type.get()) /> }}
            </span>
        </div>
    }
}
