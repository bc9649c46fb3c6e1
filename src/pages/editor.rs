use crate::components::ui::{
    Alert, AlertDescription, AlertError, AlertTitle, Button, ButtonVariant, Card, CardContent,
};
use crate::editor::BlockEditor;
use crate::game::{available_games, find_game};
use crate::menus::components::MenuIcon;
use crate::models::BlockType;
use crate::preview::save_preview;
use crate::state::{AppContext, EditorActions, EditorHandle, EditorStore};
use icons::{Eye, CirclePlus, Save};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const SAVED_NOTICE_MS: i32 = 3000;

fn after_ms(ms: i32, f: impl FnOnce() + 'static) {
    let cb = Closure::once_into_js(f);
    let _ = window().set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.as_ref().unchecked_ref(),
        ms,
    );
}

/// Optional game picker. The choice drives the slash menu's module group.
#[component]
pub fn GameSelector() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let selected_game = app_state.0.selected_game;

    let on_change = move |ev: leptos::ev::Event| {
        let id = event_target_value(&ev);
        app_state.0.select_game(find_game(&id));
    };

    view! {
        <div class="flex items-center gap-2">
            <span class="text-sm text-muted-foreground">"Game:"</span>
            {move || {
                selected_game
                    .get()
                    .map(|g| view! { <MenuIcon name=g.icon /> })
            }}
            <select
                class="h-9 w-[180px] rounded-md border border-input bg-background px-2 text-sm"
                on:change=on_change
                prop:value=move || selected_game.get().map(|g| g.id).unwrap_or_default()
            >
                <option value="">"Optional: Select game"</option>
                {available_games()
                    .into_iter()
                    .map(|g| view! { <option value=g.id.clone()>{g.name.clone()}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}

#[component]
pub fn EditorPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let handle = EditorHandle::new(EditorStore::new());
    let navigate = StoredValue::new(use_navigate());

    let saved: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let on_add_block = move |_| {
        let mut h = handle;
        let last = h.snapshot(None).blocks.last().map(|b| b.id.clone());
        h.add_block(BlockType::Paragraph, last.as_ref(), None);
    };

    let on_save = move |_| {
        let blocks = handle.snapshot(None).blocks;
        tracing::info!(
            blocks = blocks.len(),
            document = %serde_json::to_string(&blocks).unwrap_or_default(),
            "saving editor content"
        );
        saved.set(true);
        after_ms(SAVED_NOTICE_MS, move || {
            let _ = saved.try_set(false);
        });
    };

    let on_preview = move |_| {
        let content = handle.snapshot(app_state.0.selected_game.get_untracked());
        match save_preview(&content) {
            Ok(()) => {
                tracing::info!(blocks = content.blocks.len(), "preview handoff");
                error.set(None);
                navigate.with_value(|nav| nav("/preview", Default::default()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "preview handoff failed");
                error.set(Some(e.to_string()));
            }
        }
    };

    view! {
        <div class="min-h-screen bg-background">
            <header class="border-b border-border py-6 bg-gradient-to-r from-primary/10 to-primary/5">
                <div class="mx-auto w-full max-w-5xl px-4 flex items-center justify-between gap-4">
                    <div class="space-y-1">
                        <h1 class="text-3xl font-bold">"TextCraft Modulator"</h1>
                        <p class="text-muted-foreground">
                            "A modern, extensible text editor with modular capabilities for multiple games"
                        </p>
                    </div>
                    <GameSelector />
                </div>
            </header>

            <main class="mx-auto w-full max-w-5xl py-8 px-4">
                <div class="w-full max-w-4xl mx-auto">
                    <div class="mb-4 flex items-center justify-between">
                        <h2 class="text-xl font-bold">"Document Editor"</h2>
                        <div class="flex gap-2">
                            <Button variant=ButtonVariant::Outline on:click=on_add_block>
                                <span class="inline-flex items-center gap-1">
                                    <CirclePlus class="size-4" />
                                    "Add Block"
                                </span>
                            </Button>
                            <Button variant=ButtonVariant::Outline on:click=on_preview>
                                <span class="inline-flex items-center gap-1">
                                    <Eye class="size-4" />
                                    "Preview"
                                </span>
                            </Button>
                            <Button on:click=on_save>
                                <span class="inline-flex items-center gap-1">
                                    <Save class="size-4" />
                                    "Save"
                                </span>
                            </Button>
                        </div>
                    </div>

                    <Show when=move || saved.get() fallback=|| ().into_view()>
                        <Alert class="mb-4">
                            <AlertTitle>"Content saved"</AlertTitle>
                            <AlertDescription>
                                "Your document has been saved successfully."
                            </AlertDescription>
                        </Alert>
                    </Show>

                    {move || {
                        error
                            .get()
                            .map(|e| {
                                view! {
                                    <AlertError class="mb-4">
                                        <AlertDescription>
                                            {e}
                                        </AlertDescription>
                                    </AlertError>
                                }
                            })
                    }}

                    <Card class="border border-border bg-card shadow-sm">
                        <CardContent class="p-6">
                            <BlockEditor handle=handle />
                        </CardContent>
                    </Card>
                </div>
            </main>

            <footer class="border-t border-border py-6 mt-10 bg-muted/20">
                <div class="mx-auto w-full max-w-5xl px-4 text-center text-muted-foreground text-sm">
                    <p>"TextCraft Modulator"</p>
                </div>
            </footer>
        </div>
    }
}
