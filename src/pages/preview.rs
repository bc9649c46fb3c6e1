use crate::components::ui::{AlertDescription, AlertError, Button, ButtonVariant};
use crate::models::{Block, BlockType};
use crate::modules::YoutubeData;
use crate::preview::{load_preview, PreviewContent, SnapshotError};
use crate::render::{image_src, module_title, preview_class, youtube_embed_url};
use icons::{ArrowLeft, SquarePen};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

fn published_date() -> String {
    js_sys::Date::new_0()
        .to_locale_date_string("default", &wasm_bindgen::JsValue::UNDEFINED)
        .into()
}

fn render_block(block: Block) -> AnyView {
    let class = preview_class(block.block_type);
    match block.block_type {
        BlockType::Heading1 => view! { <h1 class=class inner_html=block.content></h1> }.into_any(),
        BlockType::Heading2 => view! { <h2 class=class inner_html=block.content></h2> }.into_any(),
        BlockType::Heading3 => view! { <h3 class=class inner_html=block.content></h3> }.into_any(),
        BlockType::BulletList => view! {
            <ul class=class>
                <li class="mb-2" inner_html=block.content></li>
            </ul>
        }
        .into_any(),
        BlockType::OrderedList => view! {
            <ol class=class>
                <li class="mb-2" inner_html=block.content></li>
            </ol>
        }
        .into_any(),
        BlockType::CheckList => {
            let box_class = if block.checked {
                "bg-primary border-primary"
            } else {
                "border-input"
            };
            view! {
                <div class="flex items-start mb-2">
                    <div class=format!(
                        "flex h-5 w-5 items-center justify-center rounded border mr-2 mt-1 {box_class}",
                    )>
                        {block.checked.then(|| view! { <span class="text-white text-xs">"✓"</span> })}
                    </div>
                    <span inner_html=block.content></span>
                </div>
            }
            .into_any()
        }
        BlockType::Blockquote => {
            view! { <blockquote class=class inner_html=block.content></blockquote> }.into_any()
        }
        BlockType::Code => view! {
            <pre class=class>
                <code inner_html=block.content></code>
            </pre>
        }
        .into_any(),
        BlockType::Divider => view! { <hr class=class /> }.into_any(),
        BlockType::Image => view! {
            <figure class="my-6">
                <img src=image_src(&block) alt="Content" class="max-w-full rounded-md" />
                <figcaption class="text-center text-sm text-muted-foreground mt-2">"Image"</figcaption>
            </figure>
        }
        .into_any(),
        BlockType::Video => {
            let kind = block.module_type.clone().unwrap_or_default();
            let data: YoutubeData = crate::modules::decode(block.module_data.as_ref());
            if kind == "youtube" && !data.video_id.is_empty() {
                let title = if data.title.is_empty() {
                    "YouTube video".to_string()
                } else {
                    data.title
                };
                view! {
                    <div class="my-6 aspect-video">
                        <iframe
                            class="w-full h-full rounded-md"
                            src=youtube_embed_url(&data.video_id)
                            title=title
                            allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                            allowfullscreen=true
                        ></iframe>
                    </div>
                }
                .into_any()
            } else {
                view! {
                    <div class="p-4 border border-dashed rounded-md my-4 text-center">
                        {format!("{kind} video placeholder")}
                    </div>
                }
                .into_any()
            }
        }
        BlockType::Module => {
            let title = module_title(block.module_type.as_deref());
            view! {
                <div class="p-6 border rounded-md my-6 bg-muted/30">
                    <div class="font-medium mb-2">{format!("{title} Module")}</div>
                    <p class="text-muted-foreground text-sm">"Module content would render here"</p>
                </div>
            }
            .into_any()
        }
        BlockType::Paragraph => view! { <p class=class inner_html=block.content></p> }.into_any(),
    }
}

#[component]
fn EmptyPreview(error: Option<String>) -> impl IntoView {
    let navigate = StoredValue::new(use_navigate());

    view! {
        <div class="min-h-screen bg-background flex items-center justify-center">
            <div class="text-center p-8 space-y-4">
                <h2 class="text-2xl font-bold">"No content to preview"</h2>
                <p class="text-muted-foreground">
                    "There is no content available for preview. Return to the editor to create content."
                </p>
                {error
                    .map(|e| {
                        view! {
                            <AlertError>
                                <AlertDescription>{e}</AlertDescription>
                            </AlertError>
                        }
                    })}
                <Button on:click=move |_| navigate.with_value(|nav| nav("/", Default::default()))>
                    <span class="inline-flex items-center gap-2">
                        <ArrowLeft class="size-4" />
                        "Return to Editor"
                    </span>
                </Button>
            </div>
        </div>
    }
}

#[component]
fn PreviewDocument(content: PreviewContent) -> impl IntoView {
    let navigate = StoredValue::new(use_navigate());
    let title = content.title();
    let header_class = format!(
        "py-6 {}",
        content
            .game
            .as_ref()
            .map(|g| g.color.as_str())
            .unwrap_or("bg-primary")
    );
    let game_name = content.game.as_ref().map(|g| g.name.clone());

    view! {
        <div class="min-h-screen bg-background">
            <header class=header_class>
                <div class="mx-auto w-full max-w-4xl px-4 flex justify-between items-center">
                    <div class="text-white">
                        <div class="flex items-center gap-2 mb-2">
                            {game_name
                                .map(|name| {
                                    view! {
                                        <span class="text-xs uppercase tracking-wide bg-white/20 px-2 py-0.5 rounded">
                                            {name}
                                        </span>
                                    }
                                })}
                            <span class="text-xs">{format!("Published: {}", published_date())}</span>
                        </div>
                        <h1 class="text-2xl sm:text-3xl font-bold">{title}</h1>
                    </div>
                    <Button
                        variant=ButtonVariant::Secondary
                        on:click=move |_| navigate.with_value(|nav| nav("/", Default::default()))
                    >
                        <span class="inline-flex items-center gap-1">
                            <SquarePen class="size-4" />
                            "Edit"
                        </span>
                    </Button>
                </div>
            </header>

            <main class="mx-auto w-full max-w-4xl py-12 px-4">
                <article class="prose lg:prose-xl max-w-none">
                    {content.blocks.into_iter().map(render_block).collect_view()}
                </article>
            </main>

            <footer class="border-t border-border py-6 mt-10">
                <div class="mx-auto w-full max-w-4xl px-4 text-center text-muted-foreground text-sm">
                    <p>"Content powered by TextCraft Modulator"</p>
                </div>
            </footer>
        </div>
    }
}

/// Read-only rendering of the last snapshot handed over by the editor.
#[component]
pub fn PreviewPage() -> impl IntoView {
    match load_preview() {
        Ok(content) => view! { <PreviewDocument content=content /> }.into_any(),
        Err(SnapshotError::Missing) => view! { <EmptyPreview error=None /> }.into_any(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to load preview content");
            view! { <EmptyPreview error=Some(e.to_string()) /> }.into_any()
        }
    }
}
