use super::components::WidgetData;
use super::YoutubeData;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input, Label};
use crate::render::youtube_embed_url;
use crate::util::youtube_video_id;
use leptos::prelude::*;

/// YouTube embed editor: paste a URL or id, optionally title it.
#[component]
pub(crate) fn YoutubeEmbed(widget: WidgetData) -> impl IntoView {
    let current = Memo::new(move |_| widget.read::<YoutubeData>());

    let url_input: RwSignal<String> = RwSignal::new(String::new());
    let title_input: RwSignal<String> = RwSignal::new(current.get_untracked().title);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let on_embed = move |_| match youtube_video_id(&url_input.get_untracked()) {
        Some(video_id) => {
            error.set(None);
            let title = title_input.get_untracked();
            widget.update(|v: &mut YoutubeData| {
                v.video_id = video_id;
                v.title = title;
            });
            url_input.set(String::new());
        }
        None => error.set(Some("Not a YouTube link or video id".to_string())),
    };

    let on_clear = move |_| {
        widget.update(|v: &mut YoutubeData| v.video_id.clear());
    };

    view! {
        <div class="youtube-module rounded-lg border border-border bg-card p-4 flex flex-col gap-3">
            <Show
                when=move || !current.get().video_id.is_empty()
                fallback=move || {
                    view! {
                        <div class="flex flex-col gap-2">
                            <Label class="text-xs">"YouTube URL or video id"</Label>
                            <div class="flex gap-2">
                                <Input
                                    bind_value=url_input
                                    placeholder="https://www.youtube.com/watch?v=..."
                                />
                                <Button size=ButtonSize::Sm on:click=on_embed>
                                    "Embed"
                                </Button>
                            </div>
                            {move || {
                                error
                                    .get()
                                    .map(|e| view! { <p class="text-xs text-destructive">{e}</p> })
                            }}
                        </div>
                    }
                }
            >
                <div class="aspect-video w-full">
                    <iframe
                        class="w-full h-full rounded-md"
                        src=move || youtube_embed_url(&current.get().video_id)
                        title=move || current.get().title
                        allowfullscreen=true
                    ></iframe>
                </div>
                <div class="flex justify-end">
                    <Button variant=ButtonVariant::Ghost size=ButtonSize::Sm on:click=on_clear>
                        "Change video"
                    </Button>
                </div>
            </Show>
            <div class="flex flex-col gap-1.5">
                <Label class="text-xs">"Title"</Label>
                <Input
                    bind_value=title_input
                    placeholder="Optional caption"
                    on_commit=Callback::new(move |title: String| {
                        widget.update(|v: &mut YoutubeData| v.title = title);
                    })
                />
            </div>
        </div>
    }
}
