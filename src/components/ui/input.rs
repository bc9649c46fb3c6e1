use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

#[component]
pub fn Input(
    #[prop(into, optional)] class: String,

    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] id: String,
    #[prop(optional)] autofocus: bool,

    // Two-way binding, wired by hand rather than `bind:value`.
    #[prop(into)] bind_value: RwSignal<String>,

    /// Fired on `change` (blur or Enter) with the committed value.
    #[prop(optional)]
    on_commit: Option<Callback<String>>,

    /// Keyboard hook for inputs that drive a list (search boxes).
    #[prop(optional)]
    on_keydown: Option<Callback<web_sys::KeyboardEvent>>,

    #[prop(optional)] node_ref: NodeRef<html::Input>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "placeholder:text-muted-foreground selection:bg-primary selection:text-primary-foreground dark:bg-input/30 border-input flex h-9 w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-base shadow-xs transition-[color,box-shadow] outline-none disabled:pointer-events-none disabled:cursor-not-allowed disabled:opacity-50 md:text-sm",
        "focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2",
        class
    );

    let value_of = |ev: &web_sys::Event| {
        ev.target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .map(|input| input.value())
    };

    let on_input = move |ev: web_sys::Event| {
        if let Some(v) = value_of(&ev) {
            bind_value.set(v);
        }
    };

    let on_change = move |ev: web_sys::Event| {
        if let (Some(cb), Some(v)) = (on_commit, value_of(&ev)) {
            cb.run(v);
        }
    };

    view! {
        <input
            data-name="Input"
            type=r#type
            class=merged_class
            placeholder=placeholder
            id=id
            autofocus=autofocus
            prop:value=move || bind_value.get()
            on:input=on_input
            on:change=on_change
            on:keydown=move |ev: web_sys::KeyboardEvent| {
                if let Some(cb) = on_keydown {
                    cb.run(ev);
                }
            }
            node_ref=node_ref
        />
    }
}
