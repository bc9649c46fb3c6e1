use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-lg border px-4 py-3 text-sm"}
    // Refused picks, failed fetches, failed preview handoff.
    clx! {AlertError, div, "relative w-full rounded-lg border border-destructive/30 px-4 py-3 text-sm [&_h4]:text-destructive"}
    clx! {AlertTitle, h4, "mb-1 font-medium tracking-tight leading-none"}
    clx! {AlertDescription, p, "text-xs [&_p]:leading-relaxed"}
}

pub use components::*;
