use crate::api::DataDragonClient;
use crate::cache::CatalogService;
use crate::pages::{EditorPage, PreviewPage};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));
    provide_context(CatalogService::new(DataDragonClient::from_env()));

    // Router hooks (`use_navigate`) require a <Router> context.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("preview") view=PreviewPage />
                <Route path=path!("") view=EditorPage />
            </Routes>
        </Router>
    }
}
