use super::lol::{LolChampionPicker, LolItemPicker, LolRunePicker};
use super::youtube::YoutubeEmbed;
use super::{decode, write_back};
use crate::models::{BlockId, ModuleData};
use crate::render::module_title;
use crate::state::EditorHandle;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A widget's window onto its block: tracked reads of the payload and the one
/// write path back into the store.
#[derive(Clone, Copy)]
pub(crate) struct WidgetData {
    handle: EditorHandle,
    block_id: StoredValue<BlockId>,
    data: Memo<Option<ModuleData>>,
}

impl WidgetData {
    pub fn new(handle: EditorHandle, block_id: BlockId) -> Self {
        let block_id = StoredValue::new(block_id);
        let data = Memo::new(move |_| {
            block_id
                .with_value(|id| handle.block(id))
                .and_then(|b| b.module_data)
        });
        Self {
            handle,
            block_id,
            data,
        }
    }

    /// Tracked typed read.
    pub fn read<T: DeserializeOwned + Default>(&self) -> T {
        self.data.with(|d| decode(d.as_ref()))
    }

    /// Edit the typed view and write it back if anything changed.
    pub fn update<T, R>(&self, f: impl FnOnce(&mut T) -> R) -> R
    where
        T: Serialize + DeserializeOwned + Default + PartialEq + Clone,
    {
        let base = self.data.get_untracked();
        let before: T = decode(base.as_ref());
        let mut view = before.clone();
        let out = f(&mut view);
        if view != before {
            let merged = write_back(base.as_ref(), &view);
            self.block_id
                .with_value(|id| self.handle.update_module_data(id, merged));
        }
        out
    }
}

#[component]
pub fn ComingSoon(title: &'static str) -> impl IntoView {
    view! {
        <div class="p-4 bg-secondary rounded-lg text-center">
            {format!("{title} (Coming Soon)")}
        </div>
    }
}

#[component]
fn UnknownModule() -> impl IntoView {
    view! { <div class="p-4 bg-secondary rounded-lg text-center">"Unknown module type"</div> }
}

/// Game module dispatch on `module_type`.
#[component]
pub fn ModuleBlock(handle: EditorHandle, block_id: BlockId) -> impl IntoView {
    let id_sv = StoredValue::new(block_id);
    let module_type = Memo::new(move |_| {
        id_sv
            .with_value(|id| handle.block(id))
            .and_then(|b| b.module_type)
    });

    move || {
        let block_id = id_sv.get_value();
        let widget = WidgetData::new(handle, block_id);
        match module_type.get().as_deref() {
            Some("lol-champions") => view! { <LolChampionPicker widget=widget /> }.into_any(),
            Some("lol-items") => view! { <LolItemPicker widget=widget /> }.into_any(),
            Some("lol-runes") => view! { <LolRunePicker widget=widget /> }.into_any(),
            Some(
                kind @ ("tft-builder" | "lol-abilities" | "valorant-agents" | "bg3-builder"),
            ) => view! { <ComingSoon title=module_title(Some(kind)) /> }.into_any(),
            _ => view! { <UnknownModule /> }.into_any(),
        }
    }
}

/// Video embed dispatch; only YouTube has an editor so far.
#[component]
pub fn VideoBlock(handle: EditorHandle, block_id: BlockId) -> impl IntoView {
    let id_sv = StoredValue::new(block_id);
    let module_type = Memo::new(move |_| {
        id_sv
            .with_value(|id| handle.block(id))
            .and_then(|b| b.module_type)
    });

    move || {
        let widget = WidgetData::new(handle, id_sv.get_value());
        match module_type.get().as_deref() {
            Some("youtube") => view! { <YoutubeEmbed widget=widget /> }.into_any(),
            Some(kind @ ("twitch" | "instagram")) => {
                view! { <ComingSoon title=module_title(Some(kind)) /> }.into_any()
            }
            _ => view! { <UnknownModule /> }.into_any(),
        }
    }
}
