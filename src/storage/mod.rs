use serde::{Deserialize, Serialize};

/// Editor → preview handoff. Holds a serialized `PreviewContent`.
pub(crate) const PREVIEW_CONTENT_KEY: &str = "previewContent";
pub(crate) const SELECTED_GAME_KEY: &str = "textcraft_selected_game";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_string_from_storage(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

pub(crate) fn save_string_to_storage(key: &str, value: &str) -> bool {
    match local_storage() {
        Some(storage) => storage.set_item(key, value).is_ok(),
        None => false,
    }
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let json = load_string_from_storage(key)?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if !save_string_to_storage(key, &json) {
            tracing::warn!(key, "localStorage unavailable; value not saved");
        }
    }
}

pub(crate) fn remove_from_storage(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::models::Game;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_json_round_trip_through_local_storage() {
        let game = Game {
            id: "lol".to_string(),
            name: "League of Legends".to_string(),
            icon: "swords".to_string(),
            modules: vec!["lol-items".to_string()],
            color: "bg-red-500".to_string(),
        };
        save_json_to_storage(SELECTED_GAME_KEY, &game);
        assert_eq!(load_json_from_storage::<Game>(SELECTED_GAME_KEY), Some(game));

        remove_from_storage(SELECTED_GAME_KEY);
        assert_eq!(load_json_from_storage::<Game>(SELECTED_GAME_KEY), None);
    }

    #[wasm_bindgen_test]
    fn test_bad_json_loads_as_none() {
        assert!(save_string_to_storage(PREVIEW_CONTENT_KEY, "{not json"));
        assert_eq!(load_json_from_storage::<Game>(PREVIEW_CONTENT_KEY), None);
        remove_from_storage(PREVIEW_CONTENT_KEY);
    }
}
