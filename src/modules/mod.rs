//! Module and embed widgets.
//!
//! A widget gets `(block_id, module_data)` and writes back only through
//! `EditorHandle::update_module_data`. The store treats the payload as opaque;
//! the typed views below are the widgets' private reading of it.

pub(crate) mod components;
pub(crate) mod lol;
pub(crate) mod youtube;

pub(crate) use components::{ModuleBlock, VideoBlock};

use crate::api::{Champion, Item, RunePath};
use crate::models::ModuleData;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Read a typed view out of a block's payload. Missing or mismatched fields
/// fall back to their defaults; a widget never fails on a foreign shape.
pub fn decode<T: DeserializeOwned + Default>(data: Option<&ModuleData>) -> T {
    let Some(data) = data else {
        return T::default();
    };
    match serde_json::from_value(data.as_value().clone()) {
        Ok(view) => view,
        Err(e) => {
            tracing::debug!(error = %e, "module data did not match widget view; using defaults");
            T::default()
        }
    }
}

/// Overlay a typed view onto the existing payload. Keys the view doesn't know
/// about survive.
pub fn write_back<T: Serialize>(base: Option<&ModuleData>, view: &T) -> ModuleData {
    let mut merged = match base.map(ModuleData::as_value) {
        Some(serde_json::Value::Object(map)) => map.clone(),
        _ => serde_json::Map::new(),
    };
    if let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(view) {
        merged.extend(fields);
    }
    ModuleData::new(serde_json::Value::Object(merged))
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeData {
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub title: String,
}

pub const CHAMPION_ROLES: [&str; 6] = ["Fighter", "Tank", "Mage", "Assassin", "Support", "Marksman"];

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct LolChampionsData {
    #[serde(default)]
    pub champions: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl LolChampionsData {
    pub fn add(&mut self, champion_id: &str) -> bool {
        if self.champions.iter().any(|c| c == champion_id) {
            return false;
        }
        self.champions.push(champion_id.to_string());
        true
    }

    pub fn remove(&mut self, champion_id: &str) -> bool {
        let before = self.champions.len();
        self.champions.retain(|c| c != champion_id);
        self.champions.len() != before
    }

    pub fn toggle_role(&mut self, role: &str) {
        if self.roles.iter().any(|r| r == role) {
            self.roles.retain(|r| r != role);
        } else {
            self.roles.push(role.to_string());
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Selected champions in catalog order.
    pub fn selected<'a>(&self, catalog: &'a [Champion]) -> Vec<&'a Champion> {
        catalog
            .iter()
            .filter(|c| self.champions.contains(&c.id))
            .collect()
    }

    /// Candidates for the add picker: name matches, any selected role matches,
    /// not already picked.
    pub fn candidates<'a>(&self, catalog: &'a [Champion], search: &str) -> Vec<&'a Champion> {
        let needle = search.to_lowercase();
        catalog
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .filter(|c| self.roles.is_empty() || c.tags.iter().any(|t| self.roles.contains(t)))
            .filter(|c| !self.champions.contains(&c.id))
            .collect()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct LolItemsData {
    #[serde(default)]
    pub items: Vec<String>,
}

impl LolItemsData {
    pub fn add(&mut self, item_id: &str) -> bool {
        if self.items.iter().any(|i| i == item_id) {
            return false;
        }
        self.items.push(item_id.to_string());
        true
    }

    pub fn remove(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i != item_id);
        self.items.len() != before
    }

    pub fn selected<'a>(&self, catalog: &'a [Item]) -> Vec<&'a Item> {
        catalog
            .iter()
            .filter(|i| self.items.contains(&i.id))
            .collect()
    }

    pub fn candidates<'a>(
        &self,
        catalog: &'a [Item],
        search: &str,
        tag: Option<&str>,
    ) -> Vec<&'a Item> {
        let needle = search.to_lowercase();
        catalog
            .iter()
            .filter(|i| i.name.to_lowercase().contains(&needle))
            .filter(|i| tag.map_or(true, |t| i.tags.iter().any(|it| it == t)))
            .filter(|i| !self.items.contains(&i.id))
            .filter(|i| i.is_purchasable())
            .collect()
    }
}

/// Distinct item tags, sorted.
pub fn item_tags(catalog: &[Item]) -> Vec<String> {
    catalog
        .iter()
        .flat_map(|i| i.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub const MAX_SECONDARY_RUNES: usize = 2;

#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuneError {
    #[error("Primary and secondary paths must be different")]
    SamePaths,
    #[error("Cannot select keystone runes from secondary path")]
    KeystoneFromSecondary,
    #[error("You can only select 2 runes from the secondary path")]
    SecondaryFull,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RuneTab {
    #[default]
    Primary,
    Secondary,
}

impl RuneTab {
    /// Keystones are primary-only.
    pub fn first_slot(self) -> usize {
        match self {
            RuneTab::Primary => 0,
            RuneTab::Secondary => 1,
        }
    }

    pub fn heading(self, path_name: &str) -> String {
        match self {
            RuneTab::Primary => format!("{path_name} Runes"),
            RuneTab::Secondary => format!("{path_name} Runes (Select {MAX_SECONDARY_RUNES})"),
        }
    }
}

pub fn rune_slot_label(slot_index: usize) -> String {
    if slot_index == 0 {
        "Keystone".to_string()
    } else {
        format!("Slot {slot_index}")
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LolRunesData {
    #[serde(default)]
    pub primary_path: Option<i64>,
    #[serde(default)]
    pub secondary_path: Option<i64>,
    #[serde(default)]
    pub runes: Vec<i64>,
}

fn path_by_id(paths: &[RunePath], id: Option<i64>) -> Option<&RunePath> {
    let id = id?;
    paths.iter().find(|p| p.id == id)
}

fn in_path(paths: &[RunePath], path_id: Option<i64>, rune_id: i64) -> bool {
    path_by_id(paths, path_id).is_some_and(|p| p.contains_rune(rune_id))
}

impl LolRunesData {
    pub fn is_selected(&self, rune_id: i64) -> bool {
        self.runes.contains(&rune_id)
    }

    /// Pick a path on `tab`. Returns the tab to show next.
    pub fn select_path(
        &mut self,
        tab: RuneTab,
        path_id: i64,
        paths: &[RunePath],
    ) -> Result<RuneTab, RuneError> {
        match tab {
            RuneTab::Primary => {
                if self.secondary_path == Some(path_id) {
                    // Promoting the secondary: only its runes stay.
                    self.secondary_path = None;
                    self.runes.retain(|&r| in_path(paths, Some(path_id), r));
                } else {
                    let old = self.primary_path;
                    let secondary = self.secondary_path;
                    self.runes
                        .retain(|&r| !in_path(paths, old, r) || in_path(paths, secondary, r));
                }
                self.primary_path = Some(path_id);
                Ok(RuneTab::Secondary)
            }
            RuneTab::Secondary => {
                if self.primary_path == Some(path_id) {
                    return Err(RuneError::SamePaths);
                }
                let old = self.secondary_path;
                let primary = self.primary_path;
                self.runes
                    .retain(|&r| !in_path(paths, old, r) || in_path(paths, primary, r));
                self.secondary_path = Some(path_id);
                Ok(RuneTab::Secondary)
            }
        }
    }

    /// Click on a rune in `path_id`'s slot `slot_index`. Returns whether the
    /// selection changed; runes of a path that isn't chosen are ignored.
    pub fn select_rune(
        &mut self,
        rune_id: i64,
        path_id: i64,
        slot_index: usize,
        paths: &[RunePath],
    ) -> Result<bool, RuneError> {
        if self.primary_path == Some(path_id) {
            let slot_runes: Vec<i64> = path_by_id(paths, Some(path_id))
                .and_then(|p| p.slots.get(slot_index))
                .map(|s| s.runes.iter().map(|r| r.id).collect())
                .unwrap_or_default();
            self.runes.retain(|r| !slot_runes.contains(r));
            self.runes.push(rune_id);
            return Ok(true);
        }

        if self.secondary_path != Some(path_id) {
            return Ok(false);
        }
        if slot_index == 0 {
            return Err(RuneError::KeystoneFromSecondary);
        }
        if self.is_selected(rune_id) {
            self.runes.retain(|&r| r != rune_id);
            return Ok(true);
        }
        let taken = self
            .runes
            .iter()
            .filter(|&&r| in_path(paths, Some(path_id), r))
            .count();
        if taken >= MAX_SECONDARY_RUNES {
            return Err(RuneError::SecondaryFull);
        }
        self.runes.push(rune_id);
        Ok(true)
    }
}
