use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Used when the version index can't be reached.
pub(crate) const DEFAULT_DDRAGON_VERSION: &str = "14.7.1";
pub(crate) const DEFAULT_DDRAGON_URL: &str = "https://ddragon.leagueoflegends.com";
pub(crate) const DEFAULT_LOG_FILTER: &str = "textcraft=debug,warn";

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{context} ({status}): {body}")]
    Http {
        status: u16,
        body: String,
        context: String,
    },

    #[error("unexpected response: {0}")]
    Parse(String),

    #[error("{0} is unavailable")]
    Unavailable(String),
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse(e.to_string())
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct EnvConfig {
    pub ddragon_url: String,
    pub log_filter: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let env = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .filter(|env| !env.is_undefined() && env.is_object());

        match env {
            Some(env) => Self::from_lookup(|key| {
                js_sys::Reflect::get(&env, &key.into())
                    .ok()
                    .and_then(|v| v.as_string())
            }),
            None => Self::from_lookup(|_| None),
        }
    }

    /// Build from a key lookup. Both `DDRAGON_URL` and the lower-case
    /// `ddragon_url` are accepted; the upper-case form wins.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let ddragon_url = non_empty("DDRAGON_URL")
            .or_else(|| non_empty("ddragon_url"))
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_DDRAGON_URL.to_string());

        let log_filter = non_empty("LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            ddragon_url,
            log_filter,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) struct ImageRef {
    pub full: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) struct ChampionInfo {
    pub attack: u8,
    pub defense: u8,
    pub magic: u8,
    pub difficulty: u8,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Champion {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: ImageRef,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub info: ChampionInfo,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) struct Gold {
    pub base: u32,
    pub total: u32,
    pub sell: u32,
    #[serde(default)]
    pub purchasable: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Item {
    /// Key of the item in the catalog map; not part of the item body.
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub plaintext: String,
    #[serde(default)]
    pub gold: Gold,
    #[serde(default)]
    pub image: ImageRef,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Item {
    pub fn is_purchasable(&self) -> bool {
        self.gold.total > 0
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Rune {
    pub id: i64,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub short_desc: String,
    pub icon: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct RuneSlot {
    pub runes: Vec<Rune>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct RunePath {
    pub id: i64,
    pub key: String,
    pub name: String,
    pub icon: String,
    pub slots: Vec<RuneSlot>,
}

impl RunePath {
    pub fn contains_rune(&self, rune_id: i64) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.runes.iter().any(|r| r.id == rune_id))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ImageKind {
    Champion,
    Item,
    Spell,
    Passive,
}

impl ImageKind {
    fn dir(self) -> &'static str {
        match self {
            ImageKind::Champion => "champion",
            ImageKind::Item => "item",
            ImageKind::Spell => "spell",
            ImageKind::Passive => "passive",
        }
    }
}

/// Read-only client for Riot's Data Dragon static catalogs.
#[derive(Clone, Debug)]
pub(crate) struct DataDragonClient {
    pub(crate) base_url: String,
}

impl DataDragonClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::new().ddragon_url)
    }

    fn data_url(&self, version: &str, file: &str) -> String {
        format!("{}/cdn/{}/data/en_US/{}", self.base_url, version, file)
    }

    pub fn image_url(&self, kind: ImageKind, version: &str, file: &str) -> String {
        format!("{}/cdn/{}/img/{}/{}", self.base_url, version, kind.dir(), file)
    }

    pub fn rune_image_url(&self, icon: &str) -> String {
        format!("{}/cdn/img/{}", self.base_url, icon)
    }

    async fn get_json(&self, url: String, context: &str) -> ApiResult<serde_json::Value> {
        tracing::debug!(%url, "fetching catalog");
        let res = reqwest::Client::new()
            .get(&url)
            .send()
            .await
            .map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::Http {
                status,
                body,
                context: context.to_string(),
            })
        }
    }

    /// Newest published catalog version.
    pub async fn fetch_latest_version(&self) -> ApiResult<String> {
        let url = format!("{}/api/versions.json", self.base_url);
        let data = self.get_json(url, "Version index").await?;
        Self::parse_versions_response(data)
    }

    /// Like `fetch_latest_version`, but never fails: a broken index falls back
    /// to a known-good version.
    pub async fn latest_version_or_default(&self) -> String {
        match self.fetch_latest_version().await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "version lookup failed; using default");
                DEFAULT_DDRAGON_VERSION.to_string()
            }
        }
    }

    pub async fn fetch_champions(&self, version: &str) -> ApiResult<Vec<Champion>> {
        let data = self
            .get_json(self.data_url(version, "champion.json"), "Champion catalog")
            .await?;
        Self::parse_champion_list_response(data)
    }

    pub async fn fetch_items(&self, version: &str) -> ApiResult<Vec<Item>> {
        let data = self
            .get_json(self.data_url(version, "item.json"), "Item catalog")
            .await?;
        Self::parse_item_list_response(data)
    }

    pub async fn fetch_runes(&self, version: &str) -> ApiResult<Vec<RunePath>> {
        let data = self
            .get_json(self.data_url(version, "runesReforged.json"), "Rune catalog")
            .await?;
        Self::parse_rune_paths_response(data)
    }

    pub(crate) fn parse_versions_response(data: serde_json::Value) -> ApiResult<String> {
        data.as_array()
            .and_then(|list| list.first())
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| ApiError::Unavailable("Version index".to_string()))
    }

    pub(crate) fn parse_champion_list_response(
        data: serde_json::Value,
    ) -> ApiResult<Vec<Champion>> {
        let map = data
            .get("data")
            .and_then(|v| v.as_object())
            .ok_or_else(|| ApiError::parse("champion catalog has no `data` object"))?;

        let mut out: Vec<Champion> = Vec::with_capacity(map.len());
        for item in map.values() {
            // Skip individual bad entries rather than failing the whole list.
            match serde_json::from_value::<Champion>(item.clone()) {
                Ok(c) => out.push(c),
                Err(e) => tracing::debug!(error = %e, "skipping malformed champion"),
            }
        }
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    pub(crate) fn parse_item_list_response(data: serde_json::Value) -> ApiResult<Vec<Item>> {
        let map = data
            .get("data")
            .and_then(|v| v.as_object())
            .ok_or_else(|| ApiError::parse("item catalog has no `data` object"))?;

        let mut out: Vec<Item> = Vec::with_capacity(map.len());
        for (id, item) in map {
            match serde_json::from_value::<Item>(item.clone()) {
                Ok(mut it) => {
                    it.id = id.clone();
                    out.push(it);
                }
                Err(e) => tracing::debug!(item_id = %id, error = %e, "skipping malformed item"),
            }
        }
        out.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(out)
    }

    pub(crate) fn parse_rune_paths_response(data: serde_json::Value) -> ApiResult<Vec<RunePath>> {
        serde_json::from_value(data).map_err(ApiError::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_env_config_defaults() {
        let cfg = EnvConfig::from_lookup(|_| None);
        assert_eq!(cfg.ddragon_url, DEFAULT_DDRAGON_URL);
        assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_env_config_prefers_upper_case_key() {
        let cfg = EnvConfig::from_lookup(|k| match k {
            "DDRAGON_URL" => Some("http://mirror.local/".to_string()),
            "ddragon_url" => Some("http://legacy.local".to_string()),
            "LOG" => Some("textcraft=trace".to_string()),
            _ => None,
        });
        assert_eq!(cfg.ddragon_url, "http://mirror.local");
        assert_eq!(cfg.log_filter, "textcraft=trace");
    }

    #[test]
    fn test_env_config_ignores_blank_values() {
        let cfg = EnvConfig::from_lookup(|k| match k {
            "DDRAGON_URL" => Some("  ".to_string()),
            "ddragon_url" => Some("http://legacy.local".to_string()),
            _ => None,
        });
        assert_eq!(cfg.ddragon_url, "http://legacy.local");
    }

    #[test]
    fn test_parse_versions_response() {
        let v = DataDragonClient::parse_versions_response(json!(["15.1.1", "14.24.1"]));
        assert_eq!(v, Ok("15.1.1".to_string()));

        let err = DataDragonClient::parse_versions_response(json!([]));
        assert!(matches!(err, Err(ApiError::Unavailable(_))));
    }

    #[test]
    fn test_parse_champion_list_sorts_and_skips_bad_entries() {
        let data = json!({
            "type": "champion",
            "data": {
                "Zed": { "id": "Zed", "key": "238", "name": "Zed", "title": "the Master of Shadows",
                         "image": { "full": "Zed.png" }, "tags": ["Assassin"] },
                "Ahri": { "id": "Ahri", "key": "103", "name": "Ahri", "tags": ["Mage", "Assassin"] },
                "Broken": { "name": 42 }
            }
        });
        let list = DataDragonClient::parse_champion_list_response(data).expect("parse");
        let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ahri", "Zed"]);
        assert_eq!(list[1].image.full, "Zed.png");
    }

    #[test]
    fn test_parse_champion_list_requires_data_object() {
        let err = DataDragonClient::parse_champion_list_response(json!({ "type": "champion" }));
        assert!(matches!(err, Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_parse_item_list_takes_ids_from_keys() {
        let data = json!({
            "data": {
                "3031": { "name": "Infinity Edge", "gold": { "base": 625, "total": 3400, "sell": 2380 },
                          "image": { "full": "3031.png" }, "tags": ["Damage"] },
                "2052": { "name": "Poro-Snax", "gold": { "base": 0, "total": 0, "sell": 0 } }
            }
        });
        let list = DataDragonClient::parse_item_list_response(data).expect("parse");
        assert_eq!(list.len(), 2);
        let ie = list.iter().find(|i| i.name == "Infinity Edge").expect("item");
        assert_eq!(ie.id, "3031");
        assert!(ie.is_purchasable());
        assert!(!list.iter().any(|i| i.id == "2052" && i.is_purchasable()));
    }

    #[test]
    fn test_parse_rune_paths() {
        let data = json!([{
            "id": 8000, "key": "Precision", "name": "Precision",
            "icon": "perk-images/Styles/7201_Precision.png",
            "slots": [{ "runes": [{ "id": 8005, "key": "PressTheAttack", "name": "Press the Attack",
                                    "shortDesc": "Hit 3 times", "icon": "p.png" }] }]
        }]);
        let paths = DataDragonClient::parse_rune_paths_response(data).expect("parse");
        assert_eq!(paths[0].slots[0].runes[0].short_desc, "Hit 3 times");
        assert!(paths[0].contains_rune(8005));
        assert!(!paths[0].contains_rune(9999));
    }

    #[test]
    fn test_image_urls() {
        let client = DataDragonClient::new("https://ddragon.example");
        assert_eq!(
            client.image_url(ImageKind::Champion, "14.7.1", "Ahri.png"),
            "https://ddragon.example/cdn/14.7.1/img/champion/Ahri.png"
        );
        assert_eq!(
            client.image_url(ImageKind::Item, "14.7.1", "3031.png"),
            "https://ddragon.example/cdn/14.7.1/img/item/3031.png"
        );
        assert_eq!(
            client.rune_image_url("perk-images/x.png"),
            "https://ddragon.example/cdn/img/perk-images/x.png"
        );
    }

    #[test]
    fn test_api_error_display() {
        let e = ApiError::Http {
            status: 404,
            body: "missing".to_string(),
            context: "Item catalog".to_string(),
        };
        assert_eq!(e.to_string(), "Item catalog (404): missing");
    }
}
