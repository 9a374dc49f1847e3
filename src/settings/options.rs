//! Connection options, stored alongside the parameters.
use serde_json::json;

use crate::error::AppResult;
use crate::settings::SettingsStore;

pub const DEFAULT_API_URL: &str = "http://localhost:7860";

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub url: String,
}

impl Default for Options {
    fn default() -> Self {
        Options { url: DEFAULT_API_URL.to_string() }
    }
}

impl Options {
    pub fn load(&mut self, store: &dyn SettingsStore) {
        if let Some(value) = store.value("url") {
            match value.as_str() {
                Some(url) => self.url = url.to_string(),
                None => tracing::warn!("Ignoring stored 'url' with unexpected value {}", value),
            }
        }
    }

    pub fn save(&self, store: &mut dyn SettingsStore) -> AppResult<()> {
        store.set_value("url", json!(self.url));
        store.sync()
    }
}
