use std::fs;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;
use forecast_core::{City, RecentStore};

/// File-backed store for the recent-selection list.
///
/// A missing or undecodable file reads as an empty list; writes are
/// best-effort and only logged on failure. Forecast data itself is never
/// persisted, only the selected city entries.
#[derive(Debug)]
pub struct FileRecentStore {
    path: PathBuf,
}

impl FileRecentStore {
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "forecast-app", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(Self { path: dirs.data_dir().join("recent_searches.json") })
    }
}

impl RecentStore for FileRecentStore {
    fn load(&self) -> Vec<City> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn save(&self, cities: &[City]) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Failed to create data directory {}: {e}", parent.display());
                return;
            }
        }

        match serde_json::to_string(cities) {
            Ok(encoded) => {
                if let Err(e) = fs::write(&self.path, encoded) {
                    log::warn!("Failed to write recent searches to {}: {e}", self.path.display());
                }
            }
            Err(e) => log::warn!("Failed to encode recent searches: {e}"),
        }
    }
}
