use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::error::{LoaderError, LoaderResult};

const APP_DIR_NAME: &str = "modloader";
const SETTINGS_FILE: &str = "settings.json";

/// Upstream endpoints. Overridable so a mirror (or a test server) can stand in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Endpoints {
    pub version_manifest: String,
    pub fabric_meta: String,
    pub forge_maven: String,
    pub neoforge_maven: String,
    /// Base of both the download listing (`/downloads`) and the file endpoint (`/download`).
    pub optifine: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            version_manifest: "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json"
                .into(),
            fabric_meta: "https://meta.fabricmc.net/v2".into(),
            forge_maven: "https://maven.minecraftforge.net".into(),
            neoforge_maven: "https://maven.neoforged.net/releases".into(),
            optifine: "https://optifine.net".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoaderSettings {
    pub endpoints: Endpoints,
    pub user_agent: String,
    pub connect_timeout_secs: u64,
    /// Applies to metadata, manifest and listing requests.
    pub request_timeout_secs: u64,
    /// Maximum silence between two chunks of an artifact download.
    pub download_idle_timeout_secs: u64,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            user_agent: concat!("modloader/", env!("CARGO_PKG_VERSION")).into(),
            connect_timeout_secs: 15,
            request_timeout_secs: 30,
            download_idle_timeout_secs: 60,
        }
    }
}

impl LoaderSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn download_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.download_idle_timeout_secs)
    }

    /// Read settings from a JSON file. Missing fields take their defaults.
    pub fn load_from(path: &Path) -> LoaderResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| LoaderError::io(path, e))?;
        serde_json::from_str(&raw)
            .map_err(|e| LoaderError::Settings(format!("{}: {}", path.display(), e)))
    }

    /// Load `<config dir>/modloader/settings.json`, falling back to defaults
    /// when the file does not exist.
    pub fn load_or_default() -> LoaderResult<Self> {
        match default_settings_path() {
            Some(path) if path.exists() => {
                info!("Loading loader settings from {:?}", path);
                Self::load_from(&path)
            }
            _ => {
                debug!("No settings file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> LoaderResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LoaderError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| LoaderError::io(path, e))
    }
}

pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE))
}
