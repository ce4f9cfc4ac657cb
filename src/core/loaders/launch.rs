use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const RELEASE: &str = "release";

/// What the caller asks for. Builders only ever borrow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchConfig {
    /// Absolute root of the game install.
    pub root_path: PathBuf,
    pub game_version: String,
    /// Resolved from the loader's version list when absent.
    #[serde(default)]
    pub loader_version: Option<String>,
}

impl LaunchConfig {
    pub fn new(root_path: impl Into<PathBuf>, game_version: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            game_version: game_version.into(),
            loader_version: None,
        }
    }

    pub fn with_loader_version(mut self, loader_version: impl Into<String>) -> Self {
        self.loader_version = Some(loader_version.into());
        self
    }

    /// The explicit loader version, treating an empty string as unset.
    pub fn requested_loader_version(&self) -> Option<&str> {
        self.loader_version.as_deref().filter(|v| !v.is_empty())
    }
}

/// Partial MCLC launch configuration handed to the external launcher.
///
/// `extensions` carries loader-specific fields (e.g. `optifine`, `forge`)
/// flattened next to `root` and `version`; the launcher treats them as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McLaunchConfig {
    pub root: PathBuf,
    pub version: McVersion,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McVersion {
    pub number: String,
    #[serde(rename = "type")]
    pub version_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
}

impl McLaunchConfig {
    pub fn release(root: &Path, game_version: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            version: McVersion {
                number: game_version.to_string(),
                version_type: RELEASE.to_string(),
                custom: None,
            },
            extensions: Map::new(),
        }
    }

    pub fn with_custom(mut self, custom: impl Into<String>) -> Self {
        self.version.custom = Some(custom.into());
        self
    }

    pub fn with_extension(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.to_string(), value.into());
        self
    }

    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }
}
