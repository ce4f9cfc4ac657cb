use std::collections::BTreeMap;

use async_trait::async_trait;

use super::builder;
use super::id::LoaderId;
use super::launch::{LaunchConfig, McLaunchConfig};
use crate::core::downloader::ArtifactDownloader;
use crate::core::error::LoaderResult;
use crate::core::version::VersionInfo;

/// What external mod registries need to know about a loader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModsIntegration {
    /// Mod slug -> override directive. Interpreted by the mods subsystem.
    pub override_mods: BTreeMap<String, String>,
    pub modrinth_categories: Vec<String>,
    pub curseforge_category: Option<String>,
}

impl ModsIntegration {
    pub fn new(modrinth_category: &str, curseforge_category: &str) -> Self {
        Self {
            override_mods: BTreeMap::new(),
            modrinth_categories: vec![modrinth_category.to_string()],
            curseforge_category: Some(curseforge_category.to_string()),
        }
    }
}

/// The file a loader installs for one game/loader version pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub url: String,
    pub file_name: String,
    /// Launch-config field that receives the artifact path, if the launcher
    /// needs one.
    pub launch_field: Option<&'static str>,
}

/// Capability shared by every non-vanilla loader.
///
/// Implementations hold configuration only; nothing resolved during one call
/// survives into the next.
#[async_trait]
pub trait ModLoader: Send + Sync {
    fn id(&self) -> LoaderId;

    /// Project homepage.
    fn url(&self) -> &'static str;

    fn mods(&self) -> &ModsIntegration;

    /// Game versions with at least one loader release. Fetched fresh every call.
    async fn list_supported_game_versions(&self) -> LoaderResult<Vec<VersionInfo>>;

    /// Loader versions usable with `game_version`, in upstream order.
    async fn list_loader_versions(&self, game_version: &str) -> LoaderResult<Vec<String>>;

    fn artifact(&self, game_version: &str, loader_version: &str) -> LoaderResult<Artifact>;

    fn downloader(&self) -> &ArtifactDownloader;

    /// Resolve, download and assemble a partial MCLC config.
    async fn get_mclc_launch_config(&self, config: &LaunchConfig) -> LoaderResult<McLaunchConfig> {
        builder::build_launch_config(self, config).await
    }
}
