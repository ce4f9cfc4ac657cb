use tracing::debug;

use super::context::LoaderContext;
use super::id::LoaderId;
use super::launch::{LaunchConfig, McLaunchConfig};
use crate::core::error::{LoaderError, LoaderResult};
use crate::core::version::{ManifestSource, VersionInfo, VersionManifest, VersionSource};

/// Vanilla has no loader version and nothing to install: the launcher pulls
/// the official client itself.
pub struct VanillaLoader {
    manifest: ManifestSource,
}

impl VanillaLoader {
    pub const URL: &'static str = "https://www.minecraft.net/";

    pub fn new(ctx: &LoaderContext) -> Self {
        Self {
            manifest: ManifestSource::new(ctx.http_client.clone(), ctx.settings.clone()),
        }
    }

    pub fn id(&self) -> LoaderId {
        LoaderId::Vanilla
    }

    pub fn url(&self) -> &'static str {
        Self::URL
    }

    pub async fn get_version_manifest(&self) -> LoaderResult<VersionManifest> {
        self.manifest.manifest().await
    }

    /// Every manifest record; only releases are stable.
    pub async fn list_supported_versions(&self) -> LoaderResult<Vec<VersionInfo>> {
        self.manifest.supported_versions().await
    }

    /// `{root, version: {number, type: "release"}}` with no side effects.
    pub fn get_mclc_launch_config(&self, config: &LaunchConfig) -> LoaderResult<McLaunchConfig> {
        if config.game_version.is_empty() {
            return Err(LoaderError::InvalidVersion(String::new()));
        }
        debug!("Vanilla launch config for {}", config.game_version);
        Ok(McLaunchConfig::release(&config.root_path, &config.game_version))
    }
}
