use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::builder::custom_version_id;
use super::capability::{Artifact, ModLoader, ModsIntegration};
use super::context::LoaderContext;
use super::id::LoaderId;
use crate::core::downloader::ArtifactDownloader;
use crate::core::error::LoaderResult;
use crate::core::http;
use crate::core::settings::LoaderSettings;
use crate::core::version::VersionInfo;

#[derive(Debug, Deserialize)]
struct FabricGameVersion {
    version: String,
    stable: bool,
}

#[derive(Debug, Deserialize)]
struct FabricLoaderEntry {
    loader: FabricLoaderVersion,
}

#[derive(Debug, Deserialize)]
struct FabricLoaderVersion {
    version: String,
}

/// Fabric via the Fabric Meta API. The "artifact" is the launcher profile
/// JSON, saved as `versions/<id>/<id>.json` where MCLC expects a custom
/// version.
pub struct FabricLoader {
    client: reqwest::Client,
    settings: Arc<LoaderSettings>,
    downloader: Arc<ArtifactDownloader>,
    mods: ModsIntegration,
}

impl FabricLoader {
    pub const URL: &'static str = "https://fabricmc.net/";

    pub fn new(ctx: &LoaderContext) -> Self {
        Self {
            client: ctx.http_client.clone(),
            settings: ctx.settings.clone(),
            downloader: ctx.downloader.clone(),
            mods: ModsIntegration::new("fabric", "4"),
        }
    }

    fn meta_base(&self) -> &str {
        self.settings.endpoints.fabric_meta.trim_end_matches('/')
    }
}

#[async_trait]
impl ModLoader for FabricLoader {
    fn id(&self) -> LoaderId {
        LoaderId::Fabric
    }

    fn url(&self) -> &'static str {
        Self::URL
    }

    fn mods(&self) -> &ModsIntegration {
        &self.mods
    }

    async fn list_supported_game_versions(&self) -> LoaderResult<Vec<VersionInfo>> {
        let url = format!("{}/versions/game", self.meta_base());
        let versions: Vec<FabricGameVersion> =
            http::get_json(&self.client, &self.settings, &url).await?;

        Ok(versions
            .into_iter()
            .map(|v| VersionInfo::new(v.version, v.stable))
            .collect())
    }

    async fn list_loader_versions(&self, game_version: &str) -> LoaderResult<Vec<String>> {
        let url = format!("{}/versions/loader/{}", self.meta_base(), game_version);
        let entries: Vec<FabricLoaderEntry> =
            http::get_json(&self.client, &self.settings, &url).await?;

        info!(
            "Fabric Meta lists {} loaders for {}",
            entries.len(),
            game_version
        );
        Ok(entries.into_iter().map(|e| e.loader.version).collect())
    }

    fn artifact(&self, game_version: &str, loader_version: &str) -> LoaderResult<Artifact> {
        Ok(Artifact {
            url: format!(
                "{}/versions/loader/{}/{}/profile/json",
                self.meta_base(),
                game_version,
                loader_version
            ),
            file_name: format!(
                "{}.json",
                custom_version_id(LoaderId::Fabric, game_version, loader_version)
            ),
            launch_field: None,
        })
    }

    fn downloader(&self) -> &ArtifactDownloader {
        &self.downloader
    }
}
