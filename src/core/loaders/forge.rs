use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use super::capability::{Artifact, ModLoader, ModsIntegration};
use super::context::LoaderContext;
use super::id::LoaderId;
use crate::core::downloader::ArtifactDownloader;
use crate::core::error::LoaderResult;
use crate::core::maven::{metadata_url, MavenMetadata, FORGE_GROUP_PATH};
use crate::core::settings::LoaderSettings;
use crate::core::version::VersionInfo;

/// Forge, discovered through the Forge Maven metadata. Maven versions look
/// like `1.20.1-47.2.0`; the loader version is the part after the game
/// version. The artifact is the official installer jar.
pub struct ForgeLoader {
    client: reqwest::Client,
    settings: Arc<LoaderSettings>,
    downloader: Arc<ArtifactDownloader>,
    mods: ModsIntegration,
}

impl ForgeLoader {
    pub const URL: &'static str = "https://files.minecraftforge.net/";

    pub fn new(ctx: &LoaderContext) -> Self {
        Self {
            client: ctx.http_client.clone(),
            settings: ctx.settings.clone(),
            downloader: ctx.downloader.clone(),
            mods: ModsIntegration::new("forge", "1"),
        }
    }

    fn maven(&self) -> &str {
        self.settings.endpoints.forge_maven.trim_end_matches('/')
    }

    async fn maven_versions(&self) -> LoaderResult<Vec<String>> {
        let url = metadata_url(self.maven(), FORGE_GROUP_PATH);
        MavenMetadata::fetch_versions(&self.client, &self.settings, &url).await
    }
}

/// Loader versions published for `game_version`, in metadata order.
pub fn loader_versions_from(maven_versions: &[String], game_version: &str) -> Vec<String> {
    let prefix = format!("{game_version}-");
    maven_versions
        .iter()
        .filter_map(|v| v.strip_prefix(&prefix).map(str::to_owned))
        .collect()
}

pub fn game_versions_from(maven_versions: &[String]) -> BTreeSet<String> {
    maven_versions
        .iter()
        .filter_map(|v| v.split_once('-').map(|(game, _)| game.to_owned()))
        .collect()
}

#[async_trait]
impl ModLoader for ForgeLoader {
    fn id(&self) -> LoaderId {
        LoaderId::Forge
    }

    fn url(&self) -> &'static str {
        Self::URL
    }

    fn mods(&self) -> &ModsIntegration {
        &self.mods
    }

    /// Forge metadata has no channel information; all entries are stable.
    async fn list_supported_game_versions(&self) -> LoaderResult<Vec<VersionInfo>> {
        let versions = self.maven_versions().await?;
        Ok(game_versions_from(&versions)
            .into_iter()
            .map(|v| VersionInfo::new(v, true))
            .collect())
    }

    async fn list_loader_versions(&self, game_version: &str) -> LoaderResult<Vec<String>> {
        let versions = self.maven_versions().await?;
        Ok(loader_versions_from(&versions, game_version))
    }

    fn artifact(&self, game_version: &str, loader_version: &str) -> LoaderResult<Artifact> {
        let forge_id = format!("{game_version}-{loader_version}");
        let file_name = format!("forge-{forge_id}-installer.jar");
        Ok(Artifact {
            url: format!(
                "{}/{}/{}/{}",
                self.maven(),
                FORGE_GROUP_PATH,
                forge_id,
                file_name
            ),
            file_name,
            launch_field: Some("forge"),
        })
    }

    fn downloader(&self) -> &ArtifactDownloader {
        &self.downloader
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maven_versions() -> Vec<String> {
        ["1.20.1-47.2.0", "1.20.1-47.1.0", "1.19.4-45.1.0", "1.20-46.0.14"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn loader_versions_match_exact_game_version() {
        assert_eq!(
            loader_versions_from(&maven_versions(), "1.20.1"),
            vec!["47.2.0", "47.1.0"]
        );
        // "1.20" must not pick up 1.20.1 builds.
        assert_eq!(loader_versions_from(&maven_versions(), "1.20"), vec!["46.0.14"]);
    }

    #[test]
    fn game_versions_are_distinct() {
        assert_eq!(
            game_versions_from(&maven_versions())
                .into_iter()
                .collect::<Vec<_>>(),
            vec!["1.19.4", "1.20", "1.20.1"]
        );
    }

    #[test]
    fn installer_artifact_url() {
        let loader = ForgeLoader::new(&LoaderContext::new(LoaderSettings::default()).unwrap());
        let artifact = loader.artifact("1.20.1", "47.2.0").unwrap();
        assert_eq!(
            artifact.url,
            "https://maven.minecraftforge.net/net/minecraftforge/forge/1.20.1-47.2.0/forge-1.20.1-47.2.0-installer.jar"
        );
        assert_eq!(artifact.launch_field, Some("forge"));
    }
}
