use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::capability::{Artifact, ModLoader, ModsIntegration};
use super::context::LoaderContext;
use super::id::LoaderId;
use crate::core::downloader::ArtifactDownloader;
use crate::core::error::LoaderResult;
use crate::core::maven::{metadata_url, MavenMetadata, NEOFORGE_GROUP_PATH};
use crate::core::settings::LoaderSettings;
use crate::core::version::VersionInfo;

const BETA_SUFFIX: &str = "-beta";

/// NeoForge. Like Forge, but versioned independently of the game:
/// `20.4.80-beta` targets Minecraft 1.20.4, `21.0.3` targets 1.21.
pub struct NeoForgeLoader {
    client: reqwest::Client,
    settings: Arc<LoaderSettings>,
    downloader: Arc<ArtifactDownloader>,
    mods: ModsIntegration,
}

impl NeoForgeLoader {
    pub const URL: &'static str = "https://neoforged.net/";

    pub fn new(ctx: &LoaderContext) -> Self {
        Self {
            client: ctx.http_client.clone(),
            settings: ctx.settings.clone(),
            downloader: ctx.downloader.clone(),
            mods: ModsIntegration::new("neoforge", "6"),
        }
    }

    fn maven(&self) -> &str {
        self.settings.endpoints.neoforge_maven.trim_end_matches('/')
    }

    async fn maven_versions(&self) -> LoaderResult<Vec<String>> {
        let url = metadata_url(self.maven(), NEOFORGE_GROUP_PATH);
        MavenMetadata::fetch_versions(&self.client, &self.settings, &url).await
    }
}

/// Minecraft version targeted by a NeoForge version, or `None` if the version
/// does not follow the `<major>.<minor>.<build>` scheme.
pub fn game_version_for(neoforge_version: &str) -> Option<String> {
    let mut parts = neoforge_version.split('.');
    let major = parts.next().filter(|p| p.parse::<u32>().is_ok())?;
    let minor = parts.next().filter(|p| p.parse::<u32>().is_ok())?;
    parts.next()?;

    if minor == "0" {
        Some(format!("1.{major}"))
    } else {
        Some(format!("1.{major}.{minor}"))
    }
}

pub fn loader_versions_from(maven_versions: &[String], game_version: &str) -> Vec<String> {
    maven_versions
        .iter()
        .filter(|v| game_version_for(v).as_deref() == Some(game_version))
        .cloned()
        .collect()
}

/// A game version is stable once any non-beta build exists for it.
pub fn game_versions_from(maven_versions: &[String]) -> BTreeMap<String, bool> {
    let mut versions = BTreeMap::new();
    for v in maven_versions {
        let Some(game) = game_version_for(v) else {
            continue;
        };
        let stable = !v.ends_with(BETA_SUFFIX);
        let entry = versions.entry(game).or_insert(false);
        *entry |= stable;
    }
    versions
}

#[async_trait]
impl ModLoader for NeoForgeLoader {
    fn id(&self) -> LoaderId {
        LoaderId::NeoForge
    }

    fn url(&self) -> &'static str {
        Self::URL
    }

    fn mods(&self) -> &ModsIntegration {
        &self.mods
    }

    async fn list_supported_game_versions(&self) -> LoaderResult<Vec<VersionInfo>> {
        let versions = self.maven_versions().await?;
        Ok(game_versions_from(&versions)
            .into_iter()
            .map(|(version, stable)| VersionInfo::new(version, stable))
            .collect())
    }

    async fn list_loader_versions(&self, game_version: &str) -> LoaderResult<Vec<String>> {
        let versions = self.maven_versions().await?;
        Ok(loader_versions_from(&versions, game_version))
    }

    fn artifact(&self, _game_version: &str, loader_version: &str) -> LoaderResult<Artifact> {
        let file_name = format!("neoforge-{loader_version}-installer.jar");
        Ok(Artifact {
            url: format!(
                "{}/{}/{}/{}",
                self.maven(),
                NEOFORGE_GROUP_PATH,
                loader_version,
                file_name
            ),
            file_name,
            // MCLC reads NeoForge installers from the same field as Forge.
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
        ["20.4.80-beta", "20.4.237", "20.6.1-beta", "21.0.3-beta", "21.1.5"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn maps_neoforge_versions_to_game_versions() {
        assert_eq!(game_version_for("20.4.80-beta").as_deref(), Some("1.20.4"));
        assert_eq!(game_version_for("21.0.3").as_deref(), Some("1.21"));
        assert_eq!(game_version_for("snapshot"), None);
        assert_eq!(game_version_for("20.4"), None);
    }

    #[test]
    fn loader_versions_for_game_version() {
        assert_eq!(
            loader_versions_from(&maven_versions(), "1.20.4"),
            vec!["20.4.80-beta", "20.4.237"]
        );
        assert_eq!(loader_versions_from(&maven_versions(), "1.21"), vec!["21.0.3-beta"]);
        assert!(loader_versions_from(&maven_versions(), "1.20").is_empty());
    }

    #[test]
    fn stability_follows_non_beta_builds() {
        let versions = game_versions_from(&maven_versions());
        assert_eq!(versions.get("1.20.4"), Some(&true));
        assert_eq!(versions.get("1.20.6"), Some(&false));
        assert_eq!(versions.get("1.21"), Some(&false));
        assert_eq!(versions.get("1.21.1"), Some(&true));
    }

    #[test]
    fn installer_artifact_uses_forge_field() {
        let loader = NeoForgeLoader::new(&LoaderContext::new(LoaderSettings::default()).unwrap());
        let artifact = loader.artifact("1.20.4", "20.4.237").unwrap();
        assert_eq!(
            artifact.url,
            "https://maven.neoforged.net/releases/net/neoforged/neoforge/20.4.237/neoforge-20.4.237-installer.jar"
        );
        assert_eq!(artifact.file_name, "neoforge-20.4.237-installer.jar");
        assert_eq!(artifact.launch_field, Some("forge"));
    }
}
