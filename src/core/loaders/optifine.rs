use std::path::Path;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use regex::Regex;
use reqwest::Url;

use super::capability::{Artifact, ModLoader, ModsIntegration};
use super::context::LoaderContext;
use super::id::LoaderId;
use crate::core::downloader::ArtifactDownloader;
use crate::core::error::{LoaderError, LoaderResult};
use crate::core::version::{ListingScraper, TokenPattern, VersionInfo, VersionSource};

const ARTIFACT_FILE: &str = "optifine.jar";

/// `OptiFine_<game version>_HD_U_<build>`
fn token_pattern() -> TokenPattern {
    static RE: OnceLock<Regex> = OnceLock::new();
    let regex = RE.get_or_init(|| {
        Regex::new(r"OptiFine_(\d+\.\d+\.\d+)_HD_U_\w+")
            .expect("optifine token pattern is valid")
    });
    TokenPattern {
        regex,
        separator: '_',
        game_version_field: 1,
    }
}

/// OptiFine publishes no API, so versions are scraped from its download page
/// and the jar is fetched from the download endpoint by token.
pub struct OptiFineLoader {
    listing: ListingScraper,
    download_endpoint: String,
    downloader: Arc<ArtifactDownloader>,
    mods: ModsIntegration,
}

impl OptiFineLoader {
    pub const URL: &'static str = "https://optifine.net/";

    pub fn new(ctx: &LoaderContext) -> Self {
        let base = ctx.settings.endpoints.optifine.trim_end_matches('/');
        Self {
            listing: ListingScraper::new(
                ctx.http_client.clone(),
                ctx.settings.clone(),
                format!("{base}/downloads"),
                token_pattern(),
            ),
            download_endpoint: format!("{base}/download"),
            downloader: ctx.downloader.clone(),
            mods: ModsIntegration::new("optifine", "7"),
        }
    }

    /// All tokens on the listing page. Not every one fits every game version.
    pub async fn list_all_loader_versions(&self) -> LoaderResult<Vec<String>> {
        self.listing.all_loader_versions().await
    }

    /// `<endpoint>/download?f=<loader version>`, with the version
    /// form-encoded.
    pub fn download_url(&self, loader_version: &str) -> LoaderResult<String> {
        let mut url = Url::parse(&self.download_endpoint).map_err(|e| {
            LoaderError::Settings(format!(
                "Invalid OptiFine endpoint {}: {e}",
                self.download_endpoint
            ))
        })?;
        url.query_pairs_mut().append_pair("f", loader_version);
        Ok(url.into())
    }

    /// Stream the OptiFine jar for `loader_version` to `dest`.
    pub async fn download_optifine(&self, dest: &Path, loader_version: &str) -> LoaderResult<()> {
        self.downloader
            .download(&self.download_url(loader_version)?, dest)
            .await
    }
}

#[async_trait]
impl ModLoader for OptiFineLoader {
    fn id(&self) -> LoaderId {
        LoaderId::OptiFine
    }

    fn url(&self) -> &'static str {
        Self::URL
    }

    fn mods(&self) -> &ModsIntegration {
        &self.mods
    }

    async fn list_supported_game_versions(&self) -> LoaderResult<Vec<VersionInfo>> {
        self.listing.supported_versions().await
    }

    async fn list_loader_versions(&self, game_version: &str) -> LoaderResult<Vec<String>> {
        self.listing.loader_versions_for(game_version).await
    }

    fn artifact(&self, _game_version: &str, loader_version: &str) -> LoaderResult<Artifact> {
        Ok(Artifact {
            url: self.download_url(loader_version)?,
            file_name: ARTIFACT_FILE.to_string(),
            launch_field: Some("optifine"),
        })
    }

    fn downloader(&self) -> &ArtifactDownloader {
        &self.downloader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::LoaderSettings;

    fn optifine() -> OptiFineLoader {
        let mut settings = LoaderSettings::default();
        settings.endpoints.optifine = "https://mirror.example/".into();
        OptiFineLoader::new(&LoaderContext::new(settings).unwrap())
    }

    #[test]
    fn artifact_points_at_download_endpoint() {
        let artifact = optifine()
            .artifact("1.20.1", "OptiFine_1.20.1_HD_U_I6")
            .unwrap();
        assert_eq!(
            artifact.url,
            "https://mirror.example/download?f=OptiFine_1.20.1_HD_U_I6"
        );
        assert_eq!(artifact.file_name, "optifine.jar");
        assert_eq!(artifact.launch_field, Some("optifine"));
    }

    #[test]
    fn download_url_encodes_the_version() {
        assert_eq!(
            optifine().download_url("HD U#J2&x=1").unwrap(),
            "https://mirror.example/download?f=HD+U%23J2%26x%3D1"
        );
    }

    #[test]
    fn pattern_requires_three_part_game_version() {
        let pattern = token_pattern();
        assert!(pattern.regex.is_match("OptiFine_1.20.1_HD_U_I6"));
        assert!(!pattern.regex.is_match("OptiFine_1.20_HD_U_I6"));
    }

    #[test]
    fn identity_and_categories() {
        let loader = optifine();
        assert_eq!(loader.id(), LoaderId::OptiFine);
        assert_eq!(loader.url(), "https://optifine.net/");
        assert_eq!(loader.mods().modrinth_categories, vec!["optifine"]);
        assert_eq!(loader.mods().curseforge_category.as_deref(), Some("7"));
        assert!(loader.mods().override_mods.is_empty());
    }
}
