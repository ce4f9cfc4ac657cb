// ─── Version Manifest ───
// Handles fetching and parsing the Mojang version manifest v2.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::source::{VersionInfo, VersionSource};
use crate::core::error::LoaderResult;
use crate::core::http;
use crate::core::settings::LoaderSettings;

/// Top-level Mojang version manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionManifest {
    pub latest: LatestVersions,
    pub versions: Vec<VersionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LatestVersions {
    pub release: String,
    pub snapshot: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VersionType {
    Release,
    Snapshot,
    OldBeta,
    OldAlpha,
}

/// A single entry in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub version_type: VersionType,
    pub url: String,
    pub time: DateTime<Utc>,
    pub release_time: DateTime<Utc>,
    pub sha1: String,
    #[serde(default)]
    pub compliance_level: u32,
}

impl VersionManifest {
    /// Fetch the version manifest using a shared HTTP client.
    pub async fn fetch(client: &Client, settings: &LoaderSettings) -> LoaderResult<Self> {
        info!("Fetching Minecraft version manifest...");

        let manifest: VersionManifest =
            http::get_json(client, settings, &settings.endpoints.version_manifest).await?;

        info!("Loaded {} versions from manifest", manifest.versions.len());
        Ok(manifest)
    }

    /// Find a specific version entry by ID (e.g. "1.20.4").
    pub fn find_version(&self, id: &str) -> Option<&VersionEntry> {
        self.versions.iter().find(|v| v.id == id)
    }

    /// List all official stable versions (release only).
    pub fn releases(&self) -> Vec<&VersionEntry> {
        self.versions
            .iter()
            .filter(|v| v.version_type == VersionType::Release)
            .collect()
    }

    /// One entry per record, in manifest order; only releases are stable.
    pub fn supported_versions(&self) -> Vec<VersionInfo> {
        self.versions
            .iter()
            .map(|v| VersionInfo::new(&v.id, v.version_type == VersionType::Release))
            .collect()
    }
}

/// Manifest-backed [`VersionSource`], used by vanilla.
#[derive(Clone)]
pub struct ManifestSource {
    client: Client,
    settings: Arc<LoaderSettings>,
}

impl ManifestSource {
    pub fn new(client: Client, settings: Arc<LoaderSettings>) -> Self {
        Self { client, settings }
    }

    pub async fn manifest(&self) -> LoaderResult<VersionManifest> {
        VersionManifest::fetch(&self.client, &self.settings).await
    }
}

#[async_trait]
impl VersionSource for ManifestSource {
    async fn supported_versions(&self) -> LoaderResult<Vec<VersionInfo>> {
        Ok(self.manifest().await?.supported_versions())
    }
}
