use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::error::LoaderResult;

/// A game version a loader can target, and whether it is a stable release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub stable: bool,
}

impl VersionInfo {
    pub fn new(version: impl Into<String>, stable: bool) -> Self {
        Self {
            version: version.into(),
            stable,
        }
    }
}

/// Where a list of supported versions comes from: a structured manifest or a
/// scraped page. Callers never need to know which one backs a loader.
///
/// Every call hits the network again; nothing is memoized.
#[async_trait]
pub trait VersionSource: Send + Sync {
    async fn supported_versions(&self) -> LoaderResult<Vec<VersionInfo>>;
}
