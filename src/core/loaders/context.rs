use std::sync::Arc;

use crate::core::downloader::ArtifactDownloader;
use crate::core::error::LoaderResult;
use crate::core::http::build_http_client;
use crate::core::settings::LoaderSettings;

/// Shared plumbing handed to every loader: one pooled client, one
/// downloader (and so one per-path lock table), one set of endpoints.
#[derive(Clone)]
pub struct LoaderContext {
    pub http_client: reqwest::Client,
    pub settings: Arc<LoaderSettings>,
    pub downloader: Arc<ArtifactDownloader>,
}

impl LoaderContext {
    pub fn new(settings: LoaderSettings) -> LoaderResult<Self> {
        let http_client = build_http_client(&settings)?;
        let downloader = Arc::new(ArtifactDownloader::new(http_client.clone(), &settings));

        Ok(Self {
            http_client,
            settings: Arc::new(settings),
            downloader,
        })
    }
}
