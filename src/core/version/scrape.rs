// ─── Listing Scraper ───
// Version discovery for loaders without a structured API: one GET to an HTML
// listing, tokens pulled out of the raw body by pattern. Depends on upstream
// markup that nobody documents, so breakage stays inside this file.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::{debug, info};

use super::source::{VersionInfo, VersionSource};
use crate::core::error::LoaderResult;
use crate::core::http;
use crate::core::settings::LoaderSettings;

/// How to recognise a version token in a listing and where its game version
/// sits once the token is split on `separator`.
#[derive(Debug, Clone, Copy)]
pub struct TokenPattern {
    pub regex: &'static Regex,
    pub separator: char,
    pub game_version_field: usize,
}

#[derive(Clone)]
pub struct ListingScraper {
    client: Client,
    settings: Arc<LoaderSettings>,
    listing_url: String,
    pattern: TokenPattern,
}

impl ListingScraper {
    pub fn new(
        client: Client,
        settings: Arc<LoaderSettings>,
        listing_url: impl Into<String>,
        pattern: TokenPattern,
    ) -> Self {
        Self {
            client,
            settings,
            listing_url: listing_url.into(),
            pattern,
        }
    }

    /// Every token on the page, in page order. Duplicates and stale entries
    /// are passed through as-is.
    pub async fn all_loader_versions(&self) -> LoaderResult<Vec<String>> {
        info!("Scraping loader versions from {}", self.listing_url);
        let body = http::get_text(&self.client, &self.settings, &self.listing_url).await?;
        let tokens = extract_tokens(&body, self.pattern.regex);
        debug!("Found {} version tokens", tokens.len());
        Ok(tokens)
    }

    /// Tokens containing `game_version` as a plain substring.
    pub async fn loader_versions_for(&self, game_version: &str) -> LoaderResult<Vec<String>> {
        let tokens = self.all_loader_versions().await?;
        Ok(filter_for_game_version(&tokens, game_version))
    }
}

#[async_trait]
impl VersionSource for ListingScraper {
    /// The listing has no release channels, so every game version is stable.
    async fn supported_versions(&self) -> LoaderResult<Vec<VersionInfo>> {
        let tokens = self.all_loader_versions().await?;
        Ok(distinct_game_versions(
            &tokens,
            self.pattern.separator,
            self.pattern.game_version_field,
        )
        .into_iter()
        .map(|version| VersionInfo::new(version, true))
        .collect())
    }
}

pub fn extract_tokens(body: &str, regex: &Regex) -> Vec<String> {
    regex
        .find_iter(body)
        .map(|m| m.as_str().to_owned())
        .collect()
}

/// Substring match, not a version comparison: "1.2" also keeps "1.20.x"
/// tokens. Order and duplicates are preserved.
pub fn filter_for_game_version(tokens: &[String], game_version: &str) -> Vec<String> {
    tokens
        .iter()
        .filter(|token| token.contains(game_version))
        .cloned()
        .collect()
}

/// Distinct game versions named by the tokens. The ordering is an artifact of
/// the set and carries no meaning.
pub fn distinct_game_versions(
    tokens: &[String],
    separator: char,
    field: usize,
) -> BTreeSet<String> {
    tokens
        .iter()
        .filter_map(|token| token.split(separator).nth(field))
        .map(str::to_owned)
        .collect()
}
