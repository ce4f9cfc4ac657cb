use quick_xml::de::from_str;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::core::error::LoaderResult;
use crate::core::http;
use crate::core::settings::LoaderSettings;

/// `maven-metadata.xml`. Only the version list is read.
#[derive(Debug, Deserialize, Default)]
pub struct MavenMetadata {
    #[serde(default)]
    pub versioning: MavenVersioning,
}

#[derive(Debug, Deserialize, Default)]
pub struct MavenVersioning {
    #[serde(default)]
    pub versions: MavenVersions,
}

#[derive(Debug, Deserialize, Default)]
pub struct MavenVersions {
    #[serde(rename = "version", default)]
    pub version: Vec<String>,
}

impl MavenMetadata {
    pub fn parse(xml: &str) -> LoaderResult<Self> {
        Ok(from_str(xml)?)
    }

    /// Fetch `<repository>/<group path>/<artifact>/maven-metadata.xml` and
    /// return the listed versions in file order.
    pub async fn fetch_versions(
        client: &Client,
        settings: &LoaderSettings,
        url: &str,
    ) -> LoaderResult<Vec<String>> {
        info!("Fetching Maven metadata {}", url);
        let xml = http::get_text(client, settings, url).await?;
        Ok(Self::parse(&xml)?.versioning.versions.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoaderError;

    #[test]
    fn parse_forge_metadata() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
        <metadata>
            <groupId>net.minecraftforge</groupId>
            <artifactId>forge</artifactId>
            <versioning>
                <latest>1.20.1-47.2.0</latest>
                <versions>
                    <version>1.20.1-47.2.0</version>
                    <version>1.20.1-47.1.0</version>
                    <version>1.19.4-45.1.0</version>
                </versions>
            </versioning>
        </metadata>"#;

        let metadata = MavenMetadata::parse(xml).unwrap();
        assert_eq!(
            metadata.versioning.versions.version,
            vec!["1.20.1-47.2.0", "1.20.1-47.1.0", "1.19.4-45.1.0"]
        );
    }

    #[test]
    fn truncated_xml_is_an_xml_error() {
        assert!(matches!(
            MavenMetadata::parse("<metadata><versioning>"),
            Err(LoaderError::Xml(_))
        ));
    }
}
