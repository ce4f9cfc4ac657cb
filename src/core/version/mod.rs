pub mod manifest;
pub mod scrape;
pub mod source;

pub use manifest::{LatestVersions, ManifestSource, VersionEntry, VersionManifest, VersionType};
pub use scrape::{ListingScraper, TokenPattern};
pub use source::{VersionInfo, VersionSource};
