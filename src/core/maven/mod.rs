mod metadata;

pub use metadata::MavenMetadata;

/// Maven group paths of the loader installers.
pub const FORGE_GROUP_PATH: &str = "net/minecraftforge/forge";
pub const NEOFORGE_GROUP_PATH: &str = "net/neoforged/neoforge";

/// `<repository>/<group path>/maven-metadata.xml`
pub fn metadata_url(repository: &str, group_path: &str) -> String {
    format!(
        "{}/{}/maven-metadata.xml",
        repository.trim_end_matches('/'),
        group_path
    )
}
