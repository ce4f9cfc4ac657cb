use std::path::{Path, PathBuf};

use tracing::info;

use super::capability::ModLoader;
use super::id::LoaderId;
use super::launch::{LaunchConfig, McLaunchConfig};
use crate::core::error::{LoaderError, LoaderResult};

/// `<loader>-<game version>-<loader version>`, used both as the MCLC custom
/// version id and as the install directory name.
pub fn custom_version_id(id: LoaderId, game_version: &str, loader_version: &str) -> String {
    format!("{id}-{game_version}-{loader_version}")
}

/// `<root>/versions/<custom version id>/`
pub fn version_dir(root: &Path, id: LoaderId, game_version: &str, loader_version: &str) -> PathBuf {
    root.join("versions")
        .join(custom_version_id(id, game_version, loader_version))
}

/// Versions become a directory name and part of a download URL, so they must
/// stay a single path component.
pub fn check_version_component(version: &str) -> LoaderResult<()> {
    if version.is_empty()
        || version.contains('/')
        || version.contains('\\')
        || version.contains("..")
    {
        return Err(LoaderError::InvalidVersion(version.to_string()));
    }
    Ok(())
}

/// Build a launch config for a mod loader:
///
/// 1. take `config.loader_version`, or else the *first* entry of
///    `list_loader_versions(game_version)`. That is whatever upstream listed
///    first, not necessarily the newest build;
/// 2. if nothing resolves, fail with [`LoaderError::InvalidVersion`] without
///    downloading anything. The same goes for a version that is not a single
///    path component;
/// 3. download the artifact into [`version_dir`];
/// 4. return the generic fields plus the loader's artifact field.
pub async fn build_launch_config<L>(
    loader: &L,
    config: &LaunchConfig,
) -> LoaderResult<McLaunchConfig>
where
    L: ModLoader + ?Sized,
{
    let game_version = config.game_version.as_str();
    check_version_component(game_version)?;

    let loader_version = match config.requested_loader_version() {
        Some(version) => version.to_string(),
        None => {
            let candidates = loader.list_loader_versions(game_version).await?;
            let first = candidates
                .into_iter()
                .next()
                .ok_or_else(|| LoaderError::InvalidVersion(game_version.to_string()))?;
            info!(
                "Resolved {} {} for Minecraft {} (first listed)",
                loader.id(),
                first,
                game_version
            );
            first
        }
    };

    check_version_component(&loader_version)?;

    let id = loader.id();
    let artifact = loader.artifact(game_version, &loader_version)?;
    let artifact_path =
        version_dir(&config.root_path, id, game_version, &loader_version).join(&artifact.file_name);

    loader
        .downloader()
        .download(&artifact.url, &artifact_path)
        .await?;

    let mut launch = McLaunchConfig::release(&config.root_path, game_version)
        .with_custom(custom_version_id(id, game_version, &loader_version));
    if let Some(field) = artifact.launch_field {
        launch = launch.with_extension(field, artifact_path.to_string_lossy().into_owned());
    }

    info!("{} {} ready for Minecraft {}", id, loader_version, game_version);
    Ok(launch)
}
