pub mod core;

use tracing_subscriber::EnvFilter;

pub use crate::core::downloader::ArtifactDownloader;
pub use crate::core::error::{LoaderError, LoaderResult};
pub use crate::core::loaders::{
    LaunchConfig, Loader, LoaderContext, LoaderId, LoaderRegistry, McLaunchConfig, ModLoader,
    VanillaLoader,
};
pub use crate::core::settings::LoaderSettings;
pub use crate::core::version::{VersionInfo, VersionManifest, VersionSource};

/// Install the structured logger. `RUST_LOG` overrides the default filter.
/// Safe to call more than once; only the first call takes effect.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,modloader=debug")),
        )
        .try_init();
}
