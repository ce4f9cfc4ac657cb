// ─── Loader Resolution Core ───
// Finds mod-loader versions for a game version, installs the loader artifact
// and assembles the partial launch config for an external launcher.
//
// Architecture:
//   core/
//     version/    : VersionSource: Mojang manifest + scraped listings
//     maven/      : maven-metadata.xml reader (Forge, NeoForge)
//     downloader/ : Streaming artifact downloads, per-path single flight
//     loaders/    : Vanilla, Fabric, Forge, NeoForge, OptiFine + registry
//     settings    : Endpoints and timeouts
//     http        : Shared reqwest client

pub mod downloader;
pub mod error;
pub mod http;
pub mod loaders;
pub mod maven;
pub mod settings;
pub mod version;
