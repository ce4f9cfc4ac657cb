pub mod builder;
pub mod capability;
pub mod context;
pub mod fabric;
pub mod forge;
pub mod id;
pub mod launch;
pub mod neoforge;
pub mod optifine;
pub mod registry;
pub mod vanilla;

pub use builder::{build_launch_config, check_version_component, custom_version_id, version_dir};
pub use capability::{Artifact, ModLoader, ModsIntegration};
pub use context::LoaderContext;
pub use id::LoaderId;
pub use launch::{LaunchConfig, McLaunchConfig, McVersion};
pub use registry::{Loader, LoaderRegistry};
pub use vanilla::VanillaLoader;
