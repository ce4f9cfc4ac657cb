use tracing::debug;

use super::capability::ModLoader;
use super::context::LoaderContext;
use super::fabric::FabricLoader;
use super::forge::ForgeLoader;
use super::id::LoaderId;
use super::launch::{LaunchConfig, McLaunchConfig};
use super::neoforge::NeoForgeLoader;
use super::optifine::OptiFineLoader;
use super::vanilla::VanillaLoader;
use crate::core::error::LoaderResult;
use crate::core::settings::LoaderSettings;

/// One variant per loader id. Adding a loader is a compile-checked change.
pub enum Loader {
    Vanilla(VanillaLoader),
    Fabric(FabricLoader),
    Forge(ForgeLoader),
    NeoForge(NeoForgeLoader),
    OptiFine(OptiFineLoader),
}

impl Loader {
    pub fn new(id: LoaderId, ctx: &LoaderContext) -> Self {
        match id {
            LoaderId::Vanilla => Self::Vanilla(VanillaLoader::new(ctx)),
            LoaderId::Fabric => Self::Fabric(FabricLoader::new(ctx)),
            LoaderId::Forge => Self::Forge(ForgeLoader::new(ctx)),
            LoaderId::NeoForge => Self::NeoForge(NeoForgeLoader::new(ctx)),
            LoaderId::OptiFine => Self::OptiFine(OptiFineLoader::new(ctx)),
        }
    }

    pub fn id(&self) -> LoaderId {
        match self {
            Loader::Vanilla(l) => l.id(),
            Loader::Fabric(l) => l.id(),
            Loader::Forge(l) => l.id(),
            Loader::NeoForge(l) => l.id(),
            Loader::OptiFine(l) => l.id(),
        }
    }

    pub fn url(&self) -> &'static str {
        match self.as_mod_loader() {
            Some(l) => l.url(),
            None => VanillaLoader::URL,
        }
    }

    /// The full capability; `None` for vanilla, which has no loader versions.
    pub fn as_mod_loader(&self) -> Option<&dyn ModLoader> {
        match self {
            Loader::Vanilla(_) => None,
            Loader::Fabric(l) => Some(l as &dyn ModLoader),
            Loader::Forge(l) => Some(l as &dyn ModLoader),
            Loader::NeoForge(l) => Some(l as &dyn ModLoader),
            Loader::OptiFine(l) => Some(l as &dyn ModLoader),
        }
    }

    pub fn as_vanilla(&self) -> Option<&VanillaLoader> {
        match self {
            Loader::Vanilla(l) => Some(l),
            _ => None,
        }
    }

    pub async fn get_mclc_launch_config(
        &self,
        config: &LaunchConfig,
    ) -> LoaderResult<McLaunchConfig> {
        match self {
            Loader::Vanilla(l) => l.get_mclc_launch_config(config),
            Loader::Fabric(l) => l.get_mclc_launch_config(config).await,
            Loader::Forge(l) => l.get_mclc_launch_config(config).await,
            Loader::NeoForge(l) => l.get_mclc_launch_config(config).await,
            Loader::OptiFine(l) => l.get_mclc_launch_config(config).await,
        }
    }
}

/// Entry point for callers: one loader per id, built once and shared.
/// Holds no mutable state of its own.
pub struct LoaderRegistry {
    vanilla: Loader,
    fabric: Loader,
    forge: Loader,
    neoforge: Loader,
    optifine: Loader,
}

impl LoaderRegistry {
    pub fn new(ctx: LoaderContext) -> Self {
        Self {
            vanilla: Loader::new(LoaderId::Vanilla, &ctx),
            fabric: Loader::new(LoaderId::Fabric, &ctx),
            forge: Loader::new(LoaderId::Forge, &ctx),
            neoforge: Loader::new(LoaderId::NeoForge, &ctx),
            optifine: Loader::new(LoaderId::OptiFine, &ctx),
        }
    }

    pub fn from_settings(settings: LoaderSettings) -> LoaderResult<Self> {
        Ok(Self::new(LoaderContext::new(settings)?))
    }

    pub fn resolve(&self, id: LoaderId) -> &Loader {
        match id {
            LoaderId::Vanilla => &self.vanilla,
            LoaderId::Fabric => &self.fabric,
            LoaderId::Forge => &self.forge,
            LoaderId::NeoForge => &self.neoforge,
            LoaderId::OptiFine => &self.optifine,
        }
    }

    /// Resolve a loader by its string id. Unknown ids are an error, never a
    /// fallback to some default loader.
    pub fn resolve_str(&self, id: &str) -> LoaderResult<&Loader> {
        let id: LoaderId = id.parse()?;
        debug!("Resolved loader {}", id);
        Ok(self.resolve(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoaderError;

    fn registry() -> LoaderRegistry {
        LoaderRegistry::from_settings(LoaderSettings::default()).unwrap()
    }

    #[test]
    fn every_id_resolves_to_its_own_loader() {
        let registry = registry();
        for id in LoaderId::ALL {
            assert_eq!(registry.resolve(id).id(), id);
        }
    }

    #[test]
    fn mod_loaders_expose_full_capability() {
        let registry = registry();
        for id in [
            LoaderId::Fabric,
            LoaderId::Forge,
            LoaderId::NeoForge,
            LoaderId::OptiFine,
        ] {
            let loader = registry.resolve(id).as_mod_loader().unwrap();
            assert_eq!(loader.id(), id);
            assert!(loader.mods().curseforge_category.is_some());
        }
    }

    #[test]
    fn vanilla_is_the_narrow_capability() {
        let registry = registry();
        let loader = registry.resolve_str("vanilla").unwrap();
        assert!(loader.as_mod_loader().is_none());
        assert!(loader.as_vanilla().is_some());
        assert_eq!(loader.url(), "https://www.minecraft.net/");
    }

    #[test]
    fn unknown_id_fails_closed() {
        assert!(matches!(
            registry().resolve_str("bogus"),
            Err(LoaderError::UnknownLoader(id)) if id == "bogus"
        ));
    }

    #[test]
    fn registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LoaderRegistry>();
    }
}
