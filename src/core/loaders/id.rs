use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::LoaderError;

/// Supported loaders. A closed set, dispatched exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoaderId {
    Vanilla,
    Fabric,
    Forge,
    NeoForge,
    OptiFine,
}

impl LoaderId {
    pub const ALL: [LoaderId; 5] = [
        LoaderId::Vanilla,
        LoaderId::Fabric,
        LoaderId::Forge,
        LoaderId::NeoForge,
        LoaderId::OptiFine,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LoaderId::Vanilla => "vanilla",
            LoaderId::Fabric => "fabric",
            LoaderId::Forge => "forge",
            LoaderId::NeoForge => "neoforge",
            LoaderId::OptiFine => "optifine",
        }
    }
}

impl fmt::Display for LoaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoaderId {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoaderId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| LoaderError::UnknownLoader(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        for id in LoaderId::ALL {
            assert_eq!(id.to_string().parse::<LoaderId>().unwrap(), id);
        }
    }

    #[test]
    fn parsing_is_exact() {
        assert!(matches!(
            "OptiFine".parse::<LoaderId>(),
            Err(LoaderError::UnknownLoader(id)) if id == "OptiFine"
        ));
        assert!("quilt".parse::<LoaderId>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_ids() {
        assert_eq!(
            serde_json::to_string(&LoaderId::NeoForge).unwrap(),
            "\"neoforge\""
        );
        let id: LoaderId = serde_json::from_str("\"optifine\"").unwrap();
        assert_eq!(id, LoaderId::OptiFine);
    }
}
