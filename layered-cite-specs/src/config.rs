//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Which resource identity the resolution pass uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Identity {
    /// Every full citation is its own resource.
    Reference,
    /// Equivalent full citations share one resource.
    Comparison,
}

impl Default for Identity {
    fn default() -> Self {
        Identity::Reference
    }
}

/// Configuration for running a fixture, read from its `[options]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub identity: Identity,
}

impl PipelineConfig {
    /// Default heuristics with reference identity.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Default heuristics with comparison identity.
    pub fn comparison() -> Self {
        Self {
            identity: Identity::Comparison,
        }
    }
}
