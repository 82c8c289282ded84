//! Scenario files
//!
//! A scenario is a JSON description of memories and associations that the
//! CLI replays through `create_memory` / `create_association` to seed a store:
//!
//! ```json
//! {
//!   "config": { "decayRate": 0.2 },
//!   "memories": [
//!     { "content": "Python", "tags": ["programming"], "context": { "domain": "backend" } }
//!   ],
//!   "associations": [
//!     { "source": "Python", "target": "Django", "strength": 0.8 }
//!   ]
//! }
//! ```
//!
//! Configuration is layered: defaults, then the scenario's `config`, then
//! `MNEMOS_*` environment variables.

use std::path::Path;

use anyhow::Context as _;
use mnemos_core::{
    AssociativeMemory, Context, MemoryConfig, DEFAULT_ASSOCIATION_KIND,
    DEFAULT_ASSOCIATION_STRENGTH,
};
use serde::Deserialize;

/// A memory to create
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MemorySeed {
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub context: Context,
}

/// An association to create
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssociationSeed {
    pub source: String,
    pub target: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default = "default_strength")]
    pub strength: f64,
    #[serde(default)]
    pub context: Context,
}

fn default_kind() -> String {
    DEFAULT_ASSOCIATION_KIND.to_string()
}

fn default_strength() -> f64 {
    DEFAULT_ASSOCIATION_STRENGTH
}

/// Contents of a scenario file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub config: MemoryConfig,
    #[serde(default)]
    pub memories: Vec<MemorySeed>,
    #[serde(default)]
    pub associations: Vec<AssociationSeed>,
}

impl Scenario {
    /// Read and parse a scenario file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse scenario {}", path.display()))
    }

    /// Build a store, applying environment overrides to the scenario's config
    pub fn seed(&self) -> anyhow::Result<AssociativeMemory> {
        let config = apply_env_overrides(self.config, |name| std::env::var(name).ok())?;
        let mut memory = AssociativeMemory::with_config(config).context("Invalid configuration")?;

        for seed in &self.memories {
            memory.create_memory(seed.content.as_str(), &seed.tags, seed.context.clone());
        }
        for seed in &self.associations {
            memory.create_association(
                seed.source.as_str(),
                seed.target.as_str(),
                &seed.kind,
                seed.strength,
                seed.context.clone(),
            );
        }

        tracing::info!(
            memories = memory.len(),
            associations = memory.association_count(),
            "Seeded memory from scenario"
        );
        Ok(memory)
    }
}

/// Override config fields from `MNEMOS_*` variables, as resolved by `lookup`
pub fn apply_env_overrides(
    mut config: MemoryConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<MemoryConfig> {
    let fields: [(&str, &mut f64); 4] = [
        ("MNEMOS_DECAY_RATE", &mut config.decay_rate),
        ("MNEMOS_REINFORCEMENT_BOOST", &mut config.reinforcement_boost),
        ("MNEMOS_ASSOCIATION_THRESHOLD", &mut config.association_threshold),
        ("MNEMOS_FORGETTING_THRESHOLD", &mut config.forgetting_threshold),
    ];

    for (name, slot) in fields {
        if let Some(raw) = lookup(name) {
            *slot = raw
                .trim()
                .parse()
                .with_context(|| format!("{} is not a number: {:?}", name, raw))?;
        }
    }

    Ok(config)
}
