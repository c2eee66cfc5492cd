//! Simulator configuration.
use std::env;
use std::path::PathBuf;

use battle_runtime::RuntimeConfig;

/// Settings for one simulated battle.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Directory holding `config.toml`, the RON catalogs and `encounters/`.
    pub content_dir: PathBuf,
    pub encounter: String,
    /// Print events as JSON lines instead of prose.
    pub json: bool,
    pub runtime: RuntimeConfig,
}

impl SimConfig {
    pub const DEFAULT_ENCOUNTER: &'static str = "harbor_brawl";

    /// Construct simulator configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_CONTENT_DIR` - Content directory (default: the shipped data)
    /// - `BATTLE_ENCOUNTER` - Encounter file stem (default: `harbor_brawl`)
    /// - `BATTLE_JSON` - `true` to emit JSON lines
    ///
    /// plus everything [`RuntimeConfig::from_env`] reads.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("BATTLE_CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }

        if let Ok(encounter) = env::var("BATTLE_ENCOUNTER") {
            config.encounter = encounter;
        }

        if let Some(json) = read_env::<bool>("BATTLE_JSON") {
            config.json = json;
        }

        config.runtime = RuntimeConfig::from_env();
        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../battle/content/data"),
            encounter: Self::DEFAULT_ENCOUNTER.to_string(),
            json: false,
            runtime: RuntimeConfig::default(),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let raw = env::var(key).ok()?;
    let parsed = raw.parse().ok();
    if parsed.is_none() {
        tracing::warn!(key, value = %raw, "ignoring unparsable environment variable");
    }
    parsed
}
