//! Engine configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::order::Direction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Direction applied by the planner when a sort step does not name one.
    pub default_direction: Direction,

    /// Pretty-print JSON output in the CLI.
    pub pretty_output: bool,

    /// `tracing-subscriber` env-filter directive used by the CLI.
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_direction: Direction::Ascending,
            pretty_output: false,
            log_filter: "warn".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `SEQLINE_DEFAULT_DIRECTION`: `asc` or `desc`
    /// - `SEQLINE_PRETTY`: `1`/`true` to pretty-print output
    /// - `SEQLINE_LOG`: tracing filter directive (e.g. `seqline_operators=trace`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] but reading from an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(s) = lookup("SEQLINE_DEFAULT_DIRECTION") {
            if let Ok(v) = s.parse::<Direction>() {
                cfg.default_direction = v;
            }
        }

        if let Some(s) = lookup("SEQLINE_PRETTY") {
            cfg.pretty_output = matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        if let Some(s) = lookup("SEQLINE_LOG") {
            if !s.trim().is_empty() {
                cfg.log_filter = s;
            }
        }

        cfg
    }
}
