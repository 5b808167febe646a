//! Agent configuration from `key=value` argument strings.
//!
//! Agents are configured with a whitespace-separated list of pairs, for
//! example `"name=mcts role=black N=1000 c=0.5 seed=7"`. Later pairs
//! override earlier ones, and `name=random role=unknown` is always applied
//! first so every agent has both keys.
//!
//! Recognized keys:
//! - `name` - agent name, must not contain any of `[]():; `
//! - `role` - `black` or `white`
//! - `N` - simulations per move (default [`N_SIMS`])
//! - `c` - exploration weight (default [`EXPLORATION`])
//! - `seed` - random seed; without it the generator is seeded from entropy
//!
//! Any other key is kept and can be read back with [`AgentConfig::property`].

use std::collections::BTreeMap;
use std::str::FromStr;

use thiserror::Error;

use crate::board::Color;
use crate::constants::{EXPLORATION, N_SIMS};
use crate::mcts::SearchConfig;

/// Characters that may not appear in an agent name.
const RESERVED_NAME_CHARS: &str = "[]():; ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("malformed argument '{0}', expected key=value")]
    Malformed(String),
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("invalid role: {0}")]
    InvalidRole(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    meta: BTreeMap<String, String>,
    pub name: String,
    pub role: Color,
    pub search: SearchConfig,
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Look up a raw property value.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    /// Update a single property from a `key=value` message.
    ///
    /// The configuration is left untouched if the new value does not validate.
    pub fn notify(&mut self, msg: &str) -> Result<(), ConfigError> {
        let (key, value) = split_pair(msg)?;
        let mut meta = self.meta.clone();
        meta.insert(key.to_string(), value.to_string());
        *self = Self::from_meta(meta)?;
        Ok(())
    }

    fn from_meta(meta: BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let name = meta.get("name").cloned().unwrap_or_default();
        if name.chars().any(|c| RESERVED_NAME_CHARS.contains(c)) {
            return Err(ConfigError::InvalidName(name));
        }

        let role_str = meta.get("role").map(String::as_str).unwrap_or("unknown");
        let role = match role_str {
            "black" => Color::Black,
            "white" => Color::White,
            other => return Err(ConfigError::InvalidRole(other.to_string())),
        };

        let simulations = parse_key(&meta, "N")?.unwrap_or(N_SIMS);
        let exploration = parse_key::<f64>(&meta, "c")?.unwrap_or(EXPLORATION);
        if !exploration.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "c".into(),
                value: exploration.to_string(),
            });
        }
        let seed = parse_key(&meta, "seed")?;

        Ok(Self {
            meta,
            name,
            role,
            search: SearchConfig::new(simulations, exploration),
            seed,
        })
    }
}

impl FromStr for AgentConfig {
    type Err = ConfigError;

    fn from_str(args: &str) -> Result<Self, Self::Err> {
        let mut meta = BTreeMap::new();
        let full = format!("name=random role=unknown {args}");
        for pair in full.split_whitespace() {
            let (key, value) = split_pair(pair)?;
            meta.insert(key.to_string(), value.to_string());
        }
        Self::from_meta(meta)
    }
}

fn split_pair(pair: &str) -> Result<(&str, &str), ConfigError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(ConfigError::Malformed(pair.to_string())),
    }
}

fn parse_key<T: FromStr>(meta: &BTreeMap<String, String>, key: &str) -> Result<Option<T>, ConfigError> {
    meta.get(key)
        .map(|value| {
            value.parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.clone(),
            })
        })
        .transpose()
}
