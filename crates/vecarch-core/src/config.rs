//! Probe configuration.
//!
//! Sources are merged with figment, later ones overriding earlier ones:
//!
//! 1. defaults (nothing disabled)
//! 2. an optional TOML file (`disabled = ["avx512f"]`)
//! 3. `VECARCH_*` environment variables (`VECARCH_DISABLED=avx512f,fma3+avx2`)
//!
//! Disabling a tag also disables every tag that builds on it, so
//! `disabled = ["avx"]` turns off AVX2, the FMA3 AVX tags and AVX-512 too.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Deserializer, Serialize};

use crate::arch::ArchId;
use crate::error::ConfigError;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "VECARCH_";

/// Runtime overrides applied to the detected feature snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Tags to report as unavailable, by canonical name.
    #[serde(deserialize_with = "names_or_list")]
    pub disabled: Vec<String>,
}

impl ProbeConfig {
    /// Defaults merged with the environment.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads the configuration from `VECARCH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::figment().extract()?)
    }

    /// Loads the configuration from a TOML file, with the environment on top.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?)
    }

    /// Adds a tag name to the disabled list.
    #[must_use]
    pub fn disable(mut self, name: impl Into<String>) -> Self {
        self.disabled.push(name.into());
        self
    }

    /// Resolves the disabled names against the tag catalogue.
    pub fn disabled_archs(&self) -> Result<Vec<ArchId>, ConfigError> {
        self.disabled
            .iter()
            .map(|name| name.parse::<ArchId>().map_err(ConfigError::from))
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NamesOrList {
    Names(String),
    List(Vec<String>),
}

// Environment variables arrive as one comma-separated string.
fn names_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NamesOrList::deserialize(deserializer)? {
        NamesOrList::Names(names) => names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect(),
        NamesOrList::List(list) => list,
    })
}
