//! Repository configuration
//!
//! Stored as TOML in `.minigit/config`:
//!
//! ```toml
//! [core]
//! hash = "sha1"
//! ```
//!
//! A few knobs come from the environment instead:
//!
//! - `MINIGIT_HASH_ALGORITHM`: algorithm written into the config by `init`
//! - `MINIGIT_COMMITTER_DATE`: fixed commit timestamp, `%Y-%m-%d %H:%M:%S`
//! - `NO_PAGER`: never page `log` output

use crate::areas::storage::Storage;
use crate::artifacts::objects::hash_algorithm::HashAlgorithm;
use anyhow::Context;
use chrono::NaiveDateTime;
use is_terminal::IsTerminal;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const HASH_ALGORITHM_ENV: &str = "MINIGIT_HASH_ALGORITHM";
pub const COMMITTER_DATE_ENV: &str = "MINIGIT_COMMITTER_DATE";
pub const NO_PAGER_ENV: &str = "NO_PAGER";

const COMMITTER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub core: CoreConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub hash: HashAlgorithm,
}

impl Config {
    /// Config for a fresh repository, honouring `MINIGIT_HASH_ALGORITHM`
    pub fn from_env() -> anyhow::Result<Self> {
        Self::with_hash_setting(std::env::var(HASH_ALGORITHM_ENV).ok().as_deref())
    }

    fn with_hash_setting(setting: Option<&str>) -> anyhow::Result<Self> {
        let hash = match setting {
            Some(name) if !name.trim().is_empty() => HashAlgorithm::try_from(name)
                .with_context(|| format!("invalid {HASH_ALGORITHM_ENV}"))?,
            _ => HashAlgorithm::default(),
        };

        Ok(Config {
            core: CoreConfig { hash },
        })
    }

    /// Load the config file, or the defaults if there is none
    pub fn load(storage: &dyn Storage, path: &Path) -> anyhow::Result<Self> {
        match storage.read(path)? {
            Some(content) => {
                let content = std::str::from_utf8(&content)
                    .with_context(|| format!("config file {} is not UTF-8", path.display()))?;
                toml::from_str(content)
                    .with_context(|| format!("failed to parse config file {}", path.display()))
            }
            None => Ok(Config::default()),
        }
    }

    pub fn save(&self, storage: &dyn Storage, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self).context("failed to serialize config")?;
        storage.write(path, content.as_bytes())
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.core.hash
    }
}

/// Timestamp override for new commits
pub fn committer_date() -> anyhow::Result<Option<NaiveDateTime>> {
    match std::env::var(COMMITTER_DATE_ENV) {
        Ok(raw) if !raw.trim().is_empty() => parse_committer_date(&raw).map(Some),
        _ => Ok(None),
    }
}

fn parse_committer_date(raw: &str) -> anyhow::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), COMMITTER_DATE_FORMAT).with_context(|| {
        format!("{COMMITTER_DATE_ENV} must look like 2024-01-31 13:45:00, got '{raw}'")
    })
}

/// Whether long output should go through the pager
pub fn pager_enabled() -> bool {
    std::env::var_os(NO_PAGER_ENV).is_none() && std::io::stdout().is_terminal()
}
