// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery
//!
//! Lookup order: `--config`, then `$CF_CONFIG`, then
//! `<config_dir>/clipflow/config.toml` when it exists, then built-in defaults.

use crate::error::CfError;
use cf_core::SimulatorConfig;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "CF_CONFIG";

/// Where the effective config came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Flag(PathBuf),
    Env(PathBuf),
    UserDir(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Flag(p) | ConfigSource::Env(p) | ConfigSource::UserDir(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

/// Pick the config source. A user-dir file only counts if it exists; an
/// explicit path is always used so a typo is reported instead of ignored.
pub fn locate(
    flag: Option<PathBuf>,
    env: Option<PathBuf>,
    config_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(path) = flag {
        return ConfigSource::Flag(path);
    }
    if let Some(path) = env.filter(|p| !p.as_os_str().is_empty()) {
        return ConfigSource::Env(path);
    }
    match config_dir.map(|dir| dir.join("clipflow").join("config.toml")) {
        Some(path) if path.is_file() => ConfigSource::UserDir(path),
        _ => ConfigSource::Defaults,
    }
}

/// Resolve and load the config for this invocation
pub fn resolve(flag: Option<PathBuf>) -> Result<SimulatorConfig, CfError> {
    let env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let source = locate(flag, env, dirs::config_dir());

    let Some(path) = source.path() else {
        tracing::debug!("using default config");
        return Ok(SimulatorConfig::default());
    };
    tracing::debug!(path = %path.display(), ?source, "loading config");
    SimulatorConfig::load(path).map_err(|e| CfError::config(path, e))
}
