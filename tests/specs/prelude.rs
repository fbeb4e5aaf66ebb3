//! Shared helpers for CLI specs

#![allow(dead_code, deprecated)]

pub use assert_cmd::Command;
pub use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Timings short enough that a full run takes well under a second
pub const FAST_CONFIG: &str = r#"
tick_interval = "1ms"
settle_delay = "2ms"
start_delay = "1ms"
"#;

/// The `cf` binary with a clean environment
pub fn cf() -> Command {
    let mut cmd = Command::cargo_bin("cf").unwrap();
    cmd.env_remove("CF_CONFIG").env("CF_LOG", "off");
    cmd
}

/// Scratch directory for config files
pub struct Scratch {
    dir: TempDir,
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write `content` to `name` and return its path
    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn fast_config(&self) -> PathBuf {
        self.file("fast.toml", FAST_CONFIG)
    }

    /// `cf` with HOME and XDG dirs pointed here so no user config leaks in
    pub fn cf(&self) -> Command {
        let mut cmd = cf();
        cmd.env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"));
        cmd
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }
}
