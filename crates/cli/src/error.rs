// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors the `cf` binary prints before exiting non-zero

use cf_core::{ConfigError, SimulatorError};
use std::fmt;
use std::path::Path;

/// A failure worth showing to a person, with notes on what happened and hints
/// on what to do next
#[derive(Debug)]
pub struct CfError {
    pub message: String,
    pub context: Vec<String>,
    pub suggestions: Vec<String>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CfError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for CfError {
    /// Renders as a headline followed by `note:` and `help:` lines
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;
        for note in &self.context {
            writeln!(f, "  = note: {note}")?;
        }
        for help in &self.suggestions {
            writeln!(f, "  = help: {help}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Builders for the failures the CLI reports
impl CfError {
    /// A config file could not be read or parsed
    pub fn config(path: &Path, err: ConfigError) -> Self {
        let base = match &err {
            ConfigError::Io { .. } => {
                CfError::new(format!("Cannot read config file '{}'", path.display()))
                    .with_context(err.to_string())
                    .with_suggestion("Check the path passed to --config or set in CF_CONFIG")
            }
            ConfigError::Parse(_) => {
                CfError::new(format!("Config file '{}' is not valid TOML", path.display()))
                    .with_context(err.to_string())
                    .with_suggestion("Durations are written as strings, e.g. tick_interval = \"150ms\"")
            }
            ConfigError::Invalid(_) => {
                CfError::new(format!("Config file '{}' has invalid values", path.display()))
                    .with_context(err.to_string())
                    .with_suggestion("tick_interval and max_increment must be above zero")
                    .with_suggestion("display_cap must be at least 0 and below 100")
            }
        };
        base.with_source(err)
    }

    /// The pipeline refused to start
    pub fn start_failed(err: SimulatorError) -> Self {
        CfError::new("Cannot start processing")
            .with_context(err.to_string())
            .with_suggestion("List the stock stages with: cf stages")
            .with_source(err)
    }

    /// Ctrl-C stopped a run before it finished
    pub fn cancelled(run_id: &str, completed: usize, total: usize) -> Self {
        CfError::new(format!("Processing of '{}' was cancelled", run_id))
            .with_context(format!("{} of {} stages had completed", completed, total))
            .with_suggestion("Start again with: cf process")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::{RunId, SimulatorConfig};
    use std::path::PathBuf;

    #[test]
    fn error_display_lists_context_and_suggestions() {
        let err = CfError::new("Something went wrong")
            .with_context("First context")
            .with_context("Second context")
            .with_suggestion("Try this")
            .with_suggestion("Or this");

        let output = format!("{}", err);
        assert_eq!(
            output,
            "error: Something went wrong\n\
             \x20 = note: First context\n\
             \x20 = note: Second context\n\
             \x20 = help: Try this\n\
             \x20 = help: Or this\n"
        );
    }

    #[test]
    fn invalid_config_names_the_file() {
        let path = PathBuf::from("/tmp/clipflow.toml");
        let err = SimulatorConfig::from_toml_str("display_cap = 150.0").unwrap_err();
        let output = CfError::config(&path, err).to_string();
        assert!(output.contains("/tmp/clipflow.toml"));
        assert!(output.contains("invalid values"));
        assert!(output.contains("display_cap"));
    }

    #[test]
    fn start_failure_keeps_the_cause() {
        let err = CfError::start_failed(SimulatorError::AlreadyStarted(RunId::from("run-1")));
        assert!(err.to_string().contains("run-1"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn cancelled_reports_progress() {
        let output = CfError::cancelled("run-7", 2, 4).to_string();
        assert!(output.contains("'run-7' was cancelled"));
        assert!(output.contains("2 of 4 stages"));
    }
}
