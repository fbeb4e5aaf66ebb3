// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Studio view state around the processing flow
//!
//! Plain in-memory state for the dashboard, upload form, preview editor and
//! export picker. Operations that would pop a toast return a [`Notice`]
//! instead; delivering it is the view layer's job.

pub mod dashboard;
pub mod export;
pub mod preview;
pub mod upload;

pub use dashboard::{Dashboard, Project, ProjectStatus};
pub use export::{ExportOption, ExportPicker, ExportPlan, ExportState, EXPORT_TIME};
pub use preview::{DocumentationStep, PreviewEditor, ScriptSegment};
pub use upload::{
    format_file_size, SelectedFile, UploadForm, UploadRequest, NAVIGATE_DELAY, PROCESSING_ROUTE,
    UPLOAD_TICK, UPLOAD_TIME,
};

use serde::Serialize;

/// How a notice should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Info,
    Destructive,
}

/// A toast-style message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub tone: Tone,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            tone: Tone::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            tone: Tone::Destructive,
            title: title.into(),
            description: description.into(),
        }
    }
}
