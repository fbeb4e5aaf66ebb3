// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upload form
//!
//! After a successful submit the view layer calls [`UploadForm::tick`] every
//! [`UPLOAD_TICK`] and [`UploadForm::complete`] once [`UPLOAD_TIME`] has
//! passed, then navigates to [`PROCESSING_ROUTE`] after [`NAVIGATE_DELAY`].

use super::Notice;
use crate::entropy::Entropy;
use std::time::Duration;

pub const UPLOAD_TICK: Duration = Duration::from_millis(200);
pub const UPLOAD_TIME: Duration = Duration::from_millis(2500);
pub const NAVIGATE_DELAY: Duration = Duration::from_millis(500);
pub const PROCESSING_ROUTE: &str = "/processing/new";

/// Upper bound (exclusive) of one upload tick's increment
const UPLOAD_MAX_INCREMENT: f64 = 15.0;

/// A file picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    /// MIME type as reported by the picker, e.g. `video/mp4`
    pub content_type: String,
    pub size: u64,
}

/// What the form hands to processing once submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub project_name: String,
    pub file: SelectedFile,
}

#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub file: Option<SelectedFile>,
    pub project_name: String,
    uploading: bool,
    progress: f64,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a video file; the project name defaults to its stem
    pub fn select_file(&mut self, file: SelectedFile) -> Result<(), Notice> {
        if !file.content_type.starts_with("video/") {
            return Err(Notice::destructive(
                "Invalid file type",
                "Please upload a video file (MP4, MOV, WebM, etc.)",
            ));
        }
        if self.project_name.is_empty() {
            self.project_name = strip_extension(&file.name).to_string();
        }
        self.file = Some(file);
        Ok(())
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project_name = name.into();
    }

    pub fn remove_file(&mut self) {
        self.file = None;
        self.progress = 0.0;
    }

    /// True between a successful submit and [`UploadForm::complete`]
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Upload progress in `[0, 100]`
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Add one random step to the upload; ignored unless uploading
    pub fn tick(&mut self, entropy: &mut impl Entropy) -> f64 {
        if self.uploading && self.progress < 100.0 {
            let step = entropy.increment(UPLOAD_MAX_INCREMENT).max(0.0);
            self.progress = (self.progress + step).min(100.0);
        }
        self.progress
    }

    /// Finish the upload at 100%, returning the toast for it
    ///
    /// `None` if no upload is in flight.
    pub fn complete(&mut self) -> Option<Notice> {
        if !self.uploading {
            return None;
        }
        self.uploading = false;
        self.progress = 100.0;
        Some(Notice::info(
            "Upload complete!",
            "Your video is now being processed by AI.",
        ))
    }

    /// Validate and mark the form as uploading
    ///
    /// A submit while an upload is in flight returns the same request and
    /// leaves its progress alone.
    pub fn submit(&mut self) -> Result<UploadRequest, Notice> {
        let name = self.project_name.trim();
        let Some(file) = self.file.as_ref().filter(|_| !name.is_empty()) else {
            return Err(Notice::destructive(
                "Missing information",
                "Please provide both a video file and project name.",
            ));
        };
        let request = UploadRequest {
            project_name: name.to_string(),
            file: file.clone(),
        };
        if !self.uploading {
            self.uploading = true;
            self.progress = 0.0;
        }
        Ok(request)
    }
}

/// Drop the last `.ext` of a file name, if there is one
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() && !name[dot + 1..].contains('/') => &name[..dot],
        _ => name,
    }
}

/// Render a byte count the way the upload form shows it: `1.5 KB`, `45 MB`
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut exp = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && exp < UNITS.len() - 1 {
        value /= 1024.0;
        exp += 1;
    }
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", text, UNITS[exp])
}
