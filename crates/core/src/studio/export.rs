// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Export option picker
//!
//! Selecting, then exporting, then complete. The view layer calls
//! [`ExportPicker::finish_export`] once [`EXPORT_TIME`] has passed.

use super::Notice;
use serde::Serialize;
use std::time::Duration;

pub const EXPORT_TIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportOption {
    pub id: String,
    pub title: String,
    pub description: String,
    pub format: String,
    /// Approximate output size, display only
    pub size: String,
    pub selected: bool,
}

/// What an accepted export produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlan {
    pub options: Vec<ExportOption>,
    pub notice: Notice,
}

/// Where the picker is in the export flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportState {
    Selecting,
    /// Options captured when the export began
    Exporting(Vec<ExportOption>),
    Complete(Vec<ExportOption>),
}

#[derive(Debug, Clone)]
pub struct ExportPicker {
    options: Vec<ExportOption>,
    state: ExportState,
}

fn option(
    id: &str,
    title: &str,
    description: &str,
    format: &str,
    size: &str,
    selected: bool,
) -> ExportOption {
    ExportOption {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        format: format.to_string(),
        size: size.to_string(),
        selected,
    }
}

impl ExportPicker {
    pub fn new(options: Vec<ExportOption>) -> Self {
        Self {
            options,
            state: ExportState::Selecting,
        }
    }

    /// HD video and PDF docs preselected
    pub fn standard() -> Self {
        Self::new(vec![
            option(
                "video-hd",
                "HD Video",
                "Full quality video with AI voiceover and captions",
                "MP4",
                "~45 MB",
                true,
            ),
            option(
                "video-sd",
                "SD Video",
                "Compressed video for faster sharing",
                "MP4",
                "~15 MB",
                false,
            ),
            option(
                "docs-pdf",
                "Documentation (PDF)",
                "Step-by-step guide with screenshots",
                "PDF",
                "~2 MB",
                true,
            ),
            option(
                "docs-md",
                "Documentation (Markdown)",
                "Plain text documentation for wikis",
                "MD",
                "~50 KB",
                false,
            ),
        ])
    }

    pub fn options(&self) -> &[ExportOption] {
        &self.options
    }

    pub fn state(&self) -> &ExportState {
        &self.state
    }

    pub fn is_exporting(&self) -> bool {
        matches!(self.state, ExportState::Exporting(_))
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, ExportState::Complete(_))
    }

    /// Page heading and subtitle for the current state
    pub fn heading(&self) -> (&'static str, &'static str) {
        if self.is_complete() {
            ("Export Complete!", "Your files are ready for download.")
        } else {
            (
                "Export Your Project",
                "Select the formats you'd like to export.",
            )
        }
    }

    /// Flip one option; selection is frozen once an export has begun
    pub fn toggle(&mut self, id: &str) {
        if self.state != ExportState::Selecting {
            return;
        }
        if let Some(opt) = self.options.iter_mut().find(|o| o.id == id) {
            opt.selected = !opt.selected;
        }
    }

    pub fn selected(&self) -> impl Iterator<Item = &ExportOption> {
        self.options.iter().filter(|o| o.selected)
    }

    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }

    /// Start exporting the selected options
    ///
    /// Returns the options being exported. Calling it again while an export
    /// is running or done returns the captured options unchanged.
    pub fn begin_export(&mut self) -> Result<Vec<ExportOption>, Notice> {
        match &self.state {
            ExportState::Exporting(options) | ExportState::Complete(options) => {
                return Ok(options.clone())
            }
            ExportState::Selecting => {}
        }
        let options: Vec<ExportOption> = self.selected().cloned().collect();
        if options.is_empty() {
            return Err(Notice::destructive(
                "No options selected",
                "Please select at least one export option.",
            ));
        }
        self.state = ExportState::Exporting(options.clone());
        Ok(options)
    }

    /// Mark the running export done; `None` unless one is running
    pub fn finish_export(&mut self) -> Option<ExportPlan> {
        let ExportState::Exporting(options) = &self.state else {
            return None;
        };
        let options = options.clone();
        let notice = Notice::info(
            "Export complete!",
            format!("{} file(s) are ready for download.", options.len()),
        );
        self.state = ExportState::Complete(options.clone());
        Some(ExportPlan { options, notice })
    }

    /// Toast for a download request; only offered once the export is done
    pub fn download_all(&self) -> Option<Notice> {
        self.is_complete().then(|| {
            Notice::info(
                "Download started",
                "Your files are being prepared for download.",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_picker_preselects_two() {
        let picker = ExportPicker::standard();
        assert_eq!(picker.selected_count(), 2);
        assert_eq!(picker.options().len(), 4);
    }

    #[test]
    fn toggle_flips_selection() {
        let mut picker = ExportPicker::standard();
        picker.toggle("docs-md");
        picker.toggle("video-hd");
        let ids: Vec<&str> = picker.selected().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["docs-pdf", "docs-md"]);
    }

    #[test]
    fn selection_is_frozen_once_exporting() {
        let mut picker = ExportPicker::standard();
        picker.begin_export().unwrap();
        picker.toggle("video-sd");
        assert_eq!(picker.selected_count(), 2);
    }

    #[test]
    fn toggling_unknown_id_changes_nothing() {
        let mut picker = ExportPicker::standard();
        picker.toggle("gif");
        assert_eq!(picker.selected_count(), 2);
    }

    #[test]
    fn export_requires_a_selection() {
        let mut picker = ExportPicker::standard();
        picker.toggle("video-hd");
        picker.toggle("docs-pdf");
        let notice = picker.begin_export().unwrap_err();
        assert_eq!(notice.title, "No options selected");
        assert_eq!(picker.state(), &ExportState::Selecting);
    }

    #[test]
    fn export_moves_through_each_state() {
        let mut picker = ExportPicker::standard();
        assert_eq!(picker.state(), &ExportState::Selecting);
        assert_eq!(picker.heading().0, "Export Your Project");
        assert!(picker.finish_export().is_none());

        let exporting = picker.begin_export().unwrap();
        assert!(picker.is_exporting());
        assert_eq!(exporting.len(), 2);
        assert!(picker.download_all().is_none());

        let plan = picker.finish_export().unwrap();
        assert!(picker.is_complete());
        assert_eq!(plan.options, exporting);
        assert_eq!(plan.notice.title, "Export complete!");
        assert_eq!(plan.notice.description, "2 file(s) are ready for download.");
        assert_eq!(picker.heading(), ("Export Complete!", "Your files are ready for download."));
        assert!(picker.finish_export().is_none());
    }

    #[test]
    fn second_begin_returns_the_captured_options() {
        let mut picker = ExportPicker::standard();
        let first = picker.begin_export().unwrap();
        assert_eq!(picker.begin_export().unwrap(), first);
        assert!(picker.is_exporting());
    }

    #[test]
    fn download_all_announces_the_download() {
        let mut picker = ExportPicker::standard();
        picker.begin_export().unwrap();
        picker.finish_export().unwrap();

        let notice = picker.download_all().unwrap();
        assert_eq!(notice.title, "Download started");
        assert_eq!(notice.description, "Your files are being prepared for download.");
    }
}
