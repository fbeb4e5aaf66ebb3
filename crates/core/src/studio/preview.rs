// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Preview editor: generated script and documentation

use super::Notice;

const REGENERATED_SUFFIX: &str = " [Regenerated with AI improvements]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSegment {
    pub id: String,
    /// `m:ss` offset into the video
    pub timestamp: String,
    pub text: String,
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentationStep {
    pub id: String,
    pub step_number: u32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct PreviewEditor {
    pub title: String,
    pub segments: Vec<ScriptSegment>,
    pub documentation: Vec<DocumentationStep>,
    pub playing: bool,
    pub muted: bool,
}

fn segment(id: &str, timestamp: &str, text: &str) -> ScriptSegment {
    ScriptSegment {
        id: id.to_string(),
        timestamp: timestamp.to_string(),
        text: text.to_string(),
        editing: false,
    }
}

fn step(n: u32, title: &str, description: &str) -> DocumentationStep {
    DocumentationStep {
        id: n.to_string(),
        step_number: n,
        title: title.to_string(),
        description: description.to_string(),
    }
}

impl PreviewEditor {
    pub fn new(
        title: impl Into<String>,
        segments: Vec<ScriptSegment>,
        documentation: Vec<DocumentationStep>,
    ) -> Self {
        Self {
            title: title.into(),
            segments,
            documentation,
            playing: false,
            muted: false,
        }
    }

    /// The generated output of the demo recording
    pub fn sample() -> Self {
        Self::new(
            "Product Onboarding Tutorial",
            vec![
                segment("1", "0:00", "Welcome to our product onboarding tutorial. In this video, we'll walk you through the key features of our dashboard."),
                segment("2", "0:15", "First, let's take a look at the main navigation. You'll find all your projects listed here on the left sidebar."),
                segment("3", "0:32", "To create a new project, simply click the 'New Project' button in the top right corner of your screen."),
                segment("4", "0:48", "You can customize your project settings by clicking on the gear icon. Here you can change the name, add collaborators, and configure notifications."),
                segment("5", "1:10", "That's it! You're now ready to start using our platform. If you have any questions, check out our help center."),
            ],
            vec![
                step(1, "Access the Dashboard", "Log in to your account and navigate to the main dashboard. You'll see an overview of all your projects and recent activity."),
                step(2, "Navigate Using the Sidebar", "The left sidebar contains all your project folders and navigation options. Click on any project to view its details."),
                step(3, "Create a New Project", "Click the 'New Project' button in the top right corner. Fill in the project name and select your preferred settings."),
                step(4, "Configure Project Settings", "Access project settings via the gear icon. Here you can customize notifications, add team members, and set permissions."),
            ],
        )
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn toggle_playback(&mut self) {
        self.playing = !self.playing;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Open `id` for editing (or close it if open); every other segment closes
    pub fn toggle_edit(&mut self, id: &str) {
        for seg in &mut self.segments {
            seg.editing = seg.id == id && !seg.editing;
        }
    }

    /// Replace a segment's text and close its editor
    pub fn update_segment(&mut self, id: &str, text: impl Into<String>) -> Notice {
        let text = text.into();
        if let Some(seg) = self.segments.iter_mut().find(|s| s.id == id) {
            seg.text = text;
            seg.editing = false;
        }
        Notice::info("Script updated", "Your changes have been saved.")
    }

    /// Mocked AI rewrite of one segment
    pub fn regenerate_segment(&mut self, id: &str) -> Notice {
        if let Some(seg) = self.segments.iter_mut().find(|s| s.id == id) {
            seg.text.push_str(REGENERATED_SUFFIX);
        }
        Notice::info("Regeneration complete", "The segment has been updated.")
    }

    /// Plain-text documentation, as copied to the clipboard
    pub fn documentation_text(&self) -> String {
        self.documentation
            .iter()
            .map(|s| format!("Step {}: {}\n{}", s.step_number, s.title, s.description))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Clipboard payload plus the confirmation notice
    pub fn copy_documentation(&self) -> (String, Notice) {
        (
            self.documentation_text(),
            Notice::info("Copied to clipboard", "Documentation has been copied."),
        )
    }
}
