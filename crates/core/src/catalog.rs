// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stock stages of the video processing flow

use crate::stage::StageDefinition;

struct StageEntry {
    id: &'static str,
    title: &'static str,
    description: &'static str,
}

static PROCESSING_STAGES: &[StageEntry] = &[
    StageEntry {
        id: "transcribe",
        title: "Transcribing Audio",
        description: "Converting speech to text with AI",
    },
    StageEntry {
        id: "script",
        title: "Generating Script",
        description: "Creating a polished, professional script",
    },
    StageEntry {
        id: "zooms",
        title: "Adding Smart Zooms",
        description: "Detecting key actions and adding zooms",
    },
    StageEntry {
        id: "docs",
        title: "Creating Documentation",
        description: "Generating step-by-step guide",
    },
];

/// The four stages a recording goes through after upload, in order
pub fn processing_stages() -> Vec<StageDefinition> {
    PROCESSING_STAGES
        .iter()
        .map(|e| StageDefinition::new(e.id, e.title, e.description))
        .collect()
}
