// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cf stages`

use crate::output::{self, OutputFormat};
use cf_core::processing_stages;
use clap::Args;
use serde::Serialize;
use std::fmt;

#[derive(Args)]
pub struct StagesArgs {
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct StageInfo {
    position: usize,
    id: String,
    title: String,
    description: String,
}

impl fmt::Display for StageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {:<24} {}",
            self.position, self.title, self.description
        )
    }
}

pub fn handle(args: StagesArgs) -> anyhow::Result<()> {
    let stages: Vec<StageInfo> = processing_stages()
        .into_iter()
        .enumerate()
        .map(|(i, def)| StageInfo {
            position: i + 1,
            id: def.id.0,
            title: def.title,
            description: def.description,
        })
        .collect();
    output::print_list(&stages, args.format, "No stages")
}
