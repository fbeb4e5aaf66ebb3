// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cf projects`

use crate::output::{self, OutputFormat};
use cf_core::studio::Dashboard;
use clap::Args;

#[derive(Args)]
pub struct ProjectsArgs {
    /// Only show projects whose title contains this text
    #[arg(long, short)]
    pub search: Option<String>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub fn handle(args: ProjectsArgs) -> anyhow::Result<()> {
    let dashboard = Dashboard::sample();
    let query = args.search.unwrap_or_default();
    let projects = dashboard.filter(&query);
    tracing::debug!(query = %query, matches = projects.len(), "filtered projects");

    let empty = format!("No projects match '{}'", query);
    output::print_list(&projects, args.format, &empty)
}
