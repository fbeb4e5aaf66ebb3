// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cf process`: run the stock stages with live output

use crate::config;
use crate::error::CfError;
use crate::output::{self, OutputFormat};
use cf_core::{
    processing_stages, Entropy, Event, IdGen, RunSnapshot, RunState, SeededEntropy, UuidIdGen,
};
use cf_engine::ProgressHandle;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Config file (defaults to $CF_CONFIG, then the user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed progress increments for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run id (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub async fn handle(args: ProcessArgs) -> anyhow::Result<()> {
    let config = config::resolve(args.config.clone())?;
    match args.seed {
        Some(seed) => {
            let handle = ProgressHandle::with_parts(config, SeededEntropy::new(seed), UuidIdGen);
            run(handle, &args).await
        }
        None => run(ProgressHandle::new(config), &args).await,
    }
}

async fn run<E, I>(mut handle: ProgressHandle<E, I>, args: &ProcessArgs) -> anyhow::Result<()>
where
    E: Entropy + 'static,
    I: IdGen + 'static,
{
    let mut events = handle.events(&[
        "stage:started",
        "stage:completed",
        "run:complete",
        "run:cancelled",
    ]);
    let started = match &args.id {
        Some(id) => handle.start_with_id(id.as_str(), processing_stages()),
        None => handle.start(processing_stages()),
    }
    .map_err(CfError::start_failed)?;

    let text = args.format == OutputFormat::Text;
    if text {
        println!(
            "Processing {} ({} stages)",
            started.run_id,
            started.stages.len()
        );
    }

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                if text {
                    if let Some(line) = render(&event, &started) {
                        println!("{}", line);
                    }
                }
                if matches!(event, Event::RunCompleted { .. } | Event::RunCancelled { .. }) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!(run_id = %started.run_id, "interrupted, cancelling run");
                handle.cancel().await;
                break;
            }
        }
    }

    let last = handle
        .wait()
        .await
        .ok_or_else(|| anyhow::anyhow!("run {} was never started", started.run_id))?;

    if last.state == RunState::Cancelled {
        if text {
            println!("Processing cancelled");
        }
        let err = CfError::cancelled(&last.run_id.0, last.completed_count(), last.stages.len());
        return Err(err.into());
    }

    match args.format {
        OutputFormat::Text => {
            println!();
            println!("Processing Complete!");
            println!("Overall progress: {:.0}%", last.overall_progress);
            println!("View results: /preview/{}", last.run_id);
        }
        OutputFormat::Json => output::print_json(&last)?,
    }
    Ok(())
}

/// One output line per stage transition
fn render(event: &Event, run: &RunSnapshot) -> Option<String> {
    let title = |id: &cf_core::StageId| {
        run.stages
            .iter()
            .find(|s| &s.id == id)
            .map_or_else(|| id.to_string(), |s| s.title.clone())
    };

    match event {
        Event::StageStarted {
            stage_id, index, ..
        } => Some(format!(
            "[{}/{}] {}...",
            index + 1,
            run.stages.len(),
            title(stage_id)
        )),
        Event::StageCompleted {
            stage_id,
            overall_progress,
            ..
        } => Some(format!(
            "      done: {} ({:.0}% overall)",
            title(stage_id),
            overall_progress
        )),
        _ => None,
    }
}
