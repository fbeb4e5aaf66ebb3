// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cf - clipflow CLI

mod commands;
mod config;
mod error;
mod output;

use clap::{Parser, Subcommand};
use commands::{process, projects, stages};
use error::CfError;
use std::process::ExitCode;

/// Log filter variable; output goes to stderr so stdout stays parseable
const LOG_ENV: &str = "CF_LOG";

#[derive(Parser)]
#[command(
    name = "cf",
    version,
    about = "clipflow - turn screen recordings into scripts and docs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a recording through the stock stages
    Process(process::ProcessArgs),
    /// List the processing stages
    Stages(stages::StagesArgs),
    /// List dashboard projects
    Projects(projects::ProjectsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process(args) => process::handle(args).await,
        Commands::Stages(args) => stages::handle(args),
        Commands::Projects(args) => projects::handle(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<CfError>() {
                Some(err) => eprint!("{}", err),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
