//! CLI for the COMEX comment-export client.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use comex_core::config;
use std::path::PathBuf;

use commands::{run_export, run_fetch, run_status};

/// Top-level CLI for the COMEX comment-export client.
#[derive(Debug, Parser)]
#[command(name = "comex")]
#[command(about = "COMEX: batch comment export for social-media posts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Export comments for every post URL in an extraction spreadsheet.
    Run {
        /// Path to the XLSX extraction file with the post URLs.
        file: PathBuf,

        /// Platform whose URL column to read: facebook, instagram or twitter.
        platform: String,

        /// Output file (default: comments_<platform>.<ext> in the current dir).
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: csv or xlsx.
        #[arg(long, default_value = "csv")]
        format: String,

        /// Run up to N exports concurrently (default from config).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,

        /// Per-post comment limit (default from config).
        #[arg(long, value_name = "N")]
        limit: Option<u32>,
    },

    /// Show the current status of a single export job.
    Status {
        /// Server-issued job identifier.
        guid: String,
    },

    /// Download the results of an already-finished job.
    Fetch {
        /// Server-issued job identifier.
        guid: String,

        /// Output file (default: comments_<guid>.<ext> in the current dir).
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: csv or xlsx.
        #[arg(long, default_value = "csv")]
        format: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                file,
                platform,
                output,
                format,
                jobs,
                limit,
            } => run_export(&cfg, &file, &platform, output, &format, jobs, limit).await?,
            CliCommand::Status { guid } => run_status(&cfg, &guid).await?,
            CliCommand::Fetch {
                guid,
                output,
                format,
            } => run_fetch(&cfg, &guid, output, &format).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
