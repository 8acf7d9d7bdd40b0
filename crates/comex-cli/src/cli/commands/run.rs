//! `comex run` – export comments for every URL in an extraction sheet.

use anyhow::Result;
use comex_core::config::ComexConfig;
use comex_core::extraction::{self, Platform};
use comex_core::output::{self, OutputFormat};
use comex_core::runner::{self, BatchOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use super::{client_from_config, retry_policy};

pub async fn run_export(
    cfg: &ComexConfig,
    file: &Path,
    platform: &str,
    output: Option<PathBuf>,
    format: &str,
    jobs: Option<usize>,
    limit: Option<u32>,
) -> Result<()> {
    let platform = Platform::from_str(platform)?;
    let format = OutputFormat::from_str(format)?;
    let client = client_from_config(cfg, limit)?;

    let urls = extraction::read_post_urls(file, platform)?;
    if urls.is_empty() {
        println!("No post URLs found for {} in {}.", platform, file.display());
        return Ok(());
    }
    println!("Exporting comments for {} post(s)...", urls.len());

    let opts = BatchOptions {
        max_concurrent: jobs.unwrap_or(cfg.max_concurrent_jobs),
        poll_interval: Duration::from_secs(cfg.poll_interval_secs),
        retry: retry_policy(cfg),
    };
    let summary = runner::run_batch(&client, urls, &opts).await?;

    if summary.failed > 0 {
        println!("{} post(s) failed; see the log for details.", summary.failed);
    }
    if summary.records.is_empty() {
        println!("No comments collected.");
        return Ok(());
    }

    let path = output.unwrap_or_else(|| output::default_output_path(platform, format));
    output::write_records(&path, format, &summary.records)?;
    println!(
        "Saved {} comment(s) from {} post(s) to {}",
        summary.records.len(),
        summary.completed,
        path.display()
    );
    Ok(())
}
