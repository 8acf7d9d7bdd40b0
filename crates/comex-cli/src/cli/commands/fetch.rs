//! `comex fetch` – download the results of an already-finished job.

use anyhow::Result;
use comex_core::config::ComexConfig;
use comex_core::job::JobState;
use comex_core::output::{self, OutputFormat};
use std::path::PathBuf;
use std::str::FromStr;

use super::client_from_config;

pub async fn run_fetch(
    cfg: &ComexConfig,
    guid: &str,
    output: Option<PathBuf>,
    format: &str,
) -> Result<()> {
    let format = OutputFormat::from_str(format)?;
    let client = client_from_config(cfg, None)?;

    let entry = client.job_status(guid).await?;
    match JobState::parse(&entry.status) {
        JobState::Done => {}
        JobState::Error => anyhow::bail!(
            "job {} failed on the server: {}",
            guid,
            entry.error.as_deref().unwrap_or("unspecified error")
        ),
        state => anyhow::bail!("job {} is not finished (status: {})", guid, state.as_str()),
    }
    let raw_url = entry
        .raw_url
        .ok_or_else(|| anyhow::anyhow!("job {} is done but has no rawUrl", guid))?;

    let records = client.download_raw(&raw_url).await?;
    if records.is_empty() {
        println!("Job {} has no comments.", guid);
        return Ok(());
    }
    let path = output
        .unwrap_or_else(|| PathBuf::from(format!("comments_{}.{}", guid, format.extension())));
    output::write_records(&path, format, &records)?;
    println!("Saved {} comment(s) to {}", records.len(), path.display());
    Ok(())
}
