//! `comex status` – show the state of a single export job.

use anyhow::Result;
use comex_core::config::ComexConfig;
use comex_core::job::JobState;

use super::client_from_config;

pub async fn run_status(cfg: &ComexConfig, guid: &str) -> Result<()> {
    let client = client_from_config(cfg, None)?;
    let entry = client.job_status(guid).await?;
    let state = JobState::parse(&entry.status);
    println!("{:<38} {}", guid, state.as_str());
    if let Some(error) = entry.error {
        println!("error: {}", error);
    }
    Ok(())
}
