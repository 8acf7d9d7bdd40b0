//! Aggregated result output: one table, written as CSV or XLSX.

mod table;
mod write;

pub use table::{column_union, render_cell};
pub use write::{write_csv, write_xlsx};

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::client::CommentRecord;
use crate::extraction::Platform;

/// Output file format for the aggregated comment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Xlsx,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "xlsx" => Ok(OutputFormat::Xlsx),
            other => anyhow::bail!("unknown output format '{}' (expected csv or xlsx)", other),
        }
    }
}

/// Default output path for a platform's aggregated comments.
pub fn default_output_path(platform: Platform, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!("comments_{}.{}", platform, format.extension()))
}

/// Writes the aggregated records to `path` in the requested format.
pub fn write_records(path: &Path, format: OutputFormat, records: &[CommentRecord]) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(path, records),
        OutputFormat::Xlsx => write_xlsx(path, records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_str() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("XLSX".parse::<OutputFormat>().unwrap(), OutputFormat::Xlsx);
        assert!("parquet".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn default_path_names_platform_and_extension() {
        let path = default_output_path(Platform::Facebook, OutputFormat::Csv);
        assert_eq!(path, PathBuf::from("comments_facebook.csv"));
        let path = default_output_path(Platform::Twitter, OutputFormat::Xlsx);
        assert_eq!(path, PathBuf::from("comments_twitter.xlsx"));
    }
}
