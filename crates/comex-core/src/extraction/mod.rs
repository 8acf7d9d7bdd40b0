//! Post-URL extraction from the fixed-column XLSX sheet.

mod platform;

pub use platform::Platform;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Rows before the data: the column-label row plus the repeated header row.
const HEADER_ROWS: usize = 2;

/// Reads the post URLs for `platform` from the first worksheet of `path`.
///
/// Empty and non-text cells are skipped; an empty result is not an error.
pub fn read_post_urls(path: &Path, platform: Platform) -> Result<Vec<String>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("open extraction file: {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .context("extraction file has no worksheets")?
        .with_context(|| format!("read first worksheet of {}", path.display()))?;

    let column = platform.url_column();
    let mut urls = Vec::new();
    for row in range.rows().skip(HEADER_ROWS) {
        let Some(cell) = row.get(column) else { continue };
        if let Data::String(s) = cell {
            let s = s.trim();
            if !s.is_empty() {
                urls.push(s.to_string());
            }
        }
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::tempdir;

    fn write_sheet(path: &Path, column: u16, urls: &[&str]) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, column, "Post URL").unwrap();
        sheet.write_string(1, column, "Post URL").unwrap();
        for (i, url) in urls.iter().enumerate() {
            sheet.write_string(i as u32 + HEADER_ROWS as u32, column, *url).unwrap();
        }
        workbook.save(path).unwrap();
    }

    #[test]
    fn reads_urls_from_platform_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("extraction.xlsx");
        write_sheet(
            &path,
            Platform::Facebook.url_column() as u16,
            &["https://facebook.com/p/1", "https://facebook.com/p/2"],
        );

        let urls = read_post_urls(&path, Platform::Facebook).unwrap();
        assert_eq!(
            urls,
            vec!["https://facebook.com/p/1", "https://facebook.com/p/2"]
        );
    }

    #[test]
    fn header_rows_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("extraction.xlsx");
        write_sheet(&path, Platform::Twitter.url_column() as u16, &["https://x.com/s/1"]);

        let urls = read_post_urls(&path, Platform::Twitter).unwrap();
        assert_eq!(urls, vec!["https://x.com/s/1"]);
    }

    #[test]
    fn blank_cells_are_dropped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("extraction.xlsx");
        write_sheet(
            &path,
            Platform::Instagram.url_column() as u16,
            &["https://instagram.com/p/1", "  ", "https://instagram.com/p/2"],
        );

        let urls = read_post_urls(&path, Platform::Instagram).unwrap();
        assert_eq!(
            urls,
            vec!["https://instagram.com/p/1", "https://instagram.com/p/2"]
        );
    }

    #[test]
    fn other_platform_column_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("extraction.xlsx");
        write_sheet(&path, Platform::Facebook.url_column() as u16, &["https://facebook.com/p/1"]);

        let urls = read_post_urls(&path, Platform::Twitter).unwrap();
        assert!(urls.is_empty());
    }
}
