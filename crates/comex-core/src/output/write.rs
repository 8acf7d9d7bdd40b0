//! CSV and XLSX writers for the aggregated comment table.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use super::table::{column_union, render_cell};
use crate::client::CommentRecord;

pub fn write_csv(path: &Path, records: &[CommentRecord]) -> Result<()> {
    let columns = column_union(records);
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create output file: {}", path.display()))?;
    writer.write_record(&columns)?;
    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|name| render_cell(record.get(name)))
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush().context("flush CSV output")?;
    Ok(())
}

pub fn write_xlsx(path: &Path, records: &[CommentRecord]) -> Result<()> {
    let columns = column_union(records);
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string(0, col as u16, name)?;
    }
    for (row, record) in records.iter().enumerate() {
        let row = row as u32 + 1;
        for (col, name) in columns.iter().enumerate() {
            let col = col as u16;
            match record.get(name).and_then(Value::as_f64) {
                Some(number) => {
                    sheet.write_number(row, col, number)?;
                }
                None => {
                    let text = render_cell(record.get(name));
                    if !text.is_empty() {
                        sheet.write_string(row, col, text)?;
                    }
                }
            }
        }
    }
    workbook
        .save(path)
        .with_context(|| format!("save workbook: {}", path.display()))?;
    Ok(())
}
