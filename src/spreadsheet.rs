//! Reading, merging and writing the `.xlsx` results file.
//!
//! Rows are deduplicated on [`UnitListing::dedup_key`]: link, price and
//! square footage. Rows already in the file are never rewritten or dropped.

use crate::error::{Result, ScoutError};
use crate::models::{Price, UnitListing, COLUMNS};
use crate::scrapers::parser::parse_price;
use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// How new rows are combined with an existing output file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Keep existing rows and append unseen ones
    #[default]
    Merge,
    /// Replace the file with this run's rows
    Overwrite,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub existing: usize,
    pub added: usize,
    pub total: usize,
}

static EMPTY_CELL: Data = Data::Empty;

/// Read all unit rows from the first worksheet of `path`
pub fn read_rows(path: &Path) -> Result<Vec<UnitListing>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ScoutError::SpreadsheetFormat("workbook has no worksheets".to_string()))??;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };

    let column = |name: &str| {
        header
            .iter()
            .position(|cell| cell_text(cell).trim() == name)
            .ok_or_else(|| ScoutError::SpreadsheetFormat(format!("missing column {:?}", name)))
    };
    let name_col = column(COLUMNS[0])?;
    let link_col = column(COLUMNS[1])?;
    let price_col = column(COLUMNS[2])?;
    let sqft_col = column(COLUMNS[3])?;
    let available_col = column(COLUMNS[4])?;

    let mut units = Vec::new();

    for (idx, row) in rows.enumerate() {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }

        let cell = |col: usize| row.get(col).unwrap_or(&EMPTY_CELL);
        // Row numbers in errors are 1-based and count the header
        let row_number = idx + 2;

        let price = match cell(price_col) {
            Data::String(text) => parse_price(text),
            other => cell_number(other).map(Price::Amount).ok_or_else(|| {
                ScoutError::SpreadsheetFormat(format!("row {}: bad price {:?}", row_number, other))
            })?,
        };
        let square_footage = cell_number(cell(sqft_col)).ok_or_else(|| {
            ScoutError::SpreadsheetFormat(format!(
                "row {}: bad square footage {:?}",
                row_number,
                cell(sqft_col)
            ))
        })?;

        units.push(UnitListing {
            property_name: cell_text(cell(name_col)),
            link: cell_text(cell(link_col)),
            price,
            square_footage,
            available_from: cell_text(cell(available_col)),
        });
    }

    debug!("Read {} rows from {}", units.len(), path.display());
    Ok(units)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(text) => text.clone(),
        Data::Empty => String::new(),
        Data::Float(value) if value.fract() == 0.0 => format!("{}", *value as i64),
        other => other.to_string(),
    }
}

fn cell_number(cell: &Data) -> Option<u32> {
    match cell {
        Data::Int(value) => u32::try_from(*value).ok(),
        Data::Float(value)
            if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(value) =>
        {
            Some(*value as u32)
        }
        Data::String(text) => text.replace(['$', ','], "").trim().parse().ok(),
        _ => None,
    }
}

/// Write `rows` to `path` under a bold header, replacing any existing file
pub fn write_rows(path: &Path, rows: &[UnitListing]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    worksheet.set_column_width(0, 32.0)?;
    worksheet.set_column_width(1, 60.0)?;

    for (i, unit) in rows.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet.write_string(r, 0, &unit.property_name)?;
        worksheet.write_string(r, 1, &unit.link)?;
        match unit.price {
            Price::Amount(amount) => worksheet.write_number(r, 2, f64::from(amount))?,
            Price::CallForRent => worksheet.write_string(r, 2, unit.price.to_string())?,
        };
        worksheet.write_number(r, 3, f64::from(unit.square_footage))?;
        worksheet.write_string(r, 4, &unit.available_from)?;
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    workbook.save(path)?;

    Ok(())
}

/// Append the rows of `new_rows` whose key is not already present
pub fn merge_rows(existing: Vec<UnitListing>, new_rows: Vec<UnitListing>) -> (Vec<UnitListing>, usize) {
    let mut seen: HashSet<(String, Price, u32)> = existing.iter().map(owned_key).collect();

    let mut merged = existing;
    let mut added = 0;

    for unit in new_rows {
        if seen.insert(owned_key(&unit)) {
            merged.push(unit);
            added += 1;
        }
    }

    (merged, added)
}

fn owned_key(unit: &UnitListing) -> (String, Price, u32) {
    let (link, price, square_footage) = unit.dedup_key();
    (link.to_string(), price, square_footage)
}

/// Save this run's rows to `path` according to `mode`
pub fn persist(path: &Path, rows: Vec<UnitListing>, mode: WriteMode) -> Result<MergeOutcome> {
    let existing = match mode {
        WriteMode::Merge if path.is_file() => read_rows(path)?,
        _ => Vec::new(),
    };
    let existing_count = existing.len();

    let (combined, added) = match mode {
        WriteMode::Merge => merge_rows(existing, rows),
        WriteMode::Overwrite => {
            let added = rows.len();
            (rows, added)
        }
    };

    write_rows(path, &combined)?;
    info!(
        "💾 Saved {} rows to {} ({} new)",
        combined.len(),
        path.display(),
        added
    );

    Ok(MergeOutcome {
        existing: existing_count,
        added,
        total: combined.len(),
    })
}
