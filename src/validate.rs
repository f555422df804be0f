//! Structural validation of parsed spreadsheet records.
//!
//! Every check here is batch-fatal and reports all offenders at once,
//! with 1-based spreadsheet row numbers, so a sheet maintainer can fix a
//! broken export in a single pass instead of replaying the build per
//! error.

use std::collections::HashSet;

use anyhow::{bail, Result};
use chrono::NaiveDate;

use crate::sheet::{field, Sheet};

/// Spreadsheet row for a record index: 1-based, plus the header row.
fn sheet_row(index: usize) -> usize {
    index + 2
}

/// Every required column must be present in the header row. Missing ones
/// are reported together with the full observed header set.
pub fn check_required_columns(sheet: &Sheet, required: &[&str], entity: &str) -> Result<()> {
    if sheet.records.is_empty() {
        eprintln!("Warning: no {} records found", entity);
        return Ok(());
    }

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|col| !sheet.headers.iter().any(|h| h == col))
        .collect();

    if !missing.is_empty() {
        bail!(
            "missing required columns in {}: {}\n  found columns: {}",
            entity,
            missing.join(", "),
            sheet.headers.join(", ")
        );
    }

    Ok(())
}

/// A column whose non-blank values must be unique across the sheet.
/// Every repeat is collected and reported, not just the first.
pub fn check_unique_values(sheet: &Sheet, column: &str, entity: &str) -> Result<()> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut duplicates: Vec<(String, usize)> = Vec::new();

    for (index, record) in sheet.records.iter().enumerate() {
        let value = field(record, column);
        if value.is_empty() {
            continue;
        }
        if !seen.insert(value.to_string()) {
            duplicates.push((value.to_string(), sheet_row(index)));
        }
    }

    if !duplicates.is_empty() {
        let listing = duplicates
            .iter()
            .map(|(value, row)| format!("  row {}: \"{}\"", row, value))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("duplicate {} values in {}:\n{}", column, entity, listing);
    }

    Ok(())
}

/// Update dates accept `YYYY-MM-DD` or a bare `YYYY`; blank is fine (the
/// grouping pass substitutes the build date). Each offending row gets a
/// warning, and any offender fails the batch.
pub fn check_update_dates(sheet: &Sheet, column: &str, entity: &str) -> Result<()> {
    let mut invalid = 0usize;

    for (index, record) in sheet.records.iter().enumerate() {
        let value = field(record, column);
        if value.is_empty() || is_valid_date(value) {
            continue;
        }
        eprintln!(
            "Warning: invalid date in {} row {}: \"{}\"",
            entity,
            sheet_row(index),
            value
        );
        invalid += 1;
    }

    if invalid > 0 {
        bail!(
            "{} invalid {} date{} in {} (expected YYYY-MM-DD or YYYY)",
            invalid,
            column,
            if invalid == 1 { "" } else { "s" },
            entity
        );
    }

    Ok(())
}

pub fn is_valid_date(value: &str) -> bool {
    if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
