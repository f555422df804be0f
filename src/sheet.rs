//! Spreadsheet source access: HTTP fetch and CSV parsing.
//!
//! Sources are published CSV exports. Fetching is fail-fast: any
//! transport or HTTP error aborts that side of the build. Parsing keeps
//! every data row as a column-name to trimmed-value map so downstream
//! passes can tolerate optional and misspelled columns.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, Trim};

/// One parsed CSV document: the header row plus each data row keyed by
/// column name.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub records: Vec<HashMap<String, String>>,
}

/// Fetch a published CSV export over HTTP.
pub async fn fetch_csv(url: &str, name: &str) -> Result<String> {
    println!("Fetching {} CSV...", name);

    let response = reqwest::get(url)
        .await
        .with_context(|| format!("failed to fetch {} CSV from {}", name, url))?;

    if !response.status().is_success() {
        bail!("{} CSV fetch returned HTTP {}", name, response.status());
    }

    let text = response
        .text()
        .await
        .with_context(|| format!("failed to read {} CSV body", name))?;

    println!("  fetched {} bytes", text.len());
    Ok(text)
}

/// Parse CSV text into a [`Sheet`].
///
/// Fields and headers are whitespace-trimmed, fully empty lines are
/// skipped, and short rows are padded with blanks so every record exposes
/// the full header set.
pub fn parse_csv(text: &str) -> Result<Sheet> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("failed to read CSV header row")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.context("failed to parse CSV record")?;
        let mut row = HashMap::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            row.insert(header.clone(), record.get(i).unwrap_or("").to_string());
        }
        records.push(row);
    }

    Ok(Sheet { headers, records })
}

/// Look up a column on a row; absent and blank read the same.
pub fn field<'a>(record: &'a HashMap<String, String>, column: &str) -> &'a str {
    record.get(column).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headers_and_rows() {
        let sheet = parse_csv("code,name\nMP-001,Acido Citrico\nMP-002,Sosa\n").unwrap();
        assert_eq!(sheet.headers, vec!["code", "name"]);
        assert_eq!(sheet.records.len(), 2);
        assert_eq!(field(&sheet.records[0], "code"), "MP-001");
        assert_eq!(field(&sheet.records[1], "name"), "Sosa");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let sheet = parse_csv("code , name\n MP-001 ,  Acido  \n").unwrap();
        assert_eq!(sheet.headers, vec!["code", "name"]);
        assert_eq!(field(&sheet.records[0], "code"), "MP-001");
        assert_eq!(field(&sheet.records[0], "name"), "Acido");
    }

    #[test]
    fn test_short_rows_padded() {
        let sheet = parse_csv("a,b,c\n1,2\n").unwrap();
        assert_eq!(field(&sheet.records[0], "c"), "");
    }

    #[test]
    fn test_empty_lines_skipped() {
        let sheet = parse_csv("a,b\n1,2\n\n3,4\n").unwrap();
        assert_eq!(sheet.records.len(), 2);
    }

    #[test]
    fn test_missing_column_reads_blank() {
        let sheet = parse_csv("a\nx\n").unwrap();
        assert_eq!(field(&sheet.records[0], "nope"), "");
    }
}
