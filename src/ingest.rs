//! Pipeline orchestration for `catalog build`.
//!
//! Coordinates the full run: fetch the two CSV exports, validate them,
//! resolve document references, group finished products into the derived
//! taxonomy, and write both JSON artifacts. The two sides are
//! independent: each fails fast on its own, and a side with no configured
//! source publishes an empty dataset. A source whose checksum matches
//! the existing artifact skips the write unless `--full` is given.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::drive;
use crate::models::{FinishedProductsData, RawMaterial, RawMaterialsData};
use crate::sheet::{self, field, Sheet};
use crate::taxonomy;
use crate::validate;

pub const MP_REQUIRED_COLUMNS: &[&str] = &[
    "code",
    "name",
    "cas",
    "transport_name",
    "functional_category",
    "chemical_family",
    "disposition",
];

pub const PT_REQUIRED_COLUMNS: &[&str] = &["family", "category", "base_product", "status"];

pub const RAW_MATERIALS_FILE: &str = "raw-materials.json";
pub const FINISHED_PRODUCTS_FILE: &str = "finished-products.json";

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Rewrite artifacts even when the source checksum is unchanged.
    pub full: bool,
    /// Parse and validate only; write nothing.
    pub dry_run: bool,
    /// Local file override for the raw-materials CSV.
    pub mp_csv: Option<PathBuf>,
    /// Local file override for the finished-products CSV.
    pub pt_csv: Option<PathBuf>,
}

pub async fn run_build(config: &Config, opts: &BuildOptions) -> Result<()> {
    let (mp_text, pt_text) = tokio::join!(
        load_source(
            opts.mp_csv.as_deref(),
            config.sources.raw_materials_csv_url.as_deref(),
            "raw materials",
        ),
        load_source(
            opts.pt_csv.as_deref(),
            config.sources.finished_products_csv_url.as_deref(),
            "finished products",
        ),
    );
    let mp_text = mp_text?;
    let pt_text = pt_text?;

    let mut mp_data = match &mp_text {
        Some(text) => process_raw_materials(&sheet::parse_csv(text)?)?,
        None => RawMaterialsData {
            last_updated: Utc::now().to_rfc3339(),
            ..Default::default()
        },
    };
    mp_data.source_checksum = mp_text.as_deref().map(sha256_hex);

    let mut pt_data = match &pt_text {
        Some(text) => process_finished_products(&sheet::parse_csv(text)?)?,
        None => FinishedProductsData {
            last_updated: Utc::now().to_rfc3339(),
            ..Default::default()
        },
    };
    pt_data.source_checksum = pt_text.as_deref().map(sha256_hex);

    let categories: usize = pt_data.families.iter().map(|f| f.categories.len()).sum();

    if opts.dry_run {
        println!("build (dry-run)");
        println!("  raw materials: {}", mp_data.count);
        println!(
            "  finished products: {} in {} families, {} categories",
            pt_data.count,
            pt_data.families.len(),
            categories
        );
        return Ok(());
    }

    let out_dir = &config.output.dir;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    write_artifact(
        &out_dir.join(RAW_MATERIALS_FILE),
        &mp_data,
        mp_data.source_checksum.as_deref(),
        opts.full,
        "raw materials",
    )?;
    write_artifact(
        &out_dir.join(FINISHED_PRODUCTS_FILE),
        &pt_data,
        pt_data.source_checksum.as_deref(),
        opts.full,
        "finished products",
    )?;

    println!("build");
    println!("  raw materials: {}", mp_data.count);
    println!(
        "  finished products: {} in {} families, {} categories",
        pt_data.count,
        pt_data.families.len(),
        categories
    );
    if let Some(checksum) = mp_data.source_checksum.as_deref() {
        println!("  raw materials checksum: {}", &checksum[..12]);
    }
    if let Some(checksum) = pt_data.source_checksum.as_deref() {
        println!("  finished products checksum: {}", &checksum[..12]);
    }
    println!("ok");

    Ok(())
}

/// Process a parsed raw-materials sheet into its artifact.
pub fn process_raw_materials(sheet: &Sheet) -> Result<RawMaterialsData> {
    validate::check_required_columns(sheet, MP_REQUIRED_COLUMNS, "raw materials")?;
    validate::check_unique_values(sheet, "code", "raw materials")?;

    let items: Vec<RawMaterial> = sheet.records.iter().map(record_to_material).collect();
    let count = items.len();
    println!("  processed {} raw materials", count);

    Ok(RawMaterialsData {
        items,
        count,
        last_updated: Utc::now().to_rfc3339(),
        source_checksum: None,
    })
}

/// Process a parsed finished-products sheet into its artifact. The
/// artifact stores the derived grouping; the defaults merge happens at
/// catalog load time.
pub fn process_finished_products(sheet: &Sheet) -> Result<FinishedProductsData> {
    validate::check_required_columns(sheet, PT_REQUIRED_COLUMNS, "finished products")?;
    validate::check_update_dates(sheet, "updated_at", "finished products")?;

    let families = taxonomy::group_finished_products(sheet)?;
    taxonomy::verify_counts(&families)?;
    let count = families.iter().map(|f| f.count).sum();
    println!(
        "  processed {} finished products in {} families",
        count,
        families.len()
    );

    Ok(FinishedProductsData {
        families,
        count,
        last_updated: Utc::now().to_rfc3339(),
        source_checksum: None,
    })
}

async fn load_source(file: Option<&Path>, url: Option<&str>, name: &str) -> Result<Option<String>> {
    if let Some(path) = file {
        println!("Reading {} CSV from {}", name, path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {} CSV from {}", name, path.display()))?;
        return Ok(Some(text));
    }

    match url {
        Some(url) if !url.trim().is_empty() => Ok(Some(sheet::fetch_csv(url, name).await?)),
        _ => {
            eprintln!("Warning: no {} source configured, publishing an empty dataset", name);
            Ok(None)
        }
    }
}

fn record_to_material(record: &HashMap<String, String>) -> RawMaterial {
    // The sheet historically ships this column misspelled as
    // coa_cedis_file_ed; accept both spellings.
    let coa_cedis = non_empty_or(
        field(record, "coa_cedis_file_id"),
        field(record, "coa_cedis_file_ed"),
    );
    let tds = field(record, "tds_file_id");
    let sds = field(record, "sds_file_id");
    let coa_branches = field(record, "coa_branches_file_id");
    let label = field(record, "label_file_id");

    RawMaterial {
        code: field(record, "code").to_string(),
        name: field(record, "name").to_string(),
        cas: field(record, "cas").to_string(),
        transport_name: field(record, "transport_name").to_string(),
        functional_category: field(record, "functional_category").to_string(),
        chemical_family: field(record, "chemical_family").to_string(),
        disposition: field(record, "disposition").to_string(),
        provider: field(record, "provider").to_string(),
        provider_code: field(record, "provider_code").to_string(),
        lead_time_days: field(record, "lead_time_days").to_string(),
        tds_file_id: tds.to_string(),
        sds_file_id: sds.to_string(),
        coa_cedis_file_id: coa_cedis.to_string(),
        coa_branches_file_id: coa_branches.to_string(),
        label_file_id: label.to_string(),
        tds_view_url: drive::view_url(tds),
        tds_download_url: drive::download_url(tds),
        sds_view_url: drive::view_url(sds),
        sds_download_url: drive::download_url(sds),
        coa_cedis_view_url: drive::view_url(coa_cedis),
        coa_cedis_download_url: drive::download_url(coa_cedis),
        coa_branches_view_url: drive::view_url(coa_branches),
        coa_branches_download_url: drive::download_url(coa_branches),
        label_view_url: drive::view_url(label),
        label_download_url: drive::download_url(label),
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Write an artifact unless the recorded source checksum already matches.
/// Returns whether a write happened.
fn write_artifact<T: serde::Serialize>(
    path: &Path,
    data: &T,
    checksum: Option<&str>,
    full: bool,
    label: &str,
) -> Result<bool> {
    if !full {
        if let (Some(checksum), Some(existing)) = (checksum, read_existing_checksum(path)) {
            if existing == checksum {
                println!("  {} unchanged, skipping write", label);
                return Ok(false);
            }
        }
    }

    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    println!("  wrote {}", path.display());
    Ok(true)
}

fn read_existing_checksum(path: &Path) -> Option<String> {
    let text = std::fs::read_to_string(path).ok()?;
    let value: serde_json::Value = serde_json::from_str(&text).ok()?;
    value
        .get("sourceChecksum")
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
