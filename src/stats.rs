//! Catalog overview for `catalog stats`.
//!
//! Summarizes the published artifacts: totals, per-family and
//! per-category counts, artifact sizes and build ages. The quick way to
//! confirm a build produced what the sheet maintainers expect.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::ingest::{FINISHED_PRODUCTS_FILE, RAW_MATERIALS_FILE};

pub fn run_stats(config: &Config) -> Result<()> {
    let catalog = Catalog::load(config)?;

    println!("Catalog Pipeline — Stats");
    println!("========================");
    println!();
    println!("  Output dir: {}", config.output.dir.display());

    for (file, updated) in [
        (RAW_MATERIALS_FILE, catalog.raw_materials_updated()),
        (FINISHED_PRODUCTS_FILE, catalog.finished_products_updated()),
    ] {
        let path = config.output.dir.join(file);
        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        println!(
            "  {:<24} {:>10}   built {}",
            file,
            format_bytes(size),
            format_age(updated)
        );
    }

    println!();
    println!("  Raw materials:     {}", catalog.raw_materials_count());
    println!("  Finished products: {}", catalog.finished_products_count());
    println!("  Families:          {}", catalog.families().len());
    println!();
    println!("  {:<34} {:<40} {:>8}", "FAMILY", "CATEGORY", "PRODUCTS");
    println!("  {}", "-".repeat(84));

    for family in catalog.families() {
        println!("  {:<34} {:<40} {:>8}", family.name, "", family.count);
        for category in &family.categories {
            println!("  {:<34} {:<40} {:>8}", "", category.name, category.count);
        }
    }

    println!();
    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Relative age of an RFC 3339 build timestamp, "never" when the
/// artifact has not been built.
fn format_age(timestamp: &str) -> String {
    let Ok(built) = DateTime::parse_from_rfc3339(timestamp) else {
        return "never".to_string();
    };

    let delta = Utc::now().timestamp() - built.timestamp();
    if delta < 0 {
        return timestamp.to_string();
    }

    if delta < 60 {
        "just now".to_string()
    } else if delta < 3600 {
        let mins = delta / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if delta < 86400 {
        let hours = delta / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else {
        let days = delta / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    }
}
