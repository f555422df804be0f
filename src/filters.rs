//! Filter option sets for `catalog filters`.

use anyhow::Result;

use crate::catalog::Catalog;
use crate::config::Config;

/// Print the sorted distinct values of a raw-material field, one per
/// line, the same set the catalog UI offers as filter options.
pub fn run_filters(config: &Config, field: &str) -> Result<()> {
    let catalog = Catalog::load(config)?;
    let values = catalog.distinct_values(field)?;

    if values.is_empty() {
        println!("No values.");
        return Ok(());
    }

    for value in &values {
        println!("{}", value);
    }
    println!();
    println!(
        "{} distinct {} value{}",
        values.len(),
        field,
        if values.len() == 1 { "" } else { "s" }
    );

    Ok(())
}
