//! Slug-path lookups for `catalog get`.
//!
//! Resolves a `family[/category[/sku]]` path against the merged catalog
//! and prints the match. The accessor API reports misses as `None`; this
//! CLI layer turns them into a message and a non-zero exit.

use anyhow::Result;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::models::{FinishedProduct, ProductCategory, ProductFamily};

pub fn run_get(config: &Config, path: &str) -> Result<()> {
    let catalog = Catalog::load(config)?;
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();

    match parts.as_slice() {
        [family] => match catalog.family_by_slug(family) {
            Some(found) => print_family(found),
            None => miss(&format!("family not found: {}", family)),
        },
        [family, category] => match catalog.category_by_slug(family, category) {
            Some(found) => print_category(found),
            None => miss(&format!("category not found: {}/{}", family, category)),
        },
        [family, category, sku] => match catalog.product_by_sku(family, category, sku) {
            Some(found) => print_product(found),
            None => miss(&format!("product not found: {}/{}/{}", family, category, sku)),
        },
        _ => {
            eprintln!("Error: expected <family>[/<category>[/<sku>]]");
            std::process::exit(2);
        }
    }

    Ok(())
}

fn miss(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn print_family(family: &ProductFamily) {
    println!("--- Family ---");
    println!("name:     {}", family.name);
    println!("slug:     {}", family.slug);
    println!("products: {}", family.count);
    println!();
    println!("{:<40} {:<36} {:>8}", "CATEGORY", "SLUG", "PRODUCTS");
    for category in &family.categories {
        println!("{:<40} {:<36} {:>8}", category.name, category.slug, category.count);
    }
}

fn print_category(category: &ProductCategory) {
    println!("--- Category ---");
    println!("name:     {}", category.name);
    println!("slug:     {}/{}", category.family_slug, category.slug);
    println!("family:   {}", category.family);
    println!("products: {}", category.count);
    println!();
    println!("{:<16} {:<36} {:<28} {}", "SKU", "BASE PRODUCT", "VARIANT", "STATUS");
    for product in &category.products {
        println!(
            "{:<16} {:<36} {:<28} {}",
            product.sku_code, product.base_product, product.variant, product.status
        );
    }
}

fn print_product(product: &FinishedProduct) {
    println!("--- Product ---");
    println!("sku:          {}", product.sku_code);
    println!("base product: {}", product.base_product);
    println!("variant:      {}", product.variant);
    println!("status:       {}", product.status);
    println!("updated:      {}", product.updated_at);
    println!("family:       {} ({})", product.family, product.family_slug);
    println!("category:     {} ({})", product.category, product.category_slug);
    println!();
    print_doc("TDS", product.tds_view_url.as_deref(), product.tds_download_url.as_deref());
    print_doc("SDS", product.sds_view_url.as_deref(), product.sds_download_url.as_deref());
    print_doc(
        "Internal QC",
        product.internal_qc_view_url.as_deref(),
        product.internal_qc_download_url.as_deref(),
    );
    print_doc("Label", product.label_view_url.as_deref(), product.label_download_url.as_deref());
}

fn print_doc(label: &str, view: Option<&str>, download: Option<&str>) {
    match (view, download) {
        (Some(view), Some(download)) => {
            println!("{:<12} view: {}", label, view);
            println!("{:<12} download: {}", "", download);
        }
        _ => println!("{:<12} (not available)", label),
    }
}
