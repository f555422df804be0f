//! Core data models for the catalog pipeline.
//!
//! These types are the currency of the whole system: CSV rows are
//! normalized into them, the generated JSON artifacts serialize them, and
//! the catalog accessor reads them back. JSON field names match the
//! artifact schema the catalog site consumes, so `lastUpdated` keeps its
//! wire spelling.

use serde::{Deserialize, Serialize};

/// A raw chemical material (materia prima).
///
/// `code` is the primary key; duplicates are rejected during validation.
/// Each document reference carries the raw spreadsheet value plus the
/// resolved view/download URL pair, `None` when the reference is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMaterial {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub cas: String,
    #[serde(default)]
    pub transport_name: String,
    pub functional_category: String,
    pub chemical_family: String,
    pub disposition: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub provider_code: String,
    #[serde(default)]
    pub lead_time_days: String,
    #[serde(default)]
    pub tds_file_id: String,
    #[serde(default)]
    pub sds_file_id: String,
    #[serde(default)]
    pub coa_cedis_file_id: String,
    #[serde(default)]
    pub coa_branches_file_id: String,
    #[serde(default)]
    pub label_file_id: String,
    #[serde(default)]
    pub tds_view_url: Option<String>,
    #[serde(default)]
    pub tds_download_url: Option<String>,
    #[serde(default)]
    pub sds_view_url: Option<String>,
    #[serde(default)]
    pub sds_download_url: Option<String>,
    #[serde(default)]
    pub coa_cedis_view_url: Option<String>,
    #[serde(default)]
    pub coa_cedis_download_url: Option<String>,
    #[serde(default)]
    pub coa_branches_view_url: Option<String>,
    #[serde(default)]
    pub coa_branches_download_url: Option<String>,
    #[serde(default)]
    pub label_view_url: Option<String>,
    #[serde(default)]
    pub label_download_url: Option<String>,
}

/// A finished product (producto terminado).
///
/// Identity is the (family_slug, category_slug, sku_code) triple. The
/// family/category name and slug fields are denormalized stamps so a
/// flattened product list is self-describing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinishedProduct {
    pub family: String,
    pub family_slug: String,
    pub category: String,
    pub category_slug: String,
    pub sku_code: String,
    pub base_product: String,
    pub variant: String,
    pub status: String,
    pub updated_at: String,
    #[serde(default)]
    pub tds_file_id: String,
    #[serde(default)]
    pub sds_file_id: String,
    #[serde(default)]
    pub internal_qc_file_id: String,
    #[serde(default)]
    pub label_file_id: String,
    #[serde(default)]
    pub tds_view_url: Option<String>,
    #[serde(default)]
    pub tds_download_url: Option<String>,
    #[serde(default)]
    pub sds_view_url: Option<String>,
    #[serde(default)]
    pub sds_download_url: Option<String>,
    #[serde(default)]
    pub internal_qc_view_url: Option<String>,
    #[serde(default)]
    pub internal_qc_download_url: Option<String>,
    #[serde(default)]
    pub label_view_url: Option<String>,
    #[serde(default)]
    pub label_download_url: Option<String>,
}

/// A category inside a family. `count` always equals `products.len()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCategory {
    pub name: String,
    pub slug: String,
    pub family: String,
    pub family_slug: String,
    #[serde(default)]
    pub products: Vec<FinishedProduct>,
    #[serde(default)]
    pub count: usize,
}

/// A top-level product family. `count` is the sum of its category counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFamily {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub categories: Vec<ProductCategory>,
    #[serde(default)]
    pub count: usize,
}

/// Envelope of the `raw-materials.json` artifact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMaterialsData {
    #[serde(default)]
    pub items: Vec<RawMaterial>,
    #[serde(default)]
    pub count: usize,
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: String,
    #[serde(
        rename = "sourceChecksum",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_checksum: Option<String>,
}

/// Envelope of the `finished-products.json` artifact. Holds the derived
/// grouping only; the defaults merge happens at catalog load time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinishedProductsData {
    #[serde(default)]
    pub families: Vec<ProductFamily>,
    #[serde(default)]
    pub count: usize,
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: String,
    #[serde(
        rename = "sourceChecksum",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_checksum: Option<String>,
}
