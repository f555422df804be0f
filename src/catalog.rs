//! Read-only accessor API over the published catalog.
//!
//! A [`Catalog`] is rebuilt on every load as a pure function of the two
//! JSON artifacts and the default taxonomy. Lookups project into the
//! merged tree and report misses as `None`; nothing here mutates.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::config::Config;
use crate::defaults;
use crate::ingest::{FINISHED_PRODUCTS_FILE, RAW_MATERIALS_FILE};
use crate::models::{
    FinishedProduct, FinishedProductsData, ProductCategory, ProductFamily, RawMaterial,
    RawMaterialsData,
};
use crate::taxonomy;

type FieldAccessor = fn(&RawMaterial) -> &str;

#[derive(Debug, Clone)]
pub struct Catalog {
    raw: RawMaterialsData,
    families: Vec<ProductFamily>,
    products_last_updated: String,
}

impl Catalog {
    /// Load the artifacts from the configured output directory and merge
    /// them with the default taxonomy. A missing artifact reads as an
    /// empty dataset, so the defaults still render.
    pub fn load(config: &Config) -> Result<Catalog> {
        let dir = &config.output.dir;
        let raw: RawMaterialsData =
            read_artifact(&dir.join(RAW_MATERIALS_FILE))?.unwrap_or_default();
        let products: FinishedProductsData =
            read_artifact(&dir.join(FINISHED_PRODUCTS_FILE))?.unwrap_or_default();
        Ok(Self::from_parts(raw, products))
    }

    /// Build a catalog from already-loaded artifact data.
    pub fn from_parts(raw: RawMaterialsData, products: FinishedProductsData) -> Catalog {
        let curated = defaults::default_families();
        let families = taxonomy::merge_with_defaults(&curated, &products.families);
        debug_assert!(taxonomy::verify_counts(&families).is_ok());
        Catalog {
            raw,
            families,
            products_last_updated: products.last_updated,
        }
    }

    pub fn raw_materials(&self) -> &[RawMaterial] {
        &self.raw.items
    }

    pub fn raw_material_by_code(&self, code: &str) -> Option<&RawMaterial> {
        self.raw.items.iter().find(|m| m.code == code)
    }

    pub fn raw_materials_count(&self) -> usize {
        self.raw.count
    }

    pub fn raw_materials_updated(&self) -> &str {
        &self.raw.last_updated
    }

    pub fn finished_products_updated(&self) -> &str {
        &self.products_last_updated
    }

    /// The merged family tree, defaults first, in display order.
    pub fn families(&self) -> &[ProductFamily] {
        &self.families
    }

    pub fn family_by_slug(&self, slug: &str) -> Option<&ProductFamily> {
        self.families.iter().find(|f| f.slug == slug)
    }

    pub fn category_by_slug(
        &self,
        family_slug: &str,
        category_slug: &str,
    ) -> Option<&ProductCategory> {
        self.family_by_slug(family_slug)?
            .categories
            .iter()
            .find(|c| c.slug == category_slug)
    }

    pub fn product_by_sku(
        &self,
        family_slug: &str,
        category_slug: &str,
        sku: &str,
    ) -> Option<&FinishedProduct> {
        self.category_by_slug(family_slug, category_slug)?
            .products
            .iter()
            .find(|p| p.sku_code == sku)
    }

    /// All finished products, flattened in taxonomy traversal order.
    pub fn all_products(&self) -> Vec<&FinishedProduct> {
        self.families
            .iter()
            .flat_map(|f| f.categories.iter())
            .flat_map(|c| c.products.iter())
            .collect()
    }

    pub fn finished_products_count(&self) -> usize {
        self.families.iter().map(|f| f.count).sum()
    }

    /// Sorted, deduplicated non-blank values of a raw-material string
    /// field. Feeds the filter option sets in the catalog UI.
    pub fn distinct_values(&self, field: &str) -> Result<Vec<String>> {
        let accessor = material_field(field)?;
        let mut values: BTreeSet<String> = BTreeSet::new();
        for item in &self.raw.items {
            let value = accessor(item).trim();
            if !value.is_empty() {
                values.insert(value.to_string());
            }
        }
        Ok(values.into_iter().collect())
    }
}

/// Raw-material fields addressable by name in filter extraction.
pub const MATERIAL_FILTER_FIELDS: &[&str] = &[
    "code",
    "name",
    "cas",
    "transport_name",
    "functional_category",
    "chemical_family",
    "disposition",
    "provider",
    "provider_code",
    "lead_time_days",
];

fn material_field(name: &str) -> Result<FieldAccessor> {
    let accessor: FieldAccessor = match name {
        "code" => |m| m.code.as_str(),
        "name" => |m| m.name.as_str(),
        "cas" => |m| m.cas.as_str(),
        "transport_name" => |m| m.transport_name.as_str(),
        "functional_category" => |m| m.functional_category.as_str(),
        "chemical_family" => |m| m.chemical_family.as_str(),
        "disposition" => |m| m.disposition.as_str(),
        "provider" => |m| m.provider.as_str(),
        "provider_code" => |m| m.provider_code.as_str(),
        "lead_time_days" => |m| m.lead_time_days.as_str(),
        other => bail!(
            "unknown raw-material field '{}'. Available: {}",
            other,
            MATERIAL_FILTER_FIELDS.join(", ")
        ),
    };
    Ok(accessor)
}

fn read_artifact<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let data = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(data))
}
