//! Taxonomy grouping and merge.
//!
//! The grouping pass folds validated finished-product rows into an
//! ordered family, category, product tree. The merge pass reconciles
//! that tree with the curated default taxonomy: defaults always render,
//! dynamic data stays authoritative, seed products only supplement, and
//! spreadsheet-only entries are appended rather than dropped.

use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::defaults::{CategoryDef, FamilyDef, SeedProduct};
use crate::drive;
use crate::models::{FinishedProduct, ProductCategory, ProductFamily};
use crate::sheet::{field, Sheet};
use crate::slug::slugify;

/// Label substituted when a row carries no family or category.
pub const GENERAL_LABEL: &str = "General";

/// Default category names containing this marker get the base/variant
/// repair in [`repair_specialty_products`].
const SPECIALTY_MARKER: &str = "Especialidad";

/// Fold validated rows into the derived family tree, in source-row order.
///
/// Rows without a base product, or without any of family/category/sku,
/// are blank filler in the sheet: they are skipped with a warning. A row
/// missing only family or category lands in the "General" bucket. A
/// repeated SKU inside one category is a hard failure listing every
/// duplicate; the same SKU may appear in two different categories.
pub fn group_finished_products(sheet: &Sheet) -> Result<Vec<ProductFamily>> {
    let mut families: Vec<ProductFamily> = Vec::new();
    let mut family_index: HashMap<String, usize> = HashMap::new();
    let mut seen_skus: HashSet<(String, String, String)> = HashSet::new();
    let mut duplicates: Vec<(String, usize)> = Vec::new();
    let mut skipped = 0usize;

    for (index, record) in sheet.records.iter().enumerate() {
        let base_product = field(record, "base_product");
        let has_anchor = !field(record, "family").is_empty()
            || !field(record, "category").is_empty()
            || !field(record, "sku_code").is_empty();
        if base_product.is_empty() || !has_anchor {
            skipped += 1;
            continue;
        }

        let family_name = non_empty_or(field(record, "family"), GENERAL_LABEL);
        let category_name = non_empty_or(field(record, "category"), GENERAL_LABEL);
        let family_slug = slugify(family_name);
        let category_slug = slugify(category_name);

        let product =
            record_to_product(record, family_name, &family_slug, category_name, &category_slug);

        let identity = (
            family_slug.clone(),
            category_slug.clone(),
            product.sku_code.clone(),
        );
        if !seen_skus.insert(identity) {
            duplicates.push((product.sku_code.clone(), index + 2));
        }

        let fi = match family_index.get(&family_slug).copied() {
            Some(fi) => fi,
            None => {
                families.push(ProductFamily {
                    name: family_name.to_string(),
                    slug: family_slug.clone(),
                    categories: Vec::new(),
                    count: 0,
                });
                family_index.insert(family_slug.clone(), families.len() - 1);
                families.len() - 1
            }
        };
        let family = &mut families[fi];

        let ci = match family.categories.iter().position(|c| c.slug == category_slug) {
            Some(ci) => ci,
            None => {
                family.categories.push(ProductCategory {
                    name: category_name.to_string(),
                    slug: category_slug.clone(),
                    family: family_name.to_string(),
                    family_slug: family_slug.clone(),
                    products: Vec::new(),
                    count: 0,
                });
                family.categories.len() - 1
            }
        };
        family.categories[ci].products.push(product);
    }

    if !duplicates.is_empty() {
        let listing = duplicates
            .iter()
            .map(|(sku, row)| format!("  row {}: \"{}\"", row, sku))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("duplicate sku_code values within a category:\n{}", listing);
    }

    if skipped > 0 {
        eprintln!("Warning: skipped {} incomplete finished-product rows", skipped);
    }

    for family in &mut families {
        for category in &mut family.categories {
            category.count = category.products.len();
        }
        family.count = family.categories.iter().map(|c| c.count).sum();
    }

    Ok(families)
}

/// Merge the derived tree against the default taxonomy.
///
/// Field precedence per entity: dynamic data, then default seed, then
/// computed fallback. Defaults define display names and ordering; the
/// derived tree supplies the authoritative product lists. Derived
/// families and categories unknown to the defaults are appended after
/// them, in derived order.
pub fn merge_with_defaults(defaults: &[FamilyDef], derived: &[ProductFamily]) -> Vec<ProductFamily> {
    let mut families: Vec<ProductFamily> = Vec::with_capacity(defaults.len());
    let mut default_slugs: HashSet<&str> = HashSet::new();

    for def in defaults {
        default_slugs.insert(def.slug.as_str());
        let dynamic_family = derived.iter().find(|f| f.slug == def.slug);

        let mut categories: Vec<ProductCategory> = def
            .categories
            .iter()
            .map(|dc| {
                let dynamic_cat = dynamic_family
                    .and_then(|f| f.categories.iter().find(|c| c.slug == dc.slug));
                merge_category(def, dc, dynamic_cat)
            })
            .collect();

        // Spreadsheet categories the defaults don't know about yet.
        if let Some(dynamic_family) = dynamic_family {
            for dc in &dynamic_family.categories {
                if categories.iter().any(|c| c.slug == dc.slug) {
                    continue;
                }
                categories.push(adopt_category(def, dc));
            }
        }

        let count = categories.iter().map(|c| c.count).sum();
        families.push(ProductFamily {
            name: def.name.clone(),
            slug: def.slug.clone(),
            categories,
            count,
        });
    }

    // Spreadsheet families the defaults don't know about at all.
    for df in derived {
        if default_slugs.contains(df.slug.as_str()) {
            continue;
        }
        families.push(df.clone());
    }

    families
}

/// Family and category counts must always equal what a consumer can
/// iterate.
pub fn verify_counts(families: &[ProductFamily]) -> Result<()> {
    for family in families {
        let mut family_products = 0usize;
        for category in &family.categories {
            if category.count != category.products.len() {
                bail!(
                    "count mismatch in category '{}/{}': count={} products={}",
                    family.slug,
                    category.slug,
                    category.count,
                    category.products.len()
                );
            }
            family_products += category.products.len();
        }
        if family.count != family_products {
            bail!(
                "count mismatch in family '{}': count={} products={}",
                family.slug,
                family.count,
                family_products
            );
        }
    }
    Ok(())
}

fn merge_category(
    family: &FamilyDef,
    def: &CategoryDef,
    dynamic: Option<&ProductCategory>,
) -> ProductCategory {
    let mut products: Vec<FinishedProduct> = Vec::new();

    match dynamic {
        Some(dynamic) => {
            products.extend(dynamic.products.iter().cloned());
            let present: HashSet<&str> =
                dynamic.products.iter().map(|p| p.sku_code.as_str()).collect();
            products.extend(
                def.seed
                    .iter()
                    .filter(|s| !present.contains(s.sku_code.as_str()))
                    .map(|s| seed_to_product(s, family, def)),
            );
        }
        None => {
            products.extend(def.seed.iter().map(|s| seed_to_product(s, family, def)));
        }
    }

    // Display names come from the defaults, not from spreadsheet text.
    for product in &mut products {
        product.family = family.name.clone();
        product.family_slug = family.slug.clone();
        product.category = def.name.clone();
        product.category_slug = def.slug.clone();
    }

    if def.name.contains(SPECIALTY_MARKER) {
        repair_specialty_products(&def.name, &mut products);
    }

    let count = products.len();
    ProductCategory {
        name: def.name.clone(),
        slug: def.slug.clone(),
        family: family.name.clone(),
        family_slug: family.slug.clone(),
        products,
        count,
    }
}

/// Attach a spreadsheet-only category to its default family, restamping
/// the family fields so the denormalized stamps agree with the tree.
fn adopt_category(family: &FamilyDef, dynamic: &ProductCategory) -> ProductCategory {
    let mut category = dynamic.clone();
    category.family = family.name.clone();
    category.family_slug = family.slug.clone();
    for product in &mut category.products {
        product.family = family.name.clone();
        product.family_slug = family.slug.clone();
    }
    category.count = category.products.len();
    category
}

/// Specialty sheet rows historically carry the specific product name in
/// the base_product column. Recover the (generic base, specific variant)
/// shape the catalog expects. Data-quality workaround, not a domain
/// rule: this is the only trigger and the only call site, so dropping
/// the call disables it without touching the merge.
pub fn repair_specialty_products(category_name: &str, products: &mut [FinishedProduct]) {
    for product in products {
        if product.variant.is_empty() || product.variant == GENERAL_LABEL {
            product.variant = std::mem::take(&mut product.base_product);
            product.base_product = category_name.to_string();
        }
    }
}

fn seed_to_product(seed: &SeedProduct, family: &FamilyDef, category: &CategoryDef) -> FinishedProduct {
    FinishedProduct {
        family: family.name.clone(),
        family_slug: family.slug.clone(),
        category: category.name.clone(),
        category_slug: category.slug.clone(),
        sku_code: seed.sku_code.clone(),
        base_product: seed.base_product.clone(),
        variant: seed.variant.clone(),
        status: seed.status.clone(),
        updated_at: seed.updated_at.clone(),
        tds_file_id: seed.tds_file_id.clone(),
        sds_file_id: seed.sds_file_id.clone(),
        internal_qc_file_id: seed.internal_qc_file_id.clone(),
        label_file_id: String::new(),
        tds_view_url: drive::view_url(&seed.tds_file_id),
        tds_download_url: drive::download_url(&seed.tds_file_id),
        sds_view_url: drive::view_url(&seed.sds_file_id),
        sds_download_url: drive::download_url(&seed.sds_file_id),
        internal_qc_view_url: drive::view_url(&seed.internal_qc_file_id),
        internal_qc_download_url: drive::download_url(&seed.internal_qc_file_id),
        label_view_url: None,
        label_download_url: None,
    }
}

fn record_to_product(
    record: &HashMap<String, String>,
    family: &str,
    family_slug: &str,
    category: &str,
    category_slug: &str,
) -> FinishedProduct {
    let base_product = non_empty_or(field(record, "base_product"), "Sin Nombre");
    let variant = non_empty_or(field(record, "variant"), base_product);
    let sku_code = match (field(record, "sku_code"), field(record, "code")) {
        ("", "") => generated_sku(),
        ("", code) => code.to_string(),
        (sku, _) => sku.to_string(),
    };
    let status = non_empty_or(field(record, "status"), "Activo");
    let updated_at = match field(record, "updated_at") {
        "" => Utc::now().format("%Y-%m-%d").to_string(),
        value => value.to_string(),
    };

    let tds = field(record, "tds_file_id");
    let sds = field(record, "sds_file_id");
    let qc = field(record, "internal_qc_file_id");
    let label = field(record, "label_file_id");

    FinishedProduct {
        family: family.to_string(),
        family_slug: family_slug.to_string(),
        category: category.to_string(),
        category_slug: category_slug.to_string(),
        sku_code,
        base_product: base_product.to_string(),
        variant: variant.to_string(),
        status: status.to_string(),
        updated_at,
        tds_file_id: tds.to_string(),
        sds_file_id: sds.to_string(),
        internal_qc_file_id: qc.to_string(),
        label_file_id: label.to_string(),
        tds_view_url: drive::view_url(tds),
        tds_download_url: drive::download_url(tds),
        sds_view_url: drive::view_url(sds),
        sds_download_url: drive::download_url(sds),
        internal_qc_view_url: drive::view_url(qc),
        internal_qc_download_url: drive::download_url(qc),
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

/// Last-resort identity for a row with neither sku_code nor code.
fn generated_sku() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("PROD-{}", &id[..9])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_families;
    use crate::sheet::parse_csv;

    fn sheet_from(csv: &str) -> Sheet {
        parse_csv(csv).unwrap()
    }

    #[test]
    fn test_grouping_preserves_source_order() {
        let sheet = sheet_from(
            "family,category,base_product,variant,sku_code,status,updated_at\n\
             Lavandería,Detergentes,Detergente,Azul,PT-1,Activo,2024-01-01\n\
             Hogar,Limpiadores,Limpiador,Limón,PT-2,Activo,2024-01-01\n\
             Lavandería,Detergentes,Detergente,Rosa,PT-3,Activo,2024-01-01\n",
        );
        let families = group_finished_products(&sheet).unwrap();
        assert_eq!(families.len(), 2);
        assert_eq!(families[0].slug, "lavanderia");
        assert_eq!(families[1].slug, "hogar");
        let detergentes = &families[0].categories[0];
        assert_eq!(detergentes.products.len(), 2);
        assert_eq!(detergentes.products[0].sku_code, "PT-1");
        assert_eq!(detergentes.products[1].sku_code, "PT-3");
        assert_eq!(families[0].count, 2);
        assert_eq!(families[1].count, 1);
    }

    #[test]
    fn test_grouping_stamps_denormalized_fields() {
        let sheet = sheet_from(
            "family,category,base_product,sku_code,status\n\
             Lavandería,Detergentes Líquidos,Detergente,PT-1,Activo\n",
        );
        let families = group_finished_products(&sheet).unwrap();
        let product = &families[0].categories[0].products[0];
        assert_eq!(product.family, "Lavandería");
        assert_eq!(product.family_slug, "lavanderia");
        assert_eq!(product.category, "Detergentes Líquidos");
        assert_eq!(product.category_slug, "detergentes-liquidos");
    }

    #[test]
    fn test_missing_family_and_category_default_to_general() {
        let sheet = sheet_from(
            "family,category,base_product,sku_code,status\n\
             ,,Producto Suelto,PT-1,Activo\n",
        );
        let families = group_finished_products(&sheet).unwrap();
        assert_eq!(families.len(), 1);
        assert_eq!(families[0].name, GENERAL_LABEL);
        assert_eq!(families[0].slug, "general");
        assert_eq!(families[0].categories[0].slug, "general");
    }

    #[test]
    fn test_blank_filler_rows_skipped() {
        let sheet = sheet_from(
            "family,category,base_product,sku_code,status\n\
             Lavandería,Detergentes,Detergente,PT-1,Activo\n\
             ,,,,\n\
             ,,Sin Anclas,,\n\
             Huérfano,,,,\n",
        );
        let families = group_finished_products(&sheet).unwrap();
        let total: usize = families.iter().map(|f| f.count).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_field_fallbacks() {
        let sheet = sheet_from(
            "family,category,base_product,variant,sku_code,code,status,updated_at\n\
             F,C,Producto,,,LEGACY-9,,\n",
        );
        let families = group_finished_products(&sheet).unwrap();
        let product = &families[0].categories[0].products[0];
        assert_eq!(product.variant, "Producto");
        assert_eq!(product.sku_code, "LEGACY-9");
        assert_eq!(product.status, "Activo");
        assert!(!product.updated_at.is_empty());
    }

    #[test]
    fn test_generated_sku_for_anchorless_code() {
        let sheet = sheet_from(
            "family,category,base_product,sku_code,status\n\
             F,C,Producto,,Activo\n",
        );
        let families = group_finished_products(&sheet).unwrap();
        let product = &families[0].categories[0].products[0];
        assert!(product.sku_code.starts_with("PROD-"));
    }

    #[test]
    fn test_duplicate_sku_in_same_category_rejected() {
        let sheet = sheet_from(
            "family,category,base_product,sku_code,status\n\
             F,C,Producto A,PT-001,Activo\n\
             F,C,Producto B,PT-001,Activo\n\
             F,C,Producto C,PT-001,Activo\n",
        );
        let err = group_finished_products(&sheet).unwrap_err().to_string();
        assert!(err.contains("duplicate sku_code"));
        assert!(err.contains("row 3: \"PT-001\""));
        assert!(err.contains("row 4: \"PT-001\""));
    }

    #[test]
    fn test_same_sku_in_different_categories_allowed() {
        let sheet = sheet_from(
            "family,category,base_product,sku_code,status\n\
             F,C1,Producto A,PT-001,Activo\n\
             F,C2,Producto B,PT-001,Activo\n",
        );
        assert!(group_finished_products(&sheet).is_ok());
    }

    #[test]
    fn test_document_urls_resolved_per_row() {
        let sheet = sheet_from(
            "family,category,base_product,sku_code,status,tds_file_id,sds_file_id\n\
             F,C,Producto,PT-1,Activo,1AbCdEfGhIjKlMnOpQrStUvWx,\n",
        );
        let families = group_finished_products(&sheet).unwrap();
        let product = &families[0].categories[0].products[0];
        assert_eq!(
            product.tds_view_url.as_deref(),
            Some("https://drive.google.com/file/d/1AbCdEfGhIjKlMnOpQrStUvWx/view?usp=sharing")
        );
        assert!(product.sds_view_url.is_none());
        assert!(product.sds_download_url.is_none());
    }

    #[test]
    fn test_merge_keeps_every_default_even_with_no_data() {
        let merged = merge_with_defaults(&default_families(), &[]);
        let defaults = default_families();
        assert_eq!(merged.len(), defaults.len());
        for (family, def) in merged.iter().zip(defaults.iter()) {
            assert_eq!(family.slug, def.slug);
            assert_eq!(family.categories.len(), def.categories.len());
        }
        // Unseeded categories are present with zero products.
        let hogar = merged.iter().find(|f| f.slug == "cuidado-del-hogar").unwrap();
        let bases = hogar
            .categories
            .iter()
            .find(|c| c.slug == "bases-de-limpiadores-liquidos-multiusos")
            .unwrap();
        assert_eq!(bases.count, 0);
        assert!(bases.products.is_empty());
        verify_counts(&merged).unwrap();
    }

    #[test]
    fn test_merge_dynamic_wins_and_seeds_supplement() {
        let sheet = sheet_from(
            "family,category,base_product,variant,sku_code,status,updated_at\n\
             Lavandería,Especialidades Lavandería,Especialidad Lavandería,Nuevo Quitamanchas,PT-LA-EL-099,Activo,2024-03-01\n\
             Lavandería,Especialidades Lavandería,Especialidad Lavandería,Desmugrador Ginez,PT-LA-EL-001,Activo,2024-03-01\n",
        );
        let derived = group_finished_products(&sheet).unwrap();
        let merged = merge_with_defaults(&default_families(), &derived);

        let category = merged
            .iter()
            .find(|f| f.slug == "lavanderia")
            .unwrap()
            .categories
            .iter()
            .find(|c| c.slug == "especialidades-lavanderia")
            .unwrap();

        // Dynamic rows come first; the seeded SKUs the sheet does not
        // mention (002..005) are appended, the duplicated 001 is not.
        assert_eq!(category.products[0].sku_code, "PT-LA-EL-099");
        assert_eq!(category.products[1].sku_code, "PT-LA-EL-001");
        let skus: Vec<&str> = category.products.iter().map(|p| p.sku_code.as_str()).collect();
        assert_eq!(skus.iter().filter(|s| **s == "PT-LA-EL-001").count(), 1);
        assert!(skus.contains(&"PT-LA-EL-002"));
        assert_eq!(category.count, 6);
        verify_counts(&merged).unwrap();
    }

    #[test]
    fn test_merge_display_names_come_from_defaults() {
        let sheet = sheet_from(
            "family,category,base_product,variant,sku_code,status\n\
             LAVANDERIA,especialidades lavanderia,Especialidad,Brillo,PT-X-1,Activo\n",
        );
        let derived = group_finished_products(&sheet).unwrap();
        let merged = merge_with_defaults(&default_families(), &derived);
        let family = merged.iter().find(|f| f.slug == "lavanderia").unwrap();
        assert_eq!(family.name, "Lavandería");
        let product = family
            .categories
            .iter()
            .find(|c| c.slug == "especialidades-lavanderia")
            .unwrap()
            .products
            .iter()
            .find(|p| p.sku_code == "PT-X-1")
            .unwrap();
        assert_eq!(product.family, "Lavandería");
        assert_eq!(product.category, "Especialidades Lavandería");
    }

    #[test]
    fn test_merge_appends_unknown_categories_and_families() {
        let sheet = sheet_from(
            "family,category,base_product,variant,sku_code,status\n\
             Lavandería,Categoría Nueva,Producto,V1,PT-N-1,Activo\n\
             Jardinería,Fertilizantes,Fertilizante,Verde,PT-J-1,Activo\n",
        );
        let derived = group_finished_products(&sheet).unwrap();
        let merged = merge_with_defaults(&default_families(), &derived);

        let lavanderia = merged.iter().find(|f| f.slug == "lavanderia").unwrap();
        let nueva = lavanderia.categories.last().unwrap();
        assert_eq!(nueva.slug, "categoria-nueva");
        assert_eq!(nueva.family, "Lavandería");
        assert_eq!(nueva.products[0].family_slug, "lavanderia");

        // Unknown families land after all the defaults.
        let jardineria = merged.last().unwrap();
        assert_eq!(jardineria.slug, "jardineria");
        assert_eq!(jardineria.count, 1);
        assert_eq!(merged.len(), default_families().len() + 1);
        verify_counts(&merged).unwrap();
    }

    #[test]
    fn test_specialty_swap_scenario() {
        let sheet = sheet_from(
            "family,category,base_product,variant,sku_code,status,updated_at\n\
             Lavandería,Especialidades Lavandería,Desmugrador Ginez,General,PT-LA-EL-010,Activo,2024-03-01\n",
        );
        let derived = group_finished_products(&sheet).unwrap();
        let merged = merge_with_defaults(&default_families(), &derived);
        let product = merged
            .iter()
            .find(|f| f.slug == "lavanderia")
            .unwrap()
            .categories
            .iter()
            .find(|c| c.slug == "especialidades-lavanderia")
            .unwrap()
            .products
            .iter()
            .find(|p| p.sku_code == "PT-LA-EL-010")
            .unwrap();
        assert_eq!(product.base_product, "Especialidades Lavandería");
        assert_eq!(product.variant, "Desmugrador Ginez");
    }

    #[test]
    fn test_specialty_swap_leaves_named_variants_alone() {
        let merged = merge_with_defaults(&default_families(), &[]);
        let category = merged
            .iter()
            .find(|f| f.slug == "lavanderia")
            .unwrap()
            .categories
            .iter()
            .find(|c| c.slug == "especialidades-lavanderia")
            .unwrap();
        // Seed rows already have specific variants; the repair must not
        // touch them.
        assert_eq!(category.products[0].base_product, "Especialidad Lavandería");
        assert_eq!(category.products[0].variant, "Desmugrador Ginez");
    }

    #[test]
    fn test_non_specialty_categories_never_swap() {
        let sheet = sheet_from(
            "family,category,base_product,variant,sku_code,status\n\
             Línea Automotriz,General,Alto Brillo,General,PT-AU-002,Activo\n",
        );
        let derived = group_finished_products(&sheet).unwrap();
        let merged = merge_with_defaults(&default_families(), &derived);
        let product = merged
            .iter()
            .find(|f| f.slug == "linea-automotriz")
            .unwrap()
            .categories[0]
            .products
            .iter()
            .find(|p| p.sku_code == "PT-AU-002")
            .unwrap();
        assert_eq!(product.base_product, "Alto Brillo");
        assert_eq!(product.variant, "General");
    }

    #[test]
    fn test_family_count_invariant_after_merge() {
        let sheet = sheet_from(
            "family,category,base_product,variant,sku_code,status\n\
             Lavandería,Especialidades Lavandería,Especialidad,Nueva,PT-1,Activo\n\
             Cuidado del Hogar,Aromatizantes Ambientales,Aromatizante,LUX,PT-CH-AA-001,Activo\n\
             Jardinería,General,Fertilizante,Verde,PT-2,Activo\n",
        );
        let derived = group_finished_products(&sheet).unwrap();
        verify_counts(&derived).unwrap();
        let merged = merge_with_defaults(&default_families(), &derived);
        verify_counts(&merged).unwrap();
        for family in &merged {
            let iterable: usize = family.categories.iter().map(|c| c.products.len()).sum();
            assert_eq!(family.count, iterable, "family {}", family.slug);
        }
    }
}
