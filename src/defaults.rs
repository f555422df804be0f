//! The hand-curated default taxonomy.
//!
//! Families and categories listed here always render in the catalog,
//! even before the spreadsheet covers them, and their names and ordering
//! are the display truth. Seed product lists fill a category until
//! dynamic data exists for it; once it does, seeds only supplement SKUs
//! the spreadsheet does not mention.

use crate::slug::slugify;

/// A curated top-level family definition.
#[derive(Debug, Clone)]
pub struct FamilyDef {
    pub name: String,
    pub slug: String,
    pub categories: Vec<CategoryDef>,
}

/// A curated category definition inside a family.
#[derive(Debug, Clone)]
pub struct CategoryDef {
    pub name: String,
    pub slug: String,
    pub seed: Vec<SeedProduct>,
}

/// A product authored directly in the default taxonomy. Carries only the
/// fields a curator writes; the merge stamps family/category context and
/// resolves document URLs.
#[derive(Debug, Clone)]
pub struct SeedProduct {
    pub sku_code: String,
    pub base_product: String,
    pub variant: String,
    pub status: String,
    pub updated_at: String,
    pub tds_file_id: String,
    pub sds_file_id: String,
    pub internal_qc_file_id: String,
}

fn family(name: &str, categories: Vec<CategoryDef>) -> FamilyDef {
    FamilyDef {
        name: name.to_string(),
        slug: slugify(name),
        categories,
    }
}

fn category(name: &str, seed: Vec<SeedProduct>) -> CategoryDef {
    CategoryDef {
        name: name.to_string(),
        slug: slugify(name),
        seed,
    }
}

fn seed(sku_code: &str, base_product: &str, variant: &str, updated_at: &str) -> SeedProduct {
    SeedProduct {
        sku_code: sku_code.to_string(),
        base_product: base_product.to_string(),
        variant: variant.to_string(),
        status: "Activo".to_string(),
        updated_at: updated_at.to_string(),
        tds_file_id: String::new(),
        sds_file_id: String::new(),
        internal_qc_file_id: String::new(),
    }
}

fn seed_with_docs(
    sku_code: &str,
    base_product: &str,
    variant: &str,
    updated_at: &str,
    doc_id: &str,
) -> SeedProduct {
    SeedProduct {
        tds_file_id: doc_id.to_string(),
        sds_file_id: doc_id.to_string(),
        internal_qc_file_id: doc_id.to_string(),
        ..seed(sku_code, base_product, variant, updated_at)
    }
}

/// The full curated taxonomy, in display order.
pub fn default_families() -> Vec<FamilyDef> {
    vec![
        family(
            "Cuidado del Hogar",
            vec![
                category(
                    "Limpiadores Líquidos Multiusos",
                    vec![
                        seed("PT-CH-LLM-001", "Limpiador Líquido Multiusos", "Limón", "2024-01-28"),
                        seed("PT-CH-LLM-002", "Limpiador Líquido Multiusos", "Violetas", "2024-01-28"),
                        seed("PT-CH-LLM-003", "Limpiador Líquido Multiusos", "Mar Fresco", "2024-01-28"),
                        seed("PT-CH-LLM-004", "Limpiador Líquido Multiusos", "Cascadas", "2024-01-28"),
                        seed("PT-CH-LLM-005", "Limpiador Líquido Multiusos", "Brisas", "2024-01-28"),
                        seed("PT-CH-LLM-006", "Limpiador Líquido Multiusos", "Canela", "2024-01-28"),
                        seed("PT-CH-LLM-007", "Limpiador Líquido Multiusos", "Chicle", "2024-01-28"),
                        seed("PT-CH-LLM-008", "Limpiador Líquido Multiusos", "Bosques", "2024-01-28"),
                        seed("PT-CH-LLM-009", "Limpiador Líquido Multiusos", "Lavanda Francesa", "2024-01-28"),
                        seed("PT-CH-LLM-010", "Limpiador Líquido Multiusos", "Peras y Manzanas", "2024-01-28"),
                        seed("PT-CH-LLM-011", "Limpiador Líquido Multiusos", "Menta", "2024-01-28"),
                        seed("PT-CH-LLM-012", "Limpiador Líquido Multiusos", "Stephany", "2024-01-28"),
                        seed("PT-CH-LLM-013", "Limpiador Líquido Multiusos", "Frutal", "2024-01-28"),
                        seed("PT-CH-LLM-014", "Limpiador Líquido Multiusos", "Gpoet", "2024-01-28"),
                        seed("PT-CH-LLM-015", "Limpiador Líquido Multiusos", "Manzana- Canela", "2024-01-28"),
                        seed("PT-CH-LLM-016", "Limpiador Líquido Multiusos", "Floralis", "2024-01-28"),
                        seed("PT-CH-LLM-017", "Limpiador Líquido Multiusos", "Alaska", "2024-01-28"),
                        seed("PT-CH-LLM-018", "Limpiador Líquido Multiusos", "Pino Cristalino", "2024-01-28"),
                        seed("PT-CH-LLM-019", "Limpiador Líquido Multiusos", "Pino Lechoso Blanco", "2024-01-28"),
                        seed("PT-CH-LLM-020", "Limpiador Líquido Multiusos", "Pino Lechoso Verde", "2024-01-28"),
                    ],
                ),
                category(
                    "Detergentes Líquidos para Trastes",
                    vec![
                        seed("PT-CH-DLT-001", "Detergente líquido para Trastes", "Limón", "2024-01-28"),
                        seed("PT-CH-DLT-002", "Detergente líquido para Trastes", "Mandarina", "2024-01-28"),
                        seed("PT-CH-DLT-003", "Detergente líquido para Trastes", "Naranja", "2024-01-28"),
                        seed("PT-CH-DLT-004", "Detergente líquido para Trastes", "Toronja", "2024-01-28"),
                        seed("PT-CH-DLT-005", "Detergente líquido para Trastes", "Complete blue", "2024-01-28"),
                        seed("PT-CH-DLT-006", "Detergente líquido para Trastes", "Xpumax", "2024-01-28"),
                    ],
                ),
                category(
                    "Aromatizantes Ambientales",
                    vec![
                        seed("PT-CH-AA-001", "Aromatizante ambiental líquido", "LUX", "2024-01-28"),
                        seed("PT-CH-AA-002", "Aromatizante ambiental líquido", "ETERGÍN", "2024-01-28"),
                        seed("PT-CH-AA-003", "Aromatizante ambiental líquido", "NÓRDICO", "2024-01-28"),
                        seed("PT-CH-AA-004", "Aromatizante ambiental líquido", "CHICA FRESA", "2024-01-28"),
                        seed("PT-CH-AA-005", "Aromatizante ambiental líquido", "FERRAGÍN", "2024-01-28"),
                        seed("PT-CH-AA-006", "Aromatizante ambiental líquido", "CANELA", "2024-01-28"),
                        seed("PT-CH-AA-007", "Aromatizante ambiental líquido", "HUGO", "2024-01-28"),
                        seed("PT-CH-AA-008", "Aromatizante ambiental líquido", "POLO", "2024-01-28"),
                        seed("PT-CH-AA-009", "Aromatizante ambiental líquido", "CAROLINA", "2024-01-28"),
                        seed("PT-CH-AA-010", "Aromatizante ambiental líquido", "DRAGÍN", "2024-01-28"),
                        seed("PT-CH-AA-011", "Aromatizante ambiental líquido", "ESTERGÍN", "2024-01-28"),
                        seed("PT-CH-AA-012", "Aromatizante ambiental líquido", "ANIMAL", "2024-01-28"),
                        seed("PT-CH-AA-013", "Aromatizante ambiental líquido", "GARDENIAS", "2024-01-28"),
                    ],
                ),
                category("Bases de Limpiadores Líquidos Multiusos", vec![]),
                category(
                    "Bases de Aromatizantes Ambientales",
                    vec![
                        seed("PT-CH-BAA-001", "Aromatizante ambiental líquido", "LUX", "2024-01-29"),
                        seed("PT-CH-BAA-002", "Aromatizante ambiental líquido", "ETERGÍN", "2024-01-29"),
                        seed("PT-CH-BAA-003", "Aromatizante ambiental líquido", "NÓRDICO", "2024-01-29"),
                        seed("PT-CH-BAA-004", "Aromatizante ambiental líquido", "CHICA FRESA", "2024-01-29"),
                        seed("PT-CH-BAA-005", "Aromatizante ambiental líquido", "FERRAGÍN", "2024-01-29"),
                        seed("PT-CH-BAA-006", "Aromatizante ambiental líquido", "CANELA", "2024-01-29"),
                        seed("PT-CH-BAA-007", "Aromatizante ambiental líquido", "HUGO", "2024-01-29"),
                        seed("PT-CH-BAA-008", "Aromatizante ambiental líquido", "POLO", "2024-01-29"),
                        seed("PT-CH-BAA-010", "Aromatizante ambiental líquido", "CAROLINA", "2024-01-29"),
                        seed("PT-CH-BAA-011", "Aromatizante ambiental líquido", "DRAGÍN", "2024-01-29"),
                        seed("PT-CH-BAA-012", "Aromatizante ambiental líquido", "ESTERGÍN", "2024-01-29"),
                        seed("PT-CH-BAA-013", "Aromatizante ambiental líquido", "ANIMAL", "2024-01-29"),
                        seed("PT-CH-BAA-014", "Aromatizante ambiental líquido", "GARDENIAS", "2024-01-29"),
                    ],
                ),
                category(
                    "Especialidades Cuidado del Hogar",
                    vec![
                        seed("PT-CH-ECH-001", "Especialidad Cuidado del Hogar", "Aceite para Muebles", "2024-01-28"),
                        seed("PT-CH-ECH-002", "Especialidad Cuidado del Hogar", "Cloro en gel", "2024-01-28"),
                        seed("PT-CH-ECH-003", "Especialidad Cuidado del Hogar", "Cloro", "2024-01-28"),
                        seed("PT-CH-ECH-004", "Especialidad Cuidado del Hogar", "Quita Cochambre en Pasta", "2024-01-28"),
                        seed("PT-CH-ECH-005", "Especialidad Cuidado del Hogar", "Sarricida", "2024-01-28"),
                        seed("PT-CH-ECH-006", "Especialidad Cuidado del Hogar", "Sarrigel", "2024-01-28"),
                        seed("PT-CH-ECH-007", "Especialidad Cuidado del Hogar", "Detergente Líquido Neutro", "2024-01-28"),
                        seed("PT-CH-ECH-008", "Especialidad Cuidado del Hogar", "Insecticida", "2024-01-28"),
                        seed("PT-CH-ECH-009", "Especialidad Cuidado del Hogar", "Detergín", "2024-01-28"),
                        seed("PT-CH-ECH-010", "Especialidad Cuidado del Hogar", "Líquido para Mops", "2024-01-28"),
                        seed("PT-CH-ECH-011", "Especialidad Cuidado del Hogar", "Desengrasante líquido tipo Brasso", "2024-01-28"),
                        seed("PT-CH-ECH-012", "Especialidad Cuidado del Hogar", "Limpiador Líquido para Vidrios", "2024-01-28"),
                        seed("PT-CH-ECH-013", "Especialidad Cuidado del Hogar", "Detergente Líquido con Amoniaco", "2024-01-28"),
                        seed("PT-CH-ECH-014", "Especialidad Cuidado del Hogar", "Desengrasante líquido industrial", "2024-01-28"),
                        seed("PT-CH-ECH-015", "Especialidad Cuidado del Hogar", "Teflón Líquido", "2024-01-28"),
                        seed("PT-CH-ECH-016", "Especialidad Cuidado del Hogar", "Teflón Espeso", "2024-01-28"),
                        seed("PT-CH-ECH-017", "Especialidad Cuidado del Hogar", "Shampoo para Mascotas", "2024-01-28"),
                        seed("PT-CH-ECH-018", "Especialidad Cuidado del Hogar", "Limpiador Líquido Multiusos c/acción Repelente", "2024-01-28"),
                    ],
                ),
            ],
        ),
        family(
            "Lavandería",
            vec![
                category(
                    "Detergentes Líquidos de Ropa",
                    vec![
                        seed("PT-LA-DLR-001", "Detergente Líquido para Ropa", "Colorgín cristalino", "2024-01-28"),
                        seed("PT-LA-DLR-002", "Detergente Líquido para Ropa", "Colorgin blanco", "2024-01-28"),
                        seed("PT-LA-DLR-003", "Detergente Líquido para Ropa", "Colorgin negro", "2024-01-28"),
                        seed("PT-LA-DLR-004", "Detergente Líquido para Ropa", "Giriel Clásico", "2024-01-28"),
                        seed("PT-LA-DLR-005", "Detergente Líquido para Ropa", "Giriel Doble Poder", "2024-01-28"),
                        seed("PT-LA-DLR-006", "Detergente Líquido para Ropa", "Pergín", "2024-01-28"),
                        seed("PT-LA-DLR-007", "Detergente Líquido para Ropa", "Vivagin", "2024-01-28"),
                        seed("PT-LA-DLR-008", "Detergente Líquido para Ropa", "Giriel Oxianillos", "2024-01-28"),
                        seed("PT-LA-DLR-009", "Detergente Líquido para Ropa", "Sunset", "2024-01-28"),
                        seed("PT-LA-DLR-010", "Detergente Líquido para Ropa", "Shampoo Ginez", "2024-01-28"),
                        seed("PT-LA-DLR-011", "Detergente Líquido para Ropa", "Zotgin Rosa Ginez", "2024-01-28"),
                        seed("PT-LA-DLR-012", "Detergente Líquido para Ropa", "Zotgin Blanco Ginez", "2024-01-28"),
                        seed("PT-LA-DLR-013", "Detergente Líquido para Ropa", "Zotgin Azul Ginez", "2024-01-28"),
                        seed("PT-LA-DLR-014", "Detergente Líquido para Ropa", "Aqua", "2024-01-28"),
                        seed("PT-LA-DLR-015", "Detergente Líquido para Ropa", "Doncella", "2024-01-28"),
                        seed("PT-LA-DLR-016", "Detergente Líquido para Ropa", "Perla", "2024-01-28"),
                        seed("PT-LA-DLR-017", "Detergente Líquido para Ropa", "Encanto", "2024-01-28"),
                        seed("PT-LA-DLR-018", "Detergente Líquido para Ropa", "Velgín", "2024-01-28"),
                    ],
                ),
                category(
                    "Suavizantes Líquidos para Telas",
                    vec![
                        seed("PT-LA-SLT-001", "Suavizante Líquido para Telas", "Sueño", "2024-01-28"),
                        seed("PT-LA-SLT-002", "Suavizante Líquido para Telas", "Libre enjuague", "2024-01-28"),
                        seed("PT-LA-SLT-003", "Suavizante Líquido para Telas", "Mágico", "2024-01-28"),
                        seed("PT-LA-SLT-004", "Suavizante Líquido para Telas", "Intensity", "2024-01-28"),
                        seed("PT-LA-SLT-005", "Suavizante Líquido para Telas", "Fresca naturaleza & confort", "2024-01-28"),
                        seed("PT-LA-SLT-006", "Suavizante Líquido para Telas", "Suavidad de luna", "2024-01-28"),
                        seed("PT-LA-SLT-007", "Suavizante Líquido para Telas", "Blue softener", "2024-01-28"),
                        seed("PT-LA-SLT-008", "Suavizante Líquido para Telas", "Pasión", "2024-01-28"),
                        seed("PT-LA-SLT-009", "Suavizante Líquido para Telas", "Sensación", "2024-01-28"),
                        seed("PT-LA-SLT-010", "Suavizante Líquido para Telas", "Fresca primavera", "2024-01-28"),
                        seed("PT-LA-SLT-011", "Suavizante Líquido para Telas", "Baby plus", "2024-01-28"),
                        seed("PT-LA-SLT-012", "Suavizante Líquido para Telas", "Neutro", "2024-01-28"),
                        seed("PT-LA-SLT-013", "Suavizante Líquido para Telas", "Deleite", "2024-01-28"),
                    ],
                ),
                category("Reforzadores de Aroma", vec![]),
                category(
                    "Especialidades Lavandería",
                    vec![
                        seed("PT-LA-EL-001", "Especialidad Lavandería", "Desmugrador Ginez", "2024-01-29"),
                        seed("PT-LA-EL-002", "Especialidad Lavandería", "Detergente líquido con aceite de pino", "2024-01-29"),
                        seed("PT-LA-EL-003", "Especialidad Lavandería", "Quita manchas líquido Ginesh", "2024-01-29"),
                        seed("PT-LA-EL-004", "Especialidad Lavandería", "Reforzador de aroma Ginez", "2024-01-29"),
                        seed("PT-LA-EL-005", "Especialidad Lavandería", "Plancha fácil Ginez", "2024-01-29"),
                    ],
                ),
            ],
        ),
        family(
            "Línea Automotriz",
            vec![category(
                "General",
                vec![
                    seed_with_docs("PT-AU-001", "Shampoo para carros con cera", "General", "2024-01-24", "1"),
                    seed_with_docs("PT-AU-002", "Alto Brillo", "General", "2024-01-24", "1"),
                    seed_with_docs("PT-AU-003", "Ginerol Líquido", "General", "2024-01-24", "1"),
                    seed_with_docs("PT-AU-004", "Ginerol Espeso", "General", "2024-01-24", "1"),
                    seed_with_docs("PT-AU-005", "Abrillantador Líquido", "General", "2024-01-24", "1"),
                    seed_with_docs("PT-AU-006", "Abrillantador Gel", "General", "2024-01-24", "1"),
                ],
            )],
        ),
        family(
            "Línea Antibacterial",
            vec![category(
                "General",
                vec![
                    seed("PT-AB-001", "Gel antibacterial para manos Ginez", "General", "2024-01-29"),
                    seed("PT-AB-002", "Líquido sanitizante Bakter Ginez", "General", "2024-01-29"),
                    seed("PT-AB-003", "Limpiador líquido multiusos SAK Ginez", "General", "2024-01-29"),
                    seed("PT-AB-004", "Jabón líquido para manos antibacterial MAKAZH", "General", "2024-01-29"),
                    seed("PT-AB-005", "Detergente líquido para trastes GRAZO Ginez", "General", "2024-01-29"),
                ],
            )],
        ),
        family(
            "Cuidado Personal",
            vec![
                category(
                    "Jabones Líquidos para Manos",
                    vec![
                        seed("PT-CP-JLM-001", "Jabón Líquido para Manos", "JLM Peras y manzanas", "2024-01-29"),
                        seed("PT-CP-JLM-002", "Jabón Líquido para Manos", "JLM Neutro", "2024-01-29"),
                        seed("PT-CP-JLM-003", "Jabón Líquido para Manos", "JLM Cereza", "2024-01-29"),
                        seed("PT-CP-JLM-004", "Jabón Líquido para Manos", "JLM Uva", "2024-01-29"),
                        seed("PT-CP-JLM-005", "Jabón Líquido para Manos", "JLM Hierbas", "2024-01-29"),
                        seed("PT-CP-JLM-006", "Jabón Líquido para Manos", "JLM Coco", "2024-01-29"),
                    ],
                ),
                category(
                    "Shampoos Capilares",
                    vec![
                        seed("PT-CP-SC-001", "Shampoo Capilar", "Shampoo Capilar Ginepant", "2024-01-29"),
                        seed("PT-CP-SC-002", "Shampoo Capilar", "Shampoo Capilar Ginhead", "2024-01-29"),
                    ],
                ),
                category(
                    "Enjuagues Capilares",
                    vec![seed("PT-CP-EC-001", "Enjuague Capilar", "Enjuague capilar Ginez Rosas", "2024-01-29")],
                ),
                category(
                    "Cremas Corporales",
                    vec![seed("PT-CP-CC-001", "Crema Corporal", "Delicatezza", "2024-01-29")],
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_derive_from_names() {
        let families = default_families();
        let lavanderia = families.iter().find(|f| f.name == "Lavandería").unwrap();
        assert_eq!(lavanderia.slug, "lavanderia");
        let especialidades = lavanderia
            .categories
            .iter()
            .find(|c| c.name == "Especialidades Lavandería")
            .unwrap();
        assert_eq!(especialidades.slug, "especialidades-lavanderia");
    }

    #[test]
    fn test_no_duplicate_slugs_within_scope() {
        let families = default_families();
        let mut family_slugs: Vec<&str> = families.iter().map(|f| f.slug.as_str()).collect();
        family_slugs.sort();
        family_slugs.dedup();
        assert_eq!(family_slugs.len(), families.len());

        for family in &families {
            let mut slugs: Vec<&str> = family.categories.iter().map(|c| c.slug.as_str()).collect();
            slugs.sort();
            slugs.dedup();
            assert_eq!(slugs.len(), family.categories.len(), "family {}", family.name);
        }
    }

    #[test]
    fn test_seed_skus_unique_within_category() {
        for family in default_families() {
            for category in &family.categories {
                let mut skus: Vec<&str> = category.seed.iter().map(|s| s.sku_code.as_str()).collect();
                skus.sort();
                skus.dedup();
                assert_eq!(skus.len(), category.seed.len(), "category {}", category.name);
            }
        }
    }
}
