use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn catalog_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("catalog");
    path
}

const MP_CSV: &str = "\
code,name,cas,transport_name,functional_category,chemical_family,disposition,provider,tds_file_id
MP-001,Acido Citrico,77-92-9,Citric Acid,Acidos,Organicos,General,Quimicorp,1AbCdEfGhIjKlMnOpQrStUvWx
MP-002,Sosa Caustica,1310-73-2,Sodium Hydroxide,Bases,Inorganicos,Crítico,,
MP-003,Acido Sulfonico,27176-87-0,LABSA,Acidos,Organicos,Restringido,,
";

const PT_CSV: &str = "\
family,category,base_product,variant,sku_code,status,updated_at,tds_file_id
Lavandería,Especialidades Lavandería,Desmugrador Ginez,General,PT-LA-EL-001,Activo,2024-03-01,
Cuidado del Hogar,Limpiadores Líquidos Multiusos,Limpiador Líquido Multiusos,Limón,PT-CH-LLM-001,Activo,2024-03-01,
Jardinería,Fertilizantes,Fertilizante Líquido,Verde,PT-JA-F-001,Activo,2024,
,,Sin Anclas,,,,,
";

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    fs::write(root.join("mp.csv"), MP_CSV).unwrap();
    fs::write(root.join("pt.csv"), PT_CSV).unwrap();

    let config_content = format!(
        r#"[output]
dir = "{}/data"
"#,
        root.display()
    );

    let config_path = config_dir.join("catalog.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_catalog(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = catalog_binary();
    let output = Command::new(&binary)
        .env_remove("SHEET_MP_CSV_URL")
        .env_remove("SHEET_PT_CSV_URL")
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run catalog binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

fn build_args(tmp: &Path) -> Vec<String> {
    vec![
        "build".to_string(),
        "--mp-csv".to_string(),
        tmp.join("mp.csv").display().to_string(),
        "--pt-csv".to_string(),
        tmp.join("pt.csv").display().to_string(),
    ]
}

fn run_build(tmp: &TempDir, config_path: &Path) -> (String, String, bool) {
    let args = build_args(tmp.path());
    let refs: Vec<&str> = args.iter().map(String::as_str).collect();
    run_catalog(config_path, &refs)
}

#[test]
fn test_build_writes_artifacts() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_build(&tmp, &config_path);
    assert!(success, "build failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("processed 3 raw materials"));
    assert!(stdout.contains("ok"));
    // The anchorless filler row is skipped, not fatal.
    assert!(stderr.contains("skipped 1 incomplete finished-product rows"));

    let mp_json: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(tmp.path().join("data/raw-materials.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(mp_json["count"], 3);
    assert_eq!(mp_json["items"][0]["code"], "MP-001");
    assert!(mp_json["items"][0]["tds_view_url"]
        .as_str()
        .unwrap()
        .contains("1AbCdEfGhIjKlMnOpQrStUvWx"));
    assert!(mp_json["items"][1]["tds_view_url"].is_null());
    assert!(mp_json["lastUpdated"].is_string());
    assert!(mp_json["sourceChecksum"].is_string());

    let pt_json: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(tmp.path().join("data/finished-products.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(pt_json["count"], 3);
    let slugs: Vec<&str> = pt_json["families"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["slug"].as_str().unwrap())
        .collect();
    assert!(slugs.contains(&"lavanderia"));
    assert!(slugs.contains(&"jardineria"));
}

#[test]
fn test_rebuild_skips_unchanged_sources() {
    let (tmp, config_path) = setup_test_env();

    let (_, _, success) = run_build(&tmp, &config_path);
    assert!(success);

    let (stdout, _, success) = run_build(&tmp, &config_path);
    assert!(success);
    assert!(stdout.contains("raw materials unchanged, skipping write"));
    assert!(stdout.contains("finished products unchanged, skipping write"));

    // --full forces the rewrite.
    let mut args = build_args(tmp.path());
    args.push("--full".to_string());
    let refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let (stdout, _, success) = run_catalog(&config_path, &refs);
    assert!(success);
    assert!(stdout.contains("wrote"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let (tmp, config_path) = setup_test_env();

    let mut args = build_args(tmp.path());
    args.push("--dry-run".to_string());
    let refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let (stdout, _, success) = run_catalog(&config_path, &refs);
    assert!(success);
    assert!(stdout.contains("dry-run"));
    assert!(!tmp.path().join("data/raw-materials.json").exists());
    assert!(!tmp.path().join("data/finished-products.json").exists());
}

#[test]
fn test_build_without_sources_publishes_empty_datasets() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_catalog(&config_path, &["build"]);
    assert!(success, "build failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stderr.contains("no raw materials source configured"));

    let mp_json: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(tmp.path().join("data/raw-materials.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(mp_json["count"], 0);
}

#[test]
fn test_duplicate_codes_fail_the_build() {
    let (tmp, config_path) = setup_test_env();
    fs::write(
        tmp.path().join("mp.csv"),
        "code,name,cas,transport_name,functional_category,chemical_family,disposition\n\
         MP-001,A,1,TA,FA,QA,General\n\
         MP-001,B,2,TB,FB,QB,General\n",
    )
    .unwrap();

    let (stdout, stderr, success) = run_build(&tmp, &config_path);
    assert!(!success, "build should fail: stdout={}", stdout);
    assert!(stderr.contains("duplicate code"));
    assert!(stderr.contains("row 3"));
}

#[test]
fn test_missing_column_fails_listing_headers() {
    let (tmp, config_path) = setup_test_env();
    fs::write(
        tmp.path().join("mp.csv"),
        "code,name,cas,transport_name,functional_category,chemical_family\n\
         MP-001,A,1,TA,FA,QA\n",
    )
    .unwrap();

    let (_, stderr, success) = run_build(&tmp, &config_path);
    assert!(!success);
    assert!(stderr.contains("disposition"));
    assert!(stderr.contains("found columns"));
}

#[test]
fn test_invalid_dates_fail_the_build() {
    let (tmp, config_path) = setup_test_env();
    fs::write(
        tmp.path().join("pt.csv"),
        "family,category,base_product,variant,sku_code,status,updated_at\n\
         F,C,P,V,PT-1,Activo,31/12/2024\n",
    )
    .unwrap();

    let (_, stderr, success) = run_build(&tmp, &config_path);
    assert!(!success);
    assert!(stderr.contains("invalid date in finished products row 2"));
}

#[test]
fn test_stats_shows_merged_tree() {
    let (tmp, config_path) = setup_test_env();
    run_build(&tmp, &config_path);

    let (stdout, _, success) = run_catalog(&config_path, &["stats"]);
    assert!(success);
    assert!(stdout.contains("Raw materials:     3"));
    // Defaults render alongside the spreadsheet-only family.
    assert!(stdout.contains("Cuidado del Hogar"));
    assert!(stdout.contains("Jardinería"));
}

#[test]
fn test_get_product_applies_specialty_repair() {
    let (tmp, config_path) = setup_test_env();
    run_build(&tmp, &config_path);

    let (stdout, _, success) = run_catalog(
        &config_path,
        &["get", "lavanderia/especialidades-lavanderia/PT-LA-EL-001"],
    );
    assert!(success);
    assert!(stdout.contains("base product: Especialidades Lavandería"));
    assert!(stdout.contains("variant:      Desmugrador Ginez"));
    assert!(stdout.contains("(not available)"));
}

#[test]
fn test_get_miss_exits_nonzero() {
    let (tmp, config_path) = setup_test_env();
    run_build(&tmp, &config_path);

    let (_, stderr, success) = run_catalog(&config_path, &["get", "no-such-family"]);
    assert!(!success);
    assert!(stderr.contains("family not found"));
}

#[test]
fn test_filters_distinct_values() {
    let (tmp, config_path) = setup_test_env();
    run_build(&tmp, &config_path);

    let (stdout, _, success) = run_catalog(&config_path, &["filters", "functional_category"]);
    assert!(success);
    let acidos = stdout.find("Acidos").unwrap();
    let bases = stdout.find("Bases").unwrap();
    assert!(acidos < bases, "values should be sorted");
    assert!(stdout.contains("2 distinct functional_category values"));

    let (_, stderr, success) = run_catalog(&config_path, &["filters", "nope"]);
    assert!(!success);
    assert!(stderr.contains("unknown raw-material field"));
}
