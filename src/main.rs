//! # Catalog Pipeline CLI (`catalog`)
//!
//! The `catalog` binary drives the publishing pipeline and offers
//! read-only inspection of the published catalog.
//!
//! ## Usage
//!
//! ```bash
//! catalog --config ./config/catalog.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `catalog build` | Fetch, validate, and publish both JSON artifacts |
//! | `catalog stats` | Summarize the published catalog |
//! | `catalog get <path>` | Look up a family, category, or product by slug path |
//! | `catalog filters <field>` | Print distinct values of a raw-material field |
//!
//! ## Examples
//!
//! ```bash
//! # Publish from the configured sheet URLs
//! catalog build
//!
//! # Rebuild even when the sources are unchanged
//! catalog build --full
//!
//! # Validate local exports without writing anything
//! catalog build --mp-csv ./mp.csv --pt-csv ./pt.csv --dry-run
//!
//! # Inspect the merged tree
//! catalog get lavanderia/especialidades-lavanderia
//! catalog get lavanderia/especialidades-lavanderia/PT-LA-EL-001
//!
//! # Filter option sets for the site UI
//! catalog filters functional_category
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use catalog_pipeline::{config, filters, get, ingest, stats};

/// Catalog Pipeline CLI — spreadsheet-to-catalog ingestion and
/// publishing for a chemical product catalog.
///
/// All commands accept a `--config` flag pointing to a TOML
/// configuration file; a missing file falls back to built-in defaults so
/// the source URLs can come entirely from the environment
/// (`SHEET_MP_CSV_URL`, `SHEET_PT_CSV_URL`).
#[derive(Parser)]
#[command(
    name = "catalog",
    about = "Catalog Pipeline — spreadsheet-to-catalog ingestion and publishing",
    version,
    long_about = "Catalog Pipeline fetches the raw-material and finished-product CSV exports, \
    validates them, resolves document references, reconciles the rows against the curated \
    default taxonomy, and publishes the JSON artifacts the catalog site consumes."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/catalog.toml`. Source URLs and the output
    /// directory are read from this file; environment variables override
    /// the URLs.
    #[arg(long, global = true, default_value = "./config/catalog.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the ingestion pipeline and publish both artifacts.
    ///
    /// Fetches the two CSV exports (concurrently, fail-fast), validates
    /// them, groups finished products into the derived taxonomy, and
    /// writes `raw-materials.json` and `finished-products.json` to the
    /// output directory. A side with no configured source publishes an
    /// empty dataset.
    Build {
        /// Rewrite artifacts even when the source checksum is unchanged.
        #[arg(long)]
        full: bool,

        /// Parse and validate only; write nothing.
        #[arg(long)]
        dry_run: bool,

        /// Read the raw-materials CSV from a local file instead of HTTP.
        #[arg(long, value_name = "PATH")]
        mp_csv: Option<PathBuf>,

        /// Read the finished-products CSV from a local file instead of HTTP.
        #[arg(long, value_name = "PATH")]
        pt_csv: Option<PathBuf>,
    },

    /// Summarize the published catalog.
    ///
    /// Prints artifact sizes and ages, dataset totals, and the
    /// per-family/per-category product counts of the merged tree.
    Stats,

    /// Look up a family, category, or product by slug path.
    ///
    /// Path format: `<family>[/<category>[/<sku>]]`. Unknown paths exit
    /// non-zero with a message.
    Get {
        /// Slug path, e.g. `lavanderia/especialidades-lavanderia/PT-LA-EL-001`.
        path: String,
    },

    /// Print the distinct values of a raw-material field.
    ///
    /// The sorted, deduplicated set the catalog UI offers as filter
    /// options.
    Filters {
        /// Field name, e.g. `functional_category` or `disposition`.
        field: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Build {
            full,
            dry_run,
            mp_csv,
            pt_csv,
        } => {
            let opts = ingest::BuildOptions {
                full,
                dry_run,
                mp_csv,
                pt_csv,
            };
            ingest::run_build(&cfg, &opts).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg)?;
        }
        Commands::Get { path } => {
            get::run_get(&cfg, &path)?;
        }
        Commands::Filters { field } => {
            filters::run_filters(&cfg, &field)?;
        }
    }

    Ok(())
}
