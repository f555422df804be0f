//! # Catalog Pipeline
//!
//! A spreadsheet-to-catalog ingestion and publishing pipeline for a
//! chemical manufacturer's static product catalog.
//!
//! Catalog Pipeline fetches two published CSV exports (raw materials,
//! finished products), validates them, resolves compliance-document
//! references, reconciles the product rows against a curated default
//! taxonomy, and publishes two JSON artifacts consumed by the catalog
//! site at its own build time.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌───────────────┐
//! │ CSV exports  │──▶│  Pipeline        │──▶│ JSON artifacts │
//! │  MP / PT     │   │ validate+resolve │   │  data/*.json   │
//! └──────────────┘   │ group            │   └───────┬───────┘
//!                    └──────────────────┘           │
//!                    ┌──────────────────┐           ▼
//!                    │ Default taxonomy │──▶ merge ─▶ Catalog ──▶ site
//!                    └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! catalog build                 # fetch, validate, publish artifacts
//! catalog stats                 # per-family/category overview
//! catalog get lavanderia        # look up a family by slug
//! catalog filters disposition   # distinct filter values
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types and artifact envelopes |
//! | [`slug`] | Slug generation for taxonomy labels |
//! | [`drive`] | Document reference resolution |
//! | [`sheet`] | CSV fetch and parsing |
//! | [`validate`] | Structural validation of parsed records |
//! | [`defaults`] | Curated default taxonomy |
//! | [`taxonomy`] | Grouping and defaults merge |
//! | [`ingest`] | Build orchestration and artifact writes |
//! | [`catalog`] | Read-only accessor API |
//! | [`stats`] | Catalog overview command |
//! | [`get`] | Slug-path lookup command |
//! | [`filters`] | Filter option extraction command |

pub mod catalog;
pub mod config;
pub mod defaults;
pub mod drive;
pub mod filters;
pub mod get;
pub mod ingest;
pub mod models;
pub mod sheet;
pub mod slug;
pub mod stats;
pub mod taxonomy;
pub mod validate;
