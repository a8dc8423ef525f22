//! # Catalog Module
//!
//! Read-only lookup tables consumed by the factory pipeline: wire gauges,
//! standard lamination shapes, and core-loss curves.
//!
//! Every table is explicitly constructed with a clear load-once lifecycle and
//! injected where it is needed; there is no process-wide static cache. After
//! loading, tables are immutable and safe to share across worker threads.
//!
//! ## Key Components
//!
//! - [`wires`] - [`WireTable`](wires::WireTable), conductor gauges with
//!   cross-section interval queries
//! - [`laminations`] - [`LaminationTable`](laminations::LaminationTable),
//!   standard sheet shapes
//! - [`loss`] - [`LossTable`](loss::LossTable), specific-loss curves per core
//!   material with interpolation

pub mod laminations;
pub mod loss;
pub mod wires;

use std::path::Path;
use thiserror::Error;

pub use laminations::{LaminationTable, SheetFamily, SheetShape};
pub use loss::LossTable;
pub use wires::{WireEntry, WireTable};

/// Represents errors raised while loading or querying a catalog table.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse CSV catalog '{path}': {source}")]
    Csv { path: String, source: csv::Error },

    #[error("failed to parse TOML catalog '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error("catalog '{path}', entry {entry}: {reason}")]
    MalformedEntry {
        path: String,
        entry: usize,
        reason: String,
    },

    #[error("catalog '{path}' contains no entries")]
    Empty { path: String },

    #[error("no loss curve for core material '{0}'")]
    UnknownMaterial(String),
}

pub(crate) fn display_path(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// The complete set of catalogs a sweep needs, loaded once and shared.
#[derive(Debug, Clone)]
pub struct CatalogSet {
    pub wires: WireTable,
    pub laminations: LaminationTable,
    pub losses: LossTable,
}

impl CatalogSet {
    pub fn load(
        wires_csv: &Path,
        laminations_toml: &Path,
        losses_csv: &Path,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            wires: WireTable::load(wires_csv)?,
            laminations: LaminationTable::load(laminations_toml)?,
            losses: LossTable::load(losses_csv)?,
        })
    }
}
