use crate::core::catalog::CatalogError;
use crate::core::ranges::RangeError;
use thiserror::Error;

/// Errors that can abort candidate generation.
///
/// Chain exhaustion is deliberately absent: it is an expected event reported
/// as a sentinel value by the odometer, never through this type. Failures
/// while evaluating a single candidate are also absent: they are contained at
/// that candidate's scope and surface as a null verdict.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A winding section matched no wire in the catalog. Fatal to the run;
    /// the message names the offending section.
    #[error(
        "no catalog wire matches section '{section}' (needs {min_mm2:.4}..{max_mm2:.4} mm\u{b2})"
    )]
    NoMatchingWire {
        section: String,
        min_mm2: f64,
        max_mm2: f64,
    },

    /// The caller requested a cooperative stop, either through `abort()` or
    /// by returning `false` from a progress callback. Not a failure; carries
    /// no message beyond its identity.
    #[error("run cancelled")]
    Cancelled,

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// True for caller-requested stops, which never set the sticky error.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, EngineError::Cancelled)
    }
}
