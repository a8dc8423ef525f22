//! # Workflows Module
//!
//! The user-facing layer of the library. A sweep is described by a
//! [`config::SweepConfig`] (usually loaded from TOML), bound to a set of
//! catalogs, and driven by [`sweep::DesignSweep`], which wires the factory
//! pipeline into the scheduler and hands back every design that survived
//! evaluation.
//!
//! ## Key Capabilities
//!
//! - **Configure once, run repeatedly** with validation up front
//! - **Cooperative abort** from any thread, including signal handlers
//! - **Progress and state observation** while a sweep is live
//! - **Sticky error reporting** that names the offending input

pub mod config;
pub mod sweep;

pub use config::{ConfigError, RangeSpec, SkipRuleSpec, SweepConfig};
pub use sweep::{DesignSweep, SweepOutcome};
