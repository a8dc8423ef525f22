//! # Core Module
//!
//! This module provides the fundamental building blocks for design-space
//! enumeration: range dimensions and the odometer that traverses them,
//! read-only component catalogs, and the immutable candidate models produced
//! by the factory pipeline.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of the design space:
//!
//! - **Range Iteration** ([`ranges`]) - Single dimensions, the multi-radix
//!   odometer chain, and the advisory skip table
//! - **Component Catalogs** ([`catalog`]) - Wire gauges, standard lamination
//!   shapes, and core-loss curves, loaded once and shared read-only
//! - **Candidate Models** ([`model`]) - The immutable candidate types emitted
//!   by each pipeline stage, from lamination sheets to complete designs
//!
//! Everything in this layer is stateless apart from the in-place cursors of the
//! range types; nothing here spawns threads or performs I/O after load time.

pub mod catalog;
pub mod model;
pub mod ranges;
