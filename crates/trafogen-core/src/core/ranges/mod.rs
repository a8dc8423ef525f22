//! # Ranges Module
//!
//! This module implements the range-iteration machinery at the heart of the
//! enumeration engine: single search-space dimensions, the multi-radix odometer
//! that chains them together, and the advisory skip table consulted before a
//! generated combination is accepted.
//!
//! ## Key Components
//!
//! - [`sequence`] - [`StepRange`](sequence::StepRange) and
//!   [`IndexRange`](sequence::IndexRange) dimensions with shared carry semantics
//! - [`chain`] - [`RangeChain`](chain::RangeChain), the odometer of dimensions,
//!   fastest-varying first
//! - [`skip`] - [`SkipTable`](skip::SkipTable), suppression of specific
//!   value-pair combinations
//!
//! ## Iteration Model
//!
//! A chain behaves like a mechanical odometer: advancing the fastest dimension
//! past its last value wraps it back to the first and carries into the next
//! dimension. Exhaustion of the whole chain is an expected, frequent event and
//! is reported as a sentinel value ([`chain::Increment::Exhausted`]), never as
//! an error.

pub mod chain;
pub mod sequence;
pub mod skip;

pub use chain::{Increment, RangeChain};
pub use sequence::{Advance, Dimension, IndexRange, RangeError, StepRange};
pub use skip::{SkipKey, SkipTable};
