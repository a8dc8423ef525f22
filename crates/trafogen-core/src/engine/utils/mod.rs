//! Utility functions for the engine module.
//!
//! Shared combinatorics helpers used by the factory stages: the Cartesian
//! product across per-section candidate lists and the permutation expansion
//! behind the winding-order mode.

pub mod combinatorics;
