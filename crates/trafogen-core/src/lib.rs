//! # trafogen Core Library
//!
//! An exhaustive enumeration engine for mains-transformer designs. Given a set of
//! user-specified parameter ranges and read-only component catalogs, trafogen
//! materializes every candidate design the ranges imply, runs each candidate
//! through a pluggable evaluation stage, and returns every design that survives.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains the stateless building blocks: the range
//!   odometer ([`core::ranges`]), the read-only component catalogs
//!   ([`core::catalog`]), and the immutable candidate models ([`core::model`]).
//!
//! - **[`engine`]: The Logic Core.** This stateful layer drives enumeration. It
//!   implements the staged candidate factories, the concurrent candidate stream,
//!   the producer/consumer scheduler, and the `Evaluator` seam through which the
//!   domain physics is injected.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer. It
//!   ties the engine and core together into a single configure-and-sweep entry
//!   point for end-users of the library.
//!
//! Enumeration is always exhaustive: there is no pruning, no heuristic search and
//! no branch-and-bound. The engine's job is to visit the whole space, overlap
//! generation with evaluation, and never lose or duplicate a candidate.

pub mod core;
pub mod engine;
pub mod workflows;
