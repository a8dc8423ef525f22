//! # Engine Module
//!
//! The stateful enumeration engine: staged candidate factories, the
//! concurrent candidate stream, the producer/consumer scheduler, and the
//! seams through which the caller injects domain physics and observes
//! progress.
//!
//! ## Architecture
//!
//! - **Factories** ([`factories`]) - the four pipeline stages that turn range
//!   chains and upstream candidates into the next candidate list
//! - **Candidate Stream** ([`stream`]) - the queue pair decoupling generation
//!   from evaluation
//! - **Scheduler** ([`scheduler`]) - one generation task plus a fixed worker
//!   pool, run-state tracking and cooperative abort
//! - **Evaluator** ([`evaluator`]) - the pluggable pass/fail/null verdict
//!   capability
//! - **Progress** ([`progress`]) - the `(done, total) -> continue?` callback
//! - **Cancellation** ([`cancel`]) - the shared token checked at candidate
//!   granularity
//! - **Errors** ([`error`]) - the engine error taxonomy

pub mod cancel;
pub mod error;
pub mod evaluator;
pub mod factories;
pub mod progress;
pub mod scheduler;
pub(crate) mod stream;
pub mod utils;
