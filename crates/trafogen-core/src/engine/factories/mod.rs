//! # Factories Module
//!
//! The staged pipeline that turns range chains and upstream candidate lists
//! into the next candidate list:
//!
//! 1. [`lamination`] - custom-scaled and standard lamination sheets
//! 2. [`core_stack`] - sheets stacked into magnetic cores across the flux
//!    density range
//! 3. [`winding`] - per-section wire matching and the cross product into
//!    complete winding sets
//! 4. [`design`] - the outer join of cores, winding sets and applicable
//!    wiring styles
//!
//! Every factory follows the same contract: consult the skip table before
//! accepting a combination, report `(done, total)` once per unit of work,
//! honour a `false` progress return and the cancel token as cooperative
//! stops, and report exhaustion of its space by returning normally.

pub mod core_stack;
pub mod design;
pub mod lamination;
pub mod winding;

pub use core_stack::CoreFactory;
pub use design::DesignFactory;
pub use lamination::{CustomGeometry, LaminationFactory};
pub use winding::WindingSetFactory;
