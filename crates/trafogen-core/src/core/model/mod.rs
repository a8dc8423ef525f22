//! # Model Module
//!
//! The immutable candidate types produced by the factory pipeline, one per
//! stage: lamination sheets, magnetic cores, winding sets, and complete
//! transformer designs.
//!
//! A candidate is constructed once by its factory and never mutated
//! afterwards; ownership transfers to the candidate stream on enqueue and to
//! exactly one evaluation worker on dequeue.

pub mod core_stack;
pub mod design;
pub mod lamination;
pub mod winding;

pub use core_stack::MagneticCore;
pub use design::{TransformerDesign, WiringStyle};
pub use lamination::LaminationSheet;
pub use winding::{SectionSpec, Winding, WindingSet};
