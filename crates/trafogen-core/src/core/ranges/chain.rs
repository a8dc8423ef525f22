use super::sequence::{Advance, Dimension};

/// Outcome of one odometer increment across the whole chain.
///
/// Exhaustion is an expected, frequent event and therefore a sentinel value,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Increment {
    /// At least one dimension still had a value to move to.
    Advanced,
    /// Every dimension wrapped; the chain has visited its entire space.
    Exhausted,
}

/// An ordered set of dimensions forming a multi-radix odometer.
///
/// Dimensions are stored fastest-varying first. Advancing the chain steps
/// dimension 0; a wrap there carries into dimension 1, and so on. The
/// topology is fixed once traversal starts: factories build their chain up
/// front and only ever call [`reset`](Self::reset), [`increment`](Self::increment)
/// and [`force_to_last`](Self::force_to_last) afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeChain {
    dims: Vec<Dimension>,
}

impl RangeChain {
    pub fn new(dims: Vec<Dimension>) -> Self {
        Self { dims }
    }

    pub fn push(&mut self, dim: impl Into<Dimension>) {
        self.dims.push(dim.into());
    }

    pub fn dims(&self) -> &[Dimension] {
        &self.dims
    }

    pub fn dim(&self, index: usize) -> &Dimension {
        &self.dims[index]
    }

    pub fn len(&self) -> usize {
        self.dims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// Restores every cursor to its first value.
    pub fn reset(&mut self) {
        for dim in &mut self.dims {
            dim.reset();
        }
    }

    /// Total number of index tuples the chain visits: the product of each
    /// dimension's iteration count.
    pub fn iteration_count(&self) -> u64 {
        self.dims
            .iter()
            .map(Dimension::iteration_count)
            .fold(1u64, u64::saturating_mul)
    }

    /// Advances the odometer by one position.
    ///
    /// Carries propagate from the fastest dimension upward; a wrap of the
    /// slowest dimension means the space is exhausted and every cursor is
    /// back at its first value.
    pub fn increment(&mut self) -> Increment {
        for dim in &mut self.dims {
            match dim.advance() {
                Advance::Stepped => return Increment::Advanced,
                Advance::Wrapped => continue,
            }
        }
        Increment::Exhausted
    }

    /// Pins the cursors of dimensions `0..upto` to their final value so the
    /// next [`increment`](Self::increment) carries straight past them.
    ///
    /// This is the short-circuit used when an outer dimension selects a
    /// canned catalog entry and the inner custom dimensions are irrelevant.
    pub fn force_to_last(&mut self, upto: usize) {
        for dim in &mut self.dims[..upto] {
            dim.force_to_last();
        }
    }
}
