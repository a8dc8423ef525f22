use thiserror::Error;

/// Relative tolerance applied when deciding whether a stepped value has passed
/// the upper bound, so that accumulated floating-point drift does not drop the
/// final value of a range.
const STEP_TOLERANCE: f64 = 1e-9;

/// Outcome of advancing a single dimension cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved to the next value within the dimension.
    Stepped,
    /// The cursor wrapped back to its first value; the overflow carries into
    /// the next-slower dimension of the chain.
    Wrapped,
}

/// Represents errors raised while constructing a range dimension.
///
/// Malformed bounds are rejected here, at configuration time, so that
/// traversal itself never has to deal with an invalid range.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RangeError {
    #[error("range '{name}' is invalid: {reason}")]
    InvalidRange { name: String, reason: String },
}

impl RangeError {
    fn invalid(name: &str, reason: impl Into<String>) -> Self {
        RangeError::InvalidRange {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// One numeric dimension of the search space.
///
/// The cursor starts at `min` and advances by `step` until it would pass
/// `max`, at which point it wraps. A `step` of zero denotes a fixed value
/// (`min == max`) that contributes exactly one iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRange {
    name: String,
    min: f64,
    max: f64,
    step: f64,
    current: f64,
}

impl StepRange {
    pub fn new(name: impl Into<String>, min: f64, max: f64, step: f64) -> Result<Self, RangeError> {
        let name = name.into();
        if !min.is_finite() || !max.is_finite() || !step.is_finite() {
            return Err(RangeError::invalid(&name, "non-finite bound or step"));
        }
        if step < 0.0 {
            return Err(RangeError::invalid(&name, "step must not be negative"));
        }
        if min > max {
            return Err(RangeError::invalid(&name, "min exceeds max"));
        }
        if step == 0.0 && min != max {
            return Err(RangeError::invalid(&name, "zero step requires min == max"));
        }
        Ok(Self {
            name,
            min,
            max,
            step,
            current: min,
        })
    }

    /// A fixed, single-valued dimension.
    pub fn fixed(name: impl Into<String>, value: f64) -> Result<Self, RangeError> {
        Self::new(name, value, value, 0.0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Number of values this dimension contributes: `ceil((max-min)/step)+1`,
    /// or 1 for a fixed value.
    pub fn iteration_count(&self) -> u64 {
        if self.step == 0.0 {
            1
        } else {
            let spans = (self.max - self.min) / self.step;
            (spans - STEP_TOLERANCE).ceil().max(0.0) as u64 + 1
        }
    }

    /// Advances the cursor by one step, wrapping past `max`.
    ///
    /// A step that does not divide the span ends on a partial step: the
    /// cursor clamps to `max` itself before wrapping, so the traversal always
    /// visits exactly `iteration_count()` values. A fixed value wraps on
    /// every call: the single value has already been consumed by the caller
    /// before the advance.
    pub fn advance(&mut self) -> Advance {
        if self.step == 0.0 {
            self.current = self.min;
            return Advance::Wrapped;
        }
        let tolerance = self.step * STEP_TOLERANCE;
        let next = self.current + self.step;
        if next <= self.max + tolerance {
            self.current = if next > self.max { self.max } else { next };
            Advance::Stepped
        } else if self.current < self.max - tolerance {
            // partial final step
            self.current = self.max;
            Advance::Stepped
        } else {
            self.current = self.min;
            Advance::Wrapped
        }
    }

    pub fn reset(&mut self) {
        self.current = self.min;
    }

    /// Pins the cursor to its final value so that the next advance wraps.
    pub fn force_to_last(&mut self) {
        self.current = self.max;
    }
}

/// A discrete dimension: a cursor over the entries of a catalog or an
/// upstream candidate list.
///
/// Carry semantics are identical to [`StepRange`]; only the stepping is an
/// index increment instead of arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRange {
    name: String,
    len: usize,
    cursor: usize,
}

impl IndexRange {
    pub fn new(name: impl Into<String>, len: usize) -> Result<Self, RangeError> {
        let name = name.into();
        if len == 0 {
            return Err(RangeError::invalid(&name, "index range over zero entries"));
        }
        Ok(Self {
            name,
            len,
            cursor: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn iteration_count(&self) -> u64 {
        self.len as u64
    }

    pub fn advance(&mut self) -> Advance {
        if self.cursor + 1 >= self.len {
            self.cursor = 0;
            Advance::Wrapped
        } else {
            self.cursor += 1;
            Advance::Stepped
        }
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn force_to_last(&mut self) {
        self.cursor = self.len - 1;
    }
}

/// One dimension of a [`RangeChain`](super::chain::RangeChain).
///
/// The variant set is closed, so the shared advance operation is dispatched
/// over a tagged union rather than a trait object.
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    Step(StepRange),
    Index(IndexRange),
}

impl Dimension {
    pub fn name(&self) -> &str {
        match self {
            Dimension::Step(r) => r.name(),
            Dimension::Index(r) => r.name(),
        }
    }

    pub fn advance(&mut self) -> Advance {
        match self {
            Dimension::Step(r) => r.advance(),
            Dimension::Index(r) => r.advance(),
        }
    }

    pub fn iteration_count(&self) -> u64 {
        match self {
            Dimension::Step(r) => r.iteration_count(),
            Dimension::Index(r) => r.iteration_count(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Dimension::Step(r) => r.reset(),
            Dimension::Index(r) => r.reset(),
        }
    }

    pub fn force_to_last(&mut self) {
        match self {
            Dimension::Step(r) => r.force_to_last(),
            Dimension::Index(r) => r.force_to_last(),
        }
    }

    pub fn as_step(&self) -> Option<&StepRange> {
        match self {
            Dimension::Step(r) => Some(r),
            Dimension::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<&IndexRange> {
        match self {
            Dimension::Step(_) => None,
            Dimension::Index(r) => Some(r),
        }
    }
}

impl From<StepRange> for Dimension {
    fn from(r: StepRange) -> Self {
        Dimension::Step(r)
    }
}

impl From<IndexRange> for Dimension {
    fn from(r: IndexRange) -> Self {
        Dimension::Index(r)
    }
}
