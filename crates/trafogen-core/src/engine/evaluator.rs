use crate::core::model::TransformerDesign;

/// Pass thresholds supplied by the caller alongside the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignLimits {
    /// Maximum acceptable window fill fraction.
    pub max_window_fill: f64,
    /// Maximum acceptable total loss in watts.
    pub max_total_loss_w: f64,
    /// Maximum acceptable core mass in kilograms.
    pub max_mass_kg: f64,
}

impl Default for DesignLimits {
    fn default() -> Self {
        Self {
            max_window_fill: 0.45,
            max_total_loss_w: f64::INFINITY,
            max_mass_kg: f64::INFINITY,
        }
    }
}

/// Metrics computed by an evaluator for one design.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMetrics {
    pub copper_loss_w: f64,
    pub no_load_loss_w: f64,
    pub total_loss_w: f64,
    pub window_fill: f64,
    pub mass_kg: f64,
}

/// Outcome of evaluating one design.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The design meets the limits.
    Pass(DesignMetrics),
    /// The design was computed but misses at least one limit.
    Fail(DesignMetrics),
    /// The design is not meaningful (e.g. physically unwindable); it is
    /// counted but never returned as a result.
    Null,
}

/// The pluggable evaluation capability.
///
/// Implementations must be pure with respect to the design and thread-safe:
/// any evaluation worker may call `evaluate` concurrently.
pub trait Evaluator: Sync {
    fn evaluate(&self, design: &TransformerDesign, limits: &DesignLimits) -> Verdict;
}

impl<F> Evaluator for F
where
    F: Fn(&TransformerDesign, &DesignLimits) -> Verdict + Sync,
{
    fn evaluate(&self, design: &TransformerDesign, limits: &DesignLimits) -> Verdict {
        self(design, limits)
    }
}

/// One completed, non-null result.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedDesign {
    pub design: TransformerDesign,
    pub metrics: DesignMetrics,
    pub passed: bool,
}
