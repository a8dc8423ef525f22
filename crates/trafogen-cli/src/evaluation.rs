use trafogen::core::model::TransformerDesign;
use trafogen::engine::evaluator::{DesignLimits, DesignMetrics, Evaluator, Verdict};

/// Window fill beyond which a design cannot physically be wound; such
/// candidates are counted as null rather than failed.
const MAX_BUILDABLE_FILL: f64 = 0.9;

/// The reference evaluator shipped with the CLI: DC copper loss from the
/// catalog resistance and a mean-turn-length estimate, iron loss straight
/// from the core model.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceEvaluator;

impl ReferenceEvaluator {
    /// Mean turn length around the centre limb, in millimetres.
    ///
    /// Rectangular limb perimeter plus a half-window bulge on each side,
    /// approximated as a circle of the window width.
    fn mean_turn_length_mm(design: &TransformerDesign) -> f64 {
        let sheet = &design.core.sheet;
        2.0 * (sheet.tongue_mm + sheet.stack_mm) + std::f64::consts::PI * sheet.window_width_mm
    }

    fn copper_loss_w(design: &TransformerDesign) -> f64 {
        let mtl_km = Self::mean_turn_length_mm(design) / 1.0e6;
        design
            .windings
            .windings
            .iter()
            .map(|w| {
                let resistance_ohm =
                    w.wire.resistance_ohm_per_km * w.section.turns as f64 * mtl_km;
                w.section.current_a * w.section.current_a * resistance_ohm
            })
            .sum()
    }
}

impl Evaluator for ReferenceEvaluator {
    fn evaluate(&self, design: &TransformerDesign, limits: &DesignLimits) -> Verdict {
        let window_fill = design.window_fill();
        if window_fill > MAX_BUILDABLE_FILL {
            return Verdict::Null;
        }

        let copper_loss_w = Self::copper_loss_w(design);
        let no_load_loss_w = design.core.no_load_loss_w;
        let metrics = DesignMetrics {
            copper_loss_w,
            no_load_loss_w,
            total_loss_w: copper_loss_w + no_load_loss_w,
            window_fill,
            mass_kg: design.core.mass_kg,
        };

        let within_limits = metrics.window_fill <= limits.max_window_fill
            && metrics.total_loss_w <= limits.max_total_loss_w
            && metrics.mass_kg <= limits.max_mass_kg;
        if within_limits {
            Verdict::Pass(metrics)
        } else {
            Verdict::Fail(metrics)
        }
    }
}
