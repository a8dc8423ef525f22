use super::core_stack::MagneticCore;
use super::winding::WindingSet;
use std::fmt;

/// How the windings are arranged on the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WiringStyle {
    /// All windings concentric on the centre limb.
    Plain,
    /// Windings split across the two outer limbs. Only applicable to
    /// double-window sheet families.
    SplitLimb,
}

impl fmt::Display for WiringStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WiringStyle::Plain => "plain",
            WiringStyle::SplitLimb => "split-limb",
        })
    }
}

/// The final-stage candidate: one complete transformer design, ready for
/// evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformerDesign {
    pub core: MagneticCore,
    pub windings: WindingSet,
    pub wiring: WiringStyle,
}

impl TransformerDesign {
    /// Fraction of the winding window occupied by conductor.
    ///
    /// A split-limb arrangement spreads the copper over both windows.
    pub fn window_fill(&self) -> f64 {
        let window = match self.wiring {
            WiringStyle::Plain => self.core.window_area_mm2,
            WiringStyle::SplitLimb => 2.0 * self.core.window_area_mm2,
        };
        self.windings.total_copper_area_mm2() / window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::WireEntry;
    use crate::core::catalog::loss::LossPoint;
    use crate::core::catalog::LossTable;
    use crate::core::model::lamination::LaminationSheet;
    use crate::core::model::winding::{SectionSpec, Winding};

    fn design(wiring: WiringStyle) -> TransformerDesign {
        let losses = LossTable::from_points(vec![LossPoint {
            material: "M6".into(),
            flux_density_t: 1.0,
            watts_per_kg: 1.0,
        }]);
        let core =
            MagneticCore::build(LaminationSheet::custom(20.0, 20.0), "M6", 1.0, &losses).unwrap();
        let winding = Winding {
            section: SectionSpec {
                name: "primary".into(),
                current_a: 1.0,
                turns: 300,
            },
            wire: WireEntry {
                gauge: "AWG24".into(),
                diameter_mm: 0.511,
                area_mm2: 0.2,
                resistance_ohm_per_km: 84.2,
                material: "copper".into(),
            },
        };
        TransformerDesign {
            core,
            windings: WindingSet::new(vec![winding]),
            wiring,
        }
    }

    #[test]
    fn split_limb_halves_the_window_fill() {
        let plain = design(WiringStyle::Plain);
        let split = design(WiringStyle::SplitLimb);
        assert!((plain.window_fill() - 60.0 / 300.0).abs() < 1e-12);
        assert!((split.window_fill() - plain.window_fill() / 2.0).abs() < 1e-12);
    }
}
