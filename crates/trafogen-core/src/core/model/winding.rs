use crate::core::catalog::WireEntry;
use serde::Deserialize;

/// The electrical requirement of one winding section, as configured by the
/// caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectionSpec {
    /// Section name, e.g. `primary` or `HV`. Used in skip keys and error
    /// messages.
    pub name: String,
    /// Operating current through the section in amperes.
    pub current_a: f64,
    /// Number of turns.
    pub turns: u32,
}

/// One section wound with a concrete wire choice.
#[derive(Debug, Clone, PartialEq)]
pub struct Winding {
    pub section: SectionSpec,
    pub wire: WireEntry,
}

impl Winding {
    /// Actual current density with the chosen wire, in A/mm².
    pub fn current_density(&self) -> f64 {
        self.section.current_a / self.wire.area_mm2
    }

    /// Total conductor cross-section of the section in mm².
    pub fn copper_area_mm2(&self) -> f64 {
        self.section.turns as f64 * self.wire.area_mm2
    }
}

/// The third-stage candidate: one wire choice per section, in winding order
/// (innermost first).
///
/// Order is significant: permutation mode emits every reordering of the same
/// wire choices as a distinct candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct WindingSet {
    pub windings: Vec<Winding>,
}

impl WindingSet {
    pub fn new(windings: Vec<Winding>) -> Self {
        Self { windings }
    }

    pub fn total_copper_area_mm2(&self) -> f64 {
        self.windings.iter().map(Winding::copper_area_mm2).sum()
    }

    /// Winding order as section names, for reporting.
    pub fn order(&self) -> Vec<&str> {
        self.windings
            .iter()
            .map(|w| w.section.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(area_mm2: f64) -> WireEntry {
        WireEntry {
            gauge: "AWG24".into(),
            diameter_mm: 0.511,
            area_mm2,
            resistance_ohm_per_km: 84.2,
            material: "copper".into(),
        }
    }

    #[test]
    fn winding_derives_density_and_copper_area() {
        let winding = Winding {
            section: SectionSpec {
                name: "primary".into(),
                current_a: 0.5,
                turns: 200,
            },
            wire: wire(0.2),
        };
        assert!((winding.current_density() - 2.5).abs() < 1e-12);
        assert!((winding.copper_area_mm2() - 40.0).abs() < 1e-12);
    }

    #[test]
    fn set_sums_copper_over_sections() {
        let primary = Winding {
            section: SectionSpec {
                name: "primary".into(),
                current_a: 0.5,
                turns: 100,
            },
            wire: wire(0.2),
        };
        let secondary = Winding {
            section: SectionSpec {
                name: "secondary".into(),
                current_a: 2.0,
                turns: 25,
            },
            wire: wire(0.8),
        };
        let set = WindingSet::new(vec![primary, secondary]);
        assert!((set.total_copper_area_mm2() - 40.0).abs() < 1e-12);
        assert_eq!(set.order(), vec!["primary", "secondary"]);
    }
}
