use crate::core::catalog::WireTable;
use crate::core::model::{SectionSpec, Winding, WindingSet};
use crate::core::ranges::{RangeError, SkipKey, SkipTable};
use crate::engine::cancel::CancelToken;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::utils::combinatorics::{cartesian_product, permutations};
use tracing::{debug, info};

/// Third pipeline stage: matches every section to the catalog wires that keep
/// its current density inside the configured band, then crosses the per-section
/// candidate lists into complete winding sets.
///
/// A section with no matching wire at all is a configuration problem, not an
/// empty result: the stage fails fast so the caller learns which section and
/// which cross-section interval came up empty. With `permute_order` enabled,
/// every reordering of each wire combination is emitted as its own candidate.
pub struct WindingSetFactory<'a> {
    wires: &'a WireTable,
    sections: &'a [SectionSpec],
    density_min: f64,
    density_max: f64,
    permute_order: bool,
}

impl<'a> WindingSetFactory<'a> {
    pub fn new(
        wires: &'a WireTable,
        sections: &'a [SectionSpec],
        density_min: f64,
        density_max: f64,
        permute_order: bool,
    ) -> Result<Self, EngineError> {
        if !(density_min > 0.0) || !density_min.is_finite() {
            return Err(RangeError::InvalidRange {
                name: "current_density".to_string(),
                reason: format!("non-positive lower bound {density_min}"),
            }
            .into());
        }
        if !density_max.is_finite() || density_max < density_min {
            return Err(RangeError::InvalidRange {
                name: "current_density".to_string(),
                reason: format!("upper bound {density_max} below lower bound {density_min}"),
            }
            .into());
        }
        Ok(Self {
            wires,
            sections,
            density_min,
            density_max,
            permute_order,
        })
    }

    pub fn build(
        &self,
        skip: &SkipTable,
        reporter: &ProgressReporter<'_>,
        cancel: &CancelToken,
    ) -> Result<Vec<WindingSet>, EngineError> {
        let mut candidates = Vec::with_capacity(self.sections.len());
        for section in self.sections {
            // density bounds invert into a cross-section interval
            let min_mm2 = section.current_a / self.density_max;
            let max_mm2 = section.current_a / self.density_min;
            let matching = self.wires.with_area_between(min_mm2, max_mm2);
            if matching.is_empty() {
                return Err(EngineError::NoMatchingWire {
                    section: section.name.clone(),
                    min_mm2,
                    max_mm2,
                });
            }
            debug!(
                section = %section.name,
                wires = matching.len(),
                "Matched section against the wire catalog."
            );
            candidates.push(matching.into_iter().cloned().collect::<Vec<_>>());
        }

        let combos = cartesian_product(&candidates);
        let total = combos.len() as u64;
        let mut done = 0u64;
        let mut sets = Vec::new();

        for combo in combos {
            if cancel.is_cancelled() {
                return Err(EngineError::Cancelled);
            }

            let keys: Vec<SkipKey> = self
                .sections
                .iter()
                .zip(&combo)
                .map(|(section, wire)| SkipKey::label(&section.name, &wire.gauge))
                .collect();
            if skip.suppresses(&keys) {
                debug!("Skip table suppressed wire combination.");
            } else {
                let windings: Vec<Winding> = self
                    .sections
                    .iter()
                    .zip(combo)
                    .map(|(section, wire)| Winding {
                        section: section.clone(),
                        wire,
                    })
                    .collect();
                if self.permute_order {
                    for ordering in permutations(&windings) {
                        sets.push(WindingSet::new(ordering));
                    }
                } else {
                    sets.push(WindingSet::new(windings));
                }
            }

            done += 1;
            if !reporter.report(done, total) {
                return Err(EngineError::Cancelled);
            }
        }

        info!(sets = sets.len(), "Winding stage finished.");
        Ok(sets)
    }
}
