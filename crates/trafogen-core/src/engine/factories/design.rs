use crate::core::model::{MagneticCore, TransformerDesign, WindingSet, WiringStyle};
use crate::core::ranges::{SkipKey, SkipTable};
use crate::engine::cancel::CancelToken;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use tracing::info;

const DIM_SHEET: &str = "lamination";
const DIM_FLUX: &str = "flux_density";
const DIM_WIRING: &str = "wiring";

/// Final pipeline stage: joins cores against winding sets and fans each pair
/// out over the wiring styles the core's sheet family supports.
///
/// Plain wiring is always applicable; the split-limb arrangement only exists
/// for double-window families.
pub struct DesignFactory;

impl DesignFactory {
    pub fn build(
        cores: &[MagneticCore],
        sets: &[WindingSet],
        skip: &SkipTable,
        reporter: &ProgressReporter<'_>,
        cancel: &CancelToken,
    ) -> Result<Vec<TransformerDesign>, EngineError> {
        let total = (cores.len() as u64).saturating_mul(sets.len() as u64);
        let mut done = 0u64;
        let mut designs = Vec::new();

        for core in cores {
            let mut styles = vec![WiringStyle::Plain];
            if core.sheet.family.supports_split_limb() {
                styles.push(WiringStyle::SplitLimb);
            }
            for set in sets {
                if cancel.is_cancelled() {
                    return Err(EngineError::Cancelled);
                }

                for &style in &styles {
                    let keys = [
                        SkipKey::label(DIM_SHEET, &core.sheet.label),
                        SkipKey::numeric(DIM_FLUX, core.flux_density_t),
                        SkipKey::label(DIM_WIRING, style.to_string()),
                    ];
                    if !skip.suppresses(&keys) {
                        designs.push(TransformerDesign {
                            core: core.clone(),
                            windings: set.clone(),
                            wiring: style,
                        });
                    }
                }

                done += 1;
                if !reporter.report(done, total) {
                    return Err(EngineError::Cancelled);
                }
            }
        }

        info!(designs = designs.len(), "Design stage finished.");
        Ok(designs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::loss::LossPoint;
    use crate::core::catalog::{LossTable, SheetFamily, SheetShape, WireEntry};
    use crate::core::model::{LaminationSheet, SectionSpec, Winding};

    fn losses() -> LossTable {
        LossTable::from_points(vec![LossPoint {
            material: "M6".into(),
            flux_density_t: 1.0,
            watts_per_kg: 1.0,
        }])
    }

    fn ui_sheet() -> LaminationSheet {
        LaminationSheet::from_shape(&SheetShape {
            name: "UI-60".into(),
            family: SheetFamily::Ui,
            tongue_mm: 20.0,
            stack_mm: 20.0,
            window_width_mm: 10.0,
            window_height_mm: 30.0,
        })
    }

    fn set() -> WindingSet {
        WindingSet::new(vec![Winding {
            section: SectionSpec {
                name: "primary".into(),
                current_a: 0.5,
                turns: 300,
            },
            wire: WireEntry {
                gauge: "AWG24".into(),
                diameter_mm: 0.511,
                area_mm2: 0.205,
                resistance_ohm_per_km: 84.2,
                material: "copper".into(),
            },
        }])
    }

    #[test]
    fn plain_core_gets_one_style_double_window_gets_two() {
        let losses = losses();
        let cores = vec![
            MagneticCore::build(LaminationSheet::custom(16.0, 16.0), "M6", 1.0, &losses).unwrap(),
            MagneticCore::build(ui_sheet(), "M6", 1.0, &losses).unwrap(),
        ];
        let sets = vec![set()];
        let designs = DesignFactory::build(
            &cores,
            &sets,
            &SkipTable::new(),
            &ProgressReporter::new(),
            &CancelToken::new(),
        )
        .unwrap();

        assert_eq!(designs.len(), 3);
        let split: Vec<_> = designs
            .iter()
            .filter(|d| d.wiring == WiringStyle::SplitLimb)
            .collect();
        assert_eq!(split.len(), 1);
        assert_eq!(split[0].core.sheet.label, "UI-60");
    }

    #[test]
    fn empty_inputs_yield_no_designs() {
        let designs = DesignFactory::build(
            &[],
            &[set()],
            &SkipTable::new(),
            &ProgressReporter::new(),
            &CancelToken::new(),
        )
        .unwrap();
        assert!(designs.is_empty());
    }

    #[test]
    fn skip_table_can_suppress_one_style_on_one_sheet() {
        let losses = losses();
        let cores = vec![MagneticCore::build(ui_sheet(), "M6", 1.0, &losses).unwrap()];
        let sets = vec![set()];
        let mut skip = SkipTable::new();
        skip.insert(
            SkipKey::label(DIM_SHEET, "UI-60"),
            SkipKey::label(DIM_WIRING, "split-limb"),
        );
        let designs = DesignFactory::build(
            &cores,
            &sets,
            &skip,
            &ProgressReporter::new(),
            &CancelToken::new(),
        )
        .unwrap();
        assert_eq!(designs.len(), 1);
        assert_eq!(designs[0].wiring, WiringStyle::Plain);
    }

    #[test]
    fn cancel_token_stops_generation() {
        let losses = losses();
        let cores = vec![MagneticCore::build(ui_sheet(), "M6", 1.0, &losses).unwrap()];
        let sets = vec![set()];
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = DesignFactory::build(
            &cores,
            &sets,
            &SkipTable::new(),
            &ProgressReporter::new(),
            &cancel,
        );
        assert!(matches!(result, Err(EngineError::Cancelled)));
    }
}
