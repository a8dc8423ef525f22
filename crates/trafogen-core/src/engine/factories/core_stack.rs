use crate::core::catalog::LossTable;
use crate::core::model::{LaminationSheet, MagneticCore};
use crate::core::ranges::{Increment, IndexRange, RangeChain, SkipKey, SkipTable, StepRange};
use crate::engine::cancel::CancelToken;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use tracing::info;

const DIM_FLUX: &str = "flux_density";
const DIM_SHEET: &str = "lamination";

/// Second pipeline stage: stacks each upstream sheet at every working flux
/// density.
///
/// The upstream candidate list is itself a chain dimension: the chain is
/// [flux density (fastest), sheet index (slowest)], so the stage is a plain
/// odometer traversal over the two.
pub struct CoreFactory<'a> {
    flux_density: StepRange,
    material: &'a str,
    losses: &'a LossTable,
}

impl<'a> CoreFactory<'a> {
    pub fn new(flux_density: StepRange, material: &'a str, losses: &'a LossTable) -> Self {
        Self {
            flux_density,
            material,
            losses,
        }
    }

    pub fn build(
        &self,
        sheets: &[LaminationSheet],
        skip: &SkipTable,
        reporter: &ProgressReporter<'_>,
        cancel: &CancelToken,
    ) -> Result<Vec<MagneticCore>, EngineError> {
        if sheets.is_empty() {
            return Ok(Vec::new());
        }

        let mut chain = RangeChain::new(vec![
            self.flux_density.clone().into(),
            IndexRange::new(DIM_SHEET, sheets.len())?.into(),
        ]);
        chain.reset();
        let total = chain.iteration_count();
        let mut done = 0u64;
        let mut cores = Vec::new();

        loop {
            if cancel.is_cancelled() {
                return Err(EngineError::Cancelled);
            }

            let flux = chain.dim(0).as_step().unwrap().current();
            let sheet = &sheets[chain.dim(1).as_index().unwrap().cursor()];
            let keys = [
                SkipKey::numeric(DIM_FLUX, flux),
                SkipKey::label(DIM_SHEET, &sheet.label),
            ];
            if !skip.suppresses(&keys) {
                cores.push(MagneticCore::build(
                    sheet.clone(),
                    self.material,
                    flux,
                    self.losses,
                )?);
            }

            done += 1;
            if !reporter.report(done, total) {
                return Err(EngineError::Cancelled);
            }
            if chain.increment() == Increment::Exhausted {
                break;
            }
        }

        info!(cores = cores.len(), "Core stage finished.");
        Ok(cores)
    }
}
