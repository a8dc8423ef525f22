use crate::core::catalog::LaminationTable;
use crate::core::model::LaminationSheet;
use crate::core::model::lamination::CUSTOM_LABEL;
use crate::core::ranges::{Increment, IndexRange, RangeChain, SkipKey, SkipTable, StepRange};
use crate::engine::cancel::CancelToken;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use tracing::{debug, info};

/// Names of the lamination chain dimensions, used in skip keys.
const DIM_STACK: &str = "stack_mm";
const DIM_TONGUE: &str = "tongue_mm";
const DIM_SOURCE: &str = "lamination";

/// The custom-geometry ranges of the first stage.
#[derive(Debug, Clone)]
pub struct CustomGeometry {
    /// Stack height range, the fastest-varying dimension.
    pub stack_mm: StepRange,
    /// Tongue width range.
    pub tongue_mm: StepRange,
}

/// First pipeline stage: enumerates lamination sheets.
///
/// The chain is, fastest first: stack height, tongue width, and a source
/// cursor spanning every standard catalog entry plus (when custom geometry is
/// configured) one trailing custom slot. A standard source value makes the
/// custom dimensions irrelevant: the sheet is built from the catalog entry
/// alone and the inner cursors are forced to their last value so the next
/// increment carries straight to the following source. The skip table is
/// consulted against the tuple as it stands before that forcing.
pub struct LaminationFactory<'a> {
    table: &'a LaminationTable,
    custom: Option<CustomGeometry>,
}

impl<'a> LaminationFactory<'a> {
    pub fn new(table: &'a LaminationTable, custom: Option<CustomGeometry>) -> Self {
        Self { table, custom }
    }

    pub fn build(
        &self,
        skip: &SkipTable,
        reporter: &ProgressReporter<'_>,
        cancel: &CancelToken,
    ) -> Result<Vec<LaminationSheet>, EngineError> {
        let mut chain = self.chain()?;
        chain.reset();
        let source_pos = chain.len() - 1;
        // standard entries are visited once each thanks to the forced carry,
        // so the chain product would overstate the work left
        let total = self.table.len() as u64
            + match &self.custom {
                Some(geometry) => geometry
                    .stack_mm
                    .iteration_count()
                    .saturating_mul(geometry.tongue_mm.iteration_count()),
                None => 0,
            };
        let mut done = 0u64;
        let mut sheets = Vec::new();

        loop {
            if cancel.is_cancelled() {
                return Err(EngineError::Cancelled);
            }

            let cursor = chain.dim(source_pos).as_index().unwrap().cursor();
            let standard = cursor < self.table.len();
            let keys = self.keys(&chain, cursor, standard);
            if skip.suppresses(&keys) {
                debug!(source = cursor, "Skip table suppressed lamination tuple.");
            } else if standard {
                sheets.push(LaminationSheet::from_shape(self.table.shape(cursor)));
            } else {
                let stack = chain.dim(0).as_step().unwrap().current();
                let tongue = chain.dim(1).as_step().unwrap().current();
                sheets.push(LaminationSheet::custom(tongue, stack));
            }

            // canned entry: the inner custom cursors carry no information
            if standard {
                chain.force_to_last(source_pos);
            }

            done += 1;
            if !reporter.report(done, total) {
                return Err(EngineError::Cancelled);
            }
            if chain.increment() == Increment::Exhausted {
                break;
            }
        }

        info!(sheets = sheets.len(), "Lamination stage finished.");
        Ok(sheets)
    }

    fn chain(&self) -> Result<RangeChain, EngineError> {
        let slots = self.table.len() + usize::from(self.custom.is_some());
        let source = IndexRange::new(DIM_SOURCE, slots)?;
        let mut chain = RangeChain::default();
        if let Some(geometry) = &self.custom {
            chain.push(geometry.stack_mm.clone());
            chain.push(geometry.tongue_mm.clone());
        }
        chain.push(source);
        Ok(chain)
    }

    fn keys(&self, chain: &RangeChain, cursor: usize, standard: bool) -> Vec<SkipKey> {
        let mut keys = Vec::with_capacity(chain.len());
        if self.custom.is_some() {
            keys.push(SkipKey::numeric(
                DIM_STACK,
                chain.dim(0).as_step().unwrap().current(),
            ));
            keys.push(SkipKey::numeric(
                DIM_TONGUE,
                chain.dim(1).as_step().unwrap().current(),
            ));
        }
        let label = if standard {
            self.table.shape(cursor).name.as_str()
        } else {
            CUSTOM_LABEL
        };
        keys.push(SkipKey::label(DIM_SOURCE, label));
        keys
    }
}
