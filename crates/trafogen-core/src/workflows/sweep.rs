use crate::core::catalog::CatalogSet;
use crate::engine::cancel::CancelToken;
use crate::engine::error::EngineError;
use crate::engine::evaluator::{DesignLimits, EvaluatedDesign, Evaluator};
use crate::engine::factories::{
    CoreFactory, CustomGeometry, DesignFactory, LaminationFactory, WindingSetFactory,
};
use crate::engine::progress::ProgressReporter;
use crate::engine::scheduler::{CandidateSink, RunCounters, RunPhase, RunState, Scheduler};
use crate::core::ranges::SkipTable;
use crate::workflows::config::{ConfigError, SweepConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Everything one sweep run hands back: the surviving designs plus a snapshot
/// of the run state at completion.
#[derive(Debug)]
pub struct SweepOutcome {
    /// Pass and fail results, in completion order.
    pub designs: Vec<EvaluatedDesign>,
    pub phase: RunPhase,
    pub counters: RunCounters,
    pub elapsed: Duration,
    /// The generation error that aborted the run, if any.
    pub error: Option<EngineError>,
}

/// The configure-and-run entry point of the library.
///
/// Construction validates the configuration against the catalogs; a
/// constructed sweep can be run any number of times, aborted from another
/// thread, and observed through its shared [`RunState`].
pub struct DesignSweep {
    config: SweepConfig,
    catalogs: CatalogSet,
    limits: DesignLimits,
    skip: SkipTable,
    scheduler: Scheduler,
}

impl DesignSweep {
    pub fn new(config: SweepConfig, catalogs: CatalogSet) -> Result<Self, ConfigError> {
        config.validate(&catalogs)?;
        let skip = config.skip_table();
        let limits = config.limits.to_limits();
        let scheduler = Scheduler::new(config.workers);
        Ok(Self {
            config,
            catalogs,
            limits,
            skip,
            scheduler,
        })
    }

    /// Shared run telemetry, pollable from any thread during and after a run.
    pub fn state(&self) -> Arc<RunState> {
        self.scheduler.state()
    }

    /// A clone of the run's cancel token, for wiring into signal handlers.
    pub fn cancel_token(&self) -> CancelToken {
        self.scheduler.cancel_token()
    }

    /// Requests a cooperative abort of the live run.
    pub fn abort(&self) {
        self.scheduler.abort();
    }

    /// Runs the sweep to completion, abort, or fatal generation error.
    ///
    /// The reporter receives `(done, total)` for the generation stage that is
    /// currently active; returning `false` aborts like [`Self::abort`].
    #[instrument(skip_all, name = "design_sweep")]
    pub fn run<E: Evaluator>(
        &self,
        evaluator: &E,
        reporter: &ProgressReporter<'_>,
    ) -> SweepOutcome {
        info!(
            material = %self.config.material,
            sections = self.config.sections.len(),
            workers = self.config.workers,
            "Starting design sweep."
        );
        let outcome = self.scheduler.run(
            |sink| self.generate(sink, reporter),
            evaluator,
            &self.limits,
        );
        SweepOutcome {
            designs: outcome.results,
            phase: outcome.phase,
            counters: outcome.counters,
            elapsed: outcome.elapsed,
            error: outcome.error,
        }
    }

    /// The generation task: drives the four factory stages and feeds every
    /// resulting design into the pending queue.
    fn generate(
        &self,
        sink: &CandidateSink<'_>,
        reporter: &ProgressReporter<'_>,
    ) -> Result<(), EngineError> {
        let cancel = sink.cancel_token();
        // each stage maps its own (done, total) onto a fixed band of a single
        // 0..=100 figure, so the shared generation percent climbs
        // monotonically instead of resetting per stage; the caller's reporter
        // still sees the raw per-stage values
        let staged = |base: u64, span: u64| {
            ProgressReporter::with_callback(Box::new(move |done, total| {
                let scaled = base + done.saturating_mul(span) / total.max(1);
                sink.report_generation(scaled, 100) && reporter.report(done, total)
            }))
        };

        let custom = match &self.config.custom_geometry {
            Some(geometry) => Some(CustomGeometry {
                stack_mm: geometry.stack_mm.to_range("stack_mm")?,
                tongue_mm: geometry.tongue_mm.to_range("tongue_mm")?,
            }),
            None => None,
        };
        let sheets = LaminationFactory::new(&self.catalogs.laminations, custom).build(
            &self.skip,
            &staged(0, 15),
            cancel,
        )?;

        let flux = self.config.flux_density_t.to_range("flux_density")?;
        let cores = CoreFactory::new(flux, &self.config.material, &self.catalogs.losses).build(
            &sheets,
            &self.skip,
            &staged(15, 20),
            cancel,
        )?;

        let band = self.config.current_density;
        let sets = WindingSetFactory::new(
            &self.catalogs.wires,
            &self.config.sections,
            band.min_a_per_mm2,
            band.max_a_per_mm2,
            self.config.permute_windings,
        )?
        .build(&self.skip, &staged(35, 20), cancel)?;

        let designs = DesignFactory::build(&cores, &sets, &self.skip, &staged(55, 25), cancel)?;

        let submit = staged(80, 20);
        let total = designs.len() as u64;
        for (queued, design) in designs.into_iter().enumerate() {
            sink.submit(design)?;
            if !submit.report(queued as u64 + 1, total) {
                return Err(EngineError::Cancelled);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::loss::LossPoint;
    use crate::core::catalog::{
        LaminationTable, LossTable, SheetFamily, SheetShape, WireEntry, WireTable,
    };
    use crate::core::model::{SectionSpec, TransformerDesign};
    use crate::engine::evaluator::{DesignMetrics, Verdict};
    use crate::workflows::config::{DensityBand, RangeSpec, SkipKeySpec, SkipRuleSpec, SkipValueSpec};

    fn catalogs() -> CatalogSet {
        CatalogSet {
            wires: WireTable::from_entries(vec![
                WireEntry {
                    gauge: "AWG24".into(),
                    diameter_mm: 0.511,
                    area_mm2: 0.205,
                    resistance_ohm_per_km: 84.2,
                    material: "copper".into(),
                },
                WireEntry {
                    gauge: "AWG20".into(),
                    diameter_mm: 0.812,
                    area_mm2: 0.518,
                    resistance_ohm_per_km: 33.3,
                    material: "copper".into(),
                },
            ]),
            laminations: LaminationTable::from_shapes(vec![SheetShape {
                name: "EI-48".into(),
                family: SheetFamily::Ei,
                tongue_mm: 16.0,
                stack_mm: 16.0,
                window_width_mm: 8.0,
                window_height_mm: 24.0,
            }]),
            losses: LossTable::from_points(vec![
                LossPoint {
                    material: "M6".into(),
                    flux_density_t: 1.0,
                    watts_per_kg: 1.0,
                },
                LossPoint {
                    material: "M6".into(),
                    flux_density_t: 1.6,
                    watts_per_kg: 2.2,
                },
            ]),
        }
    }

    fn config() -> SweepConfig {
        SweepConfig {
            material: "M6".into(),
            flux_density_t: RangeSpec {
                min: 1.0,
                max: 1.2,
                step: 0.2,
            },
            custom_geometry: None,
            sections: vec![SectionSpec {
                name: "primary".into(),
                current_a: 1.0,
                turns: 100,
            }],
            current_density: DensityBand {
                min_a_per_mm2: 1.0,
                max_a_per_mm2: 6.0,
            },
            permute_windings: false,
            skip: Vec::new(),
            limits: Default::default(),
            workers: 2,
        }
    }

    fn pass_all(_: &TransformerDesign, _: &DesignLimits) -> Verdict {
        Verdict::Pass(DesignMetrics {
            copper_loss_w: 1.0,
            no_load_loss_w: 1.0,
            total_loss_w: 2.0,
            window_fill: 0.2,
            mass_kg: 1.0,
        })
    }

    #[test]
    fn sweep_visits_the_whole_space() {
        let sweep = DesignSweep::new(config(), catalogs()).unwrap();
        let outcome = sweep.run(&pass_all, &ProgressReporter::new());

        // 1 sheet x 2 flux densities x 2 matching wires x 1 wiring style
        assert_eq!(outcome.phase, RunPhase::Finished);
        assert_eq!(outcome.counters.queued, 4);
        assert_eq!(outcome.designs.len(), 4);
        assert!(outcome.error.is_none());

        let state = sweep.state();
        assert_eq!(state.phase(), RunPhase::Finished);
        assert_eq!(state.generation_pct(), 100);
        assert_eq!(state.evaluation_pct(), 100);
    }

    #[test]
    fn generation_percent_climbs_monotonically_across_stages() {
        let sweep = DesignSweep::new(config(), catalogs()).unwrap();
        let state = sweep.state();
        let seen = std::sync::Mutex::new(Vec::new());
        // the forwarded reporter fires after the shared percent is updated,
        // so sampling it here observes every stage transition
        let reporter = ProgressReporter::with_callback(Box::new(|_, _| {
            seen.lock().unwrap().push(state.generation_pct());
            true
        }));
        let outcome = sweep.run(&pass_all, &reporter);
        assert_eq!(outcome.phase, RunPhase::Finished);

        drop(reporter);
        let seen = seen.into_inner().unwrap();
        assert!(seen.len() > 1);
        assert!(seen.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(state.generation_pct(), 100);
    }

    #[test]
    fn skip_rule_from_config_suppresses_candidates() {
        let mut config = config();
        config.skip.push(SkipRuleSpec {
            first: SkipKeySpec {
                dimension: "lamination".into(),
                value: SkipValueSpec::Label("EI-48".into()),
            },
            second: SkipKeySpec {
                dimension: "flux_density".into(),
                value: SkipValueSpec::Number(1.2),
            },
        });
        let sweep = DesignSweep::new(config, catalogs()).unwrap();
        let outcome = sweep.run(&pass_all, &ProgressReporter::new());

        assert_eq!(outcome.phase, RunPhase::Finished);
        assert_eq!(outcome.counters.queued, 2);
        assert!(
            outcome
                .designs
                .iter()
                .all(|d| d.design.core.flux_density_t != 1.2)
        );
    }

    #[test]
    fn unmatched_section_aborts_and_names_the_section() {
        let mut config = config();
        config.sections[0].current_a = 1000.0;
        let sweep = DesignSweep::new(config, catalogs()).unwrap();
        let outcome = sweep.run(&pass_all, &ProgressReporter::new());

        assert_eq!(outcome.phase, RunPhase::Aborted);
        assert!(matches!(
            outcome.error,
            Some(EngineError::NoMatchingWire { ref section, .. }) if section == "primary"
        ));
        // the message stays readable off the shared state until the next run
        let message = sweep.state().error().unwrap();
        assert!(message.contains("primary"));
        assert!(outcome.designs.is_empty());
    }

    #[test]
    fn evaluator_abort_ends_the_run_cleanly() {
        let sweep = DesignSweep::new(config(), catalogs()).unwrap();
        let evaluator = |_: &TransformerDesign, _: &DesignLimits| {
            sweep.abort();
            Verdict::Null
        };
        let outcome = sweep.run(&evaluator, &ProgressReporter::new());
        assert_eq!(outcome.phase, RunPhase::Aborted);
        assert!(outcome.error.is_none());
        assert!(outcome.designs.is_empty());
    }

    #[test]
    fn sweep_is_reusable_after_a_run() {
        let sweep = DesignSweep::new(config(), catalogs()).unwrap();
        let first = sweep.run(&pass_all, &ProgressReporter::new());
        let second = sweep.run(&pass_all, &ProgressReporter::new());
        assert_eq!(first.counters.queued, second.counters.queued);
        assert_eq!(second.phase, RunPhase::Finished);
        assert_eq!(second.designs.len(), 4);
    }

    #[test]
    fn real_window_fill_evaluator_splits_pass_and_fail() {
        let mut config = config();
        config.limits.max_window_fill = 0.15;
        let sweep = DesignSweep::new(config, catalogs()).unwrap();
        let evaluator = |design: &TransformerDesign, limits: &DesignLimits| {
            let metrics = DesignMetrics {
                copper_loss_w: 0.0,
                no_load_loss_w: design.core.no_load_loss_w,
                total_loss_w: design.core.no_load_loss_w,
                window_fill: design.window_fill(),
                mass_kg: design.core.mass_kg,
            };
            if metrics.window_fill <= limits.max_window_fill {
                Verdict::Pass(metrics)
            } else {
                Verdict::Fail(metrics)
            }
        };
        let outcome = sweep.run(&evaluator, &ProgressReporter::new());

        // 100 turns in a 192 mm2 window: AWG24 fills ~0.107, AWG20 ~0.27
        assert_eq!(outcome.phase, RunPhase::Finished);
        assert_eq!(outcome.counters.passed, 2);
        assert_eq!(outcome.counters.failed, 2);
        assert_eq!(outcome.designs.len(), 4);
    }
}
