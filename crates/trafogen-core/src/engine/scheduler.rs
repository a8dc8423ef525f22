use crate::core::model::TransformerDesign;
use crate::engine::cancel::CancelToken;
use crate::engine::error::EngineError;
use crate::engine::evaluator::{DesignLimits, EvaluatedDesign, Evaluator, Verdict};
use crate::engine::progress::percent;
use crate::engine::stream::CandidateStream;
use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Lifecycle of one run, readable at any time from any thread.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle = 0,
    Generating = 1,
    Evaluating = 2,
    Finished = 3,
    Aborted = 4,
}

impl RunPhase {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => RunPhase::Generating,
            2 => RunPhase::Evaluating,
            3 => RunPhase::Finished,
            4 => RunPhase::Aborted,
            _ => RunPhase::Idle,
        }
    }
}

/// Candidate counters of the current or last run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    /// Candidates handed to the pending queue.
    pub queued: u64,
    /// Candidates a worker finished with, regardless of verdict.
    pub completed: u64,
    pub passed: u64,
    pub failed: u64,
    /// Candidates judged not meaningful; counted, never returned.
    pub null: u64,
}

/// Shared run telemetry.
///
/// All fields are updated in place while a run is live, so a monitoring thread
/// can poll phase and progress without synchronizing with the scheduler. The
/// error message of a failed run stays readable until the next run resets it.
#[derive(Debug, Default)]
pub struct RunState {
    phase: AtomicU8,
    generation_pct: AtomicU8,
    evaluation_pct: AtomicU8,
    elapsed_ms: AtomicU64,
    queued: AtomicU64,
    completed: AtomicU64,
    passed: AtomicU64,
    failed: AtomicU64,
    null: AtomicU64,
    error: Mutex<Option<String>>,
    started: Mutex<Option<Instant>>,
}

impl RunState {
    pub fn phase(&self) -> RunPhase {
        RunPhase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    pub fn generation_pct(&self) -> u8 {
        self.generation_pct.load(Ordering::SeqCst)
    }

    pub fn evaluation_pct(&self) -> u8 {
        self.evaluation_pct.load(Ordering::SeqCst)
    }

    /// True once the run has come to rest, successfully or not.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase(), RunPhase::Finished | RunPhase::Aborted)
    }

    /// Wall-clock time of the current or last run. Live while a run is in
    /// flight, frozen at the final value once it comes to rest.
    pub fn elapsed(&self) -> Duration {
        if self.is_finished() {
            return Duration::from_millis(self.elapsed_ms.load(Ordering::SeqCst));
        }
        match *self.started.lock().unwrap() {
            Some(started) => started.elapsed(),
            None => Duration::ZERO,
        }
    }

    pub fn counters(&self) -> RunCounters {
        RunCounters {
            queued: self.queued.load(Ordering::SeqCst),
            completed: self.completed.load(Ordering::SeqCst),
            passed: self.passed.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
            null: self.null.load(Ordering::SeqCst),
        }
    }

    /// Message of the error that aborted the last run, if any.
    pub fn error(&self) -> Option<String> {
        self.error.lock().unwrap().clone()
    }

    fn set_phase(&self, phase: RunPhase) {
        self.phase.store(phase as u8, Ordering::SeqCst);
    }

    fn set_error(&self, message: String) {
        *self.error.lock().unwrap() = Some(message);
    }

    fn reset(&self) {
        self.phase.store(RunPhase::Idle as u8, Ordering::SeqCst);
        self.generation_pct.store(0, Ordering::SeqCst);
        self.evaluation_pct.store(0, Ordering::SeqCst);
        self.elapsed_ms.store(0, Ordering::SeqCst);
        self.queued.store(0, Ordering::SeqCst);
        self.completed.store(0, Ordering::SeqCst);
        self.passed.store(0, Ordering::SeqCst);
        self.failed.store(0, Ordering::SeqCst);
        self.null.store(0, Ordering::SeqCst);
        *self.error.lock().unwrap() = None;
        *self.started.lock().unwrap() = None;
    }
}

/// The generation task's handle onto the pending queue.
///
/// `submit` is the only way candidates enter a run; it refuses work once the
/// run is cancelled, and `report_generation` feeds the shared telemetry so a
/// progress callback can simply forward into it.
pub struct CandidateSink<'a> {
    tx: Sender<TransformerDesign>,
    state: &'a RunState,
    cancel: &'a CancelToken,
}

impl CandidateSink<'_> {
    pub fn submit(&self, design: TransformerDesign) -> Result<(), EngineError> {
        if self.cancel.is_cancelled() {
            return Err(EngineError::Cancelled);
        }
        // workers only drop their receivers when the run is being torn down
        self.tx
            .send(design)
            .map_err(|_| EngineError::Cancelled)?;
        self.state.queued.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Updates the generation progress; returns `false` once cancelled so it
    /// can serve directly as a progress-callback body.
    pub fn report_generation(&self, done: u64, total: u64) -> bool {
        self.state
            .generation_pct
            .store(percent(done, total), Ordering::SeqCst);
        !self.cancel.is_cancelled()
    }

    pub fn cancel_token(&self) -> &CancelToken {
        self.cancel
    }
}

/// Everything a finished run hands back.
#[derive(Debug)]
pub struct RunOutcome {
    /// Pass and fail results, in completion order.
    pub results: Vec<EvaluatedDesign>,
    pub phase: RunPhase,
    pub counters: RunCounters,
    pub elapsed: Duration,
    /// The generation error that aborted the run, if any.
    pub error: Option<EngineError>,
}

/// Drives one generation task and a pool of evaluation workers over a shared
/// candidate stream.
///
/// The generation closure runs on its own thread and feeds the pending queue
/// through a [`CandidateSink`]; dropping the sink's sender when the closure
/// returns is what lets idle workers terminate. Workers pull candidates until
/// disconnect, evaluate each one, and push the outcome onto the completed
/// queue, which the calling thread drains. A run never panics the caller:
/// fatal generation errors and aborts both surface through [`RunOutcome`] and
/// the shared [`RunState`]. The scheduler is reusable; each `run` starts from
/// a clean state.
pub struct Scheduler {
    workers: usize,
    state: Arc<RunState>,
    cancel: CancelToken,
}

impl Scheduler {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            state: Arc::new(RunState::default()),
            cancel: CancelToken::new(),
        }
    }

    pub fn state(&self) -> Arc<RunState> {
        Arc::clone(&self.state)
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Requests a cooperative abort of the live run.
    pub fn abort(&self) {
        self.cancel.cancel();
    }

    pub fn run<G, E>(
        &self,
        generate: G,
        evaluator: &E,
        limits: &DesignLimits,
    ) -> RunOutcome
    where
        G: FnOnce(&CandidateSink<'_>) -> Result<(), EngineError> + Send,
        E: Evaluator,
    {
        self.cancel.reset();
        self.state.reset();
        self.state.set_phase(RunPhase::Generating);
        let start = Instant::now();
        *self.state.started.lock().unwrap() = Some(start);

        let CandidateStream {
            pending_tx,
            pending_rx,
            completed_tx,
            completed_rx,
        } = CandidateStream::<TransformerDesign, Option<EvaluatedDesign>>::new();

        let state = &*self.state;
        let cancel = &self.cancel;
        let generation_error: Mutex<Option<EngineError>> = Mutex::new(None);
        let mut results = Vec::new();

        thread::scope(|scope| {
            let error_slot = &generation_error;
            scope.spawn(move || {
                let sink = CandidateSink {
                    tx: pending_tx,
                    state,
                    cancel,
                };
                match generate(&sink) {
                    Ok(()) => {
                        sink.report_generation(1, 1);
                        state.set_phase(RunPhase::Evaluating);
                    }
                    Err(EngineError::Cancelled) => cancel.cancel(),
                    Err(err) => {
                        warn!(error = %err, "Generation failed; aborting run.");
                        state.set_error(err.to_string());
                        *error_slot.lock().unwrap() = Some(err);
                        cancel.cancel();
                    }
                }
                // sink (and with it the pending sender) drops here
            });

            for _ in 0..self.workers {
                let rx = pending_rx.clone();
                let tx = completed_tx.clone();
                scope.spawn(move || {
                    while let Ok(design) = rx.recv() {
                        if cancel.is_cancelled() {
                            break;
                        }
                        let outcome = match evaluator.evaluate(&design, limits) {
                            Verdict::Pass(metrics) => Some(EvaluatedDesign {
                                design,
                                metrics,
                                passed: true,
                            }),
                            Verdict::Fail(metrics) => Some(EvaluatedDesign {
                                design,
                                metrics,
                                passed: false,
                            }),
                            Verdict::Null => None,
                        };
                        if tx.send(outcome).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(pending_rx);
            drop(completed_tx);

            for outcome in completed_rx.iter() {
                let completed = state.completed.fetch_add(1, Ordering::SeqCst) + 1;
                match outcome {
                    Some(result) => {
                        if result.passed {
                            state.passed.fetch_add(1, Ordering::SeqCst);
                        } else {
                            state.failed.fetch_add(1, Ordering::SeqCst);
                        }
                        results.push(result);
                    }
                    None => {
                        state.null.fetch_add(1, Ordering::SeqCst);
                    }
                }
                state.evaluation_pct.store(
                    percent(completed, state.queued.load(Ordering::SeqCst)),
                    Ordering::SeqCst,
                );
            }
        });

        let error = generation_error.into_inner().unwrap();
        let aborted = self.cancel.is_cancelled() || error.is_some();
        if !aborted {
            self.state.evaluation_pct.store(100, Ordering::SeqCst);
        }
        self.state.set_phase(if aborted {
            RunPhase::Aborted
        } else {
            RunPhase::Finished
        });
        self.state
            .elapsed_ms
            .store(start.elapsed().as_millis() as u64, Ordering::SeqCst);

        let counters = self.state.counters();
        info!(
            phase = ?self.state.phase(),
            queued = counters.queued,
            completed = counters.completed,
            passed = counters.passed,
            "Run finished."
        );
        RunOutcome {
            results,
            phase: self.state.phase(),
            counters,
            elapsed: self.state.elapsed(),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::loss::LossPoint;
    use crate::core::catalog::{LossTable, WireEntry};
    use crate::core::model::{LaminationSheet, MagneticCore, SectionSpec, Winding, WindingSet};
    use crate::engine::evaluator::DesignMetrics;

    fn sample_design() -> TransformerDesign {
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
        };
        TransformerDesign {
            core,
            windings: WindingSet::new(vec![winding]),
            wiring: crate::core::model::WiringStyle::Plain,
        }
    }

    fn metrics() -> DesignMetrics {
        DesignMetrics {
            copper_loss_w: 2.0,
            no_load_loss_w: 1.0,
            total_loss_w: 3.0,
            window_fill: 0.3,
            mass_kg: 1.2,
        }
    }

    fn pass_all(_: &TransformerDesign, _: &DesignLimits) -> Verdict {
        Verdict::Pass(metrics())
    }

    #[test]
    fn every_queued_candidate_is_completed_exactly_once() {
        let scheduler = Scheduler::new(4);
        for _ in 0..10 {
            let template = sample_design();
            let outcome = scheduler.run(
                |sink| {
                    for _ in 0..200 {
                        sink.submit(template.clone())?;
                    }
                    Ok(())
                },
                &pass_all,
                &DesignLimits::default(),
            );

            assert_eq!(outcome.phase, RunPhase::Finished);
            assert_eq!(outcome.results.len(), 200);
            assert_eq!(outcome.counters.queued, 200);
            assert_eq!(outcome.counters.completed, 200);
            assert_eq!(outcome.counters.passed, 200);
            assert!(outcome.error.is_none());
        }
    }

    #[test]
    fn null_verdicts_are_counted_but_not_returned() {
        let scheduler = Scheduler::new(2);
        let template = sample_design();
        let evaluator = |design: &TransformerDesign, _: &DesignLimits| {
            if design.windings.windings[0].section.turns % 2 == 0 {
                Verdict::Null
            } else {
                Verdict::Fail(metrics())
            }
        };
        let outcome = scheduler.run(
            |sink| {
                for turns in 0..10u32 {
                    let mut design = template.clone();
                    design.windings.windings[0].section.turns = turns;
                    sink.submit(design)?;
                }
                Ok(())
            },
            &evaluator,
            &DesignLimits::default(),
        );

        assert_eq!(outcome.phase, RunPhase::Finished);
        assert_eq!(outcome.counters.null, 5);
        assert_eq!(outcome.counters.failed, 5);
        assert_eq!(outcome.counters.completed, 10);
        assert_eq!(outcome.results.len(), 5);
        assert!(outcome.results.iter().all(|r| !r.passed));
    }

    #[test]
    fn abort_stops_both_sides_of_the_stream() {
        let scheduler = Scheduler::new(4);
        let template = sample_design();
        let cancel = scheduler.cancel_token();
        let evaluator = move |_: &TransformerDesign, _: &DesignLimits| {
            cancel.cancel();
            Verdict::Pass(metrics())
        };
        let outcome = scheduler.run(
            |sink| {
                // far more than the workers will ever see
                for _ in 0..1_000_000 {
                    sink.submit(template.clone())?;
                }
                Ok(())
            },
            &evaluator,
            &DesignLimits::default(),
        );

        assert_eq!(outcome.phase, RunPhase::Aborted);
        assert!(outcome.counters.completed < 1_000_000);
        assert!(outcome.error.is_none());
    }

    #[test]
    fn generation_error_aborts_and_stays_readable() {
        let scheduler = Scheduler::new(2);
        let template = sample_design();
        let outcome = scheduler.run(
            |sink| {
                for _ in 0..3 {
                    sink.submit(template.clone())?;
                }
                Err(EngineError::NoMatchingWire {
                    section: "secondary".into(),
                    min_mm2: 10.0,
                    max_mm2: 20.0,
                })
            },
            &pass_all,
            &DesignLimits::default(),
        );

        assert_eq!(outcome.phase, RunPhase::Aborted);
        assert!(matches!(
            outcome.error,
            Some(EngineError::NoMatchingWire { ref section, .. }) if section == "secondary"
        ));
        let state = scheduler.state();
        assert_eq!(state.phase(), RunPhase::Aborted);
        assert!(state.is_finished());
        let message = state.error().unwrap();
        assert!(message.contains("secondary"));
    }

    #[test]
    fn scheduler_is_reusable_after_an_aborted_run() {
        let scheduler = Scheduler::new(2);
        let template = sample_design();

        let first = scheduler.run(
            |_| Err(EngineError::Internal("catalog went missing".into())),
            &pass_all,
            &DesignLimits::default(),
        );
        assert_eq!(first.phase, RunPhase::Aborted);
        assert!(scheduler.state().error().is_some());

        let second = scheduler.run(
            |sink| {
                for _ in 0..5 {
                    sink.submit(template.clone())?;
                }
                Ok(())
            },
            &pass_all,
            &DesignLimits::default(),
        );
        assert_eq!(second.phase, RunPhase::Finished);
        assert_eq!(second.results.len(), 5);
        assert!(scheduler.state().error().is_none());
        assert_eq!(scheduler.state().generation_pct(), 100);
        assert_eq!(scheduler.state().evaluation_pct(), 100);
    }

    #[test]
    fn elapsed_is_live_while_the_run_is_in_flight() {
        use std::sync::atomic::AtomicBool;

        let scheduler = Scheduler::new(1);
        let state = scheduler.state();
        let template = sample_design();
        let saw_live = AtomicBool::new(false);
        let evaluator = |_: &TransformerDesign, _: &DesignLimits| {
            thread::sleep(Duration::from_millis(5));
            if state.elapsed() > Duration::ZERO {
                saw_live.store(true, Ordering::SeqCst);
            }
            Verdict::Null
        };
        let outcome = scheduler.run(
            |sink| {
                sink.submit(template.clone())?;
                Ok(())
            },
            &evaluator,
            &DesignLimits::default(),
        );

        assert_eq!(outcome.phase, RunPhase::Finished);
        assert!(saw_live.load(Ordering::SeqCst));
        assert!(outcome.elapsed >= Duration::from_millis(5));
    }

    #[test]
    fn zero_workers_is_clamped_to_one() {
        let scheduler = Scheduler::new(0);
        let template = sample_design();
        let outcome = scheduler.run(
            |sink| {
                sink.submit(template.clone())?;
                Ok(())
            },
            &pass_all,
            &DesignLimits::default(),
        );
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.phase, RunPhase::Finished);
    }
}
