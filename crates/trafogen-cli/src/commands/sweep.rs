use crate::cli::SweepArgs;
use crate::error::{CliError, Result};
use crate::evaluation::ReferenceEvaluator;
use crate::output;
use crate::utils::progress::SweepProgressHandler;
use tracing::{info, warn};
use trafogen::core::catalog::CatalogSet;
use trafogen::engine::progress::ProgressReporter;
use trafogen::engine::scheduler::RunPhase;
use trafogen::workflows::{DesignSweep, SweepConfig};

pub fn run(args: SweepArgs) -> Result<()> {
    let inputs = &args.inputs;
    info!("Loading catalogs...");
    let catalogs = CatalogSet::load(&inputs.wires, &inputs.laminations, &inputs.losses)?;

    let mut config = SweepConfig::load(&inputs.config)?;
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if args.permute_windings {
        config.permute_windings = true;
    }

    let sweep = DesignSweep::new(config, catalogs)?;
    let progress = SweepProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress.callback());

    println!("Starting design sweep...");
    let outcome = sweep.run(&ReferenceEvaluator, &reporter);
    progress.finish();

    if outcome.phase == RunPhase::Aborted {
        return match outcome.error {
            Some(err) => Err(err.into()),
            None => Err(CliError::Aborted),
        };
    }

    let counters = outcome.counters;
    println!(
        "Evaluated {} designs in {:.1}s: {} passed, {} failed, {} not buildable.",
        counters.completed,
        outcome.elapsed.as_secs_f64(),
        counters.passed,
        counters.failed,
        counters.null,
    );

    let mut passing: Vec<_> = outcome.designs.iter().filter(|r| r.passed).collect();
    passing.sort_by(|a, b| a.metrics.total_loss_w.total_cmp(&b.metrics.total_loss_w));
    for result in passing.iter().take(5) {
        println!(
            "  {} @ {:.2} T, {}, wires {}: {:.2} W total, fill {:.2}",
            result.design.core.sheet.label,
            result.design.core.flux_density_t,
            result.design.wiring,
            result
                .design
                .windings
                .windings
                .iter()
                .map(|w| w.wire.gauge.as_str())
                .collect::<Vec<_>>()
                .join("/"),
            result.metrics.total_loss_w,
            result.metrics.window_fill,
        );
    }
    if passing.is_empty() {
        warn!("Sweep completed but no design passed the limits.");
        println!("No design passed the configured limits.");
    }

    if let Some(path) = &args.output {
        info!("Writing {} results to {:?}", outcome.designs.len(), path);
        output::write_results(path, &outcome.designs)?;
        println!("Results written to {}.", path.display());
    }
    Ok(())
}
