use crate::cli::ValidateArgs;
use crate::error::Result;
use tracing::info;
use trafogen::core::catalog::CatalogSet;
use trafogen::workflows::{DesignSweep, SweepConfig};

/// Loads everything a sweep would load and reports the first problem found,
/// without generating a single candidate.
pub fn run(args: ValidateArgs) -> Result<()> {
    let inputs = &args.inputs;
    let catalogs = CatalogSet::load(&inputs.wires, &inputs.laminations, &inputs.losses)?;
    info!(
        wires = catalogs.wires.len(),
        laminations = catalogs.laminations.len(),
        materials = catalogs.losses.materials().count(),
        "Catalogs loaded."
    );

    let config = SweepConfig::load(&inputs.config)?;
    let sections = config.sections.len();
    DesignSweep::new(config, catalogs)?;

    println!(
        "Configuration is valid: {} winding section(s), catalogs loaded.",
        sections
    );
    Ok(())
}
