use crate::error::{CliError, Result};
use std::path::Path;
use trafogen::engine::evaluator::EvaluatedDesign;

/// Writes one CSV row per result, passing designs first.
pub fn write_results(path: &Path, results: &[EvaluatedDesign]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|source| CliError::ResultWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let row = |r: &EvaluatedDesign| -> Vec<String> {
        let core = &r.design.core;
        vec![
            core.sheet.label.clone(),
            core.sheet.family.to_string(),
            format!("{:.1}", core.sheet.tongue_mm),
            format!("{:.1}", core.sheet.stack_mm),
            format!("{:.3}", core.flux_density_t),
            r.design.wiring.to_string(),
            r.design.windings.order().join("/"),
            r.design
                .windings
                .windings
                .iter()
                .map(|w| w.wire.gauge.as_str())
                .collect::<Vec<_>>()
                .join("/"),
            format!("{:.4}", r.metrics.window_fill),
            format!("{:.3}", r.metrics.copper_loss_w),
            format!("{:.3}", r.metrics.no_load_loss_w),
            format!("{:.3}", r.metrics.total_loss_w),
            format!("{:.3}", r.metrics.mass_kg),
            if r.passed { "pass" } else { "fail" }.to_string(),
        ]
    };

    let write = |writer: &mut csv::Writer<std::fs::File>, r: &EvaluatedDesign| {
        writer.write_record(row(r)).map_err(|source| CliError::ResultWrite {
            path: path.to_path_buf(),
            source,
        })
    };

    writer
        .write_record([
            "lamination",
            "family",
            "tongue_mm",
            "stack_mm",
            "flux_density_t",
            "wiring",
            "winding_order",
            "wires",
            "window_fill",
            "copper_loss_w",
            "no_load_loss_w",
            "total_loss_w",
            "mass_kg",
            "verdict",
        ])
        .map_err(|source| CliError::ResultWrite {
            path: path.to_path_buf(),
            source,
        })?;
    for result in results.iter().filter(|r| r.passed) {
        write(&mut writer, result)?;
    }
    for result in results.iter().filter(|r| !r.passed) {
        write(&mut writer, result)?;
    }
    writer.flush()?;
    Ok(())
}
