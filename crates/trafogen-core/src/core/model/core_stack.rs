use super::lamination::LaminationSheet;
use crate::core::catalog::{CatalogError, LossTable};

/// Fraction of the gross stack that is actually steel once interlamination
/// insulation is accounted for.
const STACKING_FACTOR: f64 = 0.95;

/// Density of electrical steel in g/mm³.
const STEEL_DENSITY_G_PER_MM3: f64 = 0.00765;

/// The second-stage candidate: a lamination stacked into a magnetic core at
/// a working flux density, with its derived physical attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct MagneticCore {
    pub sheet: LaminationSheet,
    pub material: String,
    pub flux_density_t: f64,
    /// Effective magnetic cross-section in mm².
    pub cross_section_mm2: f64,
    /// Winding window area in mm².
    pub window_area_mm2: f64,
    pub mass_kg: f64,
    /// No-load (iron) loss at the working flux density, in watts.
    pub no_load_loss_w: f64,
}

impl MagneticCore {
    pub fn build(
        sheet: LaminationSheet,
        material: &str,
        flux_density_t: f64,
        losses: &LossTable,
    ) -> Result<Self, CatalogError> {
        let cross_section_mm2 = sheet.tongue_mm * sheet.stack_mm * STACKING_FACTOR;
        let window_area_mm2 = sheet.window_area_mm2();
        let path_mm = magnetic_path_mm(&sheet);
        let mass_kg = cross_section_mm2 * path_mm * STEEL_DENSITY_G_PER_MM3 / 1000.0;
        let no_load_loss_w = mass_kg * losses.specific_loss(material, flux_density_t)?;
        Ok(Self {
            sheet,
            material: material.to_string(),
            flux_density_t,
            cross_section_mm2,
            window_area_mm2,
            mass_kg,
            no_load_loss_w,
        })
    }
}

/// Mean magnetic path length of the assembled core in millimetres.
fn magnetic_path_mm(sheet: &LaminationSheet) -> f64 {
    2.0 * (sheet.window_width_mm + sheet.window_height_mm) + 4.0 * sheet.tongue_mm
}
