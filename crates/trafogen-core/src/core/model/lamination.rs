use crate::core::catalog::{SheetFamily, SheetShape};

/// Label used for sheets built from the custom geometry ranges rather than a
/// catalog entry.
pub const CUSTOM_LABEL: &str = "custom";

/// Window width of a custom sheet as a fraction of its tongue width, and the
/// corresponding window height fraction. Classic scrapless E-I proportions.
const CUSTOM_WINDOW_WIDTH_RATIO: f64 = 0.5;
const CUSTOM_WINDOW_HEIGHT_RATIO: f64 = 1.5;

/// The first-stage candidate: one fully specified lamination geometry,
/// either a standard catalog entry or a custom-scaled E-I sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct LaminationSheet {
    pub label: String,
    pub family: SheetFamily,
    pub tongue_mm: f64,
    pub stack_mm: f64,
    pub window_width_mm: f64,
    pub window_height_mm: f64,
    /// True when the geometry came from the standard catalog.
    pub standard: bool,
}

impl LaminationSheet {
    /// A sheet taken verbatim from the standard catalog.
    pub fn from_shape(shape: &SheetShape) -> Self {
        Self {
            label: shape.name.clone(),
            family: shape.family,
            tongue_mm: shape.tongue_mm,
            stack_mm: shape.stack_mm,
            window_width_mm: shape.window_width_mm,
            window_height_mm: shape.window_height_mm,
            standard: true,
        }
    }

    /// A custom E-I sheet scaled from the tongue and stack range cursors.
    pub fn custom(tongue_mm: f64, stack_mm: f64) -> Self {
        Self {
            label: CUSTOM_LABEL.to_string(),
            family: SheetFamily::Ei,
            tongue_mm,
            stack_mm,
            window_width_mm: tongue_mm * CUSTOM_WINDOW_WIDTH_RATIO,
            window_height_mm: tongue_mm * CUSTOM_WINDOW_HEIGHT_RATIO,
            standard: false,
        }
    }

    /// Winding window area in mm².
    pub fn window_area_mm2(&self) -> f64 {
        self.window_width_mm * self.window_height_mm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_sheet_derives_its_window_from_the_tongue() {
        let sheet = LaminationSheet::custom(20.0, 25.0);
        assert_eq!(sheet.label, CUSTOM_LABEL);
        assert_eq!(sheet.family, SheetFamily::Ei);
        assert!(!sheet.standard);
        assert_eq!(sheet.window_width_mm, 10.0);
        assert_eq!(sheet.window_height_mm, 30.0);
        assert_eq!(sheet.window_area_mm2(), 300.0);
    }

    #[test]
    fn standard_sheet_copies_the_catalog_geometry() {
        let shape = SheetShape {
            name: "EI-48".into(),
            family: SheetFamily::Ei,
            tongue_mm: 16.0,
            stack_mm: 16.0,
            window_width_mm: 8.0,
            window_height_mm: 24.0,
        };
        let sheet = LaminationSheet::from_shape(&shape);
        assert!(sheet.standard);
        assert_eq!(sheet.label, "EI-48");
        assert_eq!(sheet.window_area_mm2(), 192.0);
    }
}
