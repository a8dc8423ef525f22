use super::{CatalogError, display_path};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::info;

/// The construction family of a lamination shape.
///
/// The family decides which wiring-style variants apply downstream: only
/// double-window families accept a split-limb winding arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SheetFamily {
    /// Scrapless E-I pairs, single window per side.
    Ei,
    /// U-I pairs with two full windows.
    Ui,
    /// Wound toroidal cores.
    Toroidal,
}

impl SheetFamily {
    /// Whether designs on this family may split the windings across two limbs.
    pub fn supports_split_limb(self) -> bool {
        matches!(self, SheetFamily::Ui)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SheetFamily::Ei => "EI",
            SheetFamily::Ui => "UI",
            SheetFamily::Toroidal => "toroidal",
        }
    }
}

impl fmt::Display for SheetFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One standard sheet shape from the lamination catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SheetShape {
    pub name: String,
    pub family: SheetFamily,
    /// Width of the centre limb (tongue) in millimetres.
    pub tongue_mm: f64,
    /// Stack height the standard assembly is punched for, in millimetres.
    pub stack_mm: f64,
    pub window_width_mm: f64,
    pub window_height_mm: f64,
}

#[derive(Debug, Deserialize)]
struct RawShapeFile {
    shapes: Vec<SheetShape>,
}

/// The read-only catalog of standard lamination shapes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaminationTable {
    shapes: Vec<SheetShape>,
}

impl LaminationTable {
    /// Loads the catalog from a TOML file containing a `shapes` array.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: display_path(path),
            source: e,
        })?;
        let raw: RawShapeFile = toml::from_str(&content).map_err(|e| CatalogError::Toml {
            path: display_path(path),
            source: e,
        })?;

        if raw.shapes.is_empty() {
            return Err(CatalogError::Empty {
                path: display_path(path),
            });
        }
        for (index, shape) in raw.shapes.iter().enumerate() {
            validate_shape(shape).map_err(|reason| CatalogError::MalformedEntry {
                path: display_path(path),
                entry: index + 1,
                reason,
            })?;
        }

        info!(shapes = raw.shapes.len(), path = %path.display(), "Loaded lamination catalog.");
        Ok(Self { shapes: raw.shapes })
    }

    pub fn from_shapes(shapes: Vec<SheetShape>) -> Self {
        Self { shapes }
    }

    pub fn shapes(&self) -> &[SheetShape] {
        &self.shapes
    }

    pub fn shape(&self, index: usize) -> &SheetShape {
        &self.shapes[index]
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

fn validate_shape(shape: &SheetShape) -> Result<(), String> {
    if shape.name.is_empty() {
        return Err("empty shape name".to_string());
    }
    for (field, value) in [
        ("tongue_mm", shape.tongue_mm),
        ("stack_mm", shape.stack_mm),
        ("window_width_mm", shape.window_width_mm),
        ("window_height_mm", shape.window_height_mm),
    ] {
        if !(value > 0.0) || !value.is_finite() {
            return Err(format!("non-positive {field} ({value})"));
        }
    }
    Ok(())
}
