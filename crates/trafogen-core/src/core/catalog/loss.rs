use super::{CatalogError, display_path};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// One point of a specific-loss curve, as stored in the CSV catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LossPoint {
    pub material: String,
    pub flux_density_t: f64,
    pub watts_per_kg: f64,
}

/// Specific-loss curves per core material.
///
/// Queries interpolate linearly between curve points and clamp at the curve
/// ends; extrapolation is not attempted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LossTable {
    curves: HashMap<String, Vec<(f64, f64)>>,
}

impl LossTable {
    /// Loads the table from a CSV file with a header row matching
    /// [`LossPoint`]'s field names.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| CatalogError::Csv {
            path: display_path(path),
            source: e,
        })?;

        let mut points = Vec::new();
        for (row, record) in reader.deserialize().enumerate() {
            let point: LossPoint = record.map_err(|e| CatalogError::Csv {
                path: display_path(path),
                source: e,
            })?;
            if !(point.flux_density_t > 0.0) || !(point.watts_per_kg > 0.0) {
                return Err(CatalogError::MalformedEntry {
                    path: display_path(path),
                    entry: row + 1,
                    reason: format!(
                        "non-positive curve point ({} T, {} W/kg)",
                        point.flux_density_t, point.watts_per_kg
                    ),
                });
            }
            points.push(point);
        }
        if points.is_empty() {
            return Err(CatalogError::Empty {
                path: display_path(path),
            });
        }

        let table = Self::from_points(points);
        info!(materials = table.curves.len(), path = %path.display(), "Loaded loss catalog.");
        Ok(table)
    }

    pub fn from_points(points: Vec<LossPoint>) -> Self {
        let mut curves: HashMap<String, Vec<(f64, f64)>> = HashMap::new();
        for point in points {
            curves
                .entry(point.material)
                .or_default()
                .push((point.flux_density_t, point.watts_per_kg));
        }
        for curve in curves.values_mut() {
            curve.sort_by(|a, b| a.0.total_cmp(&b.0));
        }
        Self { curves }
    }

    pub fn contains_material(&self, material: &str) -> bool {
        self.curves.contains_key(material)
    }

    pub fn materials(&self) -> impl Iterator<Item = &str> {
        self.curves.keys().map(String::as_str)
    }

    /// Specific loss in W/kg for `material` at the given flux density,
    /// linearly interpolated and clamped to the curve ends.
    pub fn specific_loss(&self, material: &str, flux_density_t: f64) -> Result<f64, CatalogError> {
        let curve = self
            .curves
            .get(material)
            .ok_or_else(|| CatalogError::UnknownMaterial(material.to_string()))?;

        let first = curve[0];
        let last = curve[curve.len() - 1];
        if flux_density_t <= first.0 {
            return Ok(first.1);
        }
        if flux_density_t >= last.0 {
            return Ok(last.1);
        }
        for window in curve.windows(2) {
            let (b0, w0) = window[0];
            let (b1, w1) = window[1];
            if flux_density_t <= b1 {
                let t = (flux_density_t - b0) / (b1 - b0);
                return Ok(w0 + t * (w1 - w0));
            }
        }
        Ok(last.1)
    }
}
