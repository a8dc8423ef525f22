use super::{CatalogError, display_path};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One conductor gauge from the wire catalog.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WireEntry {
    /// Gauge designation, e.g. `AWG24` or `0.5mm`.
    pub gauge: String,
    /// Bare conductor diameter in millimetres.
    pub diameter_mm: f64,
    /// Conducting cross-section in square millimetres.
    pub area_mm2: f64,
    /// DC resistance in ohms per kilometre at 20 °C.
    pub resistance_ohm_per_km: f64,
    /// Conductor material, e.g. `copper`.
    pub material: String,
}

/// The read-only wire catalog, sorted by cross-section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireTable {
    entries: Vec<WireEntry>,
}

impl WireTable {
    /// Loads the catalog from a CSV file with a header row matching
    /// [`WireEntry`]'s field names.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| CatalogError::Csv {
            path: display_path(path),
            source: e,
        })?;

        let mut entries = Vec::new();
        for (row, record) in reader.deserialize().enumerate() {
            let entry: WireEntry = record.map_err(|e| CatalogError::Csv {
                path: display_path(path),
                source: e,
            })?;
            validate_entry(&entry).map_err(|reason| CatalogError::MalformedEntry {
                path: display_path(path),
                entry: row + 1,
                reason,
            })?;
            entries.push(entry);
        }
        if entries.is_empty() {
            return Err(CatalogError::Empty {
                path: display_path(path),
            });
        }

        info!(entries = entries.len(), path = %path.display(), "Loaded wire catalog.");
        Ok(Self::from_entries(entries))
    }

    /// Builds a table from already-validated entries (tests, embedding).
    pub fn from_entries(mut entries: Vec<WireEntry>) -> Self {
        entries.sort_by(|a, b| a.area_mm2.total_cmp(&b.area_mm2));
        Self { entries }
    }

    pub fn entries(&self) -> &[WireEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry whose cross-section lies inside the closed interval
    /// `[min_mm2, max_mm2]`.
    pub fn with_area_between(&self, min_mm2: f64, max_mm2: f64) -> Vec<&WireEntry> {
        self.entries
            .iter()
            .filter(|e| e.area_mm2 >= min_mm2 && e.area_mm2 <= max_mm2)
            .collect()
    }
}

fn validate_entry(entry: &WireEntry) -> Result<(), String> {
    if entry.gauge.is_empty() {
        return Err("empty gauge name".to_string());
    }
    if !(entry.diameter_mm > 0.0) {
        return Err(format!("non-positive diameter {}", entry.diameter_mm));
    }
    if !(entry.area_mm2 > 0.0) {
        return Err(format!("non-positive cross-section {}", entry.area_mm2));
    }
    if !(entry.resistance_ohm_per_km > 0.0) {
        return Err(format!(
            "non-positive resistance {}",
            entry.resistance_ohm_per_km
        ));
    }
    Ok(())
}
