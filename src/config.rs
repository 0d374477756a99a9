use std::ops::RangeInclusive;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::hex::HexMetrics;

// ── EditorConfig ──────────────────────────────────────────────────────────────

/// Settings a host hands to the level core.
///
/// Every field has a default, so a config file only needs to list what it
/// overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Directory holding one save file per level.
    pub save_dir: PathBuf,
    /// Extension of save files, without the dot.
    pub extension: String,
    /// Cell size used for world/grid conversion.
    pub metrics: HexMetrics,
    /// Initial column count offered for new levels.
    pub new_level_columns: i32,
    /// Initial row count offered for new levels.
    pub new_level_rows: i32,
}

impl EditorConfig {
    /// Allowed column/row counts for a freshly created level.
    pub const NEW_LEVEL_SIZE: RangeInclusive<i32> = 2..=128;

    /// Deserialise a config from a JSON string.
    ///
    /// Returns a `serde_json::Error` if the input is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Clamp a requested new-level size into [`Self::NEW_LEVEL_SIZE`].
    pub fn clamp_new_level_size(columns: i32, rows: i32) -> (i32, i32) {
        let (lo, hi) = (*Self::NEW_LEVEL_SIZE.start(), *Self::NEW_LEVEL_SIZE.end());
        (columns.clamp(lo, hi), rows.clamp(lo, hi))
    }

    /// The configured new-level size, clamped.
    pub fn new_level_size(&self) -> (i32, i32) {
        Self::clamp_new_level_size(self.new_level_columns, self.new_level_rows)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("SaveData"),
            extension: "txt".to_string(),
            metrics: HexMetrics::default(),
            new_level_columns: 10,
            new_level_rows: 10,
        }
    }
}
