// =============================================================================
// PERSISTENCE.RS — Level save records
//
// A `SaveRecord` is the flat, serialisable snapshot of a `LevelGridModel`.
// Piece slots are stored as asset paths; loading hands them back as
// placement requests because only the host can instantiate assets.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::cells;
use crate::level::{check_dimensions, AssetPath, LevelGridModel, TileOffset};

/// Level ID written into records that were never assigned one.
pub const UNASSIGNED_LEVEL_ID: i32 = -1;

/// On-disk form of one level.
///
/// Field names are part of the file format. Missing fields fall back to the
/// default record's values; arrays shorter or longer than `columns * rows`
/// are fitted when the record is turned back into a model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveRecord {
    #[serde(rename = "levelId")]
    pub level_id: i32,
    /// Total number of columns.
    #[serde(rename = "col")]
    pub columns: i32,
    /// Total number of rows.
    #[serde(rename = "row")]
    pub rows: i32,
    #[serde(rename = "walkArea")]
    pub walk_area: Vec<i32>,
    #[serde(rename = "paths")]
    pub piece_asset_paths: Vec<Option<String>>,
    pub offsets: Vec<Option<TileOffset>>,
}

impl SaveRecord {
    /// Blank record for a `columns` x `rows` level.
    pub fn with_size(columns: i32, rows: i32) -> Self {
        let len = columns.max(0) as usize * rows.max(0) as usize;
        Self {
            level_id: UNASSIGNED_LEVEL_ID,
            columns,
            rows,
            walk_area: vec![0; len],
            piece_asset_paths: vec![None; len],
            offsets: vec![None; len],
        }
    }
}

impl Default for SaveRecord {
    /// The minimal 2x2 level used when no save exists yet.
    fn default() -> Self {
        Self::with_size(2, 2)
    }
}

/// A piece the host must instantiate after loading a level.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementRequest {
    pub col: i32,
    pub row: i32,
    pub asset_path: String,
    pub offset: Option<TileOffset>,
}

impl PlacementRequest {
    /// The asset path split into category and name, if well formed.
    pub fn asset(&self) -> Option<AssetPath> {
        AssetPath::parse(&self.asset_path)
    }
}

// =============================================================================
// MODEL <-> RECORD
// =============================================================================

/// Snapshot `model` in storage order.
pub fn to_record(model: &LevelGridModel, level_id: i32) -> SaveRecord {
    SaveRecord {
        level_id,
        columns: model.width(),
        rows: model.height(),
        walk_area: model.walk_area().iter().map(|&w| i32::from(w)).collect(),
        piece_asset_paths: model
            .pieces()
            .iter()
            .map(|p| p.as_ref().map(|p| p.asset.to_string()))
            .collect(),
        offsets: model.offsets().to_vec(),
    }
}

/// Pad or cut `values` to exactly `len` entries.
fn fit<T: Clone>(mut values: Vec<T>, len: usize, fill: T, field: &str) -> Vec<T> {
    if values.len() != len {
        log::warn!(
            "save record field '{field}' has {} entries, expected {len}; fitting",
            values.len()
        );
        values.resize(len, fill);
    }
    values
}

/// Rebuild a model from `record`.
///
/// Every piece slot of the returned model is empty; the pieces come back as
/// placement requests in storage order. Empty path strings count as no piece.
pub fn from_record(record: &SaveRecord) -> Result<(LevelGridModel, Vec<PlacementRequest>)> {
    let (width, height) = (record.columns, record.rows);
    let len = check_dimensions(width, height)?;

    let walk_area: Vec<u8> = fit(record.walk_area.clone(), len, 0, "walkArea")
        .into_iter()
        .map(|w| u8::from(w != 0))
        .collect();
    let offsets = fit(record.offsets.clone(), len, None, "offsets");
    let paths = fit(record.piece_asset_paths.clone(), len, None, "paths");

    let requests = cells(width, height)
        .zip(paths)
        .zip(&offsets)
        .filter_map(|(((col, row), path), offset)| {
            let asset_path = path.filter(|p| !p.is_empty())?;
            Some(PlacementRequest {
                col,
                row,
                asset_path,
                offset: *offset,
            })
        })
        .collect();

    let model = LevelGridModel::from_parts(width, height, walk_area, offsets)?;
    Ok((model, requests))
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encode `record` as compact JSON.
pub fn serialize(record: &SaveRecord) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(record)?)
}

/// Decode a record.
///
/// Empty (or whitespace-only) input means no save exists yet and yields the
/// default record. Anything else that is not a valid record is a
/// [`crate::LevelError::Parse`].
pub fn deserialize(bytes: &[u8]) -> Result<SaveRecord> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(SaveRecord::default());
    }
    Ok(serde_json::from_slice(bytes)?)
}
