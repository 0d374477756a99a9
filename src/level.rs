use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LevelError, Result};
use crate::grid::{cells, coords_from_index, in_bounds, linear_index};
use crate::hex::{grid_to_world, world_to_grid, HexMetrics, WorldPosition};

// ── Pieces ────────────────────────────────────────────────────────────────────

/// Opaque ID of a placed object owned by the host editor.
///
/// The model only records the relation; it never creates or destroys the
/// object behind it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceHandle(pub u64);

/// Resource path of a piece prefab, `"<category>/<base_name>"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssetPath {
    pub category: String,
    pub base_name: String,
}

impl AssetPath {
    /// Separator between the placement prefix and the asset name in a
    /// runtime object name, e.g. `"3,1|Rock1"`.
    pub const RUNTIME_NAME_SEPARATOR: char = '|';

    pub fn new(category: impl Into<String>, base_name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            base_name: base_name.into(),
        }
    }

    /// Parse `"Category/Name"`. Returns `None` when either half is empty.
    pub fn parse(path: &str) -> Option<Self> {
        let (category, base_name) = path.split_once('/')?;
        if category.is_empty() || base_name.is_empty() {
            return None;
        }
        Some(Self::new(category, base_name))
    }

    /// Recover the asset path from the name a placed object was given by
    /// [`AssetPath::runtime_name`]. Names without a placement prefix are
    /// taken as-is.
    pub fn from_runtime_name(category: impl Into<String>, runtime_name: &str) -> Self {
        let base_name = match runtime_name.split_once(Self::RUNTIME_NAME_SEPARATOR) {
            Some((_, base)) => base,
            None => runtime_name,
        };
        Self::new(category, base_name)
    }

    /// Name for an object placed at `(col, row)`: `"col,row|base_name"`.
    pub fn runtime_name(&self, col: i32, row: i32) -> String {
        format!("{col},{row}{}{}", Self::RUNTIME_NAME_SEPARATOR, self.base_name)
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.base_name)
    }
}

/// A placed object: the host's handle plus the asset it was spawned from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceRef {
    pub handle: PieceHandle,
    pub asset: AssetPath,
}

impl PieceRef {
    pub fn new(handle: PieceHandle, asset: AssetPath) -> Self {
        Self { handle, asset }
    }
}

/// Visual nudge applied on top of a cell's centre.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TileOffset {
    pub x: f32,
    pub z: f32,
}

impl TileOffset {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }
}

/// A piece whose cell fell outside the board during a resize. The host
/// must destroy the object behind `piece.handle`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroppedPiece {
    pub col: i32,
    pub row: i32,
    pub piece: PieceRef,
}

// ── LevelGridModel ────────────────────────────────────────────────────────────

/// Per-cell state of one level.
///
/// `pieces`, `walk_area` and `offsets` always hold exactly
/// `width * height` entries, all addressed by [`linear_index`].
#[derive(Clone, Debug, PartialEq)]
pub struct LevelGridModel {
    width: i32,
    height: i32,
    pieces: Vec<Option<PieceRef>>,
    walk_area: Vec<u8>,
    offsets: Vec<Option<TileOffset>>,
}

/// Cell count of a `width` x `height` board.
///
/// Both sides must be positive and the product must fit both `i32` (the
/// type [`linear_index`] works in) and [`LevelGridModel::MAX_CELLS`].
pub(crate) fn check_dimensions(width: i32, height: i32) -> Result<usize> {
    if width <= 0 || height <= 0 {
        return Err(LevelError::InvalidDimension { width, height });
    }
    match width.checked_mul(height) {
        Some(cells) if cells as usize <= LevelGridModel::MAX_CELLS => Ok(cells as usize),
        _ => Err(LevelError::InvalidDimension { width, height }),
    }
}

impl LevelGridModel {
    /// Largest board accepted, 2048 x 2048 cells.
    pub const MAX_CELLS: usize = 1 << 22;

    /// Empty board: no pieces, nothing walkable, no offsets.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let len = check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            pieces: vec![None; len],
            walk_area: vec![0; len],
            offsets: vec![None; len],
        })
    }

    /// Board rebuilt from saved walk area and offsets, with every piece slot
    /// empty. Both slices must already hold `width * height` entries.
    pub(crate) fn from_parts(
        width: i32,
        height: i32,
        walk_area: Vec<u8>,
        offsets: Vec<Option<TileOffset>>,
    ) -> Result<Self> {
        let len = check_dimensions(width, height)?;
        debug_assert_eq!(walk_area.len(), len);
        debug_assert_eq!(offsets.len(), len);
        Ok(Self {
            width,
            height,
            pieces: vec![None; len],
            walk_area,
            offsets,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells on the board.
    pub fn len(&self) -> usize {
        self.walk_area.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walk_area.is_empty()
    }

    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        in_bounds(col, row, self.width, self.height)
    }

    pub fn pieces(&self) -> &[Option<PieceRef>] {
        &self.pieces
    }

    pub fn walk_area(&self) -> &[u8] {
        &self.walk_area
    }

    pub fn offsets(&self) -> &[Option<TileOffset>] {
        &self.offsets
    }

    fn index(&self, col: i32, row: i32) -> Result<usize> {
        if !self.in_bounds(col, row) {
            return Err(LevelError::OutOfBounds {
                col,
                row,
                width: self.width,
                height: self.height,
            });
        }
        Ok(linear_index(col, row, self.width) as usize)
    }

    // ── Resize ────────────────────────────────────────────────────────────────

    /// Change the board size, keeping every cell present in both the old and
    /// the new bounds at the same `(col, row)`.
    ///
    /// Pieces on cells that fall off the board are returned for the caller
    /// to destroy. On error nothing is changed.
    pub fn resize(&mut self, new_width: i32, new_height: i32) -> Result<Vec<DroppedPiece>> {
        let len = check_dimensions(new_width, new_height)?;

        let mut pieces = vec![None; len];
        let mut walk_area = vec![0; len];
        let mut offsets = vec![None; len];
        let mut dropped = Vec::new();

        let old_width = self.width;
        let old_cells = std::mem::take(&mut self.pieces)
            .into_iter()
            .zip(std::mem::take(&mut self.walk_area))
            .zip(std::mem::take(&mut self.offsets))
            .enumerate();

        for (old_index, ((piece, walk), offset)) in old_cells {
            let (col, row) = coords_from_index(old_index as i32, old_width);
            if in_bounds(col, row, new_width, new_height) {
                // Destination index uses the new width; the source index above
                // used the old one.
                let i = linear_index(col, row, new_width) as usize;
                pieces[i] = piece;
                walk_area[i] = walk;
                offsets[i] = offset;
            } else if let Some(piece) = piece {
                dropped.push(DroppedPiece { col, row, piece });
            }
        }

        if !dropped.is_empty() {
            log::debug!(
                "resize {}x{} -> {}x{} dropped {} piece(s)",
                self.width,
                self.height,
                new_width,
                new_height,
                dropped.len()
            );
        }

        self.width = new_width;
        self.height = new_height;
        self.pieces = pieces;
        self.walk_area = walk_area;
        self.offsets = offsets;
        Ok(dropped)
    }

    // ── Pieces ────────────────────────────────────────────────────────────────

    /// Put `piece` on `(col, row)`, returning whatever was there before.
    pub fn set_piece(&mut self, col: i32, row: i32, piece: PieceRef) -> Result<Option<PieceRef>> {
        let i = self.index(col, row)?;
        Ok(self.pieces[i].replace(piece))
    }

    pub fn get_piece(&self, col: i32, row: i32) -> Result<Option<&PieceRef>> {
        let i = self.index(col, row)?;
        Ok(self.pieces[i].as_ref())
    }

    /// Empty `(col, row)`, returning the piece that was removed.
    pub fn clear_piece(&mut self, col: i32, row: i32) -> Result<Option<PieceRef>> {
        let i = self.index(col, row)?;
        Ok(self.pieces[i].take())
    }

    /// Cells that currently hold a piece, in storage order.
    pub fn placed(&self) -> impl Iterator<Item = (i32, i32, &PieceRef)> + '_ {
        cells(self.width, self.height)
            .zip(&self.pieces)
            .filter_map(|((col, row), piece)| piece.as_ref().map(|p| (col, row, p)))
    }

    // ── Walk area ─────────────────────────────────────────────────────────────

    pub fn set_walkable(&mut self, col: i32, row: i32, walkable: bool) -> Result<()> {
        let i = self.index(col, row)?;
        self.walk_area[i] = u8::from(walkable);
        Ok(())
    }

    pub fn is_walkable(&self, col: i32, row: i32) -> Result<bool> {
        let i = self.index(col, row)?;
        Ok(self.walk_area[i] != 0)
    }

    // ── Offsets ───────────────────────────────────────────────────────────────

    /// Nudge the tile on `(col, row)` by `(dx, dz)`.
    ///
    /// Non-finite values are rejected: JSON cannot hold them, so the level
    /// could be saved but never loaded again.
    pub fn set_offset(&mut self, col: i32, row: i32, dx: f32, dz: f32) -> Result<()> {
        let i = self.index(col, row)?;
        if !dx.is_finite() || !dz.is_finite() {
            return Err(LevelError::InvalidOffset { dx, dz });
        }
        self.offsets[i] = Some(TileOffset::new(dx, dz));
        Ok(())
    }

    pub fn clear_offset(&mut self, col: i32, row: i32) -> Result<Option<TileOffset>> {
        let i = self.index(col, row)?;
        Ok(self.offsets[i].take())
    }

    /// `None` means the tile sits exactly on its cell centre.
    pub fn get_offset(&self, col: i32, row: i32) -> Result<Option<TileOffset>> {
        let i = self.index(col, row)?;
        Ok(self.offsets[i])
    }

    // ── World space ───────────────────────────────────────────────────────────

    /// Returns true if `pos` snaps to a cell on this board.
    pub fn contains_world(&self, pos: WorldPosition, metrics: &HexMetrics) -> bool {
        let cell = world_to_grid(pos, metrics);
        self.in_bounds(cell.col, cell.row)
    }

    /// Where the object on `(col, row)` should stand: the cell centre plus
    /// the tile's offset, if any.
    pub fn piece_world_position(&self, col: i32, row: i32, metrics: &HexMetrics) -> Result<WorldPosition> {
        let offset = self.get_offset(col, row)?.unwrap_or_default();
        let centre = grid_to_world(col, row, metrics);
        Ok(WorldPosition::new(centre.x + offset.x, centre.z + offset.z))
    }
}
