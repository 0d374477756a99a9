// =============================================================================
// EDITOR.RS — Editing session driven by the host's pointer events
//
// The host owns the scene objects and the UI. This session turns a pointer
// press at a world position into exactly one model mutation, chosen by the
// current `EditMode`, and reports what the host has to do in response
// (spawn, destroy or move an object).
// =============================================================================

use std::sync::mpsc::Receiver;

use crate::error::Result;
use crate::hex::{world_to_grid, HexMetrics, OffsetCoordinate, WorldPosition};
use crate::level::{AssetPath, DroppedPiece, LevelGridModel, PieceHandle, PieceRef};

// ── EditMode ──────────────────────────────────────────────────────────────────

/// What a pointer press does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EditMode {
    /// Presses are left to the host's camera tool.
    View,
    /// Primary press puts the selected palette asset on a cell.
    Paint,
    /// Primary press picks a piece up, the next one drops it elsewhere.
    Edit,
    /// Primary press removes a piece.
    Erase,
    /// Primary press marks a cell walkable, secondary unmarks it.
    WalkArea,
}

/// Cursor tool the host should activate for a mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToolCursor {
    /// The host's own pan/orbit tool.
    Pan,
    /// No host tool; presses go to the session.
    None,
}

impl EditMode {
    pub const ALL: [EditMode; 5] = [
        EditMode::View,
        EditMode::Paint,
        EditMode::Edit,
        EditMode::Erase,
        EditMode::WalkArea,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditMode::View => "View",
            EditMode::Paint => "Paint",
            EditMode::Edit => "Edit",
            EditMode::Erase => "Erase",
            EditMode::WalkArea => "Walk Area",
        }
    }

    pub fn cursor(self) -> ToolCursor {
        match self {
            EditMode::View => ToolCursor::Pan,
            EditMode::Paint | EditMode::Edit | EditMode::Erase | EditMode::WalkArea => ToolCursor::None,
        }
    }

    /// The walkable-area overlay is only drawn while it is being edited.
    pub fn shows_walk_area(self) -> bool {
        self == EditMode::WalkArea
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Result of one pointer press.
#[derive(Clone, Debug, PartialEq)]
pub enum EditOutcome {
    /// Nothing changed.
    Ignored,
    /// The host should spawn `asset` at `position` and register it with
    /// [`LevelEditor::place`]. `replaced` was already removed from the model
    /// and must be destroyed. Any tile offset on the cell is cleared.
    Spawn {
        col: i32,
        row: i32,
        asset: AssetPath,
        position: WorldPosition,
        replaced: Option<PieceRef>,
    },
    /// The piece and its tile offset were removed from the model; destroy
    /// its object.
    Despawn { col: i32, row: i32, piece: PieceRef },
    WalkableChanged { col: i32, row: i32, walkable: bool },
    /// A piece is now held and will move on the next primary press.
    PickedUp { col: i32, row: i32, handle: PieceHandle },
    /// The held piece moved; put its object at `position`.
    Moved {
        from: OffsetCoordinate,
        to: OffsetCoordinate,
        handle: PieceHandle,
        position: WorldPosition,
    },
    /// The held piece was let go without moving.
    Released { handle: PieceHandle },
}

// ── LevelEditor ───────────────────────────────────────────────────────────────

pub struct LevelEditor {
    model: LevelGridModel,
    metrics: HexMetrics,
    mode: EditMode,
    palette: Receiver<AssetPath>,
    selection: Option<AssetPath>,
    held: Option<OffsetCoordinate>,
}

impl LevelEditor {
    /// Start a session on `model`. Palette selections arrive on `palette`;
    /// the latest one received is what `Paint` places.
    pub fn new(model: LevelGridModel, metrics: HexMetrics, palette: Receiver<AssetPath>) -> Self {
        Self {
            model,
            metrics,
            mode: EditMode::View,
            palette,
            selection: None,
            held: None,
        }
    }

    pub fn model(&self) -> &LevelGridModel {
        &self.model
    }

    pub fn into_model(self) -> LevelGridModel {
        self.model
    }

    pub fn metrics(&self) -> &HexMetrics {
        &self.metrics
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Cell of the piece currently held in `Edit` mode.
    pub fn held(&self) -> Option<OffsetCoordinate> {
        self.held
    }

    /// Latest palette selection, after draining the channel.
    pub fn selection(&mut self) -> Option<&AssetPath> {
        self.drain_palette();
        self.selection.as_ref()
    }

    fn drain_palette(&mut self) {
        // A disconnected palette keeps the last selection.
        while let Ok(asset) = self.palette.try_recv() {
            self.selection = Some(asset);
        }
    }

    /// Switch modes. Returns false when `to` is already active.
    ///
    /// Leaving `Edit` lets go of any held piece; it stays where it was.
    pub fn set_mode(&mut self, to: EditMode) -> bool {
        let from = self.mode;
        match (from, to) {
            (a, b) if a == b => return false,
            (EditMode::Edit, _) => self.held = None,
            (_, _) => {}
        }
        log::debug!("edit mode {} -> {}", from.label(), to.label());
        self.mode = to;
        true
    }

    /// Register an object the host spawned in answer to a `Spawn` outcome.
    pub fn place(&mut self, col: i32, row: i32, piece: PieceRef) -> Result<Option<PieceRef>> {
        self.model.set_piece(col, row, piece)
    }

    /// Resize the board. Dropped pieces must be destroyed by the host.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<Vec<DroppedPiece>> {
        let dropped = self.model.resize(width, height)?;
        if let Some(held) = self.held {
            if !self.model.in_bounds(held.col, held.row) {
                self.held = None;
            }
        }
        Ok(dropped)
    }

    /// Apply a pointer press at `pos` according to the current mode.
    ///
    /// Presses that snap outside the board are ignored.
    pub fn handle_pointer(&mut self, pos: WorldPosition, button: PointerButton) -> Result<EditOutcome> {
        self.drain_palette();

        let cell = world_to_grid(pos, &self.metrics);
        if !self.model.in_bounds(cell.col, cell.row) {
            return Ok(EditOutcome::Ignored);
        }
        let (col, row) = (cell.col, cell.row);

        match (self.mode, button) {
            (EditMode::View, _) => Ok(EditOutcome::Ignored),
            (EditMode::Paint, PointerButton::Primary) => self.paint(col, row),
            (EditMode::Paint, PointerButton::Secondary) => Ok(EditOutcome::Ignored),
            (EditMode::Erase, PointerButton::Primary) => self.erase(col, row),
            (EditMode::Erase, PointerButton::Secondary) => Ok(EditOutcome::Ignored),
            (EditMode::WalkArea, button) => {
                let walkable = button == PointerButton::Primary;
                self.model.set_walkable(col, row, walkable)?;
                Ok(EditOutcome::WalkableChanged { col, row, walkable })
            }
            (EditMode::Edit, PointerButton::Primary) => self.edit(cell),
            (EditMode::Edit, PointerButton::Secondary) => self.release(),
        }
    }

    fn paint(&mut self, col: i32, row: i32) -> Result<EditOutcome> {
        let Some(asset) = self.selection.clone() else {
            return Ok(EditOutcome::Ignored);
        };
        // A fresh piece starts on the cell centre.
        self.model.clear_offset(col, row)?;
        let position = self.model.piece_world_position(col, row, &self.metrics)?;
        let replaced = self.model.clear_piece(col, row)?;
        Ok(EditOutcome::Spawn { col, row, asset, position, replaced })
    }

    fn erase(&mut self, col: i32, row: i32) -> Result<EditOutcome> {
        Ok(match self.model.clear_piece(col, row)? {
            Some(piece) => {
                self.model.clear_offset(col, row)?;
                EditOutcome::Despawn { col, row, piece }
            }
            None => EditOutcome::Ignored,
        })
    }

    fn edit(&mut self, target: OffsetCoordinate) -> Result<EditOutcome> {
        let Some(from) = self.held else {
            return Ok(match self.model.get_piece(target.col, target.row)? {
                Some(piece) => {
                    let handle = piece.handle;
                    self.held = Some(target);
                    EditOutcome::PickedUp { col: target.col, row: target.row, handle }
                }
                None => EditOutcome::Ignored,
            });
        };

        if from == target {
            return self.release();
        }
        if self.model.get_piece(target.col, target.row)?.is_some() {
            return Ok(EditOutcome::Ignored);
        }

        let Some(piece) = self.model.clear_piece(from.col, from.row)? else {
            self.held = None;
            return Ok(EditOutcome::Ignored);
        };
        let handle = piece.handle;
        self.model.set_piece(target.col, target.row, piece)?;
        // The tile nudge travels with the piece and replaces whatever the
        // target cell had.
        match self.model.clear_offset(from.col, from.row)? {
            Some(offset) => self.model.set_offset(target.col, target.row, offset.x, offset.z)?,
            None => {
                self.model.clear_offset(target.col, target.row)?;
            }
        }
        self.held = None;

        let position = self.model.piece_world_position(target.col, target.row, &self.metrics)?;
        Ok(EditOutcome::Moved { from, to: target, handle, position })
    }

    fn release(&mut self) -> Result<EditOutcome> {
        let Some(cell) = self.held.take() else {
            return Ok(EditOutcome::Ignored);
        };
        Ok(match self.model.get_piece(cell.col, cell.row)? {
            Some(piece) => EditOutcome::Released { handle: piece.handle },
            None => EditOutcome::Ignored,
        })
    }
}
