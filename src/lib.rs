pub mod config;
pub mod editor;
pub mod error;
pub mod grid;
pub mod hex;
pub mod level;
pub mod pathfinding;
pub mod persistence;
pub mod store;

pub use error::{LevelError, Result};

/// Everything a host editor usually needs in one import.
pub mod prelude {
    pub use crate::config::EditorConfig;
    pub use crate::editor::{EditMode, EditOutcome, LevelEditor, PointerButton, ToolCursor};
    pub use crate::error::{LevelError, Result};
    pub use crate::hex::{
        axial_to_offset, axial_to_world, distance, grid_to_world, offset_to_axial, world_to_axial,
        world_to_grid, AxialCoordinate, HexMetrics, OffsetCoordinate, WorldPosition,
    };
    pub use crate::level::{AssetPath, DroppedPiece, LevelGridModel, PieceHandle, PieceRef, TileOffset};
    pub use crate::persistence::{
        deserialize, from_record, serialize, to_record, PlacementRequest, SaveRecord,
    };
    pub use crate::store::LevelStore;
}
