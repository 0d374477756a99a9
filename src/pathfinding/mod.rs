mod astar;
mod dijkstra;

pub mod prelude {
    pub use crate::pathfinding::astar::*;
    pub use crate::pathfinding::dijkstra::*;
}

use crate::hex::{axial_to_offset, neighbors, offset_to_axial, OffsetCoordinate};
use crate::level::LevelGridModel;

/// In-bounds walkable cells adjacent to `cell`.
pub(crate) fn walkable_neighbors(
    model: &LevelGridModel,
    cell: OffsetCoordinate,
) -> impl Iterator<Item = OffsetCoordinate> + '_ {
    neighbors(offset_to_axial(cell.col, cell.row))
        .into_iter()
        .map(axial_to_offset)
        .filter(|n| model.is_walkable(n.col, n.row).unwrap_or(false))
}
