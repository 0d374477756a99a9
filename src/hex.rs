// =============================================================================
// HEX.RS — Hexagonal coordinate system
//
// Three coordinate spaces meet here:
// - Offset (col, row): the "odd-r" grid coordinate used for storage indexing.
//   Odd rows are shifted half a cell to the right.
// - Axial (x, z): cube coordinates with the third axis y = -x - z derived.
// - World (x, z): continuous engine-space position on the ground plane.
//
// Cells are pointy-top hexagons sized by `HexMetrics`.
// =============================================================================

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Cell dimensions shared by every conversion between grid and world space.
///
/// `outer_radius` is the centre-to-corner distance, `inner_radius` the
/// centre-to-edge distance. For a regular hexagon
/// `inner_radius = outer_radius * √3 / 2`, but both are configurable so a host
/// can match art that was authored slightly off-regular.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexMetrics {
    pub inner_radius: f32,
    pub outer_radius: f32,
}

impl HexMetrics {
    /// Ratio between the inner and outer radius of a regular hexagon.
    pub const INNER_RATIO: f32 = 0.866_025_4;

    pub fn new(inner_radius: f32, outer_radius: f32) -> Self {
        Self { inner_radius, outer_radius }
    }

    /// Regular hexagon with the given centre-to-corner distance.
    pub fn from_outer_radius(outer_radius: f32) -> Self {
        Self {
            inner_radius: outer_radius * Self::INNER_RATIO,
            outer_radius,
        }
    }
}

impl Default for HexMetrics {
    fn default() -> Self {
        Self::from_outer_radius(1.0)
    }
}

// ── Coordinates ───────────────────────────────────────────────────────────────

/// Axial hex coordinate. The cube invariant `x + y + z == 0` holds by
/// construction because `y` is always derived.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxialCoordinate {
    pub x: i32,
    pub z: i32,
}

impl AxialCoordinate {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    #[inline]
    pub const fn y(&self) -> i32 {
        -self.x - self.z
    }

    /// Grid distance to `other` in cell steps.
    pub fn distance_to(&self, other: AxialCoordinate) -> i32 {
        distance(*self, other)
    }
}

/// Offset ("grid" / view) coordinate used to index level storage.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OffsetCoordinate {
    pub col: i32,
    pub row: i32,
}

impl OffsetCoordinate {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// Continuous position on the engine's ground plane.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPosition {
    pub x: f32,
    pub z: f32,
}

impl WorldPosition {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }
}

impl From<Vec3> for WorldPosition {
    fn from(v: Vec3) -> Self {
        Self { x: v.x, z: v.z }
    }
}

impl From<WorldPosition> for Vec3 {
    fn from(p: WorldPosition) -> Self {
        Vec3::new(p.x, 0.0, p.z)
    }
}

// =============================================================================
// OFFSET <-> AXIAL
// =============================================================================

/// Half of `row`, rounded toward negative infinity.
///
/// Rows above the origin must shift the same way rows below it do, so plain
/// `/` (which truncates toward zero) is not usable here.
#[inline]
fn half_row(row: i32) -> i32 {
    row.div_euclid(2)
}

/// Convert an offset coordinate to its axial equivalent.
#[inline]
pub fn offset_to_axial(col: i32, row: i32) -> AxialCoordinate {
    AxialCoordinate::new(col - half_row(row), row)
}

/// Convert an axial coordinate back to offset (grid) space.
#[inline]
pub fn axial_to_offset(coord: AxialCoordinate) -> OffsetCoordinate {
    OffsetCoordinate::new(coord.x + half_row(coord.z), coord.z)
}

// =============================================================================
// WORLD <-> AXIAL
// =============================================================================

/// Snap a world position to the axial coordinate of the cell containing it.
///
/// The fractional cube coordinates are rounded independently, which breaks
/// `x + y + z == 0` near cell boundaries. The component that moved the most
/// while rounding is then rebuilt from the other two; when the z and y
/// residuals tie, z is rebuilt.
///
/// Halves round to even, so a point exactly on a cell edge snaps the same
/// way as in engines whose integer rounding is banker's rounding. Only such
/// edge points are affected.
pub fn world_to_axial(pos: WorldPosition, metrics: &HexMetrics) -> AxialCoordinate {
    let mut x = pos.x / (metrics.inner_radius * 2.0);
    let mut y = -x;

    // Every two rows up, both x and y drop by one.
    let shift = pos.z / (metrics.outer_radius * 3.0);
    x -= shift;
    y -= shift;
    let z = -x - y;

    let mut ix = x.round_ties_even() as i32;
    let iy = y.round_ties_even() as i32;
    let mut iz = z.round_ties_even() as i32;

    if ix + iy + iz != 0 {
        let dx = (x - ix as f32).abs();
        let dy = (y - iy as f32).abs();
        let dz = (z - iz as f32).abs();

        if dx > dy && dx > dz {
            ix = -iy - iz;
        } else if dz >= dy {
            iz = -ix - iy;
        }
        // Otherwise y had the largest residual; it is derived, so dropping
        // `iy` corrects it.
    }

    AxialCoordinate::new(ix, iz)
}

/// Centre of the cell at `coord` in world space.
pub fn axial_to_world(coord: AxialCoordinate, metrics: &HexMetrics) -> WorldPosition {
    WorldPosition::new(
        (coord.x as f32 + coord.z as f32 * 0.5) * (metrics.inner_radius * 2.0),
        coord.z as f32 * (metrics.outer_radius * 1.5),
    )
}

/// Centre of the cell at offset coordinate `(col, row)`.
#[inline]
pub fn grid_to_world(col: i32, row: i32, metrics: &HexMetrics) -> WorldPosition {
    axial_to_world(offset_to_axial(col, row), metrics)
}

/// Offset coordinate of the cell containing `pos`.
#[inline]
pub fn world_to_grid(pos: WorldPosition, metrics: &HexMetrics) -> OffsetCoordinate {
    axial_to_offset(world_to_axial(pos, metrics))
}

// =============================================================================
// DISTANCE & NEIGHBOURS
// =============================================================================

/// Number of cell steps between `a` and `b`.
#[inline]
pub fn distance(a: AxialCoordinate, b: AxialCoordinate) -> i32 {
    ((a.x - b.x).abs() + (a.y() - b.y()).abs() + (a.z - b.z).abs()) / 2
}

/// The six axial directions, counter-clockwise starting east.
pub const DIRECTIONS: [AxialCoordinate; 6] = [
    AxialCoordinate::new(1, 0),  // E
    AxialCoordinate::new(0, 1),  // NE
    AxialCoordinate::new(-1, 1), // NW
    AxialCoordinate::new(-1, 0), // W
    AxialCoordinate::new(0, -1), // SW
    AxialCoordinate::new(1, -1), // SE
];

/// The six cells adjacent to `coord`.
pub fn neighbors(coord: AxialCoordinate) -> [AxialCoordinate; 6] {
    DIRECTIONS.map(|d| AxialCoordinate::new(coord.x + d.x, coord.z + d.z))
}

/// Corner offsets of a cell relative to its centre, clockwise from the top.
///
/// The first corner is repeated at the end so consecutive pairs trace the
/// full outline.
pub fn corners(metrics: &HexMetrics) -> [Vec3; 7] {
    let outer = metrics.outer_radius;
    let inner = metrics.inner_radius;
    [
        Vec3::new(0.0, 0.0, outer),
        Vec3::new(inner, 0.0, 0.5 * outer),
        Vec3::new(inner, 0.0, -0.5 * outer),
        Vec3::new(0.0, 0.0, -outer),
        Vec3::new(-inner, 0.0, -0.5 * outer),
        Vec3::new(-inner, 0.0, 0.5 * outer),
        Vec3::new(0.0, 0.0, outer),
    ]
}
