// =============================================================================
// GRID.RS — Linear storage indexing for rectangular boards
//
// Every per-cell array of a level is stored row-major:
// index = col + row * width.
// =============================================================================

/// Linear storage index of `(col, row)` on a board `width` columns wide.
///
/// No bounds check is made; pair with [`in_bounds`].
#[inline]
pub fn linear_index(col: i32, row: i32, width: i32) -> i32 {
    col + row * width
}

/// Inverse of [`linear_index`]. `width` must be positive.
#[inline]
pub fn coords_from_index(index: i32, width: i32) -> (i32, i32) {
    (index % width, index / width)
}

/// Returns true if `(col, row)` lies on a `width` x `height` board.
#[inline]
pub fn in_bounds(col: i32, row: i32, width: i32, height: i32) -> bool {
    col >= 0 && col < width && row >= 0 && row < height
}

/// Iterate every `(col, row)` of a board in storage order (row outer,
/// column inner).
pub fn cells(width: i32, height: i32) -> impl Iterator<Item = (i32, i32)> {
    (0..height).flat_map(move |row| (0..width).map(move |col| (col, row)))
}
