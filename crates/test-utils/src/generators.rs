//! Tile coordinate generators.
//!
//! These produce predictable sets of coordinates for exercising URL
//! functions over whole ranges, including tiles just outside a range.

/// An inclusive range of origin-relative tile columns and rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub min_col: i64,
    pub max_col: i64,
    pub min_row: i64,
    pub max_row: i64,
}

impl TileRange {
    pub const fn new(min_col: i64, max_col: i64, min_row: i64, max_row: i64) -> Self {
        Self {
            min_col,
            max_col,
            min_row,
            max_row,
        }
    }

    /// Whether `(col, row)` lies inside the range.
    pub fn contains(&self, col: i64, row: i64) -> bool {
        (self.min_col..=self.max_col).contains(&col) && (self.min_row..=self.max_row).contains(&row)
    }

    /// The range grown by `margin` tiles on every side.
    pub fn expanded(&self, margin: i64) -> Self {
        Self::new(
            self.min_col - margin,
            self.max_col + margin,
            self.min_row - margin,
            self.max_row + margin,
        )
    }

    /// Number of tiles in the range.
    pub fn len(&self) -> usize {
        let cols = (self.max_col - self.min_col + 1).max(0) as usize;
        let rows = (self.max_row - self.min_row + 1).max(0) as usize;
        cols * rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Every `(col, row)` pair in `range`, row by row.
///
/// # Example
///
/// ```
/// use test_utils::{tile_pairs, TileRange};
///
/// let pairs = tile_pairs(TileRange::new(0, 1, 5, 6));
/// assert_eq!(pairs, vec![(0, 5), (1, 5), (0, 6), (1, 6)]);
/// ```
pub fn tile_pairs(range: TileRange) -> Vec<(i64, i64)> {
    let mut pairs = Vec::with_capacity(range.len());
    for row in range.min_row..=range.max_row {
        for col in range.min_col..=range.max_col {
            pairs.push((col, row));
        }
    }
    pairs
}

/// Grid row addressing origin-relative `row` in a matrix whose rows count
/// upward from a bottom-left origin.
pub fn bottom_left_grid_row(row: i64) -> i64 {
    -row - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_len_and_contains() {
        let range = TileRange::new(1, 3, 0, 2);
        assert_eq!(range.len(), 9);
        assert!(range.contains(1, 0));
        assert!(range.contains(3, 2));
        assert!(!range.contains(4, 2));
        assert!(!range.contains(1, -1));
    }

    #[test]
    fn test_expanded_range() {
        let range = TileRange::new(1, 3, 0, 2).expanded(1);
        assert_eq!(range, TileRange::new(0, 4, -1, 3));
        assert_eq!(tile_pairs(range).len(), 25);
    }

    #[test]
    fn test_empty_range() {
        let range = TileRange::new(3, 1, 0, 0);
        assert!(range.is_empty());
        assert!(tile_pairs(range).is_empty());
    }

    #[test]
    fn test_bottom_left_grid_row_is_involution() {
        for row in -3..3 {
            assert_eq!(bottom_left_grid_row(bottom_left_grid_row(row)), row);
        }
    }
}
