use smallvec::SmallVec;
use std::convert::From;

use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};

/// Position of a cell in the maze, `row` grows southwards and `column` grows eastwards.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: u32,
    pub column: u32,
}

/// Position of a cell corner (a grid vertex) in `[0, rows] x [0, columns]`.
///
/// Wall segments run between two corners.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct CornerCoordinate {
    pub row: u32,
    pub column: u32,
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// Canonical order used whenever neighbours are enumerated. Anything seeded relies on it.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];
}

impl GridCoordinate {
    pub fn new(row: u32, column: u32) -> GridCoordinate {
        GridCoordinate { row, column }
    }

    pub fn from_row_column_indices(row_index: RowIndex, col_index: ColumnIndex) -> GridCoordinate {
        let (RowIndex(row), ColumnIndex(col)) = (row_index, col_index);
        GridCoordinate::new(row as u32, col as u32)
    }

    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> GridCoordinate {
        let ColumnsCount(width) = columns;
        GridCoordinate::new((index / width) as u32, (index % width) as u32)
    }

    #[inline]
    pub fn to_row_major_index(&self, columns: ColumnsCount) -> usize {
        self.row as usize * columns.0 + self.column as usize
    }

    /// The coordinate one cell away in `dir`, or None when that would leave the grid.
    pub fn offset(&self,
                  dir: CompassPrimary,
                  rows: RowsCount,
                  columns: ColumnsCount)
                  -> Option<GridCoordinate> {
        let (row, column) = (self.row, self.column);
        let candidate = match dir {
            CompassPrimary::North => {
                if row > 0 {
                    Some(GridCoordinate::new(row - 1, column))
                } else {
                    None
                }
            }
            CompassPrimary::South => Some(GridCoordinate::new(row + 1, column)),
            CompassPrimary::East => Some(GridCoordinate::new(row, column + 1)),
            CompassPrimary::West => {
                if column > 0 {
                    Some(GridCoordinate::new(row, column - 1))
                } else {
                    None
                }
            }
        };
        candidate.filter(|c| (c.row as usize) < rows.0 && (c.column as usize) < columns.0)
    }

    /// Which direction `other` lies in, if it is directly adjacent.
    pub fn direction_to(&self, other: GridCoordinate) -> Option<CompassPrimary> {
        let (dr, dc) = (other.row as i64 - self.row as i64,
                        other.column as i64 - self.column as i64);
        match (dr, dc) {
            (-1, 0) => Some(CompassPrimary::North),
            (1, 0) => Some(CompassPrimary::South),
            (0, 1) => Some(CompassPrimary::East),
            (0, -1) => Some(CompassPrimary::West),
            _ => None,
        }
    }

    /// The two corners bounding this cell's side facing `dir`, smaller corner first.
    pub fn side_corners(&self, dir: CompassPrimary) -> (CornerCoordinate, CornerCoordinate) {
        let (r, c) = (self.row, self.column);
        match dir {
            CompassPrimary::North => (CornerCoordinate::new(r, c), CornerCoordinate::new(r, c + 1)),
            CompassPrimary::South => {
                (CornerCoordinate::new(r + 1, c), CornerCoordinate::new(r + 1, c + 1))
            }
            CompassPrimary::East => {
                (CornerCoordinate::new(r, c + 1), CornerCoordinate::new(r + 1, c + 1))
            }
            CompassPrimary::West => (CornerCoordinate::new(r, c), CornerCoordinate::new(r + 1, c)),
        }
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(row_column_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

impl CornerCoordinate {
    pub fn new(row: u32, column: u32) -> CornerCoordinate {
        CornerCoordinate { row, column }
    }

    #[inline]
    pub fn to_row_major_index(&self, columns: ColumnsCount) -> usize {
        self.row as usize * (columns.0 + 1) + self.column as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_stay_inside_grid() {
        let (rows, cols) = (RowsCount(2), ColumnsCount(3));
        let gc = GridCoordinate::new;

        assert_eq!(gc(0, 0).offset(CompassPrimary::North, rows, cols), None);
        assert_eq!(gc(0, 0).offset(CompassPrimary::West, rows, cols), None);
        assert_eq!(gc(0, 0).offset(CompassPrimary::South, rows, cols), Some(gc(1, 0)));
        assert_eq!(gc(0, 0).offset(CompassPrimary::East, rows, cols), Some(gc(0, 1)));

        assert_eq!(gc(1, 2).offset(CompassPrimary::South, rows, cols), None);
        assert_eq!(gc(1, 2).offset(CompassPrimary::East, rows, cols), None);
        assert_eq!(gc(1, 2).offset(CompassPrimary::North, rows, cols), Some(gc(0, 2)));
        assert_eq!(gc(1, 2).offset(CompassPrimary::West, rows, cols), Some(gc(1, 1)));
    }

    #[test]
    fn direction_between_adjacent_cells() {
        let a = GridCoordinate::new(1, 1);
        let back = [CompassPrimary::South,
                    CompassPrimary::North,
                    CompassPrimary::West,
                    CompassPrimary::East];
        for (dir, reverse) in CompassPrimary::ALL.iter().zip(back.iter()) {
            let b = a.offset(*dir, RowsCount(3), ColumnsCount(3)).unwrap();
            assert_eq!(a.direction_to(b), Some(*dir));
            assert_eq!(b.direction_to(a), Some(*reverse));
        }
        assert_eq!(a.direction_to(a), None);
        assert_eq!(a.direction_to(GridCoordinate::new(2, 2)), None);
    }

    #[test]
    fn row_major_round_trip() {
        let cols = ColumnsCount(4);
        let coord = GridCoordinate::new(2, 3);
        assert_eq!(coord.to_row_major_index(cols), 11);
        assert_eq!(GridCoordinate::from_row_major_index(11, cols), coord);
    }

    #[test]
    fn shared_side_has_same_corners_from_both_cells() {
        let a = GridCoordinate::new(0, 0);
        let east = GridCoordinate::new(0, 1);
        let south = GridCoordinate::new(1, 0);
        assert_eq!(a.side_corners(CompassPrimary::East), east.side_corners(CompassPrimary::West));
        assert_eq!(a.side_corners(CompassPrimary::South),
                   south.side_corners(CompassPrimary::North));
    }
}
