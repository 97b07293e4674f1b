use crate::errors::*;
use crate::grid::Grid;
use crate::units::{ColumnsCount, RowsCount};

pub type SmallGrid = Grid<u8>;
pub type MediumGrid = Grid<u16>;
pub type LargeGrid = Grid<u32>;

pub fn small_grid(rows: RowsCount, columns: ColumnsCount) -> Result<SmallGrid> {
    SmallGrid::new(rows, columns)
}

pub fn medium_grid(rows: RowsCount, columns: ColumnsCount) -> Result<MediumGrid> {
    MediumGrid::new(rows, columns)
}

pub fn large_grid(rows: RowsCount, columns: ColumnsCount) -> Result<LargeGrid> {
    LargeGrid::new(rows, columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_type_bounds_grid_size() {
        // the wall count runs out before the cell count does
        assert!(small_grid(RowsCount(11), ColumnsCount(11)).is_ok());
        assert!(small_grid(RowsCount(12), ColumnsCount(12)).is_err());
        assert!(medium_grid(RowsCount(181), ColumnsCount(181)).is_ok());
        assert!(medium_grid(RowsCount(182), ColumnsCount(182)).is_err());
        assert!(large_grid(RowsCount(256), ColumnsCount(256)).is_ok());
    }
}
