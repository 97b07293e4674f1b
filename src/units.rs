#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnsCount(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct NodesCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct EdgesCount(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowIndex(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnIndex(pub usize);

/// World space length of one side of a square cell.
#[derive(PartialEq, PartialOrd, Copy, Clone, Debug)]
pub struct CellSize(pub f64);

/// World space height walls are extruded to from `z = 0`.
#[derive(PartialEq, PartialOrd, Copy, Clone, Debug)]
pub struct WallHeight(pub f64);
