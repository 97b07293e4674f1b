use petgraph::{Graph, Undirected};
use petgraph::graph;
pub use petgraph::graph::IndexType;
use smallvec::SmallVec;
use std::fmt;
use std::slice;

use crate::cells::{CompassPrimary, CoordinateSmallVec, CornerCoordinate, GridCoordinate};
use crate::errors::*;
use crate::units::{ColumnIndex, ColumnsCount, EdgesCount, NodesCount, RowIndex, RowsCount};

/// Blocking state of the wall between two adjacent cells.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum WallState {
    Present,
    Removed,
}

/// Stable handle to an interior wall. Walls are never added or deleted after construction so the
/// handle stays valid for the lifetime of the grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Ord, PartialOrd)]
pub struct WallIndex(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum WallError {
    InvalidGridCoordinate,
    NotAdjacent,
}

/// A rectangular grid of cells as an undirected lattice graph.
///
/// Every pair of adjacent cells is joined by exactly one graph edge carrying that wall's state.
/// The walls around the outside of the grid are not edges: they are permanently present and
/// nothing can carve them.
#[derive(Clone)]
pub struct Grid<GridIndexType: IndexType> {
    graph: Graph<(), WallState, Undirected, GridIndexType>,
    rows: RowsCount,
    columns: ColumnsCount,
}

impl<GridIndexType: IndexType> fmt::Debug for Grid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: graph: {:?}, rows: {:?}, columns: {:?}",
               self.graph, self.rows, self.columns)
    }
}

impl<GridIndexType: IndexType> Grid<GridIndexType> {
    /// Build a fully walled grid.
    ///
    /// Fails with `InvalidDimension` if either dimension is zero and with `ResourceExhausted` if
    /// the cells or walls cannot be indexed by `GridIndexType`. Nothing is allocated on failure.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid<GridIndexType>> {

        let (NodesCount(nodes), EdgesCount(edges)) = graph_size::<GridIndexType>(rows, columns)?;

        let mut grid = Grid {
            graph: Graph::with_capacity(nodes, edges),
            rows: rows,
            columns: columns,
        };
        for _ in 0..nodes {
            let _ = grid.graph.add_node(());
        }

        // Edge insertion order is the canonical wall order: row-major cells, east wall then south.
        for index in 0..nodes {
            let coord = GridCoordinate::from_row_major_index(index, columns);
            for dir in &[CompassPrimary::East, CompassPrimary::South] {
                if let Some(neighbour) = coord.offset(*dir, rows, columns) {
                    let a = graph::NodeIndex::<GridIndexType>::new(index);
                    let b = graph::NodeIndex::<GridIndexType>::new(neighbour.to_row_major_index(columns));
                    let _ = grid.graph.add_edge(a, b, WallState::Present);
                }
            }
        }

        Ok(grid)
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// Number of cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of interior (carvable) walls, whatever their state.
    #[inline]
    pub fn walls_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn open_walls_count(&self) -> usize {
        self.graph.edge_weights().filter(|state| **state == WallState::Removed).count()
    }

    pub fn present_walls_count(&self) -> usize {
        self.walls_count() - self.open_walls_count()
    }

    /// Cells with exactly one open passage.
    pub fn dead_ends_count(&self) -> usize {
        self.iter().filter(|coord| self.links(*coord).len() == 1).count()
    }

    /// Cells that are to the North, South, East or West of a particular cell, in that order, but
    /// not necessarily linked by a passage.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        if self.is_valid_coordinate(coord) {
            coord.offset(direction, self.rows, self.columns)
        } else {
            None
        }
    }

    /// The (direction, neighbour, wall) triples around a cell in canonical direction order.
    /// Sides on the grid boundary have no wall object and are skipped.
    pub fn walls_around(&self,
                        coord: GridCoordinate)
                        -> SmallVec<[(CompassPrimary, GridCoordinate, WallIndex); 4]> {
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| {
                self.neighbour_at_direction(coord, *dir)
                    .and_then(|neighbour| {
                        self.wall_between(coord, neighbour)
                            .ok()
                            .map(|wall| (*dir, neighbour, wall))
                    })
            })
            .collect()
    }

    /// Cells reachable from `coord` through an open passage.
    pub fn links(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        self.walls_around(coord)
            .into_iter()
            .filter(|&(_, _, wall)| self.wall_state(wall) == WallState::Removed)
            .map(|(_, neighbour, _)| neighbour)
            .collect()
    }

    /// The single wall shared by two adjacent cells. Argument order does not matter.
    pub fn wall_between(&self,
                        a: GridCoordinate,
                        b: GridCoordinate)
                        -> ::std::result::Result<WallIndex, WallError> {
        match (self.grid_coordinate_graph_index(a), self.grid_coordinate_graph_index(b)) {
            (Some(a_index), Some(b_index)) => {
                self.graph
                    .find_edge(a_index, b_index)
                    .map(|edge_index| WallIndex(edge_index.index()))
                    .ok_or(WallError::NotAdjacent)
            }
            _ => Err(WallError::InvalidGridCoordinate),
        }
    }

    /// Panics if the wall index did not come from this grid.
    #[inline]
    pub fn wall_state(&self, wall: WallIndex) -> WallState {
        self.graph[graph::EdgeIndex::<GridIndexType>::new(wall.0)]
    }

    #[inline]
    pub fn is_present(&self, wall: WallIndex) -> bool {
        self.wall_state(wall) == WallState::Present
    }

    /// Returns true if the state changed.
    pub fn set_wall_state(&mut self, wall: WallIndex, state: WallState) -> bool {
        let weight = &mut self.graph[graph::EdgeIndex::<GridIndexType>::new(wall.0)];
        let changed = *weight != state;
        *weight = state;
        changed
    }

    /// Open a passage between two adjacent cells.
    /// Returns true if the wall was present beforehand.
    pub fn carve(&mut self,
                 a: GridCoordinate,
                 b: GridCoordinate)
                 -> ::std::result::Result<bool, WallError> {
        let wall = self.wall_between(a, b)?;
        Ok(self.set_wall_state(wall, WallState::Removed))
    }

    /// Is there an open passage between two cells?
    pub fn is_open(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        self.wall_between(a, b)
            .map(|wall| self.wall_state(wall) == WallState::Removed)
            .unwrap_or(false)
    }

    pub fn is_neighbour_open(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_open(coord, neighbour_coord))
    }

    /// The two cells either side of a wall, in canonical (west or north cell first) order.
    pub fn wall_cells(&self, wall: WallIndex) -> (GridCoordinate, GridCoordinate) {
        let (a, b) = self.graph
            .edge_endpoints(graph::EdgeIndex::<GridIndexType>::new(wall.0))
            .expect("wall index out of range for this grid");
        (GridCoordinate::from_row_major_index(a.index(), self.columns),
         GridCoordinate::from_row_major_index(b.index(), self.columns))
    }

    /// The two corners a wall runs between, smaller corner first.
    pub fn wall_corners(&self, wall: WallIndex) -> (CornerCoordinate, CornerCoordinate) {
        let (a, b) = self.wall_cells(wall);
        let dir = a.direction_to(b).expect("wall between non adjacent cells");
        a.side_corners(dir)
    }

    /// Every interior wall with its cells and state, in canonical wall order.
    pub fn iter_walls(&self) -> WallsIter<GridIndexType> {
        WallsIter {
            graph_edge_iter: self.graph.raw_edges().iter().enumerate(),
            columns: self.columns,
        }
    }

    /// The corner pairs of the permanent outer ring as one closed walk from corner (0, 0): east
    /// along the north side, south down the east side, west along the south side, then north up
    /// the west side. Each segment ends on the corner the next one starts from.
    pub fn boundary_segments(&self) -> Vec<(CornerCoordinate, CornerCoordinate)> {
        let (rows, cols) = (self.rows.0 as u32, self.columns.0 as u32);
        let mut segments = Vec::with_capacity(2 * (rows + cols) as usize);
        segments.extend((0..cols).map(|c| {
            GridCoordinate::new(0, c).side_corners(CompassPrimary::North)
        }));
        segments.extend((0..rows).map(|r| {
            GridCoordinate::new(r, cols - 1).side_corners(CompassPrimary::East)
        }));
        segments.extend((0..cols).rev().map(|c| {
            let (west, east) = GridCoordinate::new(rows - 1, c).side_corners(CompassPrimary::South);
            (east, west)
        }));
        segments.extend((0..rows).rev().map(|r| {
            let (north, south) = GridCoordinate::new(r, 0).side_corners(CompassPrimary::West);
            (south, north)
        }));
        segments
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            cells_count: self.size(),
            columns: self.columns,
        }
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter {
            current_index: 0,
            rows: self.rows,
            columns: self.columns,
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.row as usize) < self.rows.0 && (coord.column as usize) < self.columns.0
    }

    /// Convert a grid coordinate into petgraph nodeindex
    /// Returns None if the grid coordinate is invalid (out of the grid's dimensions).
    #[inline]
    fn grid_coordinate_graph_index(&self,
                                   coord: GridCoordinate)
                                   -> Option<graph::NodeIndex<GridIndexType>> {
        if self.is_valid_coordinate(coord) {
            Some(graph::NodeIndex::<GridIndexType>::new(coord.to_row_major_index(self.columns)))
        } else {
            None
        }
    }
}

/// Node and edge counts for a `rows x columns` lattice, checked against what `GridIndexType`
/// can address.
pub fn graph_size<GridIndexType: IndexType>(rows: RowsCount,
                                            columns: ColumnsCount)
                                            -> Result<(NodesCount, EdgesCount)> {
    let (RowsCount(r), ColumnsCount(c)) = (rows, columns);
    if r == 0 || c == 0 {
        return Err(ErrorKind::InvalidDimension(r, c).into());
    }

    // petgraph reserves the maximum index value as its end marker.
    let index_limit = <GridIndexType as IndexType>::max().index();
    let nodes = r.checked_mul(c).filter(|n| *n < index_limit);
    let edges = nodes.and_then(|_| {
        let horizontal = r.checked_mul(c - 1)?;
        let vertical = (r - 1).checked_mul(c)?;
        horizontal.checked_add(vertical)
    }).filter(|e| *e < index_limit);

    match (nodes, edges) {
        (Some(n), Some(e)) if r <= u32::max_value() as usize && c <= u32::max_value() as usize => {
            Ok((NodesCount(n), EdgesCount(e)))
        }
        _ => Err(ErrorKind::ResourceExhausted(r, c).into()),
    }
}

impl<GridIndexType: IndexType> fmt::Display for Grid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";

        let ColumnsCount(columns_count) = self.columns;
        let RowsCount(rows_count) = self.rows;

        // Start by special case rendering the text for the north most boundary
        let mut output = String::from(WALL_RD);
        for column in 0..columns_count {
            output.push_str(WALL_LR_3);
            let coord = GridCoordinate::from_row_column_indices(RowIndex(0), ColumnIndex(column));
            if self.is_neighbour_open(coord, CompassPrimary::East) {
                output.push_str(WALL_LR);
            } else if column == columns_count - 1 {
                output.push_str(WALL_LD);
            } else {
                output.push_str(WALL_LRD);
            }
        }
        output.push_str("\n");

        for (index_row, row) in self.iter_row().enumerate() {

            let is_last_row = index_row == (rows_count - 1);

            // The west most boundary of the row. The top section of each cell is drawn by the
            // previous row.
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::from("");

            for (index_column, cell_coord) in row.into_iter().enumerate() {

                let is_first_column = index_column == 0;
                let is_last_column = index_column == (columns_count - 1);
                let east_open = self.is_neighbour_open(cell_coord, CompassPrimary::East);
                let south_open = self.is_neighbour_open(cell_coord, CompassPrimary::South);

                // Each cell uses the southern wall of the cell above it as its own northern wall,
                // so only the body, the eastern side and the southern side minus the south west
                // corner are drawn here.
                row_middle_section_render.push_str("   ");
                row_middle_section_render.push_str(if east_open { " " } else { WALL_UD });

                if is_first_column {
                    row_bottom_section_render = if is_last_row {
                        String::from(WALL_RU)
                    } else if south_open {
                        String::from(WALL_UD)
                    } else {
                        String::from(WALL_RUD)
                    };
                }
                row_bottom_section_render.push_str(if south_open { "   " } else { WALL_LR_3 });

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                    (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                    (false, false) => {
                        let access_se_from_east =
                            self.neighbour_at_direction(cell_coord, CompassPrimary::East)
                                .map_or(false,
                                        |c| self.is_neighbour_open(c, CompassPrimary::South));
                        let access_se_from_south =
                            self.neighbour_at_direction(cell_coord, CompassPrimary::South)
                                .map_or(false,
                                        |c| self.is_neighbour_open(c, CompassPrimary::East));
                        let show_right_section = !access_se_from_east;
                        let show_down_section = !access_se_from_south;
                        let show_up_section = !east_open;
                        let show_left_section = !south_open;

                        match (show_left_section,
                               show_right_section,
                               show_up_section,
                               show_down_section) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            _ => " ",
                        }
                    }
                };

                row_bottom_section_render.push_str(corner);
            }

            output.push_str(&row_middle_section_render);
            output.push_str("\n");
            output.push_str(&row_bottom_section_render);
            output.push_str("\n");
        }

        write!(f, "{}", output)
    }
}

/// Item: (wall, first cell, second cell, state).
pub struct WallsIter<'a, GridIndexType: IndexType> {
    graph_edge_iter: ::std::iter::Enumerate<slice::Iter<'a, graph::Edge<WallState, GridIndexType>>>,
    columns: ColumnsCount,
}

impl<'a, GridIndexType: IndexType> Iterator for WallsIter<'a, GridIndexType> {
    type Item = (WallIndex, GridCoordinate, GridCoordinate, WallState);

    fn next(&mut self) -> Option<Self::Item> {
        let columns = self.columns;
        self.graph_edge_iter.next().map(|(index, edge)| {
            (WallIndex(index),
             GridCoordinate::from_row_major_index(edge.source().index(), columns),
             GridCoordinate::from_row_major_index(edge.target().index(), columns),
             edge.weight)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}
impl<'a, GridIndexType: IndexType> ExactSizeIterator for WallsIter<'a, GridIndexType> {} // default impl using size_hint()

impl<'a, GridIndexType: IndexType> fmt::Debug for WallsIter<'a, GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WallsIter :: remaining: {:?}", self.graph_edge_iter.size_hint().0)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    cells_count: usize,
    columns: ColumnsCount,
}

impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = GridCoordinate::from_row_major_index(self.current_cell_number, self.columns);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()

// Converting a &Grid into an iterator - CellIter is the default most sensible
impl<'a, GridIndexType: IndexType> IntoIterator for &'a Grid<GridIndexType> {
    type Item = GridCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Yields each row of cell coordinates, north to south.
#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    current_index: usize,
    rows: RowsCount,
    columns: ColumnsCount,
}

impl Iterator for BatchIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let RowsCount(count) = self.rows;
        if self.current_index < count {
            let ColumnsCount(length) = self.columns;
            let row = self.current_index;
            let coords = (0..length)
                .map(|i| GridCoordinate::from_row_column_indices(RowIndex(row), ColumnIndex(i)))
                .collect();
            self.current_index += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.rows.0 - self.current_index;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
impl ExactSizeIterator for BatchIter {}
