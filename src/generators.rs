use bit_set::BitSet;
use log::trace;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::cells::{CoordinateSmallVec, GridCoordinate};
use crate::grid::{Grid, IndexType, WallIndex, WallState};

/// Apply the recursive backtracker maze generation algorithm to a fully walled grid.
///
/// A random walk from the north west cell that never steps onto a visited cell. When the walk
/// is boxed in it backs up along its own path until it finds a cell with an unvisited neighbour
/// and continues from there. The path is kept on an explicit stack, so grid size does not bound
/// call depth.
///
/// Every cell is visited exactly once which leaves the open passages forming a spanning tree:
/// `grid.size() - 1` walls are removed, all cells are reachable and there are no loops.
///
/// The only source of variation is `rng`. Unvisited neighbours are always considered in
/// north, south, east, west order, so the same generator state gives the same maze.
pub fn recursive_backtracker<GridIndexType, R>(grid: &mut Grid<GridIndexType>, rng: &mut R)
    where GridIndexType: IndexType,
          R: Rng
{
    let columns = grid.columns();
    let start = GridCoordinate::new(0, 0);

    let mut visited = BitSet::with_capacity(grid.size());
    let _ = visited.insert(start.to_row_major_index(columns));
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {

        let unvisited_neighbours: CoordinateSmallVec = grid.neighbours(current)
            .into_iter()
            .filter(|coord| !visited.contains(coord.to_row_major_index(columns)))
            .collect();

        if let Some(&next) = unvisited_neighbours.choose(rng) {
            grid.carve(current, next).expect("Failed to carve a passage to a neighbour cell.");
            let _ = visited.insert(next.to_row_major_index(columns));
            stack.push(next);
        } else {
            let _ = stack.pop();
        }
    }

    trace!("recursive backtracker visited {} cells", visited.len());
}

/// Loosen a carved maze by opening `iterations` further walls.
///
/// Each pass picks uniformly among the interior walls that are still present. A spanning maze
/// stays connected whatever is opened; every extra wall only adds a loop. Walls are never put
/// back, so for the same seed a higher `iterations` opens a superset of the walls a lower one
/// does. Stops early once no interior walls remain.
///
/// Returns the number of walls opened.
pub fn adjust_density<GridIndexType, R>(grid: &mut Grid<GridIndexType>,
                                        iterations: usize,
                                        rng: &mut R)
                                        -> usize
    where GridIndexType: IndexType,
          R: Rng
{
    let mut candidates: Vec<WallIndex> = grid.iter_walls()
        .filter(|&(_, _, _, state)| state == WallState::Present)
        .map(|(wall, _, _, _)| wall)
        .collect();

    let mut opened = 0;
    for _ in 0..iterations {
        if candidates.is_empty() {
            break;
        }
        let wall = candidates.swap_remove(rng.gen_range(0..candidates.len()));
        let _ = grid.set_wall_state(wall, WallState::Removed);
        opened += 1;
    }

    trace!("density adjustment opened {} of {} requested walls", opened, iterations);
    opened
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::grids::{medium_grid, MediumGrid};
    use crate::units::{ColumnsCount, RowsCount};
    use crate::utils::{self, FnvHashSet};

    fn carved(rows: usize, columns: usize, seed: u64) -> MediumGrid {
        let mut g = medium_grid(RowsCount(rows), ColumnsCount(columns)).unwrap();
        recursive_backtracker(&mut g, &mut utils::seeded_rng(seed));
        g
    }

    fn open_walls(g: &MediumGrid) -> Vec<WallIndex> {
        g.iter_walls()
            .filter(|&(_, _, _, state)| state == WallState::Removed)
            .map(|(wall, _, _, _)| wall)
            .collect()
    }

    fn reachable_from_start(g: &MediumGrid) -> usize {
        let mut seen: FnvHashSet<GridCoordinate> = utils::fnv_hashset(g.size());
        let mut frontier = vec![GridCoordinate::new(0, 0)];
        let _ = seen.insert(GridCoordinate::new(0, 0));
        while let Some(coord) = frontier.pop() {
            for link in g.links(coord).iter() {
                if seen.insert(*link) {
                    frontier.push(*link);
                }
            }
        }
        seen.len()
    }

    fn is_spanning_tree(g: &MediumGrid) -> bool {
        // connected with n - 1 edges implies acyclic
        g.open_walls_count() == g.size() - 1 && reachable_from_start(g) == g.size()
    }

    #[test]
    fn three_by_three_scenario() {
        let g = carved(3, 3, 42);
        assert_eq!(g.open_walls_count(), 8);
        assert!(is_spanning_tree(&g));

        let again = carved(3, 3, 42);
        assert_eq!(open_walls(&g), open_walls(&again));

        let other = carved(3, 3, 43);
        assert_eq!(other.open_walls_count(), 8);
        assert!(is_spanning_tree(&other));
    }

    #[test]
    fn different_seeds_give_different_mazes() {
        let distinct = (0..16u64).map(|seed| open_walls(&carved(6, 6, seed))).unique().count();
        assert!(distinct > 1);
    }

    #[test]
    fn single_cell_carving_is_a_no_op() {
        let g = carved(1, 1, 7);
        assert_eq!(g.walls_count(), 0);
        assert_eq!(g.open_walls_count(), 0);
    }

    #[test]
    fn corridor_grids_open_every_wall() {
        let g = carved(1, 9, 3);
        assert_eq!(g.open_walls_count(), 8);
        assert_eq!(g.present_walls_count(), 0);
        let g = carved(9, 1, 3);
        assert_eq!(g.present_walls_count(), 0);
    }

    #[test]
    fn carving_is_spanning_tree_quickcheck() {
        fn p(rows: u8, columns: u8, seed: u64) -> TestResult {
            let (r, c) = (rows as usize % 24 + 1, columns as usize % 24 + 1);
            TestResult::from_bool(is_spanning_tree(&carved(r, c, seed)))
        }
        quickcheck(p as fn(u8, u8, u64) -> TestResult);
    }

    #[test]
    fn zero_iterations_leave_the_maze_alone() {
        let mut g = carved(5, 5, 11);
        let before = open_walls(&g);
        assert_eq!(adjust_density(&mut g, 0, &mut utils::seeded_rng(11)), 0);
        assert_eq!(open_walls(&g), before);
    }

    #[test]
    fn density_adjustment_adds_loops() {
        let mut g = carved(8, 8, 5);
        let dead_ends_before = g.dead_ends_count();
        let opened = adjust_density(&mut g, 10, &mut utils::seeded_rng(5));
        assert_eq!(opened, 10);
        assert_eq!(g.open_walls_count(), g.size() - 1 + 10);
        assert_eq!(reachable_from_start(&g), g.size());
        assert!(g.dead_ends_count() <= dead_ends_before);
    }

    #[test]
    fn density_adjustment_stops_when_no_walls_remain() {
        let mut g = carved(3, 3, 1);
        let remaining = g.present_walls_count();
        let opened = adjust_density(&mut g, 1000, &mut utils::seeded_rng(1));
        assert_eq!(opened, remaining);
        assert_eq!(g.present_walls_count(), 0);
    }

    #[test]
    fn more_iterations_open_a_superset_quickcheck() {
        fn p(seed: u64, fewer: u8, extra: u8) -> bool {
            let run = |iterations: usize| {
                let mut g = carved(7, 9, seed);
                adjust_density(&mut g, iterations, &mut utils::seeded_rng(seed.wrapping_add(1)));
                open_walls(&g).into_iter().collect::<FnvHashSet<_>>()
            };
            let small = run(fewer as usize);
            let large = run(fewer as usize + extra as usize);
            small.is_subset(&large)
        }
        quickcheck(p as fn(u64, u8, u8) -> bool);
    }
}
