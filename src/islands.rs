//! Removal of wall fragments that have come loose from the maze.
//!
//! Walls are treated as line segments between cell corners. Two present walls belong together if
//! they meet at a corner, and the permanent ring of walls around the grid anchors everything
//! attached to it. Opening extra passages after carving can leave small enclosed pieces of wall
//! standing free of that ring; those are the islands.

use log::trace;
use petgraph::unionfind::UnionFind;
use serde_derive::{Deserialize, Serialize};

use crate::grid::{Grid, IndexType, WallIndex, WallState};
use crate::utils::{self, FnvHashMap};

/// Which detached wall components get deleted.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum IslandRule {
    /// Every component not attached to the boundary ring.
    Detached,
    /// Detached components holding at most this many walls. Larger islands are kept.
    DetachedUpTo(usize),
}

impl Default for IslandRule {
    fn default() -> IslandRule {
        IslandRule::Detached
    }
}

/// Groups of present interior walls that do not connect to the boundary ring, through shared
/// corners, in any way.
///
/// Components are listed in the order their first wall appears in the grid's wall order, and the
/// walls within each component follow wall order too.
pub fn detached_components<GridIndexType>(grid: &Grid<GridIndexType>) -> Vec<Vec<WallIndex>>
    where GridIndexType: IndexType
{
    let columns = grid.columns();
    let corners_count = (grid.rows().0 + 1) * (columns.0 + 1);
    let mut corners = UnionFind::<usize>::new(corners_count);

    for (a, b) in grid.boundary_segments() {
        let _ = corners.union(a.to_row_major_index(columns), b.to_row_major_index(columns));
    }

    let present_walls: Vec<(WallIndex, usize)> = grid.iter_walls()
        .filter(|&(_, _, _, state)| state == WallState::Present)
        .map(|(wall, _, _, _)| {
            let (a, b) = grid.wall_corners(wall);
            let (a_index, b_index) = (a.to_row_major_index(columns), b.to_row_major_index(columns));
            let _ = corners.union(a_index, b_index);
            (wall, a_index)
        })
        .collect();

    // Corner (0, 0) always sits on the ring.
    let ring = corners.find_mut(0);

    let mut components: Vec<Vec<WallIndex>> = Vec::new();
    let mut component_of_root: FnvHashMap<usize, usize> = utils::fnv_hashmap(present_walls.len());
    for (wall, corner_index) in present_walls {
        let root = corners.find_mut(corner_index);
        if root != ring {
            let slot = *component_of_root.entry(root).or_insert_with(|| {
                components.push(Vec::new());
                components.len() - 1
            });
            components[slot].push(wall);
        }
    }

    components
}

/// Open every wall in the detached components selected by `rule`.
///
/// Has to run after carving and density adjustment as those decide the wall set it inspects.
/// When all present walls hang together with the ring nothing changes.
///
/// Returns the number of walls removed.
pub fn prune_islands<GridIndexType>(grid: &mut Grid<GridIndexType>, rule: IslandRule) -> usize
    where GridIndexType: IndexType
{
    let islands = detached_components(grid);
    let islands_count = islands.len();

    let mut removed = 0;
    for island in islands {
        let delete = match rule {
            IslandRule::Detached => true,
            IslandRule::DetachedUpTo(max_walls) => island.len() <= max_walls,
        };
        if delete {
            for wall in island {
                if grid.set_wall_state(wall, WallState::Removed) {
                    removed += 1;
                }
            }
        }
    }

    trace!("{} islands found, {} walls removed under {:?}", islands_count, removed, rule);
    removed
}
