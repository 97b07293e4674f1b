//! The single entry point used by host applications: maze parameters in, wall mesh out.
//!
//! Every call builds a fresh grid and a fresh random generator from the parameters alone, so the
//! result is a pure function of `GenerationParams`. Nothing is cached between calls.

use log::debug;
use serde_derive::{Deserialize, Serialize};
use std::time::Instant;

use crate::errors::*;
use crate::generators;
use crate::grid::graph_size;
use crate::grids::{large_grid, LargeGrid};
use crate::islands::{self, IslandRule};
use crate::mesh::{self, Mesh};
use crate::units::{CellSize, ColumnsCount, NodesCount, RowsCount, WallHeight};
use crate::utils;

/// Largest maze `generate` accepts, 2048 x 2048 cells. Bigger requests fail with
/// `ResourceExhausted` instead of risking an allocation abort.
pub const MAX_CELLS: usize = 1 << 22;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    pub rows: usize,
    pub columns: usize,
    pub seed: u64,
    pub cell_size: f64,
    pub wall_height: f64,
    /// Extra walls opened after carving.
    pub iterations: usize,
    pub island_removal: bool,
    /// Only prune detached islands of at most this many walls. None prunes all of them.
    pub max_island_walls: Option<usize>,
    pub include_floor: bool,
}

impl Default for GenerationParams {
    fn default() -> GenerationParams {
        GenerationParams {
            rows: 20,
            columns: 20,
            seed: 0,
            cell_size: 2.0,
            wall_height: 2.4,
            iterations: 5,
            island_removal: true,
            max_island_walls: None,
            include_floor: false,
        }
    }
}

impl GenerationParams {
    pub fn island_rule(&self) -> IslandRule {
        match self.max_island_walls {
            Some(max_walls) => IslandRule::DetachedUpTo(max_walls),
            None => IslandRule::Detached,
        }
    }

    /// Every check that can fail, done before anything is allocated.
    pub fn validate(&self) -> Result<()> {
        let (NodesCount(cells), _) = graph_size::<u32>(RowsCount(self.rows),
                                                       ColumnsCount(self.columns))?;
        if cells > MAX_CELLS {
            return Err(ErrorKind::ResourceExhausted(self.rows, self.columns).into());
        }
        mesh::validate_geometry(CellSize(self.cell_size), WallHeight(self.wall_height))
    }
}

#[derive(Debug, Clone)]
pub struct GenerationParamsBuilder {
    params: GenerationParams,
}

impl Default for GenerationParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationParamsBuilder {
    pub fn new() -> GenerationParamsBuilder {
        GenerationParamsBuilder { params: GenerationParams::default() }
    }
    pub fn dimensions(mut self, rows: usize, columns: usize) -> GenerationParamsBuilder {
        self.params.rows = rows;
        self.params.columns = columns;
        self
    }
    pub fn seed(mut self, seed: u64) -> GenerationParamsBuilder {
        self.params.seed = seed;
        self
    }
    pub fn cell_size(mut self, cell_size: f64) -> GenerationParamsBuilder {
        self.params.cell_size = cell_size;
        self
    }
    pub fn wall_height(mut self, wall_height: f64) -> GenerationParamsBuilder {
        self.params.wall_height = wall_height;
        self
    }
    pub fn iterations(mut self, iterations: usize) -> GenerationParamsBuilder {
        self.params.iterations = iterations;
        self
    }
    pub fn island_removal(mut self, island_removal: bool) -> GenerationParamsBuilder {
        self.params.island_removal = island_removal;
        self
    }
    pub fn max_island_walls(mut self, max_island_walls: Option<usize>) -> GenerationParamsBuilder {
        self.params.max_island_walls = max_island_walls;
        self
    }
    pub fn include_floor(mut self, include_floor: bool) -> GenerationParamsBuilder {
        self.params.include_floor = include_floor;
        self
    }
    pub fn build(self) -> GenerationParams {
        self.params
    }
}

/// Carve, loosen and prune a maze, stopping short of building geometry.
pub fn generate_maze(params: &GenerationParams) -> Result<LargeGrid> {
    params.validate()?;

    let started = Instant::now();
    let mut grid = large_grid(RowsCount(params.rows), ColumnsCount(params.columns))?;
    let mut rng = utils::seeded_rng(params.seed);

    generators::recursive_backtracker(&mut grid, &mut rng);
    debug!("carved {} x {} maze (seed {}) in {:?}",
           params.rows, params.columns, params.seed, started.elapsed());

    let stage = Instant::now();
    let opened = generators::adjust_density(&mut grid, params.iterations, &mut rng);
    debug!("opened {} extra walls in {:?}", opened, stage.elapsed());

    if params.island_removal {
        let stage = Instant::now();
        let removed = islands::prune_islands(&mut grid, params.island_rule());
        debug!("pruned {} island walls in {:?}", removed, stage.elapsed());
    }

    Ok(grid)
}

/// Build the wall mesh for `params`.
///
/// Stages run in a fixed order: construct grid, carve, adjust density, prune islands when asked,
/// build the mesh. Identical parameters always give an identical mesh. Any invalid parameter is
/// reported before a grid is allocated.
pub fn generate(params: &GenerationParams) -> Result<Mesh> {
    let started = Instant::now();
    let grid = generate_maze(params)?;
    let mesh = maze_mesh(&grid, params)?;
    debug!("maze generation completed in {:?}", started.elapsed());
    Ok(mesh)
}

/// The geometry stage alone, for a maze already produced by `generate_maze`.
pub fn maze_mesh(grid: &LargeGrid, params: &GenerationParams) -> Result<Mesh> {
    let stage = Instant::now();
    let mesh = mesh::build_mesh(grid,
                                CellSize(params.cell_size),
                                WallHeight(params.wall_height),
                                params.include_floor)?;
    debug!("built {} in {:?}", mesh, stage.elapsed());
    Ok(mesh)
}
