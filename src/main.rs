use docopt::Docopt;
use log::info;
use serde_derive::Deserialize;
use maze_mesh::{
    mesh::Mesh,
    operators::{apply_operators, MeshOperator, Recentre},
    pipeline,
    units::WallHeight,
    GenerationParams,
    GenerationParamsBuilder,
};
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Maze Mesh

Usage:
    maze_mesh_driver -h | --help
    maze_mesh_driver [--rows=<r>] [--columns=<c>] [--seed=<s>] [--cell-size=<f>] [--wall-height=<f>] [--iterations=<n>] [--keep-islands] [--max-island-walls=<n>] [--floor] [--recentre] [--text-out=<path>]

Options:
    -h --help                 Show this screen.
    --rows=<r>                Number of cell rows in the maze [default: 20].
    --columns=<c>             Number of cell columns in the maze [default: 20].
    --seed=<s>                Seed for the random generator, the same seed gives the same maze [default: 0].
    --cell-size=<f>           Width of one cell in world units [default: 2.0].
    --wall-height=<f>         Height the walls are extruded to [default: 2.4].
    --iterations=<n>          Extra walls opened after carving to add loops [default: 5].
    --keep-islands            Keep wall fragments that are detached from the outer wall.
    --max-island-walls=<n>    Only delete detached fragments with at most n walls.
    --floor                   Add a floor face under the whole maze.
    --recentre                Centre the mesh on the origin with the walls standing on z = 0.
    --text-out=<path>         Write a text rendering of the maze to a file instead of stdout.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: u64,
    flag_cell_size: f64,
    flag_wall_height: f64,
    flag_iterations: usize,
    flag_keep_islands: bool,
    flag_max_island_walls: Option<usize>,
    flag_floor: bool,
    flag_recentre: bool,
    flag_text_out: String,
}

// Create the Error, ErrorKind, ResultExt, and Result types for the driver.
// Library errors are linked in so `?` works on calls into maze_mesh.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_mesh::errors::Error, ::maze_mesh::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

// Above this many cells the text rendering is too wide for a terminal.
const LARGE_GRID_CELL_COUNT: usize = 25 * 25;

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    let params = generation_params(&args);

    let maze_grid = pipeline::generate_maze(&params)?;
    info!("maze has {} open passages, {} walls standing and {} dead ends",
          maze_grid.open_walls_count(),
          maze_grid.present_walls_count(),
          maze_grid.dead_ends_count());

    let rendering = format!("{}", maze_grid);
    if !args.flag_text_out.is_empty() {
        write_text_to_file(&rendering, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    } else if params.rows * params.columns < LARGE_GRID_CELL_COUNT {
        println!("{}", rendering);
    }

    let mut mesh = pipeline::maze_mesh(&maze_grid, &params)?;
    if args.flag_recentre {
        let recentre = Recentre::for_wall_height(WallHeight(params.wall_height));
        let operators: [&dyn MeshOperator; 1] = [&recentre];
        mesh = apply_operators(mesh, &operators);
    }

    print_mesh_summary(&mesh);
    Ok(())
}

fn generation_params(args: &MazeArgs) -> GenerationParams {
    GenerationParamsBuilder::new()
        .dimensions(args.flag_rows, args.flag_columns)
        .seed(args.flag_seed)
        .cell_size(args.flag_cell_size)
        .wall_height(args.flag_wall_height)
        .iterations(args.flag_iterations)
        .island_removal(!args.flag_keep_islands)
        .max_island_walls(args.flag_max_island_walls)
        .include_floor(args.flag_floor)
        .build()
}

fn print_mesh_summary(mesh: &Mesh) {
    println!("{}", mesh);
    if let Some((lo, hi)) = mesh.bounds() {
        println!("bounds: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
                 lo.x, lo.y, lo.z, hi.x, hi.y, hi.z);
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
