use log::trace;
use smallvec::SmallVec;
use std::fmt;

use crate::cells::CornerCoordinate;
use crate::errors::*;
use crate::grid::{Grid, IndexType, WallState};
use crate::units::{CellSize, ColumnsCount, RowsCount, WallHeight};
use crate::utils::{self, FnvHashMap, FnvHashSet};

#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64) -> Vertex {
        Vertex { x, y, z }
    }
}

/// Unordered pair of vertex indices, stored smaller index first.
pub type Edge = [usize; 2];

/// Vertex indices of a convex planar polygon in winding order.
pub type Face = SmallVec<[usize; 4]>;

/// Polygon mesh: vertex positions plus edges and faces indexing into them.
#[derive(PartialEq, Clone, Debug, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Assemble a mesh from parts. Edges are normalised to smaller index first and duplicates
    /// dropped, keeping first-seen order.
    pub fn new(vertices: Vec<Vertex>, edges: Vec<Edge>, faces: Vec<Face>) -> Mesh {
        let mut seen: FnvHashSet<Edge> = utils::fnv_hashset(edges.len());
        let edges = edges.into_iter()
            .map(normalised_edge)
            .filter(|edge| seen.insert(*edge))
            .collect();
        Mesh { vertices, edges, faces }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Axis aligned (min, max) corners, None for a mesh without vertices.
    pub fn bounds(&self) -> Option<(Vertex, Vertex)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (Vertex::new(lo.x.min(v.x), lo.y.min(v.y), lo.z.min(v.z)),
             Vertex::new(hi.x.max(v.x), hi.y.max(v.y), hi.z.max(v.z)))
        }))
    }

    /// Apply `f` to every vertex position. Topology is untouched.
    pub fn map_vertices<F>(mut self, f: F) -> Mesh
        where F: Fn(Vertex) -> Vertex
    {
        for v in self.vertices.iter_mut() {
            *v = f(*v);
        }
        self
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Mesh :: {} vertices, {} edges, {} faces",
               self.vertex_count(), self.edge_count(), self.face_count())
    }
}

fn normalised_edge(edge: Edge) -> Edge {
    if edge[0] <= edge[1] { edge } else { [edge[1], edge[0]] }
}

/// Synthesise wall geometry for a maze.
///
/// Each wall becomes one vertical rectangle standing on the segment between its two corners and
/// reaching up to `wall_height`. The outer ring is always emitted, then every interior wall that
/// is still present. Corners are welded: each corner owns one base and one top vertex whatever
/// number of walls meet there, so adjoining faces share their vertical edge exactly.
///
/// The ring is walked clockwise seen from above (east along the north side first), so every ring
/// face points out of the maze and neighbouring ring faces cross their shared upright in opposite
/// directions. Interior walls run from their smaller corner to the larger one.
///
/// With `include_floor` one more face covers the whole grid at `z = 0`. It runs through the base
/// vertex of every ring corner, against the ring walk, and faces down out of the open box. It
/// shares each ring base edge with the wall above it, so it adds no vertices or edges.
///
/// Output order is fixed by the grid: ring walls then interior walls in wall order, with vertices
/// allocated the first time a corner is used, base before top.
pub fn build_mesh<GridIndexType>(grid: &Grid<GridIndexType>,
                                 cell_size: CellSize,
                                 wall_height: WallHeight,
                                 include_floor: bool)
                                 -> Result<Mesh>
    where GridIndexType: IndexType
{
    validate_geometry(cell_size, wall_height)?;

    let mut builder = WallMeshBuilder::new(grid.rows(), grid.columns(), cell_size, wall_height);

    let ring = grid.boundary_segments();
    for &(a, b) in ring.iter() {
        builder.add_wall(a, b);
    }
    for (wall, _, _, state) in grid.iter_walls() {
        if state == WallState::Present {
            let (a, b) = grid.wall_corners(wall);
            builder.add_wall(a, b);
        }
    }
    if include_floor {
        builder.add_floor(ring.iter().rev().map(|&(_, end)| end));
    }

    let mesh = builder.build();
    trace!("built {}", mesh);
    Ok(mesh)
}

/// `cell_size` must be positive and `wall_height` non-negative, both finite.
pub fn validate_geometry(cell_size: CellSize, wall_height: WallHeight) -> Result<()> {
    let CellSize(size) = cell_size;
    if !(size > 0.0 && size.is_finite()) {
        return Err(ErrorKind::InvalidParameter("cell_size", size).into());
    }
    let WallHeight(height) = wall_height;
    if !(height >= 0.0 && height.is_finite()) {
        return Err(ErrorKind::InvalidParameter("wall_height", height).into());
    }
    Ok(())
}

struct WallMeshBuilder {
    cell_size: f64,
    wall_height: f64,
    corner_vertices: FnvHashMap<CornerCoordinate, (usize, usize)>,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
}

impl WallMeshBuilder {
    fn new(rows: RowsCount,
           columns: ColumnsCount,
           cell_size: CellSize,
           wall_height: WallHeight)
           -> WallMeshBuilder {
        let corners_hint = (rows.0 + 1) * (columns.0 + 1);
        WallMeshBuilder {
            cell_size: cell_size.0,
            wall_height: wall_height.0,
            corner_vertices: utils::fnv_hashmap(corners_hint),
            vertices: Vec::with_capacity(2 * corners_hint),
            edges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// (base, top) vertex indices for a corner, allocated on first use.
    fn corner(&mut self, corner: CornerCoordinate) -> (usize, usize) {
        if let Some(indices) = self.corner_vertices.get(&corner) {
            return *indices;
        }
        let x = corner.column as f64 * self.cell_size;
        let y = corner.row as f64 * self.cell_size;
        let base = self.vertices.len();
        self.vertices.push(Vertex::new(x, y, 0.0));
        self.vertices.push(Vertex::new(x, y, self.wall_height));
        let _ = self.corner_vertices.insert(corner, (base, base + 1));
        (base, base + 1)
    }

    fn add_wall(&mut self, a: CornerCoordinate, b: CornerCoordinate) {
        let (a_base, a_top) = self.corner(a);
        let (b_base, b_top) = self.corner(b);
        self.add_face(Face::from_slice(&[a_base, b_base, b_top, a_top]));
    }

    fn add_floor<I>(&mut self, ring_corners: I)
        where I: IntoIterator<Item = CornerCoordinate>
    {
        let face = ring_corners.into_iter().map(|corner| self.corner(corner).0).collect();
        self.add_face(face);
    }

    fn add_face(&mut self, face: Face) {
        let sides = face.len();
        self.edges.extend((0..sides).map(|i| [face[i], face[(i + 1) % sides]]));
        self.faces.push(face);
    }

    fn build(self) -> Mesh {
        Mesh::new(self.vertices, self.edges, self.faces)
    }
}
