//! Post-processing of a finished mesh.
//!
//! Operators are pure `Mesh -> Mesh` transformations kept apart from maze generation. Thickening
//! or edge smoothing belong to the host application and plug in here by implementing
//! `MeshOperator`; generation never applies any operator itself.

use log::trace;

use crate::mesh::{Mesh, Vertex};
use crate::units::WallHeight;

pub trait MeshOperator {
    fn name(&self) -> &str;

    fn apply(&self, mesh: Mesh) -> Mesh;
}

/// Fold a mesh through `operators` in order.
pub fn apply_operators(mesh: Mesh, operators: &[&dyn MeshOperator]) -> Mesh {
    operators.iter().fold(mesh, |mesh, operator| {
        trace!("applying mesh operator {}", operator.name());
        operator.apply(mesh)
    })
}

/// Translate a mesh so the mean of its vertex positions lands on `(0, 0, lift)`.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Recentre {
    pub lift: f64,
}

impl Recentre {
    /// Centres the maze on the origin with the walls standing on `z = 0`.
    pub fn for_wall_height(wall_height: WallHeight) -> Recentre {
        Recentre { lift: wall_height.0 / 2.0 }
    }
}

impl MeshOperator for Recentre {
    fn name(&self) -> &str {
        "recentre"
    }

    fn apply(&self, mesh: Mesh) -> Mesh {
        let count = mesh.vertex_count();
        if count == 0 {
            return mesh;
        }
        let sum = mesh.vertices().iter().fold(Vertex::new(0.0, 0.0, 0.0), |acc, v| {
            Vertex::new(acc.x + v.x, acc.y + v.y, acc.z + v.z)
        });
        let n = count as f64;
        let (dx, dy, dz) = (sum.x / n, sum.y / n, sum.z / n - self.lift);
        mesh.map_vertices(|v| Vertex::new(v.x - dx, v.y - dy, v.z - dz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grids::small_grid;
    use crate::mesh::build_mesh;
    use crate::units::{CellSize, ColumnsCount, RowsCount};

    struct Scale(f64);

    impl MeshOperator for Scale {
        fn name(&self) -> &str {
            "scale"
        }

        fn apply(&self, mesh: Mesh) -> Mesh {
            let k = self.0;
            mesh.map_vertices(|v| Vertex::new(v.x * k, v.y * k, v.z * k))
        }
    }

    fn boxed_cell() -> Mesh {
        let g = small_grid(RowsCount(1), ColumnsCount(1)).unwrap();
        build_mesh(&g, CellSize(2.0), WallHeight(2.0), false).unwrap()
    }

    #[test]
    fn recentre_puts_base_on_ground() {
        let mesh = Recentre::for_wall_height(WallHeight(2.0)).apply(boxed_cell());
        assert_eq!(mesh.bounds(),
                   Some((Vertex::new(-1.0, -1.0, 0.0), Vertex::new(1.0, 1.0, 2.0))));
    }

    #[test]
    fn operators_keep_topology_and_apply_in_order() {
        let original = boxed_cell();
        let recentre = Recentre { lift: 0.0 };
        let scale = Scale(2.0);

        let scaled_then_centred = apply_operators(original.clone(), &[&scale, &recentre]);
        let centred_then_scaled = apply_operators(original.clone(), &[&recentre, &scale]);
        assert_eq!(scaled_then_centred.edges(), original.edges());
        assert_eq!(scaled_then_centred.faces(), original.faces());
        assert_eq!(scaled_then_centred.bounds(), centred_then_scaled.bounds());
        assert_eq!(scaled_then_centred.bounds(),
                   Some((Vertex::new(-2.0, -2.0, -2.0), Vertex::new(2.0, 2.0, 2.0))));

        assert_eq!(apply_operators(original.clone(), &[]), original);
    }

    #[test]
    fn recentre_empty_mesh() {
        assert_eq!(Recentre { lift: 1.0 }.apply(Mesh::default()), Mesh::default());
    }
}
