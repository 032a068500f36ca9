//! Lowering a surface mesh into a plain geometry model
//! of points and a triangulated surface.

use nalgebra as na;

use crate::mesh::{ElementShape, Mesh};

/// Error in converting a mesh to a geometry model.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Mesh-to-geometry conversion is only defined for 2D meshes.
    #[error("mesh to geometry conversion needs a 2D mesh, got dimension {dimension}")]
    UnsupportedDimension {
        /// The offending mesh's dimension.
        dimension: usize,
    },
}

/// A surface triangulated over a geometry's point array.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Surface {
    /// Index triples into the owning geometry's points,
    /// one per triangle.
    pub triangles: Vec<[usize; 3]>,
}

/// A geometry model: a point cloud plus surfaces triangulated over it.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    /// The points, taken 1:1 from the source mesh's nodes.
    pub points: Vec<na::Vector3<f64>>,
    /// The triangulated surfaces.
    pub surfaces: Vec<Surface>,
}

/// Convert a 2D mesh into a geometry model.
///
/// Mesh nodes become geometry points in order.
/// The mesh's face elements are gathered into a single surface:
/// each triangle contributes itself,
/// each quad is split into two triangles along its 0-2 diagonal,
/// and all other element shapes (i.e. lines) are skipped.
pub fn convert_mesh_to_geometry(mesh: &Mesh) -> Result<Geometry, GeometryError> {
    if mesh.dimension() != 2 {
        return Err(GeometryError::UnsupportedDimension {
            dimension: mesh.dimension(),
        });
    }

    let mut surface = Surface::default();
    for elem in mesh.elements() {
        let n = elem.node_indices();
        match elem.shape() {
            ElementShape::Triangle => {
                surface.triangles.push([n[0], n[1], n[2]]);
            }
            ElementShape::Quad => {
                surface.triangles.push([n[0], n[1], n[2]]);
                surface.triangles.push([n[0], n[2], n[3]]);
            }
            _ => {}
        }
    }

    Ok(Geometry {
        points: mesh.nodes().to_vec(),
        surfaces: vec![surface],
    })
}
