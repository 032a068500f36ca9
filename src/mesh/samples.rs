use nalgebra::Vector3;

use super::{Element, ElementShape, Mesh};

/// A single equilateral triangle in the xy-plane.
///
/// This is public for visibility in doctests, which frequently need an instance of a mesh.
/// It is not meant to be used by users and thus hidden from docs.
#[doc(hidden)]
pub fn unit_triangle_mesh() -> Mesh {
    let nodes = vec![
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.5, f64::sqrt(3.0) / 2.0, 0.0),
    ];
    let elements = vec![Element::new(ElementShape::Triangle, [0, 1, 2])];
    Mesh::new(nodes, elements).unwrap()
}

/// A small 2D mesh mixing element shapes: a unit-square quad,
/// two right triangles, and one line element along the bottom edge.
/// Shaped like this:
///
/// ```text
///  3___4___5
///  |   |\  |
///  |___|_\_|
///  0   1   2
/// ```
///
/// This is public for visibility in doctests, which frequently need an instance of a mesh.
/// It is not meant to be used by users and thus hidden from docs.
#[doc(hidden)]
pub fn tiny_mixed_mesh_2d() -> Mesh {
    let nodes = vec![
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(2.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(2.0, 1.0, 0.0),
    ];
    let elements = vec![
        Element::new(ElementShape::Quad, [0, 1, 4, 3]),
        Element::new(ElementShape::Triangle, [1, 2, 4]),
        Element::new(ElementShape::Triangle, [2, 5, 4]),
        Element::new(ElementShape::Line, [0, 1]),
    ];
    Mesh::new(nodes, elements).unwrap()
}

/// A small 3D mesh with one element of each solid shape:
/// a unit-cube hexahedron, a regular tetrahedron,
/// a unit prism over an equilateral triangle, and a pyramid.
/// All solids except the pyramid are ideally equiangular.
///
/// This is public for visibility in doctests, which frequently need an instance of a mesh.
/// It is not meant to be used by users and thus hidden from docs.
#[doc(hidden)]
pub fn tiny_solid_mesh() -> Mesh {
    let sqrt3_2 = f64::sqrt(3.0) / 2.0;
    let nodes = vec![
        // unit cube, bottom face then top face
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
        Vector3::new(1.0, 0.0, 1.0),
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(0.0, 1.0, 1.0),
        // regular tetrahedron (alternating cube corners, edge length 2*sqrt(2))
        Vector3::new(3.0, 1.0, 1.0),
        Vector3::new(3.0, -1.0, -1.0),
        Vector3::new(1.0, 1.0, -1.0),
        Vector3::new(1.0, -1.0, 1.0),
        // prism over an equilateral triangle, extruded by the edge length
        Vector3::new(5.0, 0.0, 0.0),
        Vector3::new(6.0, 0.0, 0.0),
        Vector3::new(5.5, sqrt3_2, 0.0),
        Vector3::new(5.0, 0.0, 1.0),
        Vector3::new(6.0, 0.0, 1.0),
        Vector3::new(5.5, sqrt3_2, 1.0),
        // pyramid over a unit square
        Vector3::new(8.0, 0.0, 0.0),
        Vector3::new(9.0, 0.0, 0.0),
        Vector3::new(9.0, 1.0, 0.0),
        Vector3::new(8.0, 1.0, 0.0),
        Vector3::new(8.5, 0.5, 0.7),
    ];
    #[rustfmt::skip]
    let elements = vec![
        Element::new(ElementShape::Hexahedron, [0, 1, 2, 3, 4, 5, 6, 7]),
        Element::new(ElementShape::Tetrahedron, [8, 9, 10, 11]),
        Element::new(ElementShape::Prism, [12, 13, 14, 15, 16, 17]),
        Element::new(ElementShape::Pyramid, [18, 19, 20, 21, 22]),
    ];
    Mesh::new(nodes, elements).unwrap()
}

/// A mesh consisting only of line elements,
/// i.e. nothing any face-angle-based metric can evaluate.
///
/// This is public for visibility in doctests, which frequently need an instance of a mesh.
/// It is not meant to be used by users and thus hidden from docs.
#[doc(hidden)]
pub fn line_mesh() -> Mesh {
    let nodes = vec![
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(2.0, 0.0, 0.0),
    ];
    let elements = vec![
        Element::new(ElementShape::Line, [0, 1]),
        Element::new(ElementShape::Line, [1, 2]),
    ];
    Mesh::new(nodes, elements).unwrap()
}
