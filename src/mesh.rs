//! The unstructured mesh model: nodes, elements, and read-only views into them.

/// Small hand-built meshes shared by tests across modules.
mod samples;
#[doc(hidden)]
pub use samples::{line_mesh, tiny_mixed_mesh_2d, tiny_solid_mesh, unit_triangle_mesh};

//

use nalgebra as na;

/// The topological class of a mesh element.
///
/// The numbering of an element's nodes is fixed per shape;
/// see the variant docs for the conventions solids are decomposed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementShape {
    /// A line segment between two nodes.
    Line,
    /// A triangle with counterclockwise node winding.
    Triangle,
    /// A quadrilateral with nodes in cyclic order.
    Quad,
    /// A tetrahedron; any node order, as all node triples are faces.
    Tetrahedron,
    /// A hexahedron with nodes 0-3 forming the bottom face in cyclic order
    /// and node `i + 4` stacked above node `i`.
    Hexahedron,
    /// A prism with triangle 0-1-2 at the bottom
    /// and node `i + 3` stacked above node `i`.
    Prism,
    /// A pyramid with quad base 0-3 in cyclic order and apex 4.
    Pyramid,
}

impl ElementShape {
    /// The number of nodes an element of this shape has.
    #[inline]
    pub fn node_count(self) -> usize {
        match self {
            Self::Line => 2,
            Self::Triangle => 3,
            Self::Quad | Self::Tetrahedron => 4,
            Self::Pyramid => 5,
            Self::Prism => 6,
            Self::Hexahedron => 8,
        }
    }

    /// The topological dimension of this shape.
    #[inline]
    pub fn dimension(self) -> usize {
        match self {
            Self::Line => 1,
            Self::Triangle | Self::Quad => 2,
            Self::Tetrahedron | Self::Hexahedron | Self::Prism | Self::Pyramid => 3,
        }
    }
}

impl std::fmt::Display for ElementShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Line => "line",
            Self::Triangle => "triangle",
            Self::Quad => "quad",
            Self::Tetrahedron => "tetrahedron",
            Self::Hexahedron => "hexahedron",
            Self::Prism => "prism",
            Self::Pyramid => "pyramid",
        };
        f.write_str(name)
    }
}

/// One mesh element: a shape tag plus the ordered indices of its nodes.
///
/// Elements are plain data until handed to [`Mesh::new`],
/// which validates the index list against the shape and the node array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// The topological class of the element.
    pub shape: ElementShape,
    /// Indices into the mesh's node array, in the winding defined by `shape`.
    pub nodes: Vec<usize>,
}

impl Element {
    /// Shorthand for constructing an element from a shape and its node indices.
    #[inline]
    pub fn new(shape: ElementShape, nodes: impl Into<Vec<usize>>) -> Self {
        Self {
            shape,
            nodes: nodes.into(),
        }
    }
}

/// Error in constructing a [`Mesh`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The node array is empty but elements were given.
    #[error("mesh has elements but no nodes")]
    NoNodes,
    /// An element references a node index outside the node array.
    #[error("element {element} references invalid node index {index}")]
    InvalidNodeIndex {
        /// Index of the offending element.
        element: usize,
        /// The out-of-bounds node index.
        index: usize,
    },
    /// An element's node list does not match its shape.
    #[error("element {element} is a {shape} and needs {expected} nodes, got {actual}")]
    WrongNodeCount {
        /// Index of the offending element.
        element: usize,
        /// The element's shape tag.
        shape: ElementShape,
        /// Node count required by the shape.
        expected: usize,
        /// Node count actually given.
        actual: usize,
    },
}

/// An unstructured mesh of 3D nodes and heterogeneous elements.
///
/// Nodes and elements are stored in the order given at construction;
/// an element's index in that order is its stable identity,
/// and all derived data (quality vectors, issue lists)
/// refers back to elements by it.
/// The mesh is immutable after construction.
#[derive(Clone, Debug)]
pub struct Mesh {
    nodes: Vec<na::Vector3<f64>>,
    elements: Vec<Element>,
}

impl Mesh {
    /// Construct a mesh from nodes and elements, validating the elements.
    ///
    /// Every element must carry exactly the node count its shape requires,
    /// and every node index must be within the node array.
    pub fn new(nodes: Vec<na::Vector3<f64>>, elements: Vec<Element>) -> Result<Self, MeshError> {
        if nodes.is_empty() && !elements.is_empty() {
            return Err(MeshError::NoNodes);
        }
        for (elem_idx, elem) in elements.iter().enumerate() {
            let expected = elem.shape.node_count();
            if elem.nodes.len() != expected {
                return Err(MeshError::WrongNodeCount {
                    element: elem_idx,
                    shape: elem.shape,
                    expected,
                    actual: elem.nodes.len(),
                });
            }
            if let Some(&index) = elem.nodes.iter().find(|&&n| n >= nodes.len()) {
                return Err(MeshError::InvalidNodeIndex {
                    element: elem_idx,
                    index,
                });
            }
        }
        Ok(Self { nodes, elements })
    }

    /// The topological dimension of the mesh,
    /// i.e. the highest dimension among its elements (0 for an empty mesh).
    #[inline]
    pub fn dimension(&self) -> usize {
        self.elements
            .iter()
            .map(|e| e.shape.dimension())
            .max()
            .unwrap_or(0)
    }

    /// The number of nodes in the mesh.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The number of elements in the mesh.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Get a slice of all node coordinates in the mesh.
    #[inline]
    pub fn nodes(&self) -> &[na::Vector3<f64>] {
        &self.nodes
    }

    /// Get a view into the element at the given index.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn element(&self, index: usize) -> ElementView<'_> {
        ElementView {
            index,
            element: &self.elements[index],
            nodes: &self.nodes,
        }
    }

    /// Iterate over all elements of the mesh in index order.
    pub fn elements(&self) -> ElementIter<'_> {
        ElementIter {
            mesh: self,
            index: 0,
        }
    }
}

//
// views and iterators
//

/// A view into a single element's data,
/// resolving its node indices against the mesh's node array.
#[derive(Clone, Copy, Debug)]
pub struct ElementView<'a> {
    index: usize,
    element: &'a Element,
    // view into all nodes of the mesh,
    // indexed into by the element's node indices
    nodes: &'a [na::Vector3<f64>],
}

impl<'a> ElementView<'a> {
    /// The index of this element in the mesh's element order.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The shape tag of this element.
    #[inline]
    pub fn shape(&self) -> ElementShape {
        self.element.shape
    }

    /// The ordered node indices of this element.
    #[inline]
    pub fn node_indices(&self) -> &'a [usize] {
        &self.element.nodes
    }

    /// The coordinates of the element's `i`th node.
    ///
    /// # Panics
    /// Panics if `i` is outside the element's node list.
    #[inline]
    pub fn node(&self, i: usize) -> na::Vector3<f64> {
        self.nodes[self.element.nodes[i]]
    }

    /// Iterate over the coordinates of this element's nodes.
    #[inline]
    pub fn nodes(&self) -> impl '_ + Iterator<Item = na::Vector3<f64>> {
        self.element.nodes.iter().map(|&i| self.nodes[i])
    }
}

/// Iterator over the elements of a mesh in index order.
#[derive(Clone, Copy, Debug)]
pub struct ElementIter<'a> {
    mesh: &'a Mesh,
    index: usize,
}

impl<'a> Iterator for ElementIter<'a> {
    type Item = ElementView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.mesh.element_count() {
            return None;
        }
        let ret = self.mesh.element(self.index);
        self.index += 1;
        Some(ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::izip;
    use nalgebra::Vector3;

    #[test]
    fn construction_validates_elements() {
        let nodes = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ];

        let tri = Element::new(ElementShape::Triangle, [0, 1, 2]);
        assert!(Mesh::new(nodes.clone(), vec![tri.clone()]).is_ok());

        let out_of_bounds = Element::new(ElementShape::Triangle, [0, 1, 7]);
        assert_eq!(
            Mesh::new(nodes.clone(), vec![tri.clone(), out_of_bounds]).unwrap_err(),
            MeshError::InvalidNodeIndex {
                element: 1,
                index: 7
            },
        );

        let too_few = Element::new(ElementShape::Quad, [0, 1, 2]);
        assert_eq!(
            Mesh::new(nodes, vec![too_few]).unwrap_err(),
            MeshError::WrongNodeCount {
                element: 0,
                shape: ElementShape::Quad,
                expected: 4,
                actual: 3,
            },
        );

        assert_eq!(
            Mesh::new(Vec::new(), vec![tri]).unwrap_err(),
            MeshError::NoNodes,
        );
    }

    #[test]
    fn empty_mesh_is_valid() {
        let mesh = Mesh::new(Vec::new(), Vec::new()).unwrap();
        assert_eq!(mesh.node_count(), 0);
        assert_eq!(mesh.element_count(), 0);
        assert_eq!(mesh.dimension(), 0);
        assert!(mesh.elements().next().is_none());
    }

    #[test]
    fn dimension_is_highest_element_dimension() {
        assert_eq!(line_mesh().dimension(), 1);
        assert_eq!(tiny_mixed_mesh_2d().dimension(), 2);
        assert_eq!(tiny_solid_mesh().dimension(), 3);
    }

    #[test]
    fn element_views_resolve_nodes() {
        let mesh = tiny_mixed_mesh_2d();
        for (expected_idx, elem) in mesh.elements().enumerate() {
            assert_eq!(elem.index(), expected_idx);
            assert_eq!(elem.node_indices().len(), elem.shape().node_count());
            for (i, (coords, &node_idx)) in izip!(elem.nodes(), elem.node_indices()).enumerate() {
                assert_eq!(coords, mesh.nodes()[node_idx]);
                assert_eq!(coords, elem.node(i));
            }
        }
    }
}
