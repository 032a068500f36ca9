use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI};

use nalgebra as na;

use super::{MetricError, QualityMetric};
use crate::mesh::{ElementShape, ElementView};

// face decompositions of the solid shapes,
// as index lists into the element's node order

const TET_FACES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];

#[rustfmt::skip]
const HEX_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3], [4, 5, 6, 7],
    [0, 1, 5, 4], [1, 2, 6, 5], [2, 3, 7, 6], [3, 0, 4, 7],
];

const PRISM_TRI_FACES: [[usize; 3]; 2] = [[0, 1, 2], [3, 4, 5]];
const PRISM_QUAD_FACES: [[usize; 4]; 3] = [[0, 1, 4, 3], [1, 2, 5, 4], [2, 0, 3, 5]];

/// The EquiAngleSkew quality measure:
/// how far an element's interior face angles deviate
/// from the ideal equiangular value of its shape family
/// (60° for triangular faces, 90° for quadrilateral ones).
///
/// Values are in `[0, 1]`: 0 for an ideally equiangular element,
/// 1 for a fully collapsed one.
/// Supported shapes are triangles, quads, tetrahedra, hexahedra and prisms;
/// solids are decomposed into their faces
/// and graded by the worst angle found across them.
/// Lines and pyramids are not supported.
#[derive(Clone, Copy, Debug, Default)]
pub struct AngleSkew;

impl QualityMetric for AngleSkew {
    fn name(&self) -> &'static str {
        "EquiAngleSkew"
    }

    fn measure(&self, element: ElementView<'_>) -> Result<f64, MetricError> {
        match element.shape() {
            ElementShape::Triangle => {
                let ext = triangle_extremes([element.node(0), element.node(1), element.node(2)])?;
                Ok(equi_angle_skew(ext, FRAC_PI_3))
            }
            ElementShape::Quad => {
                let ext = quad_extremes([
                    element.node(0),
                    element.node(1),
                    element.node(2),
                    element.node(3),
                ])?;
                Ok(equi_angle_skew(ext, FRAC_PI_2))
            }
            ElementShape::Tetrahedron => {
                let mut ext = AngleExtremes::EMPTY;
                for face in TET_FACES {
                    ext = ext.merge(triangle_extremes(face.map(|i| element.node(i)))?);
                }
                Ok(equi_angle_skew(ext, FRAC_PI_3))
            }
            ElementShape::Hexahedron => {
                let mut ext = AngleExtremes::EMPTY;
                for face in HEX_FACES {
                    ext = ext.merge(quad_extremes(face.map(|i| element.node(i)))?);
                }
                Ok(equi_angle_skew(ext, FRAC_PI_2))
            }
            ElementShape::Prism => {
                // the face families have different ideal angles,
                // so each is graded against its own
                // and the element gets the worse of the two
                let mut tri_ext = AngleExtremes::EMPTY;
                for face in PRISM_TRI_FACES {
                    tri_ext = tri_ext.merge(triangle_extremes(face.map(|i| element.node(i)))?);
                }
                let mut quad_ext = AngleExtremes::EMPTY;
                for face in PRISM_QUAD_FACES {
                    quad_ext = quad_ext.merge(quad_extremes(face.map(|i| element.node(i)))?);
                }
                Ok(equi_angle_skew(tri_ext, FRAC_PI_3)
                    .max(equi_angle_skew(quad_ext, FRAC_PI_2)))
            }
            shape => Err(MetricError::UnsupportedShape(shape)),
        }
    }
}

/// The extreme interior angles found over an element's faces so far.
#[derive(Clone, Copy, Debug)]
struct AngleExtremes {
    min: f64,
    max: f64,
}

impl AngleExtremes {
    const EMPTY: Self = Self {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    fn include(self, angle: f64) -> Self {
        Self {
            min: self.min.min(angle),
            max: self.max.max(angle),
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// The interior angle at `vertex` between the edges to its neighbors.
///
/// A zero-length edge makes the angle undefined
/// and fails the element as degenerate.
fn corner_angle(
    before: na::Vector3<f64>,
    vertex: na::Vector3<f64>,
    after: na::Vector3<f64>,
) -> Result<f64, MetricError> {
    let u = before - vertex;
    let v = after - vertex;
    let denom = u.norm() * v.norm();
    if denom == 0.0 {
        return Err(MetricError::DegenerateGeometry);
    }
    // clamp against rounding pushing the cosine out of acos's domain
    Ok((u.dot(&v) / denom).clamp(-1.0, 1.0).acos())
}

fn triangle_extremes(p: [na::Vector3<f64>; 3]) -> Result<AngleExtremes, MetricError> {
    let ext = AngleExtremes::EMPTY
        .include(corner_angle(p[2], p[0], p[1])?)
        .include(corner_angle(p[0], p[1], p[2])?)
        .include(corner_angle(p[1], p[2], p[0])?);
    Ok(ext)
}

fn quad_extremes(p: [na::Vector3<f64>; 4]) -> Result<AngleExtremes, MetricError> {
    let mut ext = AngleExtremes::EMPTY;
    for i in 0..4 {
        ext = ext.include(corner_angle(p[(i + 3) % 4], p[i], p[(i + 1) % 4])?);
    }
    Ok(ext)
}

/// The EquiAngleSkew formula for one face family:
/// the worse of the normalized deviations of the extreme angles
/// from the family's ideal angle, clamped into `[0, 1]`.
fn equi_angle_skew(ext: AngleExtremes, theta_equi: f64) -> f64 {
    let over = (ext.max - theta_equi) / (PI - theta_equi);
    let under = (theta_equi - ext.min) / theta_equi;
    over.max(under).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{
        line_mesh, tiny_mixed_mesh_2d, tiny_solid_mesh, unit_triangle_mesh, Element, Mesh,
    };
    use crate::quality::QualityEvaluator;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;

    fn single_element_mesh(nodes: Vec<Vector3<f64>>, shape: ElementShape) -> Mesh {
        let indices: Vec<usize> = (0..nodes.len()).collect();
        Mesh::new(nodes, vec![Element::new(shape, indices)]).unwrap()
    }

    fn measure_single(mesh: &Mesh) -> Result<f64, MetricError> {
        AngleSkew.measure(mesh.element(0))
    }

    #[test]
    fn equilateral_triangle_has_zero_skew() {
        let skew = measure_single(&unit_triangle_mesh()).unwrap();
        assert_abs_diff_eq!(skew, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn right_triangle_skew_matches_by_hand_value() {
        let mesh = single_element_mesh(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
            ElementShape::Triangle,
        );
        // angles 90°, 45°, 45°:
        // both the over- and undershoot normalize to exactly 1/4
        let skew = measure_single(&mesh).unwrap();
        assert_abs_diff_eq!(skew, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn square_quad_has_zero_skew() {
        let mesh = single_element_mesh(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(1.0, 1.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
            ElementShape::Quad,
        );
        assert_abs_diff_eq!(measure_single(&mesh).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn sheared_quad_skew_matches_by_hand_value() {
        // parallelogram with 60° and 120° corners
        let mesh = single_element_mesh(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(1.5, f64::sqrt(3.0) / 2.0, 0.0),
                Vector3::new(0.5, f64::sqrt(3.0) / 2.0, 0.0),
            ],
            ElementShape::Quad,
        );
        // (120° - 90°) / 90° == (90° - 60°) / 90° == 1/3
        let skew = measure_single(&mesh).unwrap();
        assert_abs_diff_eq!(skew, 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn ideal_solids_have_zero_skew() {
        let mesh = tiny_solid_mesh();
        // hexahedron (unit cube), tetrahedron (regular), prism (equilateral, square sides)
        for elem_idx in 0..3 {
            let skew = AngleSkew.measure(mesh.element(elem_idx)).unwrap();
            assert_abs_diff_eq!(skew, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn sliver_tetrahedron_approaches_full_skew() {
        // apex almost on the midpoint of a base edge,
        // opening one face angle up to nearly 180°
        let mesh = single_element_mesh(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.5, f64::sqrt(3.0) / 2.0, 0.0),
                Vector3::new(0.5, 1e-9, 1e-9),
            ],
            ElementShape::Tetrahedron,
        );
        let skew = measure_single(&mesh).unwrap();
        assert!(skew > 0.9, "sliver tetrahedron should grade near 1, got {skew}");
        assert!(skew <= 1.0);
    }

    #[test]
    fn degenerate_edges_fail_the_element() {
        // two coincident nodes collapse one edge
        let mesh = single_element_mesh(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 1.0, 0.0),
            ],
            ElementShape::Triangle,
        );
        assert_eq!(
            measure_single(&mesh).unwrap_err(),
            MetricError::DegenerateGeometry,
        );
    }

    #[test]
    fn lines_and_pyramids_are_unsupported() {
        let mesh = line_mesh();
        assert_eq!(
            measure_single(&mesh).unwrap_err(),
            MetricError::UnsupportedShape(ElementShape::Line),
        );

        let mesh = tiny_solid_mesh();
        let pyramid = mesh.element(3);
        assert_eq!(pyramid.shape(), ElementShape::Pyramid);
        assert_eq!(
            AngleSkew.measure(pyramid).unwrap_err(),
            MetricError::UnsupportedShape(ElementShape::Pyramid),
        );
    }

    #[test]
    fn full_evaluation_over_a_mixed_mesh() {
        let mesh = tiny_mixed_mesh_2d();
        let report = QualityEvaluator::new(&mesh, AngleSkew).unwrap().evaluate();

        let values = report.element_quality();
        assert_eq!(values.len(), mesh.element_count());
        assert_abs_diff_eq!(values[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(values[1], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(values[2], 0.25, epsilon = 1e-12);
        assert!(values[3].is_nan());

        assert_abs_diff_eq!(report.min_value().unwrap(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.max_value().unwrap(), 0.25, epsilon = 1e-12);
        assert_eq!(report.issues().len(), 1);

        // every finite value is within the metric's range and the reported extremes
        for &v in values.iter().filter(|v| v.is_finite()) {
            assert!((0.0..=1.0).contains(&v));
            assert!(report.min_value().unwrap() <= v && v <= report.max_value().unwrap());
        }
    }
}
