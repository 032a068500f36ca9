//! `meshgauge` assesses the geometric quality of unstructured
//! finite-element meshes with heterogeneous element shapes
//! (triangles, quads, tetrahedra, hexahedra, prisms).
//!
//! A [`QualityEvaluator`] runs a pluggable [`QualityMetric`]
//! (the built-in one is [`AngleSkew`], the EquiAngleSkew measure)
//! over every element of a [`Mesh`] and produces a [`QualityReport`]:
//! one scalar per element plus min/max statistics,
//! a [`Histogram`] on demand, and a list of elements
//! the metric could not evaluate.
//! 2D meshes can additionally be lowered to a plain geometry model
//! with [`geometry::convert_mesh_to_geometry`].

#![warn(missing_docs)]

pub mod mesh;
#[doc(inline)]
pub use mesh::{Element, ElementIter, ElementShape, ElementView, Mesh, MeshError};

pub mod quality;
#[doc(inline)]
pub use quality::{
    AngleSkew, ElementIssue, MetricError, QualityError, QualityEvaluator, QualityMetric,
    QualityReport,
};

pub mod histogram;
#[doc(inline)]
pub use histogram::{Histogram, HistogramBin};

pub mod geometry;

// nalgebra re-exports of common types for convenience

pub use nalgebra as na;
/// Type alias for a 3D `nalgebra` vector.
pub type Vec3 = na::Vector3<f64>;
