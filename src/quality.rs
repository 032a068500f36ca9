//! The element-quality engine: per-element metric evaluation,
//! aggregate statistics, and histogram access.
//!
//! A [`QualityEvaluator`] binds a metric to a mesh and runs one pass
//! over all elements, producing a [`QualityReport`] with one scalar per
//! element in mesh element order.
//! Elements the metric cannot evaluate get a NaN sentinel value
//! and an entry in the report's issue list;
//! they never abort the pass.
//!
//! ```
//! # use meshgauge::{mesh::tiny_mixed_mesh_2d, quality::{AngleSkew, QualityEvaluator}};
//! let mesh = tiny_mixed_mesh_2d();
//! let report = QualityEvaluator::new(&mesh, AngleSkew)?.evaluate();
//! assert_eq!(report.element_quality().len(), mesh.element_count());
//! let histogram = report.histogram(10)?;
//! # Ok::<(), meshgauge::quality::QualityError>(())
//! ```

/// The EquiAngleSkew metric and its per-shape angle routines.
mod angle_skew;
#[doc(inline)]
pub use angle_skew::AngleSkew;

//

use crate::histogram::Histogram;
use crate::mesh::{ElementShape, ElementView, Mesh};

/// Error in evaluating a quality metric over a mesh
/// or querying the results.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QualityError {
    /// The mesh has no elements to evaluate.
    #[error("mesh has no elements to evaluate")]
    EmptyMesh,
    /// Every element produced the sentinel value,
    /// leaving nothing to aggregate.
    #[error("no element produced a finite quality value")]
    NoFiniteValues,
}

/// Per-element failure of a quality metric.
///
/// These are recoverable by design: the element in question gets
/// the sentinel value and the evaluation pass continues.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricError {
    /// The metric has no formula for the element's shape.
    #[error("shape {0} is not supported by this metric")]
    UnsupportedShape(ElementShape),
    /// A zero-length edge or coincident nodes
    /// prevent the geometric computation.
    #[error("degenerate geometry")]
    DegenerateGeometry,
}

/// A per-element geometric quality measure.
///
/// Implementations compute one scalar for a single element;
/// [`QualityEvaluator`] handles iteration, aggregation,
/// and recovery from per-element failures.
pub trait QualityMetric {
    /// Short metric name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Compute the quality value for one element.
    ///
    /// Returning an error marks the element as unevaluated
    /// without stopping the pass over the remaining elements.
    fn measure(&self, element: ElementView<'_>) -> Result<f64, MetricError>;
}

/// A quality metric bound to a mesh, ready to run.
///
/// Evaluation consumes the evaluator, so a result vector can never be
/// appended to twice; rerunning a metric means constructing a new evaluator.
#[derive(Debug)]
pub struct QualityEvaluator<'m, M> {
    mesh: &'m Mesh,
    metric: M,
}

impl<'m, M: QualityMetric> QualityEvaluator<'m, M> {
    /// Bind a metric to a mesh.
    ///
    /// Fails with [`QualityError::EmptyMesh`] if the mesh has no elements.
    pub fn new(mesh: &'m Mesh, metric: M) -> Result<Self, QualityError> {
        if mesh.element_count() == 0 {
            return Err(QualityError::EmptyMesh);
        }
        Ok(Self { mesh, metric })
    }

    /// Run the metric over every element of the mesh, in element order.
    ///
    /// Elements the metric fails on are assigned [`f64::NAN`],
    /// logged at warn level with their index and shape,
    /// and recorded in the report's [issue list][QualityReport::issues];
    /// the pass always completes over all elements.
    pub fn evaluate(self) -> QualityReport {
        let mut values = Vec::with_capacity(self.mesh.element_count());
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut issues = Vec::new();

        for element in self.mesh.elements() {
            match self.metric.measure(element) {
                Ok(value) if value.is_finite() => {
                    min = min.min(value);
                    max = max.max(value);
                    values.push(value);
                }
                Ok(_) => {
                    // a non-finite value from a metric counts as a degenerate element
                    self.report_issue(&mut issues, &element, MetricError::DegenerateGeometry);
                    values.push(f64::NAN);
                }
                Err(error) => {
                    self.report_issue(&mut issues, &element, error);
                    values.push(f64::NAN);
                }
            }
        }

        QualityReport {
            values,
            min,
            max,
            issues,
        }
    }

    fn report_issue(
        &self,
        issues: &mut Vec<ElementIssue>,
        element: &ElementView<'_>,
        error: MetricError,
    ) {
        log::warn!(
            "element {} ({}) not evaluated by {}: {}",
            element.index(),
            element.shape(),
            self.metric.name(),
            error,
        );
        issues.push(ElementIssue {
            element: element.index(),
            shape: element.shape(),
            error,
        });
    }
}

/// One entry of a report's issue list:
/// which element could not be evaluated, and why.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementIssue {
    /// Index of the element in mesh element order.
    pub element: usize,
    /// The element's shape tag.
    pub shape: ElementShape,
    /// The per-element failure.
    pub error: MetricError,
}

/// The outcome of one evaluation pass.
///
/// Holds one value per mesh element, in mesh element order.
/// Elements that could not be evaluated carry the sentinel [`f64::NAN`];
/// sentinels are excluded from the min/max statistics and from histograms,
/// and each has a matching entry in [`issues`][Self::issues].
#[derive(Clone, Debug)]
pub struct QualityReport {
    values: Vec<f64>,
    min: f64,
    max: f64,
    issues: Vec<ElementIssue>,
}

impl QualityReport {
    /// The per-element quality values, aligned 1:1 with mesh element order.
    #[inline]
    pub fn element_quality(&self) -> &[f64] {
        &self.values
    }

    /// The smallest finite quality value produced,
    /// or None if every element got the sentinel.
    #[inline]
    pub fn min_value(&self) -> Option<f64> {
        self.min.is_finite().then_some(self.min)
    }

    /// The largest finite quality value produced,
    /// or None if every element got the sentinel.
    #[inline]
    pub fn max_value(&self) -> Option<f64> {
        self.max.is_finite().then_some(self.max)
    }

    /// The elements that could not be evaluated, in element order.
    #[inline]
    pub fn issues(&self) -> &[ElementIssue] {
        &self.issues
    }

    /// Bin the finite quality values into `nclasses` equal-width classes
    /// (0 selects an automatic class count, see [`Histogram::from_samples`]).
    ///
    /// Fails with [`QualityError::NoFiniteValues`] if every element
    /// produced the sentinel.
    pub fn histogram(&self, nclasses: usize) -> Result<Histogram, QualityError> {
        Histogram::from_samples(&self.values, nclasses).ok_or(QualityError::NoFiniteValues)
    }
}
