//! Equal-width binning of scalar samples for quality reporting.

use itertools::{Itertools, MinMaxResult};

/// One histogram bin: a half-open interval `[lower, upper)` and its sample count.
///
/// The last bin of a histogram is closed on the right instead,
/// so that the maximum sample lands in it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistogramBin {
    /// Inclusive lower bound of the bin.
    pub lower: f64,
    /// Upper bound of the bin (exclusive except for the last bin).
    pub upper: f64,
    /// Number of samples that fell into the bin.
    pub count: usize,
}

/// A histogram of scalar samples over contiguous equal-width bins
/// covering the sample range.
///
/// Non-finite samples (NaN sentinels, infinities) are excluded from binning;
/// [`sample_count`][Self::sample_count] reports only the binned samples.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Bin the finite values of `samples` into `nclasses` equal-width classes.
    ///
    /// A class count of 0 selects the square-root rule:
    /// `ceil(sqrt(n))` classes for `n` finite samples.
    /// If all finite samples share one value, the result is a single
    /// zero-width bin holding all of them.
    ///
    /// Returns `None` when `samples` contains no finite value to bin.
    pub fn from_samples(samples: &[f64], nclasses: usize) -> Option<Self> {
        let finite = || samples.iter().copied().filter(|v| v.is_finite());

        let (min, max) = match finite().minmax() {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(v) => (v, v),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        let sample_count = finite().count();

        if min == max {
            return Some(Self {
                bins: vec![HistogramBin {
                    lower: min,
                    upper: min,
                    count: sample_count,
                }],
            });
        }

        let nclasses = if nclasses == 0 {
            (sample_count as f64).sqrt().ceil() as usize
        } else {
            nclasses
        };
        let width = (max - min) / nclasses as f64;

        let mut counts = vec![0_usize; nclasses];
        for v in finite() {
            // the max value (and only it) overshoots the last half-open
            // interval, so the linear index is clamped into it
            let bin = (((v - min) / width) as usize).min(nclasses - 1);
            counts[bin] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: min + i as f64 * width,
                upper: if i + 1 == nclasses {
                    max
                } else {
                    min + (i + 1) as f64 * width
                },
                count,
            })
            .collect();
        Some(Self { bins })
    }

    /// Get the bins in ascending order of their bounds.
    #[inline]
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    /// The total number of samples that were binned,
    /// i.e. the count of finite values in the input.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}
