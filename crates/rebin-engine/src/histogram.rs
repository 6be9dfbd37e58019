use serde::{Deserialize, Serialize};

use crate::{
    axis,
    error::{AxisRole, RebinError},
    fast,
    strategy::{RebinStrategy, Rebinned},
};

/// A 1-D histogram with per-bin uncertainties.
///
/// The histogram owns its bin edges, one value and one standard deviation per
/// bin, and the convention its values are expressed in. The length contract
/// `edges.len() == values.len() + 1 == errors.len() + 1` is checked on
/// construction and on deserialization.
///
/// # Examples
///
/// ```
/// use rebin_engine::histogram::Histogram;
///
/// let histogram = Histogram::from_counts(vec![0.0, 1.0, 3.0], vec![4.0, 9.0]).unwrap();
/// assert_eq!(histogram.errors(), [2.0, 3.0]);
/// assert_eq!(histogram.integral(), 13.0);
///
/// let coarse = histogram.rebin(&[0.0, 3.0]).unwrap();
/// assert_eq!(coarse.values(), [13.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HistogramData")]
pub struct Histogram {
    edges: Vec<f64>,
    values: Vec<f64>,
    errors: Vec<f64>,
    distribution: bool,
}

/// Unvalidated wire form of a [`Histogram`].
///
/// Missing errors default to Poisson errors of the integrated counts.
#[derive(Debug, Deserialize)]
struct HistogramData {
    edges: Vec<f64>,
    values: Vec<f64>,
    #[serde(default)]
    errors: Option<Vec<f64>>,
    #[serde(default)]
    distribution: bool,
}

impl TryFrom<HistogramData> for Histogram {
    type Error = RebinError;

    fn try_from(data: HistogramData) -> Result<Self, Self::Error> {
        match data.errors {
            Some(errors) => Self::new(data.edges, data.values, errors, data.distribution),
            None if data.distribution => {
                axis::check_histogram(AxisRole::Old, &data.edges, &data.values, &data.values)?;
                let errors = poisson_rate_errors(&data.edges, &data.values)?;
                Self::new(data.edges, data.values, errors, true)
            }
            None => Self::from_counts(data.edges, data.values),
        }
    }
}

/// Poisson error of each integrated count `rate * width`, expressed per unit
/// width.
#[expect(clippy::float_cmp)]
fn poisson_rate_errors(edges: &[f64], rates: &[f64]) -> Result<Vec<f64>, RebinError> {
    axis::bin_widths(edges)
        .zip(rates)
        .enumerate()
        .map(|(bin, (width, rate))| {
            if width == 0.0 {
                return Err(RebinError::InvalidAxis {
                    axis: AxisRole::Old,
                    bin,
                });
            }
            Ok((rate * width).abs().sqrt() / width.abs())
        })
        .collect()
}

impl Histogram {
    /// Creates a histogram after checking the length contract.
    pub fn new(
        edges: Vec<f64>,
        values: Vec<f64>,
        errors: Vec<f64>,
        distribution: bool,
    ) -> Result<Self, RebinError> {
        axis::check_histogram(AxisRole::Old, &edges, &values, &errors)?;
        Ok(Self {
            edges,
            values,
            errors,
            distribution,
        })
    }

    /// Creates a counts histogram with Poisson errors `sqrt(|count|)`.
    pub fn from_counts(edges: Vec<f64>, counts: Vec<f64>) -> Result<Self, RebinError> {
        let errors = counts.iter().map(|c| c.abs().sqrt()).collect();
        Self::new(edges, counts, errors, false)
    }

    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    /// Whether values are rates per unit axis length.
    #[must_use]
    pub fn is_distribution(&self) -> bool {
        self.distribution
    }

    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.values.len()
    }

    /// Total integrated signal.
    ///
    /// The sum of values for counts, the sum of `value * width` for a
    /// distribution.
    #[must_use]
    pub fn integral(&self) -> f64 {
        if self.distribution {
            self.values
                .iter()
                .zip(axis::bin_widths(&self.edges))
                .map(|(v, w)| v * w)
                .sum()
        } else {
            self.values.iter().sum()
        }
    }

    /// Converts to the distribution convention by dividing values and errors
    /// by the bin width.
    ///
    /// Returns a copy when the histogram already is a distribution.
    ///
    /// # Errors
    ///
    /// [`RebinError::InvalidAxis`] if a bin has zero width.
    pub fn to_distribution(&self) -> Result<Self, RebinError> {
        self.with_convention(true, AxisRole::Old)
    }

    /// Converts to the counts convention by multiplying values and errors by
    /// the bin width.
    ///
    /// Returns a copy when the histogram already holds counts.
    pub fn to_counts(&self) -> Result<Self, RebinError> {
        self.with_convention(false, AxisRole::Old)
    }

    #[expect(clippy::float_cmp)]
    fn with_convention(&self, distribution: bool, role: AxisRole) -> Result<Self, RebinError> {
        if self.distribution == distribution {
            return Ok(self.clone());
        }
        let mut values = Vec::with_capacity(self.values.len());
        let mut errors = Vec::with_capacity(self.errors.len());
        for (bin, width) in axis::bin_widths(&self.edges).enumerate() {
            let scale = if distribution {
                if width == 0.0 {
                    return Err(RebinError::InvalidAxis { axis: role, bin });
                }
                width.recip()
            } else {
                width
            };
            values.push(self.values[bin] * scale);
            errors.push(self.errors[bin] * scale.abs());
        }
        Ok(Self {
            edges: self.edges.clone(),
            values,
            errors,
            distribution,
        })
    }

    /// Rebins onto `new_edges` with the algorithm picked by
    /// [`RebinStrategy::select`].
    ///
    /// Distribution histograms whose axes qualify for the fast path are
    /// converted to counts, rebinned, and converted back.
    pub fn rebin(&self, new_edges: &[f64]) -> Result<Self, RebinError> {
        let strategy = match RebinStrategy::select(&self.edges, new_edges, false) {
            RebinStrategy::FastMonotonic => RebinStrategy::FastMonotonic,
            RebinStrategy::General { .. } => RebinStrategy::General {
                distribution: self.distribution,
            },
        };
        log::debug!(
            "rebinning {} bins onto {} bins with {strategy:?}",
            self.num_bins(),
            axis::num_bins(new_edges)
        );
        self.rebin_with(new_edges, strategy)
    }

    /// Rebins onto `new_edges` with an explicit algorithm.
    ///
    /// The strategy fixes the convention the algorithm runs in: counts for
    /// [`RebinStrategy::FastMonotonic`], `distribution` for
    /// [`RebinStrategy::General`]. The histogram is converted into that
    /// convention if needed, and the result is converted back, so the output
    /// always has the same convention as `self`.
    pub fn rebin_with(&self, new_edges: &[f64], strategy: RebinStrategy) -> Result<Self, RebinError> {
        let working_distribution = match strategy {
            RebinStrategy::General { distribution } => distribution,
            RebinStrategy::FastMonotonic => false,
        };
        if working_distribution != self.distribution {
            log::debug!(
                "converting {} histogram for {strategy:?}",
                if self.distribution { "distribution" } else { "counts" },
            );
        }
        let source = self.with_convention(working_distribution, AxisRole::Old)?;
        let Rebinned { values, errors } =
            strategy.rebin(&source.edges, &source.values, &source.errors, new_edges)?;
        let rebinned = Self {
            edges: new_edges.to_vec(),
            values,
            errors,
            distribution: working_distribution,
        };
        rebinned.with_convention(self.distribution, AxisRole::New)
    }

    /// Rebins onto the edges of `other`.
    pub fn rebin_like(&self, other: &Histogram) -> Result<Self, RebinError> {
        self.rebin(&other.edges)
    }
}

/// Streams several histograms onto one target axis.
///
/// Sources are rebinned with the fast path in accumulate mode, so every
/// source must be binned on a strictly ascending axis that overlaps the start
/// of the target axis. Distribution sources are converted to counts first; the
/// accumulated result always holds counts.
///
/// # Examples
///
/// ```
/// use rebin_engine::histogram::{Accumulator, Histogram};
///
/// let mut accumulator = Accumulator::new(vec![0.0, 2.0, 4.0]).unwrap();
/// accumulator
///     .add(&Histogram::from_counts(vec![0.0, 1.0, 2.0], vec![1.0, 3.0]).unwrap())
///     .unwrap();
/// accumulator
///     .add(&Histogram::from_counts(vec![0.0, 4.0], vec![8.0]).unwrap())
///     .unwrap();
///
/// let total = accumulator.finish();
/// assert_eq!(total.values(), [8.0, 4.0]);
/// assert_eq!(total.integral(), 12.0);
/// ```
#[derive(Debug, Clone)]
pub struct Accumulator {
    edges: Vec<f64>,
    values: Vec<f64>,
    variances: Vec<f64>,
    sources: usize,
}

impl Accumulator {
    /// Creates an empty accumulator on `edges`.
    ///
    /// # Errors
    ///
    /// [`RebinError::DimensionMismatch`] for fewer than two edges,
    /// [`RebinError::NotAscending`] if the edges are not strictly ascending.
    pub fn new(edges: Vec<f64>) -> Result<Self, RebinError> {
        let bins = axis::check_target(&edges)?;
        axis::check_ascending(AxisRole::New, &edges)?;
        Ok(Self {
            edges,
            values: vec![0.0; bins],
            variances: vec![0.0; bins],
            sources: 0,
        })
    }

    /// Adds `histogram` onto the accumulated totals.
    ///
    /// The totals are unchanged when an error is returned.
    pub fn add(&mut self, histogram: &Histogram) -> Result<(), RebinError> {
        let source = histogram.to_counts()?;
        fast::rebin_fast_into(
            &source.edges,
            &source.values,
            &source.errors,
            &self.edges,
            &mut self.values,
            &mut self.variances,
            true,
        )?;
        self.sources += 1;
        log::debug!("accumulated source #{}", self.sources);
        Ok(())
    }

    /// Number of histograms added so far.
    #[must_use]
    pub fn sources(&self) -> usize {
        self.sources
    }

    /// Returns the accumulated counts histogram.
    #[must_use]
    pub fn finish(self) -> Histogram {
        let Self {
            edges,
            values,
            mut variances,
            ..
        } = self;
        fast::finish_accumulation(&mut variances);
        Histogram {
            edges,
            values,
            errors: variances,
            distribution: false,
        }
    }
}
