//! Compact description of a target axis.
//!
//! Rebin parameters are written `x1,dx1,x2[,dx2,x3...]`: boundaries `x1 < x2 <
//! x3 ...` separated by steps. Each segment `[x_k, x_k+1]` is divided into bins
//! of width `dx_k` when the step is positive, or into logarithmic bins whose
//! upper boundary is `(1 + |dx_k|)` times the lower one when it is negative.
//!
//! Segment boundaries always appear in the expanded axis. When a segment does
//! not divide evenly, its last bin is shortened to end on the boundary; a last
//! bin narrower than a quarter of its nominal step is merged into the bin
//! before it instead.
//!
//! # Examples
//!
//! ```
//! use rebin_engine::params::RebinParams;
//!
//! let params = "0,1,3,-1,12".parse::<RebinParams>().unwrap();
//! assert_eq!(params.edges(), [0.0, 1.0, 2.0, 3.0, 6.0, 12.0]);
//! ```

use std::{fmt, str::FromStr};

use crate::error::ParamsError;

/// Fraction of the nominal step below which a trailing bin is merged.
const MIN_LAST_BIN_FRACTION: f64 = 0.25;

/// Validated rebin parameters `x1,dx1,x2,...`.
#[derive(Debug, Clone, PartialEq)]
pub struct RebinParams {
    params: Vec<f64>,
}

impl RebinParams {
    /// Largest number of bins a parameter list may expand to.
    pub const MAX_BINS: usize = 10_000_000;

    /// Validates a parameter list.
    ///
    /// # Errors
    ///
    /// Returns a [`ParamsError`] if the list is empty or has an even length,
    /// contains a non-finite number, has a zero step, has boundaries that are
    /// not strictly ascending, requests logarithmic steps from a non-positive
    /// boundary, or would expand to more than [`Self::MAX_BINS`] bins.
    #[expect(clippy::float_cmp)]
    pub fn new(params: Vec<f64>) -> Result<Self, ParamsError> {
        if params.is_empty() {
            return Err(ParamsError::Empty);
        }
        if params.len() % 2 == 0 || params.len() < 3 {
            return Err(ParamsError::InvalidLength { len: params.len() });
        }
        if let Some(bad) = params.iter().find(|p| !p.is_finite()) {
            return Err(ParamsError::InvalidNumber {
                text: bad.to_string(),
            });
        }
        for (index, (low, step, high)) in segments(&params).enumerate() {
            if step == 0.0 {
                return Err(ParamsError::ZeroStep { index });
            }
            if low >= high {
                return Err(ParamsError::NotAscending { low, high });
            }
            if step < 0.0 && low <= 0.0 {
                return Err(ParamsError::NonPositiveLogStart { start: low });
            }
        }
        let bins = segments(&params)
            .map(|(low, step, high)| segment_bins(low, step, high))
            .sum::<f64>();
        #[expect(clippy::cast_precision_loss)]
        let max_bins = Self::MAX_BINS as f64;
        if bins > max_bins {
            return Err(ParamsError::TooManyBins {
                max: Self::MAX_BINS,
            });
        }
        Ok(Self { params })
    }

    /// The raw parameter list.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.params
    }

    /// Expands the parameters into strictly ascending bin edges.
    #[must_use]
    pub fn edges(&self) -> Vec<f64> {
        let mut edges = vec![self.params[0]];
        for (low, step, high) in segments(&self.params) {
            push_segment(&mut edges, low, step, high);
        }
        edges
    }
}

/// Iterates over `(low, step, high)` triples of a parameter list.
fn segments(params: &[f64]) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
    (0..params.len().saturating_sub(1))
        .step_by(2)
        .map(|k| (params[k], params[k + 1], params[k + 2]))
}

/// Upper bound on the number of bins [`push_segment`] produces.
fn segment_bins(low: f64, step: f64, high: f64) -> f64 {
    if step > 0.0 {
        ((high - low) / step).ceil()
    } else {
        ((high / low).ln() / (-step).ln_1p()).ceil()
    }
}

/// Appends the boundaries of `(low, high]` to `edges`, whose last entry is
/// `low`.
#[expect(clippy::cast_precision_loss)]
fn push_segment(edges: &mut Vec<f64>, low: f64, step: f64, high: f64) {
    let segment_start = edges.len();
    let mut current = low;
    let mut n = 1_u64;
    loop {
        // Linear boundaries are recomputed from the segment start to avoid
        // accumulating rounding error over many bins.
        let next = if step > 0.0 {
            low + (n as f64) * step
        } else {
            current * (1.0 - step)
        };
        let nominal = next - current;
        // A step too small to move `current` behaves like reaching the end.
        if next >= high || next <= current {
            let last = high - current;
            if last < MIN_LAST_BIN_FRACTION * nominal && edges.len() > segment_start {
                edges.pop();
            }
            edges.push(high);
            return;
        }
        edges.push(next);
        current = next;
        n += 1;
    }
}

impl FromStr for RebinParams {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParamsError::Empty);
        }
        let params = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .map_err(|_| ParamsError::InvalidNumber {
                        text: part.to_owned(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(params)
    }
}

impl fmt::Display for RebinParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(s: &str) -> Vec<f64> {
        s.parse::<RebinParams>().unwrap().edges()
    }

    #[test]
    fn test_linear_even_division() {
        assert_eq!(edges("0,1,3"), [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_linear_short_last_bin_is_kept() {
        assert_eq!(edges("0,1,3.5"), [0.0, 1.0, 2.0, 3.0, 3.5]);
    }

    #[test]
    fn test_linear_tiny_last_bin_is_merged() {
        assert_eq!(edges("0,1,3.2"), [0.0, 1.0, 2.0, 3.2]);
    }

    #[test]
    fn test_single_bin_is_never_merged_away() {
        assert_eq!(edges("0,10,2"), [0.0, 2.0]);
    }

    #[test]
    fn test_logarithmic() {
        assert_eq!(edges("1,-1,10"), [1.0, 2.0, 4.0, 8.0, 10.0]);
        assert_eq!(edges("1,-1,8.5"), [1.0, 2.0, 4.0, 8.5]);
    }

    #[test]
    fn test_multiple_segments_keep_boundaries() {
        assert_eq!(edges("0,1,2,0.5,3"), [0.0, 1.0, 2.0, 2.5, 3.0]);
        assert_eq!(edges("0,3,2.1,0.5,3.1"), [0.0, 2.1, 2.6, 3.1]);
    }

    #[test]
    fn test_edges_are_strictly_ascending() {
        let edges = edges("100,-0.0006,19990");
        assert!(crate::axis::is_strictly_ascending(&edges));
        assert_eq!(edges.first(), Some(&100.0));
        assert_eq!(edges.last(), Some(&19990.0));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<RebinParams>(), Err(ParamsError::Empty));
        assert_eq!(
            "0,1".parse::<RebinParams>(),
            Err(ParamsError::InvalidLength { len: 2 })
        );
        assert_eq!(
            "1".parse::<RebinParams>(),
            Err(ParamsError::InvalidLength { len: 1 })
        );
        assert_eq!(
            "0,x,1".parse::<RebinParams>(),
            Err(ParamsError::InvalidNumber {
                text: "x".to_owned()
            })
        );
        assert!(
            "0,inf,1"
                .parse::<RebinParams>()
                .unwrap_err()
                .is_invalid_number()
        );
        assert_eq!(
            "0,1,2,0,3".parse::<RebinParams>(),
            Err(ParamsError::ZeroStep { index: 1 })
        );
        assert_eq!(
            "2,1,1".parse::<RebinParams>(),
            Err(ParamsError::NotAscending {
                low: 2.0,
                high: 1.0
            })
        );
        assert_eq!(
            "0,-0.1,1".parse::<RebinParams>(),
            Err(ParamsError::NonPositiveLogStart { start: 0.0 })
        );
    }

    #[test]
    fn test_bin_count_limit() {
        let at_limit = format!("0,1,{}", RebinParams::MAX_BINS);
        assert!(at_limit.parse::<RebinParams>().is_ok());

        let max = RebinParams::MAX_BINS;
        for s in [
            format!("0,1,{}", max + 1),
            "0,1e-9,1".to_owned(),
            "1,-1e-9,10".to_owned(),
            "0,1,1,1e-12,2".to_owned(),
            "-1e308,1,1e308".to_owned(),
        ] {
            assert_eq!(
                s.parse::<RebinParams>(),
                Err(ParamsError::TooManyBins { max }),
                "{s}"
            );
        }
    }

    #[test]
    fn test_display_round_trip() {
        let params = " 0, 0.5 ,2".parse::<RebinParams>().unwrap();
        assert_eq!(params.to_string(), "0,0.5,2");
        assert_eq!(params.to_string().parse::<RebinParams>().unwrap(), params);
    }
}
