//! Axis partition checks shared by both rebinning algorithms.
//!
//! An axis partition is a slice of `N + 1` boundaries describing `N`
//! contiguous half-open bins `[x[i], x[i + 1])`.

use std::cmp::Ordering;

use crate::error::{AxisRole, RebinError};

/// Returns the number of bins described by `edges`.
///
/// # Examples
///
/// ```
/// use rebin_engine::axis::num_bins;
///
/// assert_eq!(num_bins(&[0.0, 1.0, 2.0]), 2);
/// assert_eq!(num_bins(&[0.0]), 0);
/// assert_eq!(num_bins(&[]), 0);
/// ```
#[must_use]
pub fn num_bins(edges: &[f64]) -> usize {
    edges.len().saturating_sub(1)
}

/// Returns an iterator over the widths of the bins described by `edges`.
///
/// Widths are signed: a descending pair of boundaries yields a negative width.
///
/// # Examples
///
/// ```
/// use rebin_engine::axis::bin_widths;
///
/// let widths = bin_widths(&[0.0, 1.0, 3.0]).collect::<Vec<_>>();
/// assert_eq!(widths, [1.0, 2.0]);
/// ```
pub fn bin_widths(edges: &[f64]) -> impl Iterator<Item = f64> + '_ {
    edges.windows(2).map(|w| w[1] - w[0])
}

/// Returns `true` if every boundary is strictly greater than the previous one.
///
/// NaN boundaries never compare greater, so an axis containing NaN is not
/// ascending.
///
/// # Examples
///
/// ```
/// use rebin_engine::axis::is_strictly_ascending;
///
/// assert!(is_strictly_ascending(&[0.0, 1.0, 2.5]));
/// assert!(!is_strictly_ascending(&[0.0, 1.0, 1.0]));
/// assert!(!is_strictly_ascending(&[2.0, 1.0]));
/// ```
#[must_use]
pub fn is_strictly_ascending(edges: &[f64]) -> bool {
    first_non_ascending(edges).is_none()
}

/// Index of the first boundary that is not strictly above its predecessor.
fn first_non_ascending(edges: &[f64]) -> Option<usize> {
    edges
        .windows(2)
        .position(|w| w[1].partial_cmp(&w[0]) != Some(Ordering::Greater))
        .map(|i| i + 1)
}

/// Checks the `len(edges) == len(values) + 1 == len(errors) + 1` contract.
pub(crate) fn check_histogram(
    axis: AxisRole,
    edges: &[f64],
    values: &[f64],
    errors: &[f64],
) -> Result<(), RebinError> {
    if edges.len() < 2 || edges.len() != values.len() + 1 || edges.len() != errors.len() + 1 {
        return Err(RebinError::DimensionMismatch {
            axis,
            edges: edges.len(),
            values: values.len(),
            errors: errors.len(),
        });
    }
    Ok(())
}

/// Checks that a target axis describes at least one bin.
pub(crate) fn check_target(edges: &[f64]) -> Result<usize, RebinError> {
    if edges.len() < 2 {
        return Err(RebinError::DimensionMismatch {
            axis: AxisRole::New,
            edges: edges.len(),
            values: 0,
            errors: 0,
        });
    }
    Ok(edges.len() - 1)
}

/// Checks that caller-owned output buffers match the target axis.
pub(crate) fn check_buffers(
    edges: &[f64],
    values: &[f64],
    variances: &[f64],
) -> Result<(), RebinError> {
    check_histogram(AxisRole::New, edges, values, variances)
}

/// Rejects axes with repeated boundaries (zero-width bins).
#[expect(clippy::float_cmp)]
pub(crate) fn check_no_zero_width(edges: &[f64]) -> Result<(), RebinError> {
    match bin_widths(edges).position(|w| w == 0.0) {
        Some(old_bin) => Err(RebinError::DegenerateBin {
            old_bin,
            overlap: 0.0,
            width: 0.0,
        }),
        None => Ok(()),
    }
}

pub(crate) fn check_ascending(axis: AxisRole, edges: &[f64]) -> Result<(), RebinError> {
    match first_non_ascending(edges) {
        Some(index) => Err(RebinError::NotAscending { axis, index }),
        None => Ok(()),
    }
}
