//! Single-pass rebinning for sorted, overlapping axes.
//!
//! This is the common case for instrument time-of-flight data: both axes are
//! strictly ascending and the new axis starts inside the old one. The sweep
//! moves strictly forward, carrying the per-unit density of the old bin that
//! straddles the current position and adding whole old bins directly, so it
//! avoids the repeated min/max evaluation of [`general::rebin`].
//!
//! Values are treated as bin-integrated counts. Distribution data must be
//! converted to counts first (see [`Histogram::to_counts`]).
//!
//! [`general::rebin`]: crate::general::rebin
//! [`Histogram::to_counts`]: crate::histogram::Histogram::to_counts

use crate::{
    axis,
    error::{AxisRole, RebinError},
    strategy::Rebinned,
};

/// Rebins counts from `old_edges` onto `new_edges`.
///
/// Equivalent to [`rebin_fast_into`] with freshly zeroed buffers and
/// `accumulate == false`.
///
/// # Errors
///
/// * [`RebinError::DimensionMismatch`] - array lengths violate the contract
/// * [`RebinError::NotAscending`] - either axis is not strictly ascending
/// * [`RebinError::NoOverlap`] - the old axis ends at or before the start of
///   the new axis
///
/// # Examples
///
/// ```
/// use rebin_engine::fast::rebin_fast;
///
/// let out = rebin_fast(
///     &[0.0, 1.0, 2.0, 3.0],
///     &[1.0, 2.0, 3.0],
///     &[1.0, 1.0, 1.0],
///     &[0.0, 1.5, 3.0],
/// )
/// .unwrap();
/// assert_eq!(out.values, [2.0, 4.0]);
/// ```
pub fn rebin_fast(
    old_edges: &[f64],
    old_values: &[f64],
    old_errors: &[f64],
    new_edges: &[f64],
) -> Result<Rebinned, RebinError> {
    let new_bins = axis::check_target(new_edges)?;
    let mut values = vec![0.0; new_bins];
    let mut variances = vec![0.0; new_bins];
    rebin_fast_into(
        old_edges,
        old_values,
        old_errors,
        new_edges,
        &mut values,
        &mut variances,
        false,
    )?;
    Ok(Rebinned {
        values,
        errors: variances,
    })
}

/// Rebins counts from `old_edges` into caller-owned buffers.
///
/// With `accumulate == false` both buffers are zeroed first and
/// `new_variances` holds standard deviations on return. With
/// `accumulate == true` contributions are added onto the existing contents and
/// `new_variances` keeps holding variances, so several sources can be streamed
/// into the same buffers; call [`finish_accumulation`] once afterwards.
///
/// Buffers are untouched when an error is returned.
///
/// # Arguments
///
/// * `old_edges` - Strictly ascending boundaries of the source bins
/// * `old_values` - One count per source bin
/// * `old_errors` - One standard deviation per source bin
/// * `new_edges` - Strictly ascending boundaries of the target bins
/// * `new_values` - Output values, one per target bin
/// * `new_variances` - Output errors, one per target bin (see above)
/// * `accumulate` - Add onto existing buffer contents instead of resetting
///
/// # Errors
///
/// Same as [`rebin_fast`]; a buffer whose length differs from the number of
/// target bins is a [`RebinError::DimensionMismatch`].
///
/// # Examples
///
/// ```
/// use rebin_engine::fast::{finish_accumulation, rebin_fast_into};
///
/// let new_edges = [0.0, 2.0, 4.0];
/// let mut values = vec![0.0; 2];
/// let mut variances = vec![0.0; 2];
///
/// for shift in [0.0, 1.0] {
///     let old_edges = [shift, shift + 1.0, shift + 2.0];
///     rebin_fast_into(&old_edges, &[2.0, 2.0], &[1.0, 1.0], &new_edges, &mut values, &mut variances, true)
///         .unwrap();
/// }
/// finish_accumulation(&mut variances);
///
/// assert_eq!(values, [6.0, 2.0]);
/// assert_eq!(variances, [3.0_f64.sqrt(), 1.0]);
/// ```
pub fn rebin_fast_into(
    old_edges: &[f64],
    old_values: &[f64],
    old_errors: &[f64],
    new_edges: &[f64],
    new_values: &mut [f64],
    new_variances: &mut [f64],
    accumulate: bool,
) -> Result<(), RebinError> {
    axis::check_histogram(AxisRole::Old, old_edges, old_values, old_errors)?;
    axis::check_buffers(new_edges, new_values, new_variances)?;
    axis::check_ascending(AxisRole::Old, old_edges)?;
    axis::check_ascending(AxisRole::New, new_edges)?;

    let new_min = new_edges[0];
    let Some(mut iold) = old_edges.iter().position(|&x| x > new_min) else {
        return Err(RebinError::NoOverlap {
            old_max: old_edges[old_edges.len() - 1],
            new_min,
        });
    };

    if !accumulate {
        new_values.fill(0.0);
        new_variances.fill(0.0);
    }

    // Per-unit value and variance of the old bin below boundary `upper`;
    // nothing lies below the first old boundary.
    let density = |upper: usize| {
        if upper == 0 {
            return (0.0, 0.0);
        }
        let bin = upper - 1;
        let width = old_edges[upper] - old_edges[bin];
        (
            old_values[bin] / width,
            old_errors[bin] * old_errors[bin] / width,
        )
    };

    let (mut frac, mut frac_e) = density(iold);
    let mut position = new_min;
    let mut inew = 0;
    loop {
        let new_high = new_edges[inew + 1];
        let old_high = old_edges[iold];

        if new_high < old_high {
            // The new bin ends inside the straddling old bin.
            let width = new_high - position;
            new_values[inew] += frac * width;
            new_variances[inew] += frac_e * width;
            position = new_high;
            inew += 1;
            if inew == new_values.len() {
                break;
            }
            continue;
        }

        // Remainder of the straddling old bin, then every whole old bin.
        let width = old_high - position;
        new_values[inew] += frac * width;
        new_variances[inew] += frac_e * width;
        iold += 1;
        while iold < old_edges.len() && old_edges[iold] <= new_high {
            new_values[inew] += old_values[iold - 1];
            new_variances[inew] += old_errors[iold - 1] * old_errors[iold - 1];
            iold += 1;
        }
        if iold == old_edges.len() {
            break;
        }
        (frac, frac_e) = density(iold);
        position = old_edges[iold - 1];
    }

    if !accumulate {
        finish_accumulation(new_variances);
    }
    Ok(())
}

/// Turns an accumulated variance buffer into standard deviations.
pub fn finish_accumulation(variances: &mut [f64]) {
    for variance in variances {
        *variance = variance.sqrt();
    }
}
