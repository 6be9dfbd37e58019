//! General overlap-integration rebinning.
//!
//! Redistributes values from one axis partition onto another by walking both
//! partitions with a pair of cursors and weighting every old bin by the length
//! of its intersection with each new bin it touches. Unlike the
//! [`fast`](crate::fast) path, the new axis may start or end anywhere relative
//! to the old one; bins outside the overlap simply receive nothing.
//!
//! # Conventions
//!
//! - **Counts** (`distribution == false`): values are bin-integrated. The old
//!   bin's share is `overlap / width` of its value, and the output stays
//!   bin-integrated.
//! - **Distribution** (`distribution == true`): values are per unit of the axis
//!   variable. Contributions are integrated over the overlap, then the output
//!   is divided by the new bin width so it is again a rate.
//!
//! Uncertainties are propagated as variances and square-rooted once at the end.

use crate::{
    axis,
    error::{AxisRole, RebinError},
    strategy::Rebinned,
};

/// Rebins `old_values`/`old_errors` from `old_edges` onto `new_edges`.
///
/// # Arguments
///
/// * `old_edges` - Boundaries of the source bins (`N + 1` entries)
/// * `old_values` - One value per source bin (`N` entries)
/// * `old_errors` - One standard deviation per source bin (`N` entries)
/// * `new_edges` - Boundaries of the target bins (at least two entries)
/// * `distribution` - Whether values are rates per unit axis length
///
/// # Returns
///
/// Values and standard deviations for each target bin. Target bins with no
/// overlap with the source axis are zero.
///
/// # Errors
///
/// * [`RebinError::DimensionMismatch`] - array lengths violate the contract
/// * [`RebinError::DegenerateBin`] - the old axis has a repeated boundary, or
///   an overlapping pair of bins has non-positive overlap or width
/// * [`RebinError::InvalidAxis`] - `distribution` is set and a target bin has
///   zero width
///
/// # Examples
///
/// ```
/// use rebin_engine::general::rebin;
///
/// // One bin of 12 counts split in half.
/// let out = rebin(&[0.0, 2.0], &[12.0], &[2.0], &[0.0, 1.0, 2.0], false).unwrap();
/// assert_eq!(out.values, [6.0, 6.0]);
/// assert!((out.errors[0] - 2.0_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn rebin(
    old_edges: &[f64],
    old_values: &[f64],
    old_errors: &[f64],
    new_edges: &[f64],
    distribution: bool,
) -> Result<Rebinned, RebinError> {
    axis::check_histogram(AxisRole::Old, old_edges, old_values, old_errors)?;
    let new_bins = axis::check_target(new_edges)?;
    axis::check_no_zero_width(old_edges)?;

    let old_bins = old_values.len();
    let mut values = vec![0.0; new_bins];
    let mut variances = vec![0.0; new_bins];

    let mut iold = 0;
    let mut inew = 0;
    while iold < old_bins && inew < new_bins {
        let (old_low, old_high) = (old_edges[iold], old_edges[iold + 1]);
        let (new_low, new_high) = (new_edges[inew], new_edges[inew + 1]);

        if new_high <= old_low {
            inew += 1;
            continue;
        }
        if old_high <= new_low {
            iold += 1;
            continue;
        }

        let overlap = old_high.min(new_high) - old_low.max(new_low);
        let width = old_high - old_low;
        if overlap <= 0.0 || width <= 0.0 {
            return Err(RebinError::DegenerateBin {
                old_bin: iold,
                overlap,
                width,
            });
        }

        let error_sq = old_errors[iold] * old_errors[iold];
        if distribution {
            values[inew] += old_values[iold] * overlap;
            variances[inew] += error_sq * overlap * width;
        } else {
            // Dividing here avoids a temporary per-unit copy of the old values.
            values[inew] += old_values[iold] * overlap / width;
            variances[inew] += error_sq * overlap / width;
        }

        // On a shared upper boundary only the new cursor moves.
        if new_high > old_high {
            iold += 1;
        } else {
            inew += 1;
        }
    }

    if distribution {
        to_rates(new_edges, &mut values, &mut variances)?;
    } else {
        for variance in &mut variances {
            *variance = variance.sqrt();
        }
    }

    Ok(Rebinned {
        values,
        errors: variances,
    })
}

/// Converts integrated values and variances back into rates and standard
/// deviations per unit width.
#[expect(clippy::float_cmp)]
fn to_rates(edges: &[f64], values: &mut [f64], variances: &mut [f64]) -> Result<(), RebinError> {
    for (bin, width) in axis::bin_widths(edges).enumerate() {
        if width == 0.0 {
            return Err(RebinError::InvalidAxis {
                axis: AxisRole::New,
                bin,
            });
        }
        values[bin] /= width;
        variances[bin] = variances[bin].sqrt() / width;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < EPS, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn test_split_bin_counts() {
        let out = rebin(&[0.0, 2.0], &[12.0], &[3.0], &[0.0, 1.0, 2.0], false).unwrap();
        assert_close(&out.values, &[6.0, 6.0]);
        let expected = (9.0_f64 * 0.5).sqrt();
        assert_close(&out.errors, &[expected, expected]);
    }

    #[test]
    fn test_distribution_scaling() {
        let out = rebin(&[0.0, 1.0, 2.0], &[10.0, 10.0], &[1.0, 1.0], &[0.0, 2.0], true).unwrap();
        assert_close(&out.values, &[10.0]);
        // Two unit-width contributions of variance 1, divided by the width 2.
        assert_close(&out.errors, &[2.0_f64.sqrt() / 2.0]);
    }

    #[test]
    fn test_identity_counts() {
        let edges = [0.0, 0.5, 2.0, 2.25, 7.0];
        let values = [3.0, -1.0, 8.5, 0.0];
        let errors = [1.5, 0.25, 2.0, 0.0];
        let out = rebin(&edges, &values, &errors, &edges, false).unwrap();
        assert_close(&out.values, &values);
        assert_close(&out.errors, &errors);
    }

    #[test]
    fn test_identity_distribution() {
        let edges = [0.0, 0.5, 2.0, 2.25, 7.0];
        let values = [3.0, -1.0, 8.5, 0.0];
        let errors = [1.5, 0.25, 2.0, 0.0];
        let out = rebin(&edges, &values, &errors, &edges, true).unwrap();
        assert_close(&out.values, &values);
        assert_close(&out.errors, &errors);
    }

    #[test]
    fn test_conservation_counts() {
        let old_edges = [1.0, 1.3, 2.0, 3.7, 4.1, 6.0];
        let values = [4.0, 7.0, 1.0, 9.0, 2.5];
        let errors = [2.0, 2.6, 1.0, 3.0, 1.6];
        let new_edges = [0.0, 1.1, 2.5, 2.6, 5.0, 10.0];
        let out = rebin(&old_edges, &values, &errors, &new_edges, false).unwrap();
        let before = values.iter().sum::<f64>();
        let after = out.values.iter().sum::<f64>();
        assert!((before - after).abs() < 1e-9, "{before} vs {after}");
    }

    #[test]
    fn test_variance_is_conserved_for_whole_bins() {
        // Every old bin lands whole inside one new bin.
        let out = rebin(
            &[0.0, 1.0, 2.0, 3.0, 4.0],
            &[1.0, 2.0, 3.0, 4.0],
            &[3.0, 4.0, 1.0, 1.0],
            &[0.0, 2.0, 4.0],
            false,
        )
        .unwrap();
        assert_close(&out.values, &[3.0, 7.0]);
        assert_close(&out.errors, &[5.0, 2.0_f64.sqrt()]);
    }

    #[test]
    fn test_no_overlap_is_zero() {
        let out = rebin(&[0.0, 1.0, 2.0], &[5.0, 6.0], &[1.0, 1.0], &[5.0, 6.0], false).unwrap();
        assert_close(&out.values, &[0.0]);
        assert_close(&out.errors, &[0.0]);

        let out = rebin(&[5.0, 6.0], &[5.0], &[1.0], &[0.0, 1.0, 2.0], true).unwrap();
        assert_close(&out.values, &[0.0, 0.0]);
        assert_close(&out.errors, &[0.0, 0.0]);
    }

    #[test]
    fn test_partial_overlap_at_edges() {
        // New axis extends past the old axis on both sides.
        let out = rebin(&[1.0, 3.0], &[8.0], &[2.0], &[0.0, 2.0, 4.0], false).unwrap();
        assert_close(&out.values, &[4.0, 4.0]);
    }

    #[test]
    fn test_shared_upper_boundary_advances_new_cursor() {
        // Both bins end at 1.0: the old bin at 1.0 is revisited against the
        // next new bin, where it is skipped as non-overlapping.
        let out = rebin(
            &[0.0, 1.0, 2.0],
            &[2.0, 4.0],
            &[0.0, 0.0],
            &[0.0, 1.0, 1.5, 2.0],
            false,
        )
        .unwrap();
        assert_close(&out.values, &[2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_repeated_boundary_is_degenerate() {
        let err = rebin(
            &[0.0, 1.0, 1.0, 2.0],
            &[1.0, 1.0, 1.0],
            &[1.0, 1.0, 1.0],
            &[0.0, 2.0],
            false,
        )
        .unwrap_err();
        assert!(err.is_degenerate_bin(), "{err}");

        let err = rebin(
            &[0.0, 1.0, 1.0, 2.0],
            &[1.0, 1.0, 1.0],
            &[1.0, 1.0, 1.0],
            &[0.0, 1.0, 2.0],
            true,
        )
        .unwrap_err();
        assert!(err.is_degenerate_bin(), "{err}");
    }

    #[test]
    fn test_descending_old_bin_is_degenerate() {
        let err = rebin(&[0.0, 2.0, 1.0], &[1.0, 1.0], &[1.0, 1.0], &[0.0, 3.0], false).unwrap_err();
        assert_eq!(
            err,
            RebinError::DegenerateBin {
                old_bin: 1,
                overlap: -1.0,
                width: -1.0,
            }
        );
    }

    #[test]
    fn test_zero_width_target_in_distribution() {
        let err = rebin(&[0.0, 1.0], &[1.0], &[1.0], &[0.0, 1.0, 2.0, 2.0], true).unwrap_err();
        assert_eq!(
            err,
            RebinError::InvalidAxis {
                axis: AxisRole::New,
                bin: 2,
            }
        );
    }

    #[test]
    fn test_zero_width_target_on_old_boundary_is_empty() {
        let out = rebin(&[0.0, 1.0], &[4.0], &[2.0], &[0.0, 1.0, 1.0, 2.0], false).unwrap();
        assert_close(&out.values, &[4.0, 0.0, 0.0]);
        assert_close(&out.errors, &[2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_zero_width_target_inside_old_bin_is_degenerate() {
        let err = rebin(&[0.0, 2.0], &[4.0], &[2.0], &[0.0, 1.0, 1.0, 2.0], false).unwrap_err();
        assert_eq!(
            err,
            RebinError::DegenerateBin {
                old_bin: 0,
                overlap: 0.0,
                width: 2.0,
            }
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = rebin(&[0.0, 1.0, 2.0], &[1.0, 2.0], &[1.0], &[0.0, 2.0], false).unwrap_err();
        assert!(err.is_dimension_mismatch());

        let err = rebin(&[0.0, 1.0], &[1.0], &[1.0], &[0.0], false).unwrap_err();
        assert_eq!(
            err,
            RebinError::DimensionMismatch {
                axis: AxisRole::New,
                edges: 1,
                values: 0,
                errors: 0,
            }
        );
    }

    #[test]
    fn test_errors_are_non_negative_for_negative_inputs() {
        let out = rebin(
            &[0.0, 1.0, 2.0],
            &[-3.0, 2.0],
            &[-1.0, -2.0],
            &[0.0, 0.5, 2.0],
            false,
        )
        .unwrap();
        assert!(out.errors.iter().all(|e| *e >= 0.0));
    }
}
