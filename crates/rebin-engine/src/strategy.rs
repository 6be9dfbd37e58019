use serde::{Deserialize, Serialize};

use crate::{axis, error::RebinError, fast, general};

/// Values and standard deviations produced by a rebin call.
///
/// Both vectors hold one entry per bin of the target axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rebinned {
    pub values: Vec<f64>,
    pub errors: Vec<f64>,
}

/// Selects which rebinning algorithm to run.
///
/// # Examples
///
/// ```
/// use rebin_engine::strategy::RebinStrategy;
///
/// let old_edges = [0.0, 1.0, 2.0];
/// let new_edges = [0.0, 2.0];
///
/// let strategy = RebinStrategy::select(&old_edges, &new_edges, false);
/// assert_eq!(strategy, RebinStrategy::FastMonotonic);
///
/// let out = strategy.rebin(&old_edges, &[1.0, 2.0], &[1.0, 1.0], &new_edges).unwrap();
/// assert_eq!(out.values, [3.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum RebinStrategy {
    /// Overlap integration over arbitrary axes ([`general::rebin`]).
    General {
        /// Whether values are rates per unit axis length.
        distribution: bool,
    },
    /// Forward sweep over strictly ascending, overlapping axes
    /// ([`fast::rebin_fast`]). Values are counts.
    FastMonotonic,
}

impl RebinStrategy {
    /// Picks the fast path when it is known to apply, and the general
    /// algorithm otherwise.
    ///
    /// The fast path is chosen for count data when both axes are strictly
    /// ascending and the first new boundary lies inside the old axis range.
    #[must_use]
    pub fn select(old_edges: &[f64], new_edges: &[f64], distribution: bool) -> Self {
        let fast_applies = !distribution
            && axis::is_strictly_ascending(old_edges)
            && axis::is_strictly_ascending(new_edges)
            && match (old_edges, new_edges.first()) {
                ([old_min, .., old_max], Some(new_min)) => {
                    old_min <= new_min && new_min < old_max
                }
                _ => false,
            };
        if fast_applies {
            Self::FastMonotonic
        } else {
            Self::General { distribution }
        }
    }

    /// Runs the selected algorithm.
    pub fn rebin(
        self,
        old_edges: &[f64],
        old_values: &[f64],
        old_errors: &[f64],
        new_edges: &[f64],
    ) -> Result<Rebinned, RebinError> {
        match self {
            Self::General { distribution } => {
                general::rebin(old_edges, old_values, old_errors, new_edges, distribution)
            }
            Self::FastMonotonic => fast::rebin_fast(old_edges, old_values, old_errors, new_edges),
        }
    }
}
