//! Histogram rebinning with uncertainty propagation.
//!
//! This crate redistributes histogram values, and their standard deviations,
//! from one bin-edge grid onto another. The total signal is conserved and
//! variances are propagated through every overlap.
//!
//! - **General rebinning**: Overlap integration over arbitrary axes, for counts
//!   or distributions
//! - **Fast rebinning**: Single forward sweep for sorted, overlapping axes, with
//!   an accumulate mode for streaming several sources into one grid
//! - **Strategy selection**: Pick the fast path when the axes allow it
//! - **Rebin parameters**: Build target axes from `x1,dx1,x2,...` descriptions
//! - **Histograms**: Owned, validated histograms with convention conversions
//!
//! # Modules
//!
//! - [`general`]: Overlap-integration algorithm
//! - [`fast`]: Monotonic single-pass algorithm and accumulation
//! - [`strategy`]: Algorithm selection and the [`Rebinned`] output
//! - [`params`]: Rebin parameter parsing and axis expansion
//! - [`histogram`]: [`Histogram`] and [`Accumulator`]
//! - [`axis`]: Axis partition helpers
//! - [`error`]: Error types
//!
//! # Examples
//!
//! ## Rebinning raw arrays
//!
//! ```
//! use rebin_engine::general;
//!
//! let old_edges = [0.0, 1.0, 2.0];
//! let rates = [10.0, 10.0];
//! let errors = [1.0, 1.0];
//!
//! // A constant rate stays constant on a wider bin.
//! let out = general::rebin(&old_edges, &rates, &errors, &[0.0, 2.0], true).unwrap();
//! assert_eq!(out.values, [10.0]);
//! ```
//!
//! ## Rebinning a histogram onto parameterized edges
//!
//! ```
//! use rebin_engine::{Histogram, RebinParams};
//!
//! let histogram = Histogram::from_counts(vec![0.0, 1.0, 2.0, 3.0, 4.0], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let params = "0,2,4".parse::<RebinParams>().unwrap();
//!
//! let rebinned = histogram.rebin(&params.edges()).unwrap();
//! assert_eq!(rebinned.values(), [3.0, 7.0]);
//! ```

pub use self::{
    error::{AxisRole, ParamsError, RebinError},
    histogram::{Accumulator, Histogram},
    params::RebinParams,
    strategy::{RebinStrategy, Rebinned},
};

pub mod axis;
pub mod error;
pub mod fast;
pub mod general;
pub mod histogram;
pub mod params;
pub mod strategy;
