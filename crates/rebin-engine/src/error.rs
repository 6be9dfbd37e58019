//! Error types returned by the rebinning routines.

/// Which of the two axis partitions an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum AxisRole {
    /// The source partition the values are currently binned on.
    #[display("old")]
    Old,
    /// The target partition the values are rebinned onto.
    #[display("new")]
    New,
}

/// Failure of a single rebin call.
///
/// Every variant is fatal to the call that produced it: no partial output is
/// returned alongside an error.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum RebinError {
    /// Edge, value and error arrays disagree in length.
    ///
    /// Also reported for edge arrays with fewer than two entries and for
    /// output buffers that do not match the target partition.
    #[display(
        "{axis} histogram has inconsistent lengths: {edges} edges, {values} values, {errors} errors"
    )]
    DimensionMismatch {
        axis: AxisRole,
        edges: usize,
        values: usize,
        errors: usize,
    },
    /// An old bin has zero or negative width, or overlaps a new bin by a
    /// non-positive amount.
    #[display("degenerate old bin {old_bin}: overlap {overlap}, width {width}")]
    DegenerateBin {
        old_bin: usize,
        overlap: f64,
        width: f64,
    },
    /// A bin that must be divided by its width has zero width.
    #[display("{axis} bin {bin} has zero width")]
    InvalidAxis { axis: AxisRole, bin: usize },
    /// The old axis ends at or before the start of the new axis.
    #[display("no overlap: old axis ends at {old_max}, new axis starts at {new_min}")]
    NoOverlap { old_max: f64, new_min: f64 },
    /// An axis required to be strictly ascending is not.
    #[display("{axis} axis is not strictly ascending at edge {index}")]
    NotAscending { axis: AxisRole, index: usize },
}

/// Failure to parse or expand rebin parameters.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum ParamsError {
    #[display("rebin parameters are empty")]
    Empty,
    #[display("rebin parameters need x1,dx1,x2[,dx2,x3...], got {len} entries")]
    InvalidLength { len: usize },
    #[display("invalid number in rebin parameters: '{text}'")]
    InvalidNumber { text: String },
    #[display("rebin step {index} is zero")]
    ZeroStep { index: usize },
    #[display("rebin boundaries must be strictly ascending: {low} is not below {high}")]
    NotAscending { low: f64, high: f64 },
    #[display("logarithmic binning needs a positive start, got {start}")]
    NonPositiveLogStart { start: f64 },
    /// The parameters would expand to more than [`RebinParams::MAX_BINS`]
    /// bins.
    ///
    /// [`RebinParams::MAX_BINS`]: crate::params::RebinParams::MAX_BINS
    #[display("rebin parameters expand to more than {max} bins")]
    TooManyBins { max: usize },
}
