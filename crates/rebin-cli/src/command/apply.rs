use anyhow::Context;
use rebin_engine::{Histogram, RebinStrategy};

use crate::{
    command::TargetArg,
    util::{read_json_stdin, write_json_stdout},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ApplyArg {
    #[command(flatten)]
    pub(crate) target: TargetArg,
    /// Rebinning algorithm
    #[arg(long, default_value = "auto")]
    strategy: StrategyArg,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum StrategyArg {
    /// Fast path when the axes allow it, general otherwise
    #[default]
    Auto,
    /// Overlap integration
    General,
    /// Single forward sweep; the input must be sorted and overlap the target
    Fast,
}

pub(crate) fn run(arg: &ApplyArg) -> anyhow::Result<()> {
    let ApplyArg { target, strategy } = arg;

    let histogram = read_json_stdin::<Histogram>("histogram")?;
    let new_edges = target.edges();
    log::info!(
        "rebinning {} bins onto {} bins ({strategy:?})",
        histogram.num_bins(),
        new_edges.len().saturating_sub(1),
    );

    let rebinned = match strategy {
        StrategyArg::Auto => histogram.rebin(&new_edges),
        StrategyArg::General => histogram.rebin_with(
            &new_edges,
            RebinStrategy::General {
                distribution: histogram.is_distribution(),
            },
        ),
        StrategyArg::Fast => histogram.rebin_with(&new_edges, RebinStrategy::FastMonotonic),
    }
    .context("Failed to rebin histogram")?;

    log::debug!(
        "integral {} -> {}",
        histogram.integral(),
        rebinned.integral()
    );
    write_json_stdout(&rebinned)?;
    Ok(())
}
