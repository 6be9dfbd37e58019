use anyhow::Context;
use rebin_engine::{Accumulator, Histogram};

use crate::{
    command::TargetArg,
    util::{read_json_stdin, write_json_stdout},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct MergeArg {
    #[command(flatten)]
    pub(crate) target: TargetArg,
}

pub(crate) fn run(arg: &MergeArg) -> anyhow::Result<()> {
    let MergeArg { target } = arg;

    let histograms = read_json_stdin::<Vec<Histogram>>("histogram array")?;
    let mut accumulator =
        Accumulator::new(target.edges()).context("Failed to create accumulator")?;
    for (i, histogram) in histograms.iter().enumerate() {
        accumulator
            .add(histogram)
            .with_context(|| format!("Failed to add histogram #{i}"))?;
    }
    log::info!("merged {} histograms", accumulator.sources());

    write_json_stdout(&accumulator.finish())?;
    Ok(())
}
