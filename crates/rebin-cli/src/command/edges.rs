use rebin_engine::RebinParams;

use crate::util::write_json_stdout;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EdgesArg {
    /// Rebin parameters `x1,dx1,x2[,dx2,x3...]`; a negative step is logarithmic
    #[arg(long, allow_hyphen_values = true)]
    params: RebinParams,
}

pub(crate) fn run(arg: &EdgesArg) -> anyhow::Result<()> {
    let EdgesArg { params } = arg;
    let edges = params.edges();
    log::info!("{params} expands to {} bins", edges.len().saturating_sub(1));
    write_json_stdout(&edges)?;
    Ok(())
}
