use clap::{Parser, Subcommand};
use rebin_engine::RebinParams;

use self::{apply::ApplyArg, edges::EdgesArg, merge::MergeArg};

mod apply;
mod edges;
mod merge;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Rebin a histogram read from stdin
    Apply(#[clap(flatten)] ApplyArg),
    /// Print the bin edges described by rebin parameters
    Edges(#[clap(flatten)] EdgesArg),
    /// Accumulate histograms read from stdin onto one set of edges
    Merge(#[clap(flatten)] MergeArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Apply(arg) => apply::run(&arg)?,
        Mode::Edges(arg) => edges::run(&arg)?,
        Mode::Merge(arg) => merge::run(&arg)?,
    }
    Ok(())
}

/// Target bin edges, given either as rebin parameters or explicitly.
#[derive(Debug, Clone, clap::Args)]
#[group(required = true, multiple = false)]
pub(crate) struct TargetArg {
    /// Rebin parameters `x1,dx1,x2[,dx2,x3...]`; a negative step is logarithmic
    #[arg(long, allow_hyphen_values = true)]
    params: Option<RebinParams>,
    /// Explicit bin edges (comma-separated)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    edges: Option<Vec<f64>>,
}

impl TargetArg {
    pub(crate) fn edges(&self) -> Vec<f64> {
        match (&self.params, &self.edges) {
            (Some(params), _) => params.edges(),
            (None, edges) => edges.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target_edges(args: &[&str]) -> Vec<f64> {
        let args = CommandArgs::try_parse_from(args).unwrap();
        match args.mode {
            Mode::Apply(arg) => arg.target.edges(),
            Mode::Merge(arg) => arg.target.edges(),
            Mode::Edges(_) => panic!("no target"),
        }
    }

    #[test]
    fn test_explicit_edges() {
        let edges = target_edges(&["rebin", "apply", "--edges", "0,0.5,2"]);
        assert_eq!(edges, [0.0, 0.5, 2.0]);
    }

    #[test]
    fn test_params_edges() {
        let edges = target_edges(&["rebin", "merge", "--params", "0,1,3"]);
        assert_eq!(edges, [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_negative_edges() {
        let edges = target_edges(&["rebin", "apply", "--edges", "-2,-1,0"]);
        assert_eq!(edges, [-2.0, -1.0, 0.0]);
    }

    #[test]
    fn test_target_required() {
        assert!(CommandArgs::try_parse_from(["rebin", "apply"]).is_err());
    }

    #[test]
    fn test_target_exclusive() {
        let result =
            CommandArgs::try_parse_from(["rebin", "apply", "--params", "0,1,2", "--edges", "0,2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(CommandArgs::try_parse_from(["rebin", "edges", "--params", "0,1"]).is_err());
    }

    #[test]
    fn test_oversized_params_rejected() {
        let err = CommandArgs::try_parse_from(["rebin", "edges", "--params", "0,1e-9,1"])
            .unwrap_err();
        assert!(err.to_string().contains("more than"), "{err}");
    }
}
