use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use st_filter::{
    filter::{st_filter_edges, EdgeListOptions, FilterOptions, TieFilterResult},
    network::io::read_edge_list,
    optimization::root_finder::{SolverOptions, Tolerances},
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Find significant ties in a temporal edge list.
///
/// Input rows are `snapshot node node`, separated by whitespace; lines
/// starting with `#` are skipped. Significant ties are written as TSV.
#[derive(Parser, Debug)]
#[command(name = "st-filter", version, about, long_about = None)]
struct Cli {
    /// Edge-list file
    input: PathBuf,

    /// Significance level
    #[arg(short, long, default_value_t = 0.05)]
    alpha: f64,

    /// Judging policy: p_val or inv_binom
    #[arg(short, long, default_value = "p_val")]
    judge: String,

    /// Line search for L-BFGS: MoreThuente or HagerZhang
    #[arg(long, default_value = "MoreThuente")]
    opt_method: String,

    /// Maximum solver iterations
    #[arg(long, default_value_t = 1000)]
    max_iter: usize,

    /// Estimate without a dense N×N matrix (activity parameters only)
    #[arg(long)]
    memorysave: bool,

    /// Evaluate nodes in parallel (memory-saving mode only)
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel; 0 lets rayon decide
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write activity parameters to this file
    #[arg(long)]
    params: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let edges = read_edge_list(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    info!("Read {} rows from {}", edges.len(), cli.input.display());

    let tols = Tolerances::new(Some(1e-10), None, Some(cli.max_iter))?;
    let solver = SolverOptions { tols, ..SolverOptions::default() };
    let opts = FilterOptions::default()
        .with_solver(solver)
        .with_alpha(cli.alpha)
        .with_judge(&cli.judge)
        .with_method(&cli.opt_method)?;
    let edge_opts = EdgeListOptions::new(cli.memorysave, cli.parallel).with_threads(cli.threads);

    let result = st_filter_edges(&edges, &opts, &edge_opts)?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            write_result(&result, BufWriter::new(file))?;
        }
        None => write_result(&result, io::stdout().lock())?,
    }
    if let Some(path) = &cli.params {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_params(&result, BufWriter::new(file))?;
    }
    Ok(())
}

/// Significant ties as TSV, or the activity parameters when no matrices
/// were computed.
fn write_result<W: Write>(result: &TieFilterResult, mut out: W) -> Result<()> {
    if result.significance.is_none() {
        return write_params(result, out);
    }
    writeln!(out, "node_i\tnode_j\tcount\tp_value")?;
    for (i, j, count, p) in result.significant_ties() {
        writeln!(out, "{}\t{}\t{count}\t{p:e}", result.node_name(i), result.node_name(j))?;
    }
    out.flush()?;
    Ok(())
}

fn write_params<W: Write>(result: &TieFilterResult, mut out: W) -> Result<()> {
    writeln!(out, "node\tactivity")?;
    for (i, x) in result.activ_params.iter().enumerate() {
        writeln!(out, "{}\t{x}", result.node_name(i))?;
    }
    out.flush()?;
    Ok(())
}
