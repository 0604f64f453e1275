use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, Level};

use segmentation::cbl;
use segmentation::config::ModelConfig;
use segmentation::corpus::find_corpus_files;
use segmentation::parser;
use segmentation::report::{write_report, RunSummary};

#[derive(Parser, Debug)]
#[command(author, version, about = "Unsupervised chunk segmentation models", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (-q)
    #[arg(short = 'q', long, global = true, action = ArgAction::Count)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Shallow-parse gold-segmented corpora with the PARSER baseline
    Parser(RunArgs),
    /// Run the chunk-based learner and its production task
    Cbl(CblArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Corpus files or directories to walk
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON file with model parameters
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Base seed for every random draw
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Write per-file scores as CSV
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CblArgs {
    #[command(flatten)]
    run: RunArgs,

    /// Fresh models per corpus file (overrides the config)
    #[arg(long, value_name = "COUNT")]
    iterations: Option<usize>,

    /// Worker threads for the iterations
    #[arg(long, value_name = "N", default_value_t = 4)]
    threads: usize,
}

fn init_logging(verbose: u8, quiet: u8) {
    let level = match verbose as i16 - quiet as i16 {
        i16::MIN..=-1 => Level::WARN,
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ModelConfig> {
    match path {
        Some(path) => ModelConfig::read_config(path)
            .with_context(|| format!("reading config {}", path.display())),
        None => Ok(ModelConfig::default()),
    }
}

fn collect_inputs(inputs: &[PathBuf], marker: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let found = find_corpus_files(input, marker)
            .with_context(|| format!("searching {}", input.display()))?;
        files.extend(found);
    }
    if files.is_empty() {
        bail!("no {} files found", marker);
    }
    Ok(files)
}

fn base_seed(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(rand::random);
    info!(seed, "base seed");
    seed
}

fn run_parser(args: RunArgs) -> Result<Vec<RunSummary>> {
    let config = load_config(args.config.as_deref())?;
    let files = collect_inputs(&args.inputs, parser::file::CORPUS_MARKER)?;
    let seed = base_seed(args.seed);

    let mut summaries = Vec::new();
    for (i, file) in files.iter().enumerate() {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
        let summary = parser::file::shallow_parse_file(file, &config.parser, &mut rng)
            .with_context(|| format!("parsing {}", file.display()))?;
        summaries.push(summary);
    }
    Ok(summaries)
}

fn run_cbl(args: CblArgs) -> Result<Vec<RunSummary>> {
    let mut config = load_config(args.run.config.as_deref())?;
    if let Some(iterations) = args.iterations {
        if iterations == 0 {
            bail!("--iterations must be at least 1");
        }
        config.cbl.iterations = iterations;
    }
    let files = collect_inputs(&args.run.inputs, cbl::file::CORPUS_MARKER)?;
    let seed = base_seed(args.run.seed);

    let mut summaries = Vec::new();
    for file in &files {
        let summary = cbl::file::run_corpus_file(file, &config.cbl, seed, args.threads)
            .with_context(|| format!("running learner on {}", file.display()))?;
        println!("{} {}", file.display(), summary.accuracy_label());
        summaries.push(summary);
    }
    Ok(summaries)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let (summaries, report) = match cli.command {
        Commands::Parser(args) => {
            let report = args.report.clone();
            (run_parser(args)?, report)
        }
        Commands::Cbl(args) => {
            let report = args.run.report.clone();
            (run_cbl(args)?, report)
        }
    };

    info!("processed {} corpus files", summaries.len());
    if let Some(path) = report {
        write_report(&path, &summaries)
            .with_context(|| format!("writing report {}", path.display()))?;
        info!("wrote report to {}", path.display());
    }
    Ok(())
}
