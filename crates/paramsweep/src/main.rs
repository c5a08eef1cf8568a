use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use paramsweep::{Sweep, SweepFile, init_logging};

#[derive(Parser, Debug)]
#[command(name = "paramsweep")]
#[command(about = "Enumerate the rows of a parameter sweep")]
struct Args {
    /// Path to the YAML sweep description
    #[arg(short, long)]
    config: PathBuf,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Also print the per-factor indices behind each row
    #[arg(short, long)]
    parameters: bool,

    /// Stop after this many rows
    #[arg(short = 'n', long)]
    limit: Option<usize>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    init_logging(&args.log_level, args.log_file.as_deref())?;

    let file = SweepFile::load(&args.config)?;
    let sweep = Sweep::build(&file)
        .wrap_err_with(|| format!("invalid sweep in {}", args.config.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let written = sweep.render(&mut out, args.parameters, args.limit)?;
    out.flush()?;

    tracing::info!(written, total = sweep.size(), "sweep written");

    Ok(())
}
