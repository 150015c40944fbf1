//! `sapling`: run an entry point of a script file

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::Parser;
use sapling::{EvalContext, Interpreter, SourceFile};

/// Run a Sapling script.
#[derive(Parser, Debug)]
#[command(name = "sapling", version, about, long_about = None)]
struct Args {
    /// Script file to run
    file: PathBuf,

    /// Function to run as the program
    #[arg(short, long, default_value = "main")]
    entrypoint: String,

    /// Maximum nesting of script function calls
    #[arg(long, default_value_t = EvalContext::default().max_call_depth)]
    max_call_depth: usize,
}

/// Install a subscriber when `RUST_LOG` is set.
///
/// Enable with `RUST_LOG=sapling=debug` or `RUST_LOG=sapling=trace`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let name = args.file.display().to_string();
    let file = SourceFile::parse(name, &source)?;

    let mut interpreter =
        Interpreter::new().with_context(EvalContext::with_max_call_depth(args.max_call_depth));

    // EvalError holds syntax spans and is not Send, so it is reported by
    // message rather than converted.
    interpreter
        .run_file(&file, &args.entrypoint)
        .map_err(|err| anyhow!("{err}"))
        .with_context(|| format!("failed to run {}", args.file.display()))
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(file = %args.file.display(), error = %format!("{err:#}"), "run failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
