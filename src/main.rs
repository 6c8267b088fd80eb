use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

mod assets;
mod config;
mod emitter;

use config::EmitterConfig;
use emitter::Emitter;

#[derive(Parser)]
#[command(name = "package-summary")]
#[command(version)]
#[command(about = "Print the URL shortener planning package summary and save it to disk")]
struct Cli {
    /// File to save the summary to (defaults to COMPLETE_PACKAGE_SUMMARY.txt in the current directory)
    #[arg(long, short, value_name = "PATH")]
    output: Option<String>,

    /// Enable debug logging on stderr
    #[arg(long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // stdout carries the summary itself
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = EmitterConfig::with_output(cli.output.as_deref());
    tracing::debug!(output = %config.output_path.display(), "resolved output path");

    let emitter = Emitter::new(config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    emitter.run(&mut out)?;

    Ok(())
}
