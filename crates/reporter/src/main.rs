use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use reporter_style::StyleMode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;

use commands::Commands;

#[derive(Parser)]
#[command(name = "reporter", version, about = "Render diagnostic records as colorized log reports")]
struct Cli {
    /// Config file (default: ./reporter.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Application root; exception paths are shown relative to it
    #[arg(long, global = true)]
    base_path: Option<PathBuf>,
    /// Output styling: ansi, plain or html
    #[arg(long, global = true)]
    style: Option<StyleMode>,
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = config::Settings::resolve(
        cli.config.as_deref(),
        cli.base_path,
        cli.style,
    )
    .and_then(|settings| cli.command.run(&settings));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error::format_error(&err));
            ExitCode::FAILURE
        }
    }
}
