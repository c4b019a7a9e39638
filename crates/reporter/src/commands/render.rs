use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use reporter_core::{read_records, Formatter};

use crate::config::Settings;

#[derive(Args)]
pub struct RenderArgs {
    /// JSON records: one object, an array, or one object per line ("-" for stdin)
    input: Option<PathBuf>,
}

pub fn run(args: RenderArgs, settings: &Settings) -> anyhow::Result<()> {
    let input: Box<dyn Read> = match args.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => Box::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        ),
        _ => Box::new(std::io::stdin().lock()),
    };

    let formatter = settings.formatter();
    let stdout = std::io::stdout();
    let count = render(input, &formatter, &mut stdout.lock())?;
    tracing::info!("rendered {} records", count);
    Ok(())
}

/// Decode `input` and write one formatted block per record. Returns the record count.
pub fn render<R: Read, F: Formatter, W: Write>(
    input: R,
    formatter: &F,
    out: &mut W,
) -> anyhow::Result<usize> {
    let records = read_records(input).context("decoding records")?;
    for block in formatter.format_batch(&records) {
        writeln!(out, "{block}")?;
    }
    out.flush()?;
    Ok(records.len())
}
