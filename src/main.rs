// src/main.rs
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use median_degree::StreamProcessor;
use median_degree::output::MedianWriter;
use median_degree::parser;
use median_degree::types::{OutputFormat, ProcessorConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (input, output) = match (args.next(), args.next()) {
        (Some(input), Some(output)) => (input, output),
        _ => anyhow::bail!("usage: median-degree <input> <output>"),
    };

    run(Path::new(&input), Path::new(&output))
}

/// Stream the input file line by line through parser, processor, and
/// writer. Malformed lines are skipped and produce no output line.
fn run(input: &Path, output: &Path) -> Result<()> {
    let reader = File::open(input)
        .with_context(|| format!("opening input {}", input.display()))?;
    let reader = BufReader::new(reader);

    let out = File::create(output)
        .with_context(|| format!("creating output {}", output.display()))?;
    let mut writer = MedianWriter::new(BufWriter::new(out), OutputFormat::default());

    let mut processor = StreamProcessor::new(ProcessorConfig::default());
    let mut processed = 0u64;
    let mut skipped = 0u64;

    for line in reader.lines() {
        let line = line.context("reading input line")?;
        match parser::parse_line(&line) {
            Ok(event) => {
                let median = processor.process(event)?;
                writer.write_median(median)?;
                processed += 1;
            }
            Err(err) if err.is_data_error() => {
                warn!(%err, category = err.category(), "skipping malformed line");
                skipped += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
    writer.flush()?;

    info!(processed, skipped, "stream complete");
    Ok(())
}
