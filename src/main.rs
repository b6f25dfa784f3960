use anyhow::{Context, Result};
use clap::Parser;

use sift::cli::{self, CliArgs};
use sift::{Document, FindConfig};

fn main() -> Result<()> {
    sift::tracing::init();

    let args = CliArgs::parse();
    let config = FindConfig::load();

    let mut doc = Document::from_file(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?
        .with_history_limit(config.history_size);
    args.prepare(&mut doc);

    let options = args.options(config.options);
    let report = cli::execute(&mut doc, &args.action, options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}
