//! Export command - Write a saved agent's learned values for external analysis

use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::{app::App, export::ValuesCsvExporter, q_learning::SavedAgent};

#[derive(Parser, Debug)]
#[command(about = "Export learned values of a saved agent")]
pub struct ExportArgs {
    /// Path to a saved agent
    pub agent: PathBuf,

    /// Output file path
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Export format
    #[arg(long, short = 'f', value_enum, default_value = "csv")]
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// One row per stored state with nine action values
    Csv,
    /// The complete saved agent as pretty-printed JSON
    Json,
}

pub fn execute(args: ExportArgs) -> Result<()> {
    let app = App::new();
    let agent = app
        .load_agent(&args.agent)
        .with_context(|| format!("Failed to load agent from {}", args.agent.display()))?;

    match args.format {
        ExportFormat::Csv => {
            let rows = ValuesCsvExporter::export_to_path(agent.store(), &args.output)?;
            println!("✓ Exported {rows} states to {}", args.output.display());
        }
        ExportFormat::Json => {
            let file = File::create(&args.output)
                .with_context(|| format!("Failed to create {}", args.output.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(file), &SavedAgent::from_agent(&agent))?;
            println!("✓ Exported agent to {}", args.output.display());
        }
    }
    Ok(())
}
