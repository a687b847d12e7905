//! Replay command
//!
//! Usage: markundo replay <SCRIPT> [--output <FILE>]

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::script::{parse_script_file, run_script};

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Path to the YAML script
    pub script: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute replay command
pub fn execute(args: ReplayArgs) -> Result<()> {
    let script = parse_script_file(&args.script)?;
    let session = run_script(&script)?;

    tracing::info!(
        component = module_path!(),
        op = "replay",
        steps = script.steps.len(),
        undo_len = session.engine.undo_count(),
        redo_len = session.engine.redo_count(),
        "replay finished"
    );

    let report = format!("{}\n{}", session.render(), session.summary());

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, report)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        println!("✓ Replayed to {}", output_path.display());
    } else {
        print!("{}", report);
    }

    Ok(())
}
