//! Labels command
//!
//! Usage: markundo labels <SCRIPT>
//!
//! Prints the undo and redo menus as an editor would show them.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::script::{parse_script_file, run_script};

#[derive(Debug, Args)]
pub struct LabelsArgs {
    /// Path to the YAML script
    pub script: PathBuf,
}

/// Execute labels command
pub fn execute(args: LabelsArgs) -> Result<()> {
    let script = parse_script_file(&args.script)?;
    let session = run_script(&script)?;

    print!(
        "{}",
        format_menu("undo", &session.engine.undo_labels())
            + &format_menu("redo", &session.engine.redo_labels())
    );
    Ok(())
}

fn format_menu(title: &str, labels: &[String]) -> String {
    let mut out = format!("{}:\n", title);
    for label in labels {
        out.push_str("  ");
        out.push_str(label);
        out.push('\n');
    }
    out
}
