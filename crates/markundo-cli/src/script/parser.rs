//! Script parser with validation
//!
//! Parses YAML and validates the schema version and the shape of each step

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use super::format_v0::{ScriptElement, ScriptStep, ScriptV0};

/// Parse a script file from a path
pub fn parse_script_file(path: &Path) -> Result<ScriptV0> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script file {}", path.display()))?;

    parse_script_str(&content).with_context(|| format!("Invalid script {}", path.display()))
}

/// Parse a script from a string
pub fn parse_script_str(content: &str) -> Result<ScriptV0> {
    let script: ScriptV0 = serde_yaml::from_str(content).context("YAML parse error")?;

    validate_script(&script)?;

    Ok(script)
}

fn validate_script(script: &ScriptV0) -> Result<()> {
    if script.schema_version != 0 {
        bail!(
            "Unsupported schema_version: {}. Expected 0",
            script.schema_version
        );
    }

    validate_element(&script.document)?;

    for (index, step) in script.steps.iter().enumerate() {
        validate_step(step).with_context(|| format!("step {}", index + 1))?;
    }

    Ok(())
}

fn validate_element(element: &ScriptElement) -> Result<()> {
    if element.name.trim().is_empty() {
        bail!("Element name must not be empty");
    }
    for attr in &element.attributes {
        if attr.name.trim().is_empty() {
            bail!("Attribute name must not be empty on <{}>", element.name);
        }
    }
    element.children.iter().try_for_each(validate_element)
}

fn validate_step(step: &ScriptStep) -> Result<()> {
    match step {
        ScriptStep::Insert {
            element,
            text,
            first,
            after,
            ..
        } => {
            match (element, text) {
                (Some(el), None) => validate_element(el)?,
                (None, Some(_)) => {}
                _ => bail!("insert needs exactly one of `element` or `text`"),
            }
            if *first && after.is_some() {
                bail!("insert cannot combine `first` and `after`");
            }
        }
        ScriptStep::Remove {
            attribute: Some(name),
            ..
        }
        | ScriptStep::Set {
            attribute: Some(name),
            ..
        } if name.trim().is_empty() => {
            bail!("Attribute name must not be empty");
        }
        _ => {}
    }
    Ok(())
}
