//! Scripted application of wrangling operations.
//!
//! A script is a YAML or JSON list of `{kind, payload}` objects, for example:
//!
//! ```yaml
//! - kind: split
//!   payload: { column: name, delimiter: " ", first_split: first, second_split: last }
//! - kind: drop
//!   payload: { column: name }
//! ```

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use log::{info, warn};

use crate::{
    cli::ApplyArgs,
    operation::{Operation, WireOperation},
    profile, report,
};

pub fn execute(args: &ApplyArgs) -> Result<()> {
    let operations = load_script(&args.ops)?;
    let mut state = profile::load_state(&args.input)?;

    for (idx, operation) in operations.iter().enumerate() {
        let before = state.history().len();
        state = state.apply(operation);
        if state.history().len() == before {
            warn!(
                "Operation {} ({}) had no effect",
                idx + 1,
                operation.kind()
            );
        }
    }
    state
        .check_consistency()
        .context("Verifying wrangler state after applying operations")?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&state).context("Serializing state")?;
        println!("{rendered}");
    } else {
        println!("Columns");
        print!("{}", report::render_profile(&state));
        println!();
        println!("Preview");
        print!("{}", report::render_preview(&state, args.preview));
        println!();
        println!("History");
        print!("{}", report::render_history(&state));
    }
    info!(
        "Applied {} of {} operation(s) from {:?}",
        state.history().len(),
        operations.len(),
        args.ops
    );
    Ok(())
}

/// Parses an operation script, choosing JSON or YAML by extension.
pub fn load_script(path: &Path) -> Result<Vec<Operation>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Reading operation script {path:?}"))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let wire: Vec<WireOperation> = if is_json {
        serde_json::from_str(&contents)
            .with_context(|| format!("Parsing JSON operation script {path:?}"))?
    } else {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Parsing YAML operation script {path:?}"))?
    };
    if wire.is_empty() {
        bail!("Operation script {path:?} does not list any operations");
    }
    wire.into_iter()
        .enumerate()
        .map(|(idx, op)| {
            Operation::try_from(op).with_context(|| format!("Operation {} in {path:?}", idx + 1))
        })
        .collect()
}
