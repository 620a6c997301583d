use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::{InputArgs, ProfileArgs},
    report,
    source::{self, Dataset, SourceOptions},
    state::WranglerState,
};

pub fn execute(args: &ProfileArgs) -> Result<()> {
    let state = load_state(&args.input)?;
    if args.json {
        let profiles = report::column_profiles(&state);
        let rendered =
            serde_json::to_string_pretty(&profiles).context("Serializing column profile")?;
        println!("{rendered}");
    } else {
        print!("{}", report::render_profile(&state));
    }
    info!(
        "Profiled {} column(s) across {} row(s)",
        state.column_order().len(),
        state.table().len()
    );
    Ok(())
}

/// Reads the input described by `args` and computes the initial metadata.
pub fn load_state(args: &InputArgs) -> Result<WranglerState> {
    let options = SourceOptions {
        delimiter: args.delimiter,
        encoding: source::resolve_encoding(args.input_encoding.as_deref())?,
        limit: args.limit,
    };
    let Dataset { headers, table } = source::load_dataset(&args.input, &options)?;
    Ok(WranglerState::load_ordered(table, headers))
}
