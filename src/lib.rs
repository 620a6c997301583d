pub mod apply;
pub mod cli;
pub mod data;
pub mod error;
pub mod histogram;
pub mod history;
pub mod inference;
pub mod metadata;
pub mod nulls;
pub mod operation;
pub mod profile;
pub mod report;
pub mod source;
pub mod state;
pub mod table;
pub mod transform;

pub use data::{Row, Table, Value};
pub use error::WranglerError;
pub use histogram::{ColumnHistogram, HISTOGRAM_BINS, Histogram};
pub use history::{HistoryEntry, HistoryLog};
pub use inference::ColumnType;
pub use metadata::{ColumnMetadata, MetadataProvider, StandardMetadata};
pub use nulls::NullError;
pub use operation::{Operation, OperationKind, WireOperation};
pub use state::WranglerState;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_wrangler", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Profile(args) => {
            info!(
                "Profiling '{}' with delimiter '{}'",
                args.input.input.display(),
                printable_delimiter(&args.input)
            );
            profile::execute(&args)
        }
        Commands::Apply(args) => {
            info!(
                "Applying {:?} to '{}'",
                args.ops,
                args.input.input.display()
            );
            apply::execute(&args)
        }
    }
}

fn printable_delimiter(args: &cli::InputArgs) -> String {
    let delimiter = source::resolve_input_delimiter(&args.input, args.delimiter);
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}
