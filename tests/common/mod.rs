#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv_wrangler::{Table, Value, WranglerState};
use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

/// Builds a string-valued table from a header list and row literals.
pub fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
    let headers = headers.iter().map(|h| h.to_string()).collect::<Vec<_>>();
    Table::from_records(&headers, rows.iter().map(|row| row.to_vec()))
}

/// Loads `rows` with `headers` as the column order.
pub fn load(headers: &[&str], rows: &[&[&str]]) -> WranglerState {
    let order = headers.iter().map(|h| h.to_string()).collect();
    WranglerState::load_ordered(table(headers, rows), order)
}

/// Text of `column` in every row, `""` for nulls.
pub fn column_text(state: &WranglerState, column: &str) -> Vec<String> {
    state
        .table()
        .column_values(column)
        .map(Value::as_text)
        .collect()
}
