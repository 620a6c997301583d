//! Dataset acquisition for the command-line shell.
//!
//! - **CSV** (any extension other than `.json`): headers from the first record, every field
//!   loaded as a string. Empty fields stay empty strings, which the null detector reports.
//! - **JSON**: an array of flat objects; scalars map onto [`Value`] variants and nested values
//!   are kept as their JSON text. Columns follow the key order of the first object.
//! - **Delimiter**: `.tsv` means tab, everything else comma, unless overridden.
//! - **Encoding**: input is decoded with `encoding_rs`, defaulting to UTF-8.
//! - **stdin**: the `-` path reads CSV from standard input.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use anyhow::{Context, Result, anyhow, bail};
use encoding_rs::{Encoding, UTF_8};
use log::debug;

use crate::data::{Row, Table, Value};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

/// A loaded table plus its column names in source order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub table: Table,
}

#[derive(Debug, Clone, Copy)]
pub struct SourceOptions {
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
    pub limit: Option<usize>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
            limit: None,
        }
    }
}

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn load_dataset(path: &Path, options: &SourceOptions) -> Result<Dataset> {
    let reader = open_input(path)?;
    let loaded = if !is_dash(path) && is_json(path) {
        read_json(reader, options)
    } else {
        let delimiter = resolve_input_delimiter(path, options.delimiter);
        read_csv(reader, delimiter, options)
    };
    let dataset = loaded.with_context(|| format!("Loading dataset from {path:?}"))?;
    if dataset.table.is_empty() {
        bail!("Dataset {path:?} contains no rows");
    }
    debug!(
        "Read {} row(s) with columns {:?} from {:?}",
        dataset.table.len(),
        dataset.headers,
        path
    );
    Ok(dataset)
}

fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    let reader: Box<dyn Read> = if is_dash(path) {
        Box::new(std::io::stdin().lock())
    } else {
        Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Opening input file {path:?}"))?,
        ))
    };
    Ok(reader)
}

pub fn read_csv<R: Read>(reader: R, delimiter: u8, options: &SourceOptions) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(false)
        .from_reader(reader);
    let header_record = reader.byte_headers()?.clone();
    let headers = decode_record(&header_record, options.encoding)?;

    let mut records = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        if let Some(limit) = options.limit
            && row_idx >= limit
        {
            break;
        }
        let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
        records.push(decode_record(&record, options.encoding)?);
    }
    let table = Table::from_records(&headers, records);
    Ok(Dataset { headers, table })
}

pub fn read_json<R: Read>(reader: R, options: &SourceOptions) -> Result<Dataset> {
    let mut raw = Vec::new();
    BufReader::new(reader)
        .read_to_end(&mut raw)
        .context("Reading JSON input")?;
    let text = decode_bytes(&raw, options.encoding)?;
    let parsed: serde_json::Value = serde_json::from_str(&text).context("Parsing JSON input")?;
    let serde_json::Value::Array(items) = parsed else {
        bail!("JSON input must be an array of objects");
    };

    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(items.len());
    for (row_idx, item) in items.into_iter().enumerate() {
        if let Some(limit) = options.limit
            && row_idx >= limit
        {
            break;
        }
        let serde_json::Value::Object(fields) = item else {
            bail!("JSON element {row_idx} is not an object");
        };
        if row_idx == 0 {
            headers = fields.keys().cloned().collect();
        }
        let row = fields
            .into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect::<Row>();
        rows.push(row);
    }
    Ok(Dataset {
        headers,
        table: Table::new(rows),
    })
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}
