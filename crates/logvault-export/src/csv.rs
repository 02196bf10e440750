//! Flat CSV rendering of log records.
//!
//! Every top-level record field is a column; each metadata key becomes a
//! `metadata_<key>` column. The header is the sorted union of columns over
//! all rows, and a row missing a column gets an empty cell.

use std::collections::{BTreeMap, BTreeSet};
use std::io;

use serde_json::Value;

use logvault_core::constants::CSV_METADATA_PREFIX;
use logvault_core::errors::LogVaultResult;
use logvault_core::models::LogRecord;

/// One record as column → cell text.
pub fn flatten_record(record: &LogRecord) -> LogVaultResult<BTreeMap<String, String>> {
    let mut row = BTreeMap::new();
    if let Value::Object(fields) = serde_json::to_value(record)? {
        for (key, value) in fields {
            if key == "metadata" {
                continue;
            }
            row.insert(key, cell(&value));
        }
    }
    for (key, value) in &record.metadata {
        row.insert(format!("{CSV_METADATA_PREFIX}{key}"), cell(value));
    }
    Ok(row)
}

/// Header line plus one line per record, in input order.
pub fn render_csv(records: &[LogRecord]) -> LogVaultResult<String> {
    let rows = records
        .iter()
        .map(flatten_record)
        .collect::<LogVaultResult<Vec<_>>>()?;
    let header: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    let mut writer = ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(&header).map_err(io::Error::from)?;
    for row in &rows {
        let cells = header
            .iter()
            .map(|column| row.get(*column).map(String::as_str).unwrap_or_default());
        writer.write_record(cells).map_err(io::Error::from)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Strings are written raw, null as empty, everything else as compact JSON.
fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logvault_core::models::LogLevel;
    use serde_json::json;

    #[test]
    fn quotes_only_cells_that_need_it() {
        let record = LogRecord::general(LogLevel::Info, "say \"hi\", then\nleave")
            .with_metadata("plain", json!("ok"));
        let out = render_csv(&[record]).unwrap();
        assert!(out.contains("\"say \"\"hi\"\", then\nleave\""));
        assert!(out.contains(",ok,"));
        assert!(out.ends_with('\n') && !out.contains('\r'));
    }

    #[test]
    fn header_is_sorted_union_with_empty_cells() {
        let a = LogRecord::general(LogLevel::Info, "a").with_metadata("ip", json!("1.2.3.4"));
        let b = LogRecord::general(LogLevel::Info, "b").with_metadata("tries", json!(2));
        let out = render_csv(&[a, b]).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "component,encrypted,id,level,log_id,message,metadata_ip,metadata_tries,timestamp,user_id_hash"
        );
        let first: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(first[6], "1.2.3.4");
        assert_eq!(first[7], "");
        let second: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(second[6], "");
        assert_eq!(second[7], "2");
    }

    #[test]
    fn non_string_metadata_is_compact_json() {
        let record = LogRecord::general(LogLevel::Info, "m")
            .with_metadata("nested", json!({"k": [1, 2]}));
        let row = flatten_record(&record).unwrap();
        assert_eq!(row["metadata_nested"], "{\"k\":[1,2]}");
        assert_eq!(row["encrypted"], "false");
        assert_eq!(row["level"], "INFO");
    }
}
