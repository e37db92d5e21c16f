use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Result of scanning a JSONL file: parsed values plus skip accounting.
/// Malformed lines are logged and counted, never fatal.
#[derive(Debug)]
pub struct JsonlScan {
    /// (1-based line number, parsed value) for each well-formed line
    pub rows: Vec<(usize, Value)>,
    pub skipped: usize,
}

/// Read a JSONL file line by line, skipping blank and malformed lines
/// with a warning each.
pub fn read_jsonl(path: &Path) -> Result<JsonlScan> {
    let file =
        File::open(path).with_context(|| format!("Failed to open JSONL file: {:?}", path))?;
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    let mut skipped = 0;

    for (index, line) in reader.lines().enumerate() {
        let line_num = index + 1;
        let line = line.with_context(|| format!("Failed to read line {line_num} of {path:?}"))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => rows.push((line_num, value)),
            Err(e) => {
                warn!("Error parsing line {} of {:?}: {}", line_num, path, e);
                skipped += 1;
            }
        }
    }

    Ok(JsonlScan { rows, skipped })
}

/// Write records as compact JSON, one per line
pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    for record in records {
        let line = serde_json::to_string(record).context("Failed to serialize record")?;
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_malformed_lines_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.jsonl");
        fs::write(&path, "{\"a\": 1}\nnot json\n\n{\"b\": 2}\n").unwrap();

        let scan = read_jsonl(&path).unwrap();
        assert_eq!(scan.rows.len(), 2);
        assert_eq!(scan.skipped, 1);
        assert_eq!(scan.rows[0].0, 1);
        assert_eq!(scan.rows[1].0, 4);
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jsonl");

        let records = vec![
            serde_json::json!({"id": "a", "n": 1}),
            serde_json::json!({"id": "b", "n": 2}),
        ];
        write_jsonl(&path, &records).unwrap();

        let scan = read_jsonl(&path).unwrap();
        assert_eq!(scan.skipped, 0);
        let values: Vec<Value> = scan.rows.into_iter().map(|(_, v)| v).collect();
        assert_eq!(values, records);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_jsonl(Path::new("/nonexistent.jsonl")).is_err());
    }
}
