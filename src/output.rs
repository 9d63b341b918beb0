//! Output formatting and persistence for tidy tables.
//!
//! Supports pretty-printing, JSON serialization, and CSV rendering of any
//! view's row sequence.

use std::fmt::Debug;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

/// Logs a table using Rust's debug pretty-print format.
pub fn print_pretty<T: Debug>(rows: &[T]) {
    debug!("{:#?}", rows);
}

/// Logs a table as pretty-printed JSON.
pub fn print_json<T: Serialize>(rows: &[T]) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}

/// Renders a table as a CSV string, header row included. An empty table
/// renders as an empty string since the header is derived from the rows.
pub fn csv_string<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV buffer: {e}"))?;
    Ok(String::from_utf8(bytes)?)
}

/// Writes a table to a CSV file, replacing any previous contents.
pub fn write_csv<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV table");

    let file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = WriterBuilder::new().from_writer(file);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::LastNameCount;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_rows() -> Vec<LastNameCount> {
        vec![
            LastNameCount {
                last_name: "Andersson".to_string(),
                count: 9,
            },
            LastNameCount {
                last_name: "Sage".to_string(),
                count: 7,
            },
        ]
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_rows());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_rows()).unwrap();
    }

    #[test]
    fn test_csv_string_has_header_and_rows() {
        let rendered = csv_string(&sample_rows()).unwrap();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "last_name,count");
        assert_eq!(lines[1], "Andersson,9");
    }

    #[test]
    fn test_csv_string_empty_table() {
        let rows: Vec<LastNameCount> = Vec::new();
        assert_eq!(csv_string(&rows).unwrap(), "");
    }

    #[test]
    fn test_write_csv_replaces_previous_contents() {
        let path = temp_path("titanic_stats_test_write.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        write_csv(&path, &sample_rows()).unwrap();
        write_csv(&path, &sample_rows()[..1]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("Andersson"));

        fs::remove_file(&path).unwrap();
    }
}
