//! Export: writes parsed events to a sink.
//!
//! Two formats: `csv` (header `Timestamp,EventId,SourceIP,User,Raw_Message`)
//! and `jsonl` (one object per line with the same keys). Events are written
//! in the order given.

use crate::config::OutputFormat;
use crate::types::ParsedEvent;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("jsonl export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Write `events` to `writer` in `format`.
pub fn write_events<W: Write>(
    events: &[ParsedEvent],
    format: OutputFormat,
    writer: W,
) -> Result<(), ExportError> {
    match format {
        OutputFormat::Csv => write_csv(events, writer),
        OutputFormat::Jsonl => write_jsonl(events, writer),
    }
}

fn write_csv<W: Write>(events: &[ParsedEvent], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for event in events {
        wtr.serialize(event)?;
    }
    wtr.flush().map_err(|source| ExportError::Io { path: "<csv>".to_string(), source })?;
    Ok(())
}

fn write_jsonl<W: Write>(events: &[ParsedEvent], mut writer: W) -> Result<(), ExportError> {
    let io_err = |source: std::io::Error| ExportError::Io { path: "<jsonl>".to_string(), source };
    for event in events {
        serde_json::to_writer(&mut writer, event)?;
        writer.write_all(b"\n").map_err(io_err)?;
    }
    writer.flush().map_err(io_err)
}

/// Write `events` to a file at `path`, creating parent directories.
pub fn export_to_path(
    events: &[ParsedEvent],
    format: OutputFormat,
    path: &Path,
) -> Result<(), ExportError> {
    let io_err = |source: std::io::Error| ExportError::Io { path: path.display().to_string(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = std::fs::File::create(path).map_err(io_err)?;
    write_events(events, format, std::io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventTimestamp;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn events() -> Vec<ParsedEvent> {
        let ts = NaiveDate::from_ymd_opt(2025, 12, 10)
            .and_then(|d| d.and_hms_opt(6, 55, 46))
            .unwrap();
        vec![
            ParsedEvent {
                timestamp: EventTimestamp::Resolved(ts),
                event_id: "E9".to_string(),
                source_address: "10.0.0.5".to_string(),
                account: "root".to_string(),
                raw_message: "Failed password for root from 10.0.0.5 port 22 ssh2".to_string(),
            },
            ParsedEvent {
                timestamp: EventTimestamp::Unparsed("Foo 1 00:00:00".to_string()),
                event_id: "UNKNOWN".to_string(),
                source_address: String::new(),
                account: String::new(),
                raw_message: "a, quoted \"thing\"".to_string(),
            },
        ]
    }

    #[test]
    fn csv_has_fixed_header_and_escaping() {
        let mut out = Vec::new();
        write_events(&events(), OutputFormat::Csv, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Timestamp,EventId,SourceIP,User,Raw_Message");
        assert_eq!(
            lines[1],
            "2025-12-10 06:55:46,E9,10.0.0.5,root,Failed password for root from 10.0.0.5 port 22 ssh2"
        );
        assert_eq!(lines[2], r#"Foo 1 00:00:00,UNKNOWN,,,"a, quoted ""thing""""#);
    }

    #[test]
    fn jsonl_writes_one_object_per_line() {
        let mut out = Vec::new();
        write_events(&events(), OutputFormat::Jsonl, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(first["Timestamp"], "2025-12-10 06:55:46");
        assert_eq!(first["EventId"], "E9");
        assert_eq!(first["SourceIP"], "10.0.0.5");
        assert_eq!(first["User"], "root");
        assert_eq!(text.lines().count(), 2);
    }
}
