//! Dissection of one captured connection.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use glob::Pattern;

use dissect::{DissectLimits, Dissector, FrameEvent};
use schema::{CommandTable, SchemaDirectory, StructuralDecoder};
use serde::Serialize;
use wire::Transport;

use crate::render::FrameRecord;

/// Everything one connection's bytes dissected into.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionReport {
    /// Where the bytes came from.
    pub source: String,
    /// Transport the bytes were scanned as.
    pub transport: Transport,
    /// Frames in stream order.
    pub frames: Vec<FrameRecord>,
    /// Bytes left unconsumed at the end (a partial frame, or a lone `0x55`).
    pub buffered: usize,
    /// Fatal error that stopped dissection, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Replays a reassembled connection through a fresh engine scanning the
/// transport `table` was built for.
///
/// With `chunk` set, the bytes are fed as reads of at most that many bytes;
/// otherwise as a single read. Frames dispatched before a fatal error are
/// kept.
#[must_use]
pub fn dissect_connection(
    source: impl Into<String>,
    table: Arc<CommandTable>,
    structural: Arc<dyn StructuralDecoder>,
    bytes: &[u8],
    chunk: Option<usize>,
) -> ConnectionReport {
    let transport = table.transport();
    let mut engine = Dissector::new(table, structural, DissectLimits::default());
    let mut events: Vec<FrameEvent> = Vec::new();
    let chunk = chunk.filter(|n| *n > 0).unwrap_or(bytes.len().max(1));

    let mut error = None;
    for read in bytes.chunks(chunk) {
        if let Err(err) = engine.receive(read, &mut events) {
            error = Some(err.to_string());
            break;
        }
    }

    ConnectionReport {
        source: source.into(),
        transport,
        frames: events.iter().map(FrameRecord::from).collect(),
        buffered: engine.buffered(),
        error,
    }
}

/// Parses a schema directory from JSON.
pub fn parse_schema_directory(json: &str) -> serde_json::Result<SchemaDirectory> {
    serde_json::from_str(json)
}

/// Lists the capture files directly inside `dir`, sorted by path.
///
/// With `glob` set, a file is kept when the pattern matches either its path
/// or its file name.
pub fn collect_capture_files(dir: &Path, glob: Option<&str>) -> Result<Vec<PathBuf>> {
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}
