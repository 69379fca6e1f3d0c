//! Plain-text edge-list reader used by the command-line front-end.
//!
//! Format: one `snapshot source target` row per line, fields separated by
//! any whitespace. Blank lines and lines starting with `#` are skipped.
//! Endpoint fields are classified with [`NodeToken::parse`]; snapshot ids
//! are kept as text.
use crate::network::{
    edges::TemporalEdge,
    errors::{NetworkError, NetworkResult},
    nodes::NodeToken,
};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read an edge list from a file.
///
/// # Errors
/// - `Io` if the file cannot be opened or read.
/// - `Parse` for the first malformed row.
pub fn read_edge_list(path: &Path) -> NetworkResult<Vec<TemporalEdge<String>>> {
    let file = File::open(path)
        .map_err(|e| NetworkError::Io { message: format!("{}: {e}", path.display()) })?;
    read_edge_list_from(BufReader::new(file))
}

/// Read an edge list from any buffered reader.
pub fn read_edge_list_from<R: BufRead>(reader: R) -> NetworkResult<Vec<TemporalEdge<String>>> {
    let mut edges = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(NetworkError::Parse {
                line: lineno + 1,
                message: format!("expected 3 fields, found {}", fields.len()),
            });
        }
        edges.push(TemporalEdge {
            snapshot: fields[0].to_string(),
            source: NodeToken::parse(fields[1]),
            target: NodeToken::parse(fields[2]),
        });
    }
    Ok(edges)
}
