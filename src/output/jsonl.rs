//! Newline-delimited JSON encoding for the corpus

use crate::output::DocumentRecord;
use crate::CorpusError;
use std::path::Path;

/// Encodes records as compact JSON objects joined by `\n`
///
/// There is no wrapper array and no trailing newline; an empty slice encodes
/// to an empty string.
pub fn encode_corpus(records: &[DocumentRecord]) -> Result<String, CorpusError> {
    let lines = records
        .iter()
        .map(|record| {
            serde_json::to_string(record).map_err(|source| CorpusError::Serialize {
                path: record.path.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(lines.join("\n"))
}

/// Writes the encoded corpus to `path`, replacing any existing content
pub async fn write_corpus(path: &Path, records: &[DocumentRecord]) -> Result<(), CorpusError> {
    let encoded = encode_corpus(records)?;

    tokio::fs::write(path, encoded)
        .await
        .map_err(|source| CorpusError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Parses a corpus back into records, ignoring blank lines
pub fn parse_corpus(content: &str) -> serde_json::Result<Vec<DocumentRecord>> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(serde_json::from_str)
        .collect()
}
