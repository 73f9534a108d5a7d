use serde::{Deserialize, Serialize};

/// One corpus entry
///
/// Field order is the serialized order: `path`, `title`, `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Public URL of the page (remote host + relative path)
    pub path: String,

    /// Normalized primary heading
    pub title: String,

    /// Normalized landmark text
    pub text: String,
}
