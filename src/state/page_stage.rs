/// Per-page stage labels
use crate::CorpusError;
use serde::Serialize;
use std::fmt;

/// The stage a single page is in while it is being turned into a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStage {
    /// Opening a context and navigating to the page
    Rendering,

    /// Waiting for the landmark and reading its text
    Extracting,

    /// Mapping the local path onto the public origin
    Remapping,

    /// Appending the finished record to the corpus
    Accumulating,
}

impl PageStage {
    /// The stage a page-level error is raised in
    pub fn of_error(error: &CorpusError) -> Self {
        match error {
            CorpusError::ContentNotFound { .. } | CorpusError::MalformedDocument { .. } => {
                Self::Extracting
            }
            CorpusError::Serialize { .. } => Self::Accumulating,
            _ => Self::Rendering,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rendering => "rendering",
            Self::Extracting => "extracting",
            Self::Remapping => "remapping",
            Self::Accumulating => "accumulating",
        }
    }
}

impl fmt::Display for PageStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_error() {
        let navigation = CorpusError::Navigation {
            url: "http://localhost:8000/a.html".to_string(),
            message: "HTTP 404".to_string(),
        };
        assert_eq!(PageStage::of_error(&navigation), PageStage::Rendering);

        let malformed = CorpusError::MalformedDocument {
            url: "http://localhost:8000/a.html".to_string(),
            selector: "h1".to_string(),
        };
        assert_eq!(PageStage::of_error(&malformed), PageStage::Extracting);
    }

    #[test]
    fn test_display() {
        assert_eq!(PageStage::Remapping.to_string(), "remapping");
    }
}
