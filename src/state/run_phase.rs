/// Run phase definitions for tracking corpus build progress
///
/// A run moves strictly forward through its phases. Any phase may abort.
use std::fmt;

/// Represents the current phase of a corpus build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunPhase {
    // ===== Active Phases =====
    /// Run has been created but nothing has happened yet
    Idle,

    /// HTML files are being discovered under the root directory
    Enumerating,

    /// Pages are being rendered, extracted and accumulated
    Crawling,

    /// Accumulated records are being written to the output
    Serializing,

    // ===== Terminal Phases =====
    /// Corpus was written successfully
    Done,

    /// Run stopped on an unhandled failure
    Aborted,
}

impl RunPhase {
    /// Returns true if this is a terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    /// Returns true if `next` is a legal successor of this phase
    ///
    /// Forward steps go one phase at a time. Every non-terminal phase can abort.
    pub fn can_transition_to(&self, next: RunPhase) -> bool {
        match (self, next) {
            (from, Self::Aborted) => !from.is_terminal(),
            (Self::Idle, Self::Enumerating) => true,
            (Self::Enumerating, Self::Crawling) => true,
            (Self::Crawling, Self::Serializing) => true,
            (Self::Serializing, Self::Done) => true,
            _ => false,
        }
    }

    /// Returns a short lowercase label for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Enumerating => "enumerating",
            Self::Crawling => "crawling",
            Self::Serializing => "serializing",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_path() {
        assert!(RunPhase::Idle.can_transition_to(RunPhase::Enumerating));
        assert!(RunPhase::Enumerating.can_transition_to(RunPhase::Crawling));
        assert!(RunPhase::Crawling.can_transition_to(RunPhase::Serializing));
        assert!(RunPhase::Serializing.can_transition_to(RunPhase::Done));
    }

    #[test]
    fn test_no_skipping_or_going_back() {
        assert!(!RunPhase::Idle.can_transition_to(RunPhase::Crawling));
        assert!(!RunPhase::Enumerating.can_transition_to(RunPhase::Serializing));
        assert!(!RunPhase::Serializing.can_transition_to(RunPhase::Crawling));
        assert!(!RunPhase::Crawling.can_transition_to(RunPhase::Done));
    }

    #[test]
    fn test_abort_from_active_phases_only() {
        assert!(RunPhase::Idle.can_transition_to(RunPhase::Aborted));
        assert!(RunPhase::Enumerating.can_transition_to(RunPhase::Aborted));
        assert!(RunPhase::Crawling.can_transition_to(RunPhase::Aborted));
        assert!(RunPhase::Serializing.can_transition_to(RunPhase::Aborted));

        assert!(!RunPhase::Done.can_transition_to(RunPhase::Aborted));
        assert!(!RunPhase::Aborted.can_transition_to(RunPhase::Aborted));
    }

    #[test]
    fn test_is_terminal() {
        assert!(RunPhase::Done.is_terminal());
        assert!(RunPhase::Aborted.is_terminal());
        assert!(!RunPhase::Idle.is_terminal());
        assert!(!RunPhase::Crawling.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", RunPhase::Enumerating), "enumerating");
        assert_eq!(format!("{}", RunPhase::Done), "done");
    }
}
