//! How a dequeued URL was resolved by the page processor
use crate::PageError;
use std::fmt;

/// Final outcome for one dequeued URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    // ===== Success =====
    /// Page was fetched, parsed and recorded
    Recorded,

    // ===== Short-circuits =====
    /// Normalized URL had already been visited
    AlreadyVisited,

    /// The visited set had reached the page cap
    CapReached,

    /// Response was not HTML; skipped silently
    ContentMismatch,

    // ===== Errors =====
    /// Server answered with a non-2xx status
    HttpError,

    /// Connection, timeout or body transfer failure
    Unreachable,

    /// Page could not be parsed or its links resolved
    Failed,
}

impl PageOutcome {
    /// Returns true if a page record was produced
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Recorded)
    }

    /// Returns true if the URL was dropped before any request was made
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::AlreadyVisited | Self::CapReached)
    }

    /// Returns true if this represents a logged error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::HttpError | Self::Unreachable | Self::Failed)
    }

    /// Short label used in logs and statistics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recorded => "recorded",
            Self::AlreadyVisited => "already_visited",
            Self::CapReached => "cap_reached",
            Self::ContentMismatch => "content_mismatch",
            Self::HttpError => "http_error",
            Self::Unreachable => "unreachable",
            Self::Failed => "failed",
        }
    }
}

impl From<&PageError> for PageOutcome {
    fn from(error: &PageError) -> Self {
        match error {
            PageError::Transport { .. } => Self::Unreachable,
            PageError::HttpStatus { .. } => Self::HttpError,
            PageError::UnsupportedContentType { .. } => Self::ContentMismatch,
            PageError::Parse { .. } => Self::Failed,
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(PageOutcome::Recorded.is_success());
        assert!(PageOutcome::AlreadyVisited.is_skipped());
        assert!(PageOutcome::CapReached.is_skipped());
        assert!(!PageOutcome::ContentMismatch.is_error());
        assert!(PageOutcome::HttpError.is_error());
        assert!(PageOutcome::Unreachable.is_error());
        assert!(PageOutcome::Failed.is_error());
    }

    #[test]
    fn test_from_page_error() {
        let err = PageError::HttpStatus {
            url: "https://example.edu/".to_string(),
            status: 404,
        };
        assert_eq!(PageOutcome::from(&err), PageOutcome::HttpError);

        let err = PageError::UnsupportedContentType {
            url: "https://example.edu/".to_string(),
            content_type: "application/pdf".to_string(),
        };
        assert_eq!(PageOutcome::from(&err), PageOutcome::ContentMismatch);
    }

    #[test]
    fn test_display() {
        assert_eq!(PageOutcome::Unreachable.to_string(), "unreachable");
    }
}
