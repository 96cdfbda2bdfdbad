//! Provider error taxonomy
//!
//! Every failure below the orchestrator is one of these kinds. The fallback
//! resolver converts all of them into a tier advance; nothing here ever
//! reaches an API caller.

use std::time::Duration;

/// Longest slice of raw provider output allowed into an error or a log line.
pub const MAX_DIAGNOSTIC_LEN: usize = 256;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// No credential configured for this capability. Expected in
    /// development; routes straight to the simulation tier without a
    /// network call.
    #[error("no credential configured")]
    MissingCredential,

    /// The provider did not answer within the call's deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Non-success transport status from the provider.
    #[error("provider returned {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Provider output was not a JSON document we could decode.
    #[error("unparseable provider output: {0}")]
    Malformed(String),

    /// Provider output decoded but violated the capability's schema.
    #[error("provider output violates schema: {0}")]
    Contract(String),

    /// Provider answered without usable content (missing message content,
    /// deferring secondary tier).
    #[error("provider returned an empty result")]
    Empty,
}

impl ProviderError {
    /// Build a `Rejected` with the body already bounded.
    pub fn rejected(status: u16, body: &str) -> Self {
        Self::Rejected {
            status,
            body: snippet(body),
        }
    }
}

/// Truncate raw provider text to a bounded diagnostic slice.
///
/// Cuts on a char boundary so arbitrary provider bytes cannot panic the
/// error path.
pub fn snippet(text: &str) -> String {
    if text.len() <= MAX_DIAGNOSTIC_LEN {
        return text.to_string();
    }
    let mut end = MAX_DIAGNOSTIC_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_short_text_unchanged() {
        assert_eq!(snippet("not json"), "not json");
    }

    #[test]
    fn test_snippet_is_bounded() {
        let long = "x".repeat(10_000);
        let s = snippet(&long);
        assert!(s.len() <= MAX_DIAGNOSTIC_LEN + 3);
        assert!(s.ends_with("..."));
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        // Multi-byte chars straddling the cut must not panic.
        let long = "é".repeat(MAX_DIAGNOSTIC_LEN);
        let s = snippet(&long);
        assert!(s.ends_with("..."));
    }

    #[test]
    fn test_rejected_bounds_body() {
        let err = ProviderError::rejected(500, &"y".repeat(5_000));
        match err {
            ProviderError::Rejected { status, body } => {
                assert_eq!(status, 500);
                assert!(body.len() <= MAX_DIAGNOSTIC_LEN + 3);
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }
}
