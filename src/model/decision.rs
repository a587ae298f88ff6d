use std::fmt;

/// Reason attached to a rejection. Never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionReason(String);

impl RejectionReason {
    /// Returns `None` for an empty or whitespace-only reason. The text is kept as typed.
    pub fn new(reason: impl Into<String>) -> Option<Self> {
        let reason = reason.into();
        if reason.trim().is_empty() {
            None
        } else {
            Some(Self(reason))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Admin decision on a pending draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject(RejectionReason),
}

impl ReviewDecision {
    pub fn reject(reason: impl Into<String>) -> Option<Self> {
        RejectionReason::new(reason).map(Self::Reject)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn blank_reason_refused_test() {
        assert!(RejectionReason::new("").is_none());
        assert!(RejectionReason::new("  \t\n").is_none());
        assert!(ReviewDecision::reject("   ").is_none());
    }

    #[test]
    fn reason_kept_verbatim_test() {
        let reason = RejectionReason::new("  Video is blurry ").unwrap();
        assert_eq!(reason.as_str(), "  Video is blurry ");
        assert_eq!(
            ReviewDecision::reject("ok reason"),
            Some(ReviewDecision::Reject(RejectionReason::new("ok reason").unwrap()))
        );
    }
}
