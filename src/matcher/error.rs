#[derive(Debug, thiserror::Error)]
#[error("unmatched group in pattern: {pattern:?}")]
pub struct PatternError {
    pattern: String,
}

impl PatternError {
    pub(super) fn unmatched_group(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_owned(),
        }
    }

    /// The pattern that failed to expand.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}
