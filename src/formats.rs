use quality::profile::CustomFormat;

use crate::errors::CollaboratorError;

pub trait FormatScorer: Send + Sync {
    /// Custom formats matched by a release title at the given size. Must be
    /// deterministic for identical inputs and free of side effects.
    fn parse_custom_format(
        &self,
        title: &str,
        size: u64,
    ) -> Result<Vec<CustomFormat>, CollaboratorError>;
}
