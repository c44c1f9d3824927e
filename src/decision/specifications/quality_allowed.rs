use tracing::debug;

use crate::decision::pipeline::Specification;
use crate::decision::{Decision, RejectionType};
use crate::errors::CollaboratorError;
use crate::models::{RemoteRelease, SearchContext};

/// Rejects candidates whose tier the profile does not list at all.
pub struct QualityAllowedSpecification;

impl Specification for QualityAllowedSpecification {
    fn name(&self) -> &'static str {
        "QualityAllowed"
    }

    fn rejection_type(&self) -> RejectionType {
        RejectionType::Permanent
    }

    fn evaluate(
        &self,
        candidate: &RemoteRelease,
        _search: Option<&SearchContext>,
    ) -> Result<Decision, CollaboratorError> {
        let profile = &candidate.show.quality_profile;
        if profile.index_of(candidate.quality.tier).is_none() {
            debug!(quality = %candidate.quality, "quality rejected by the show's quality profile");
            return Ok(Decision::reject(format!(
                "{} is not wanted in profile",
                candidate.quality.tier
            )));
        }

        Ok(Decision::Accept)
    }
}
