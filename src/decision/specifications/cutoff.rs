use std::sync::Arc;

use tracing::debug;

use crate::decision::pipeline::Specification;
use crate::decision::upgradable;
use crate::decision::{Decision, RejectionType, SpecificationPriority};
use crate::errors::CollaboratorError;
use crate::formats::FormatScorer;
use crate::media::MediaFileSource;
use crate::models::{RemoteRelease, SearchContext};

/// Rejects candidates for episodes whose file on disk already meets the
/// profile cutoff in every dimension.
pub struct CutoffSpecification {
    media: Arc<dyn MediaFileSource>,
    formats: Arc<dyn FormatScorer>,
}

impl CutoffSpecification {
    pub fn new(media: Arc<dyn MediaFileSource>, formats: Arc<dyn FormatScorer>) -> Self {
        Self { media, formats }
    }
}

impl Specification for CutoffSpecification {
    fn name(&self) -> &'static str {
        "Cutoff"
    }

    fn priority(&self) -> SpecificationPriority {
        SpecificationPriority::Database
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
        let files = self
            .media
            .files_for_episodes(candidate.show.id, &candidate.episode_ids)?;

        for file in files {
            let file_formats = self
                .formats
                .parse_custom_format(&file.relative_path, file.size)?;

            debug!(existing = %file.quality, "comparing existing file against the profile cutoff");

            if !upgradable::cutoff_not_met(profile, file.quality, &file_formats, candidate.quality)
            {
                let cutoff = profile
                    .cutoff_item()
                    .map_or_else(|| profile.cutoff.to_string(), ToString::to_string);
                return Ok(Decision::reject(format!(
                    "Existing file meets cutoff: {cutoff}"
                )));
            }
        }

        Ok(Decision::Accept)
    }
}
