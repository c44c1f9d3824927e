use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::debug;

use crate::config::{PolicySource, ProperDownloadPolicy};
use crate::decision::pipeline::Specification;
use crate::decision::upgradable;
use crate::decision::{Decision, RejectionType, SpecificationPriority};
use crate::errors::CollaboratorError;
use crate::media::MediaFileSource;
use crate::models::{RemoteRelease, SearchContext};

/// Propers are only worth grabbing shortly after the original aired.
const PROPER_WINDOW_DAYS: i64 = 7;

/// Gates proper and repack releases behind the configured download policy.
pub struct ProperSpecification {
    media: Arc<dyn MediaFileSource>,
    policy: Arc<dyn PolicySource>,
}

impl ProperSpecification {
    pub fn new(media: Arc<dyn MediaFileSource>, policy: Arc<dyn PolicySource>) -> Self {
        Self { media, policy }
    }
}

impl Specification for ProperSpecification {
    fn name(&self) -> &'static str {
        "Proper"
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
        search: Option<&SearchContext>,
    ) -> Result<Decision, CollaboratorError> {
        if search.is_some() {
            return Ok(Decision::Accept);
        }

        let policy = self.policy.download_propers_and_repacks();
        if policy == ProperDownloadPolicy::DoNotPrefer {
            return Ok(Decision::Accept);
        }

        let files = self
            .media
            .files_for_episodes(candidate.show.id, &candidate.episode_ids)?;

        for file in files {
            if upgradable::is_revision_upgrade(file.quality, candidate.quality) {
                if file.date_added < Utc::now() - Duration::days(PROPER_WINDOW_DAYS) {
                    debug!(candidate = %candidate.quality, "proper for an old episode, rejecting");
                    return Ok(Decision::reject("Proper for old episode"));
                }

                if policy == ProperDownloadPolicy::DoNotUpgrade {
                    debug!("auto downloading of propers is disabled");
                    return Ok(Decision::reject("Proper downloading is disabled"));
                }
            }
        }

        Ok(Decision::Accept)
    }
}
