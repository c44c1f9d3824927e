use std::sync::Arc;

use tracing::debug;

use crate::config::{PolicySource, ProperDownloadPolicy};
use crate::decision::pipeline::Specification;
use crate::decision::upgradable::{self, UpgradeableRejectReason};
use crate::decision::{Decision, RejectionType};
use crate::errors::CollaboratorError;
use crate::formats::FormatScorer;
use crate::models::{RemoteRelease, SearchContext};
use crate::queue::{QueueSource, TrackedDownloadState};

/// Cross-checks a candidate against every in-flight download for the same
/// show and episodes. Acceptance requires clearing all of them.
pub struct QueueSpecification {
    queue: Arc<dyn QueueSource>,
    formats: Arc<dyn FormatScorer>,
    policy: Arc<dyn PolicySource>,
}

impl QueueSpecification {
    pub fn new(
        queue: Arc<dyn QueueSource>,
        formats: Arc<dyn FormatScorer>,
        policy: Arc<dyn PolicySource>,
    ) -> Self {
        Self {
            queue,
            formats,
            policy,
        }
    }
}

impl Specification for QueueSpecification {
    fn name(&self) -> &'static str {
        "Queue"
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
        let matching = self.queue.queue()?.into_iter().filter(|entry| {
            entry.show_id == candidate.show.id
                && entry
                    .episode_ids
                    .iter()
                    .any(|id| candidate.episode_ids.contains(id))
        });

        for entry in matching {
            // Failed and awaiting removal means an independent replacement
            // search owns this slot. Fully failed entries stop appearing
            // here at all, the queue is a copy of the tracked downloads
            // rather than a live reference.
            if entry.state == TrackedDownloadState::FailedPending {
                continue;
            }

            let queued_formats = self.formats.parse_custom_format(&entry.title, entry.size)?;

            debug!(queued = %entry.quality, "checking if existing release in queue meets cutoff");

            if !upgradable::cutoff_not_met(
                profile,
                entry.quality,
                &queued_formats,
                candidate.quality,
            ) {
                return Ok(Decision::reject(format!(
                    "Release in queue already meets cutoff: {}",
                    entry.quality
                )));
            }

            debug!(
                queued = %entry.quality,
                "checking if release is higher quality than queued release"
            );

            let reason = upgradable::is_upgradable(
                profile,
                entry.quality,
                &queued_formats,
                candidate.quality,
                &candidate.custom_formats,
            );

            match reason {
                UpgradeableRejectReason::None => {}
                UpgradeableRejectReason::BetterQuality => {
                    return Ok(Decision::reject(format!(
                        "Release in queue on disk is of equal or higher preference: {}",
                        entry.quality
                    )));
                }
                UpgradeableRejectReason::BetterRevision => {
                    return Ok(Decision::reject(format!(
                        "Release in queue on disk is of equal or higher revision: {}",
                        entry.quality.revision
                    )));
                }
                UpgradeableRejectReason::QualityCutoff => {
                    let cutoff = profile
                        .cutoff_item()
                        .map_or_else(|| profile.cutoff.to_string(), ToString::to_string);
                    return Ok(Decision::reject(format!(
                        "Release in queue on disk meets quality cutoff: {cutoff}"
                    )));
                }
                UpgradeableRejectReason::CustomFormatCutoff => {
                    return Ok(Decision::reject(format!(
                        "Release in queue on disk meets Custom Format cutoff: {}",
                        profile.cutoff_format_score
                    )));
                }
                UpgradeableRejectReason::CustomFormatScore => {
                    return Ok(Decision::reject(format!(
                        "Release in queue on disk has an equal or higher custom format score: {}",
                        profile.calculate_format_score(&queued_formats)
                    )));
                }
            }

            debug!(queued = %entry.quality, "checking if profiles allow upgrading");

            if !upgradable::is_upgrade_allowed(
                profile,
                entry.quality,
                &queued_formats,
                candidate.quality,
                &candidate.custom_formats,
            ) {
                return Ok(Decision::reject(
                    "Another release is queued and the Quality profile does not allow upgrades",
                ));
            }

            if upgradable::is_revision_upgrade(entry.quality, candidate.quality)
                && self.policy.download_propers_and_repacks() == ProperDownloadPolicy::DoNotUpgrade
            {
                debug!("auto downloading of propers is disabled");
                return Ok(Decision::reject("Proper downloading is disabled"));
            }
        }

        Ok(Decision::Accept)
    }
}
