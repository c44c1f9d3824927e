use std::sync::Arc;

use tracing::debug;

use crate::decision::pipeline::Specification;
use crate::decision::upgradable::{self, UpgradeableRejectReason};
use crate::decision::{Decision, RejectionType, SpecificationPriority};
use crate::errors::CollaboratorError;
use crate::formats::FormatScorer;
use crate::media::MediaFileSource;
use crate::models::{RemoteRelease, SearchContext};

/// Rejects candidates that do not improve on a file already on disk.
pub struct UpgradeDiskSpecification {
    media: Arc<dyn MediaFileSource>,
    formats: Arc<dyn FormatScorer>,
}

impl UpgradeDiskSpecification {
    pub fn new(media: Arc<dyn MediaFileSource>, formats: Arc<dyn FormatScorer>) -> Self {
        Self { media, formats }
    }
}

impl Specification for UpgradeDiskSpecification {
    fn name(&self) -> &'static str {
        "UpgradeDisk"
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

            debug!(
                existing = %file.quality,
                "checking if release is higher quality than existing file"
            );

            let reason = upgradable::is_upgradable(
                profile,
                file.quality,
                &file_formats,
                candidate.quality,
                &candidate.custom_formats,
            );

            match reason {
                UpgradeableRejectReason::None => {}
                UpgradeableRejectReason::BetterQuality => {
                    return Ok(Decision::reject(format!(
                        "Existing file on disk is of equal or higher preference: {}",
                        file.quality
                    )));
                }
                UpgradeableRejectReason::BetterRevision => {
                    return Ok(Decision::reject(format!(
                        "Existing file on disk is of equal or higher revision: {}",
                        file.quality.revision
                    )));
                }
                UpgradeableRejectReason::QualityCutoff => {
                    let cutoff = profile
                        .cutoff_item()
                        .map_or_else(|| profile.cutoff.to_string(), ToString::to_string);
                    return Ok(Decision::reject(format!(
                        "Existing file on disk meets quality cutoff: {cutoff}"
                    )));
                }
                UpgradeableRejectReason::CustomFormatCutoff => {
                    return Ok(Decision::reject(format!(
                        "Existing file on disk meets Custom Format cutoff: {}",
                        profile.cutoff_format_score
                    )));
                }
                UpgradeableRejectReason::CustomFormatScore => {
                    return Ok(Decision::reject(format!(
                        "Existing file on disk has an equal or higher custom format score: {}",
                        profile.calculate_format_score(&file_formats)
                    )));
                }
            }

            if !upgradable::is_upgrade_allowed(
                profile,
                file.quality,
                &file_formats,
                candidate.quality,
                &candidate.custom_formats,
            ) {
                return Ok(Decision::reject(
                    "Existing file on disk and the Quality profile does not allow upgrades",
                ));
            }
        }

        Ok(Decision::Accept)
    }
}
