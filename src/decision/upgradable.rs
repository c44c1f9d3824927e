use std::cmp::Ordering;

use quality::profile::{CustomFormat, QualityProfile};
use quality::ReleaseQuality;
use tracing::debug;

/// Why a candidate may not replace an existing release. `None` means the
/// upgrade is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeableRejectReason {
    None,
    BetterQuality,
    BetterRevision,
    QualityCutoff,
    CustomFormatCutoff,
    CustomFormatScore,
}

/// True while the existing item still leaves something to search for: its
/// tier is below the profile cutoff, the candidate is a revision upgrade of
/// it, or its format score is below the format cutoff.
pub fn cutoff_not_met(
    profile: &QualityProfile,
    existing: ReleaseQuality,
    existing_formats: &[CustomFormat],
    candidate: ReleaseQuality,
) -> bool {
    if !quality_cutoff_met(profile, existing) {
        return true;
    }

    if is_revision_upgrade(existing, candidate) {
        return true;
    }

    if profile.calculate_format_score(existing_formats) < profile.cutoff_format_score {
        return true;
    }

    debug!(existing = %existing, "existing item meets cutoff, skipping");
    false
}

/// Whether the candidate improves on the existing item, and if not, why
/// not. Checks run in a fixed precedence order; the first failing one wins.
/// Total over every input: unlisted tiers rank below every listed one and a
/// cutoff missing from the profile counts as met.
pub fn is_upgradable(
    profile: &QualityProfile,
    existing: ReleaseQuality,
    existing_formats: &[CustomFormat],
    candidate: ReleaseQuality,
    candidate_formats: &[CustomFormat],
) -> UpgradeableRejectReason {
    let rank = profile
        .index_of(candidate.tier)
        .cmp(&profile.index_of(existing.tier));

    if !profile.upgrade_allowed && rank != Ordering::Equal {
        debug!("quality differs and the profile does not allow upgrades");
        return UpgradeableRejectReason::BetterQuality;
    }

    match rank {
        Ordering::Less => {
            debug!(existing = %existing, "existing item has better quality, skipping");
            return UpgradeableRejectReason::BetterQuality;
        }
        Ordering::Greater => {
            if quality_cutoff_met(profile, existing) {
                debug!(existing = %existing, "existing item meets the quality cutoff, skipping");
                return UpgradeableRejectReason::QualityCutoff;
            }
            return UpgradeableRejectReason::None;
        }
        Ordering::Equal => {}
    }

    match candidate.revision.cmp_rank(existing.revision) {
        Ordering::Greater => {
            debug!(candidate = %candidate, "new item has a better revision");
            return UpgradeableRejectReason::None;
        }
        Ordering::Less => {
            debug!(existing = %existing, "existing item has a better revision, skipping");
            return UpgradeableRejectReason::BetterRevision;
        }
        Ordering::Equal => {}
    }

    let existing_score = profile.calculate_format_score(existing_formats);
    let candidate_score = profile.calculate_format_score(candidate_formats);

    if existing_score >= profile.cutoff_format_score && candidate_score <= existing_score {
        debug!(existing_score, "existing item meets the custom format cutoff, skipping");
        return UpgradeableRejectReason::CustomFormatCutoff;
    }

    if candidate_score <= existing_score {
        debug!(
            existing_score,
            candidate_score, "custom format score does not improve, skipping"
        );
        return UpgradeableRejectReason::CustomFormatScore;
    }

    UpgradeableRejectReason::None
}

/// Blanket gate behind [`is_upgradable`]: a locked profile blocks any
/// quality or format score upgrade even when the per-metric checks permit
/// it.
pub fn is_upgrade_allowed(
    profile: &QualityProfile,
    existing: ReleaseQuality,
    existing_formats: &[CustomFormat],
    candidate: ReleaseQuality,
    candidate_formats: &[CustomFormat],
) -> bool {
    let quality_upgrade = profile.compare_quality(candidate, existing) == Ordering::Greater;
    let format_upgrade = profile.calculate_format_score(candidate_formats)
        > profile.calculate_format_score(existing_formats);

    if (quality_upgrade || format_upgrade) && !profile.upgrade_allowed {
        debug!("quality profile does not allow upgrades, skipping");
        return false;
    }

    true
}

/// True exactly when the candidate is a newer revision of the same tier.
/// Tier identity, not profile rank: grouped tiers rank equal yet a proper
/// of one is not a revision of the other.
pub fn is_revision_upgrade(existing: ReleaseQuality, candidate: ReleaseQuality) -> bool {
    candidate.tier == existing.tier
        && candidate.revision.cmp_rank(existing.revision) == Ordering::Greater
}

fn quality_cutoff_met(profile: &QualityProfile, existing: ReleaseQuality) -> bool {
    let Some(cutoff_index) = profile.cutoff_index() else {
        // A cutoff missing from the items counts as met.
        return true;
    };
    profile
        .index_of(existing.tier)
        .is_some_and(|index| index >= cutoff_index)
}

#[cfg(test)]
mod tests {
    use quality::profile::{FormatScore, QualityProfileItem};
    use quality::{QualityTier, Revision};

    use super::*;

    fn profile() -> QualityProfile {
        QualityProfile {
            name: "HD".into(),
            items: vec![
                QualityProfileItem::single(QualityTier::Sdtv),
                QualityProfileItem::group(
                    "720p",
                    vec![QualityTier::Hdtv720p, QualityTier::Web720p],
                ),
                QualityProfileItem::single(QualityTier::Web1080p),
            ],
            cutoff: QualityTier::Web1080p,
            upgrade_allowed: true,
            format_scores: vec![
                FormatScore {
                    format_id: 1,
                    score: 50,
                },
                FormatScore {
                    format_id: 2,
                    score: 25,
                },
            ],
            cutoff_format_score: 0,
        }
    }

    fn quality(tier: QualityTier) -> ReleaseQuality {
        ReleaseQuality::new(tier)
    }

    fn proper(tier: QualityTier) -> ReleaseQuality {
        ReleaseQuality {
            tier,
            revision: Revision::proper(1),
        }
    }

    fn atmos() -> CustomFormat {
        CustomFormat::new(1, "Atmos")
    }

    fn x265() -> CustomFormat {
        CustomFormat::new(2, "x265")
    }

    #[test]
    fn test_cutoff_not_met_when_both_dimensions_unmet() {
        let mut profile = profile();
        profile.cutoff_format_score = 25;
        assert!(cutoff_not_met(
            &profile,
            quality(QualityTier::Hdtv720p),
            &[],
            quality(QualityTier::Web1080p),
        ));
    }

    #[test]
    fn test_cutoff_not_met_when_only_tier_unmet() {
        let mut profile = profile();
        profile.cutoff_format_score = 25;
        assert!(cutoff_not_met(
            &profile,
            quality(QualityTier::Hdtv720p),
            &[atmos()],
            quality(QualityTier::Web1080p),
        ));
    }

    #[test]
    fn test_cutoff_not_met_when_only_format_score_unmet() {
        let mut profile = profile();
        profile.cutoff_format_score = 25;
        assert!(cutoff_not_met(
            &profile,
            quality(QualityTier::Web1080p),
            &[],
            quality(QualityTier::Web1080p),
        ));
    }

    #[test]
    fn test_cutoff_met_when_both_dimensions_met() {
        let mut profile = profile();
        profile.cutoff_format_score = 25;
        assert!(!cutoff_not_met(
            &profile,
            quality(QualityTier::Web1080p),
            &[atmos()],
            quality(QualityTier::Sdtv),
        ));
    }

    #[test]
    fn test_cutoff_not_met_for_a_revision_upgrade_of_an_item_at_cutoff() {
        let profile = profile();
        assert!(cutoff_not_met(
            &profile,
            quality(QualityTier::Web1080p),
            &[],
            proper(QualityTier::Web1080p),
        ));
    }

    #[test]
    fn test_better_quality_when_existing_ranks_higher() {
        let profile = profile();
        let reason = is_upgradable(
            &profile,
            quality(QualityTier::Web1080p),
            &[],
            quality(QualityTier::Hdtv720p),
            &[],
        );
        assert_eq!(reason, UpgradeableRejectReason::BetterQuality);
    }

    #[test]
    fn test_better_quality_when_upgrades_disabled_and_tiers_differ() {
        let mut profile = profile();
        profile.upgrade_allowed = false;
        let reason = is_upgradable(
            &profile,
            quality(QualityTier::Hdtv720p),
            &[],
            quality(QualityTier::Web1080p),
            &[],
        );
        assert_eq!(reason, UpgradeableRejectReason::BetterQuality);
    }

    #[test]
    fn test_format_upgrade_passes_is_upgradable_even_when_profile_locked() {
        let mut profile = profile();
        profile.upgrade_allowed = false;
        let reason = is_upgradable(
            &profile,
            quality(QualityTier::Web1080p),
            &[],
            quality(QualityTier::Web1080p),
            &[atmos()],
        );
        assert_eq!(reason, UpgradeableRejectReason::None);
    }

    #[test]
    fn test_better_revision_when_candidate_revision_older() {
        let profile = profile();
        let existing = ReleaseQuality {
            tier: QualityTier::Web1080p,
            revision: Revision::new(2),
        };
        let reason = is_upgradable(&profile, existing, &[], quality(QualityTier::Web1080p), &[]);
        assert_eq!(reason, UpgradeableRejectReason::BetterRevision);
    }

    #[test]
    fn test_revision_upgrade_at_equal_tier_is_permitted() {
        let profile = profile();
        let reason = is_upgradable(
            &profile,
            quality(QualityTier::Web1080p),
            &[],
            proper(QualityTier::Web1080p),
            &[],
        );
        assert_eq!(reason, UpgradeableRejectReason::None);
    }

    #[test]
    fn test_better_revision_takes_precedence_over_format_score() {
        let profile = profile();
        let existing = ReleaseQuality {
            tier: QualityTier::Web1080p,
            revision: Revision::new(2),
        };
        // Candidate is both an older revision and a lower format score;
        // the revision check must win.
        let reason = is_upgradable(
            &profile,
            existing,
            &[atmos()],
            quality(QualityTier::Web1080p),
            &[],
        );
        assert_eq!(reason, UpgradeableRejectReason::BetterRevision);
    }

    #[test]
    fn test_quality_cutoff_blocks_tier_upgrades_past_cutoff() {
        let mut profile = profile();
        profile.cutoff = QualityTier::Hdtv720p;
        let reason = is_upgradable(
            &profile,
            quality(QualityTier::Hdtv720p),
            &[],
            quality(QualityTier::Web1080p),
            &[],
        );
        assert_eq!(reason, UpgradeableRejectReason::QualityCutoff);
    }

    #[test]
    fn test_tier_upgrade_below_cutoff_is_permitted() {
        let profile = profile();
        let reason = is_upgradable(
            &profile,
            quality(QualityTier::Hdtv720p),
            &[],
            quality(QualityTier::Web1080p),
            &[],
        );
        assert_eq!(reason, UpgradeableRejectReason::None);
    }

    #[test]
    fn test_equivalent_release_lands_on_the_custom_format_cutoff() {
        let profile = profile();
        let reason = is_upgradable(
            &profile,
            quality(QualityTier::Web1080p),
            &[],
            quality(QualityTier::Web1080p),
            &[],
        );
        assert_eq!(reason, UpgradeableRejectReason::CustomFormatCutoff);
    }

    #[test]
    fn test_custom_format_score_when_not_improving_below_format_cutoff() {
        let mut profile = profile();
        profile.cutoff_format_score = 100;
        let reason = is_upgradable(
            &profile,
            quality(QualityTier::Web1080p),
            &[atmos()],
            quality(QualityTier::Web1080p),
            &[x265()],
        );
        assert_eq!(reason, UpgradeableRejectReason::CustomFormatScore);
    }

    #[test]
    fn test_format_score_improvement_is_permitted() {
        let mut profile = profile();
        profile.cutoff_format_score = 100;
        let reason = is_upgradable(
            &profile,
            quality(QualityTier::Web1080p),
            &[x265()],
            quality(QualityTier::Web1080p),
            &[atmos()],
        );
        assert_eq!(reason, UpgradeableRejectReason::None);
    }

    #[test]
    fn test_unknown_existing_tier_ranks_lowest() {
        let profile = profile();
        let reason = is_upgradable(
            &profile,
            quality(QualityTier::Bluray2160p),
            &[],
            quality(QualityTier::Sdtv),
            &[],
        );
        assert_eq!(reason, UpgradeableRejectReason::None);
    }

    #[test]
    fn test_unknown_candidate_tier_never_upgrades() {
        let profile = profile();
        let reason = is_upgradable(
            &profile,
            quality(QualityTier::Sdtv),
            &[],
            quality(QualityTier::Bluray2160p),
            &[],
        );
        assert_eq!(reason, UpgradeableRejectReason::BetterQuality);
    }

    #[test]
    fn test_missing_cutoff_counts_as_met() {
        let mut profile = profile();
        profile.cutoff = QualityTier::Bluray1080p;
        let reason = is_upgradable(
            &profile,
            quality(QualityTier::Sdtv),
            &[],
            quality(QualityTier::Hdtv720p),
            &[],
        );
        assert_eq!(reason, UpgradeableRejectReason::QualityCutoff);
    }

    #[test]
    fn test_upgrade_allowed_when_profile_allows_upgrades() {
        let profile = profile();
        assert!(is_upgrade_allowed(
            &profile,
            quality(QualityTier::Hdtv720p),
            &[],
            quality(QualityTier::Web1080p),
            &[],
        ));
    }

    #[test]
    fn test_locked_profile_blocks_quality_upgrades() {
        let mut profile = profile();
        profile.upgrade_allowed = false;
        assert!(!is_upgrade_allowed(
            &profile,
            quality(QualityTier::Hdtv720p),
            &[],
            quality(QualityTier::Web1080p),
            &[],
        ));
    }

    #[test]
    fn test_locked_profile_blocks_format_score_upgrades() {
        let mut profile = profile();
        profile.upgrade_allowed = false;
        assert!(!is_upgrade_allowed(
            &profile,
            quality(QualityTier::Web1080p),
            &[],
            quality(QualityTier::Web1080p),
            &[atmos()],
        ));
    }

    #[test]
    fn test_locked_profile_blocks_revision_upgrades() {
        let mut profile = profile();
        profile.upgrade_allowed = false;
        assert!(!is_upgrade_allowed(
            &profile,
            quality(QualityTier::Web1080p),
            &[],
            proper(QualityTier::Web1080p),
            &[],
        ));
    }

    #[test]
    fn test_locked_profile_still_allows_equal_releases() {
        let mut profile = profile();
        profile.upgrade_allowed = false;
        assert!(is_upgrade_allowed(
            &profile,
            quality(QualityTier::Web1080p),
            &[],
            quality(QualityTier::Web1080p),
            &[],
        ));
    }

    #[test]
    fn test_revision_upgrade_requires_the_same_tier() {
        assert!(is_revision_upgrade(
            quality(QualityTier::Web1080p),
            proper(QualityTier::Web1080p),
        ));
        // Grouped tiers rank equal in the profile but are still distinct.
        assert!(!is_revision_upgrade(
            quality(QualityTier::Hdtv720p),
            proper(QualityTier::Web720p),
        ));
        assert!(!is_revision_upgrade(
            quality(QualityTier::Web1080p),
            quality(QualityTier::Web1080p),
        ));
    }
}
