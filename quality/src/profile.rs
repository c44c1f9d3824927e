use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, QualityTier, ReleaseQuality, Result};

/// User-defined tag matched against release metadata by an external
/// calculator; carries no score of its own, profiles assign one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomFormat {
    pub id: u32,
    pub name: String,
}

impl CustomFormat {
    pub fn new<N: Into<String>>(id: u32, name: N) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for CustomFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatScore {
    pub format_id: u32,
    pub score: i32,
}

/// One rung of a profile's preference ladder. Grouped tiers share the rung
/// and are considered equivalent when ranking releases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityProfileItem {
    pub name: Option<String>,
    pub tiers: Vec<QualityTier>,
}

impl QualityProfileItem {
    pub fn single(tier: QualityTier) -> Self {
        Self {
            name: None,
            tiers: vec![tier],
        }
    }

    pub fn group<N: Into<String>>(name: N, tiers: Vec<QualityTier>) -> Self {
        Self {
            name: Some(name.into()),
            tiers,
        }
    }
}

impl fmt::Display for QualityProfileItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            f.write_str(name)
        } else if let Some(tier) = self.tiers.first() {
            f.write_str(tier.name())
        } else {
            f.write_str("Unknown")
        }
    }
}

/// Per-show upgrade policy: which tiers are wanted, in what order, and when
/// to stop searching. Edited externally, read-only here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityProfile {
    pub name: String,
    /// Ascending preference order; tiers not listed are never acceptable.
    pub items: Vec<QualityProfileItem>,
    pub cutoff: QualityTier,
    pub upgrade_allowed: bool,
    pub format_scores: Vec<FormatScore>,
    pub cutoff_format_score: i32,
}

impl QualityProfile {
    /// Rank of a tier within this profile, `None` for unlisted tiers.
    pub fn index_of(&self, tier: QualityTier) -> Option<usize> {
        self.items.iter().position(|item| item.tiers.contains(&tier))
    }

    /// Rank comparison. `None < Some(_)` puts unlisted tiers below every
    /// listed one.
    pub fn compare(&self, left: QualityTier, right: QualityTier) -> Ordering {
        self.index_of(left).cmp(&self.index_of(right))
    }

    /// Rank then revision, so a proper outranks the plain release of the
    /// same tier.
    pub fn compare_quality(&self, left: ReleaseQuality, right: ReleaseQuality) -> Ordering {
        self.compare(left.tier, right.tier)
            .then_with(|| left.revision.cmp_rank(right.revision))
    }

    /// `None` when the stored cutoff references a tier missing from the
    /// items; callers treat that as "cutoff met".
    pub fn cutoff_index(&self) -> Option<usize> {
        self.index_of(self.cutoff)
    }

    pub fn cutoff_item(&self) -> Option<&QualityProfileItem> {
        self.cutoff_index().and_then(|index| self.items.get(index))
    }

    pub fn format_score(&self, format_id: u32) -> i32 {
        self.format_scores
            .iter()
            .find(|entry| entry.format_id == format_id)
            .map_or(0, |entry| entry.score)
    }

    /// Aggregate score of the formats a release matched. Formats the
    /// profile does not recognize contribute zero.
    pub fn calculate_format_score(&self, formats: &[CustomFormat]) -> i32 {
        formats.iter().map(|format| self.format_score(format.id)).sum()
    }

    /// Edit-time invariants. Evaluation never calls this, lookups fail
    /// closed instead.
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(Error::EmptyProfile);
        }

        let mut seen = Vec::new();
        for item in &self.items {
            for &tier in &item.tiers {
                if seen.contains(&tier) {
                    return Err(Error::DuplicateTier(tier));
                }
                seen.push(tier);
            }
        }

        if !seen.contains(&self.cutoff) {
            return Err(Error::CutoffNotInProfile(self.cutoff));
        }
        Ok(())
    }
}
