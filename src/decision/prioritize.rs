use std::cmp::Ordering;
use std::collections::HashMap;

use ahash::RandomState;
use itertools::Itertools;

use crate::models::RemoteRelease;

/// Orders two releases by descending desirability.
///
/// Each release is ranked against its own show's quality profile, so
/// decisions for different shows can be interleaved in one list. Releases
/// tied on every metric fall back to the title, keeping the order stable.
pub fn compare_releases(a: &RemoteRelease, b: &RemoteRelease) -> Ordering {
    let rank = |release: &RemoteRelease| {
        release
            .show
            .quality_profile
            .index_of(release.quality.tier)
    };

    rank(b)
        .cmp(&rank(a))
        .then_with(|| b.quality.revision.cmp_rank(a.quality.revision))
        .then_with(|| b.format_score().cmp(&a.format_score()))
        .then_with(|| a.episode_ids.len().cmp(&b.episode_ids.len()))
        .then_with(|| b.publish_date.cmp(&a.publish_date))
        .then_with(|| a.size.cmp(&b.size))
        .then_with(|| a.title.cmp(&b.title))
}

/// Sorts accepted releases best first.
pub fn prioritize(mut releases: Vec<RemoteRelease>) -> Vec<RemoteRelease> {
    releases.sort_by(compare_releases);
    releases
}

/// Keeps the single best release per grab slot, best slot first.
///
/// A slot is one show and one exact set of episodes. Releases covering
/// overlapping but unequal episode sets stay in separate slots.
pub fn select_best(releases: Vec<RemoteRelease>) -> Vec<RemoteRelease> {
    let mut slots = HashMap::<(u32, Vec<u32>), Vec<RemoteRelease>, RandomState>::default();
    for release in releases {
        let mut episode_ids = release.episode_ids.clone();
        episode_ids.sort_unstable();
        slots
            .entry((release.show.id, episode_ids))
            .or_default()
            .push(release);
    }

    slots
        .into_values()
        .filter_map(|group| group.into_iter().min_by(compare_releases))
        .sorted_by(compare_releases)
        .collect()
}
