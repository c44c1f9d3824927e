use chrono::{DateTime, Utc};
use quality::profile::{CustomFormat, QualityProfile};
use quality::ReleaseQuality;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub id: u32,
    pub title: String,
    pub quality_profile: QualityProfile,
}

/// Candidate release handed in by the search layer. Built once per
/// evaluation, never persisted here; the custom format matches were already
/// computed by the scorer collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRelease {
    pub show: Show,
    pub episode_ids: Vec<u32>,
    pub title: String,
    pub quality: ReleaseQuality,
    pub size: u64,
    pub publish_date: DateTime<Utc>,
    pub custom_formats: Vec<CustomFormat>,
}

impl RemoteRelease {
    pub fn format_score(&self) -> i32 {
        self.show
            .quality_profile
            .calculate_format_score(&self.custom_formats)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchContext {
    pub episode_ids: Vec<u32>,
    pub user_invoked: bool,
}
