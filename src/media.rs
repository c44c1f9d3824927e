use chrono::{DateTime, Utc};
use quality::ReleaseQuality;
use serde::{Deserialize, Serialize};

use crate::errors::CollaboratorError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeFile {
    pub id: u32,
    pub relative_path: String,
    pub quality: ReleaseQuality,
    pub size: u64,
    pub date_added: DateTime<Utc>,
}

pub trait MediaFileSource: Send + Sync {
    /// Files already imported that cover any of the given episodes.
    fn files_for_episodes(
        &self,
        show_id: u32,
        episode_ids: &[u32],
    ) -> Result<Vec<EpisodeFile>, CollaboratorError>;
}
