use quality::ReleaseQuality;
use serde::{Deserialize, Serialize};

use crate::errors::CollaboratorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackedDownloadState {
    Downloading,
    ImportPending,
    Importing,
    Imported,
    /// Failed and awaiting removal plus a replacement search. Treated as
    /// transiently absent by the queue specification.
    FailedPending,
    Failed,
}

/// Point-in-time copy of one in-flight download. Never a live reference;
/// queue mutations after the snapshot must not be observable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub download_id: String,
    pub show_id: u32,
    pub episode_ids: Vec<u32>,
    pub title: String,
    pub quality: ReleaseQuality,
    pub size: u64,
    pub state: TrackedDownloadState,
}

pub trait QueueSource: Send + Sync {
    /// Owned snapshot of the tracked downloads, in the order they were
    /// queued.
    fn queue(&self) -> Result<Vec<QueueEntry>, CollaboratorError>;
}
