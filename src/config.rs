use serde::{Deserialize, Serialize};

/// Global policy for proper and repack releases. `DoNotPrefer` switches
/// the proper gate off entirely; `DoNotUpgrade` keeps existing files over
/// their propers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProperDownloadPolicy {
    #[default]
    PreferNew,
    DoNotPrefer,
    DoNotUpgrade,
}

pub trait PolicySource: Send + Sync {
    fn download_propers_and_repacks(&self) -> ProperDownloadPolicy;
}
