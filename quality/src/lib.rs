use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod profile;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("profile has no quality items")]
    EmptyProfile,
    #[error("cutoff {0} is not listed in the profile")]
    CutoffNotInProfile(QualityTier),
    #[error("{0} is listed more than once")]
    DuplicateTier(QualityTier),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Rank of a release's source and resolution. Variants are declared in
/// ascending default order, so the derived `Ord` matches it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualityTier {
    Unknown,
    Sdtv,
    Dvd,
    Hdtv720p,
    Web720p,
    Bluray720p,
    Hdtv1080p,
    Web1080p,
    Bluray1080p,
    Hdtv2160p,
    Web2160p,
    Bluray2160p,
}

impl QualityTier {
    pub const ALL: [QualityTier; 12] = [
        QualityTier::Unknown,
        QualityTier::Sdtv,
        QualityTier::Dvd,
        QualityTier::Hdtv720p,
        QualityTier::Web720p,
        QualityTier::Bluray720p,
        QualityTier::Hdtv1080p,
        QualityTier::Web1080p,
        QualityTier::Bluray1080p,
        QualityTier::Hdtv2160p,
        QualityTier::Web2160p,
        QualityTier::Bluray2160p,
    ];

    pub fn id(self) -> u16 {
        match self {
            QualityTier::Unknown => 0,
            QualityTier::Sdtv => 1,
            QualityTier::Dvd => 2,
            QualityTier::Hdtv720p => 3,
            QualityTier::Web720p => 4,
            QualityTier::Bluray720p => 5,
            QualityTier::Hdtv1080p => 6,
            QualityTier::Web1080p => 7,
            QualityTier::Bluray1080p => 8,
            QualityTier::Hdtv2160p => 9,
            QualityTier::Web2160p => 10,
            QualityTier::Bluray2160p => 11,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            QualityTier::Unknown => "Unknown",
            QualityTier::Sdtv => "SDTV",
            QualityTier::Dvd => "DVD",
            QualityTier::Hdtv720p => "HDTV-720p",
            QualityTier::Web720p => "WEB-720p",
            QualityTier::Bluray720p => "Bluray-720p",
            QualityTier::Hdtv1080p => "HDTV-1080p",
            QualityTier::Web1080p => "WEB-1080p",
            QualityTier::Bluray1080p => "Bluray-1080p",
            QualityTier::Hdtv2160p => "HDTV-2160p",
            QualityTier::Web2160p => "WEB-2160p",
            QualityTier::Bluray2160p => "Bluray-2160p",
        }
    }

    pub fn source(self) -> QualitySource {
        match self {
            QualityTier::Unknown => QualitySource::Unknown,
            QualityTier::Sdtv
            | QualityTier::Hdtv720p
            | QualityTier::Hdtv1080p
            | QualityTier::Hdtv2160p => QualitySource::Television,
            QualityTier::Dvd => QualitySource::Dvd,
            QualityTier::Web720p | QualityTier::Web1080p | QualityTier::Web2160p => {
                QualitySource::Web
            }
            QualityTier::Bluray720p | QualityTier::Bluray1080p | QualityTier::Bluray2160p => {
                QualitySource::Bluray
            }
        }
    }

    pub fn resolution(self) -> u16 {
        match self {
            QualityTier::Unknown => 0,
            QualityTier::Sdtv | QualityTier::Dvd => 480,
            QualityTier::Hdtv720p | QualityTier::Web720p | QualityTier::Bluray720p => 720,
            QualityTier::Hdtv1080p | QualityTier::Web1080p | QualityTier::Bluray1080p => 1080,
            QualityTier::Hdtv2160p | QualityTier::Web2160p | QualityTier::Bluray2160p => 2160,
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualitySource {
    Unknown,
    Television,
    Dvd,
    Web,
    Bluray,
}

/// Version of a release within one quality tier. A proper or repack of an
/// equal version ranks higher than the plain release; the two flags are not
/// ranked against each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Revision {
    pub version: u32,
    pub proper: bool,
    pub repack: bool,
}

impl Revision {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            proper: false,
            repack: false,
        }
    }

    pub fn proper(version: u32) -> Self {
        Self {
            version,
            proper: true,
            repack: false,
        }
    }

    pub fn repack(version: u32) -> Self {
        Self {
            version,
            proper: false,
            repack: true,
        }
    }

    pub fn is_reissue(self) -> bool {
        self.proper || self.repack
    }

    /// Ranks revisions by version, then by the reissue flag. Ranking is
    /// coarser than equality: a proper and a repack of equal version rank
    /// together without comparing equal, so this is a named method rather
    /// than an `Ord` impl.
    pub fn cmp_rank(self, other: Self) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| self.is_reissue().cmp(&other.is_reissue()))
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::new(1)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.version)?;
        if self.proper {
            f.write_str(" Proper")?;
        }
        if self.repack {
            f.write_str(" Repack")?;
        }
        Ok(())
    }
}

/// Parsed quality of a single release or file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReleaseQuality {
    pub tier: QualityTier,
    pub revision: Revision,
}

impl ReleaseQuality {
    pub fn new(tier: QualityTier) -> Self {
        Self {
            tier,
            revision: Revision::default(),
        }
    }
}

impl fmt::Display for ReleaseQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tier.name())?;
        if self.revision != Revision::default() {
            write!(f, " {}", self.revision)?;
        }
        Ok(())
    }
}
