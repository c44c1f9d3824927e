use std::fmt;

use serde::{Deserialize, Serialize};

pub mod pipeline;
pub mod prioritize;
pub mod specifications;
pub mod upgradable;

/// Verdict of a single specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject(String),
}

impl Decision {
    pub fn reject<R: Into<String>>(reason: R) -> Self {
        Self::Reject(reason.into())
    }
}

/// Whether a rejection is worth retrying. Permanent rejections should not
/// be re-evaluated automatically; temporary ones may clear on the next
/// search cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionType {
    Permanent,
    Temporary,
}

/// Execution order only. Lower priorities run first so cheap checks reject
/// before anything touches the media database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpecificationPriority {
    Default = 1,
    Database = 2,
    Disk = 3,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: String,
    pub rejection_type: RejectionType,
    pub priority: SpecificationPriority,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Final verdict of the pipeline for one candidate release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadDecision {
    Accept,
    Reject(Rejection),
}

impl DownloadDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Accept => None,
            Self::Reject(rejection) => Some(rejection),
        }
    }
}
