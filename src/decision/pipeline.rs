use std::sync::Arc;

use tracing::{debug, error, instrument};

use crate::config::PolicySource;
use crate::decision::specifications::cutoff::CutoffSpecification;
use crate::decision::specifications::proper::ProperSpecification;
use crate::decision::specifications::quality_allowed::QualityAllowedSpecification;
use crate::decision::specifications::queue::QueueSpecification;
use crate::decision::specifications::upgrade_disk::UpgradeDiskSpecification;
use crate::decision::{Decision, DownloadDecision, Rejection, RejectionType, SpecificationPriority};
use crate::errors::CollaboratorError;
use crate::formats::FormatScorer;
use crate::media::MediaFileSource;
use crate::models::{RemoteRelease, SearchContext};
use crate::queue::QueueSource;

/// One independent rule in the decision pipeline. Rules are leaves composed
/// by a [`DecisionPipeline`], never layered on each other, and must not
/// mutate shared state.
pub trait Specification: Send + Sync {
    fn name(&self) -> &'static str;

    /// Execution order only; lower runs first.
    fn priority(&self) -> SpecificationPriority {
        SpecificationPriority::Default
    }

    fn rejection_type(&self) -> RejectionType;

    /// Judge one candidate. Rejection is an ordinary value; `Err` is
    /// reserved for a collaborator failing underneath the specification.
    fn evaluate(
        &self,
        candidate: &RemoteRelease,
        search: Option<&SearchContext>,
    ) -> Result<Decision, CollaboratorError>;
}

pub struct DecisionPipeline {
    specifications: Vec<Box<dyn Specification>>,
}

impl DecisionPipeline {
    /// Specifications run in ascending priority order; registration order
    /// breaks ties.
    pub fn new(mut specifications: Vec<Box<dyn Specification>>) -> Self {
        specifications.sort_by_key(|specification| specification.priority());
        Self { specifications }
    }

    /// The standard rule set over the four collaborator seams.
    pub fn standard(
        queue: Arc<dyn QueueSource>,
        formats: Arc<dyn FormatScorer>,
        media: Arc<dyn MediaFileSource>,
        policy: Arc<dyn PolicySource>,
    ) -> Self {
        Self::new(vec![
            Box::new(QualityAllowedSpecification),
            Box::new(QueueSpecification::new(
                queue,
                Arc::clone(&formats),
                Arc::clone(&policy),
            )),
            Box::new(CutoffSpecification::new(
                Arc::clone(&media),
                Arc::clone(&formats),
            )),
            Box::new(UpgradeDiskSpecification::new(Arc::clone(&media), formats)),
            Box::new(ProperSpecification::new(media, policy)),
        ])
    }

    /// Runs every specification against the candidate and returns the
    /// first rejection, or acceptance once all of them pass. A
    /// specification error is logged and reported as a temporary rejection
    /// so one bad collaborator cannot crash a whole search batch.
    #[instrument(skip_all, fields(release = %candidate.title))]
    pub fn evaluate(
        &self,
        candidate: &RemoteRelease,
        search: Option<&SearchContext>,
    ) -> DownloadDecision {
        for specification in &self.specifications {
            match specification.evaluate(candidate, search) {
                Ok(Decision::Accept) => {}
                Ok(Decision::Reject(reason)) => {
                    debug!(
                        specification = specification.name(),
                        %reason,
                        "release rejected"
                    );
                    return DownloadDecision::Reject(Rejection {
                        reason,
                        rejection_type: specification.rejection_type(),
                        priority: specification.priority(),
                    });
                }
                Err(error) => {
                    error!(
                        specification = specification.name(),
                        "specification failed: {error}"
                    );
                    return DownloadDecision::Reject(Rejection {
                        reason: format!("{}: {error}", specification.name()),
                        rejection_type: RejectionType::Temporary,
                        priority: specification.priority(),
                    });
                }
            }
        }

        debug!("release accepted");
        DownloadDecision::Accept
    }
}
