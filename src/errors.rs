/// Fault raised by a collaborator while a specification was evaluating a
/// release. Rejections are ordinary values; this is for the queue source,
/// format scorer, or media store actually failing.
pub type CollaboratorError = anyhow::Error;
