pub mod cutoff;
pub mod proper;
pub mod quality_allowed;
pub mod queue;
pub mod upgrade_disk;
