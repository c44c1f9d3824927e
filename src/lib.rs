pub mod config;
pub mod decision;
pub mod errors;
pub mod formats;
pub mod media;
pub mod models;
pub mod queue;
