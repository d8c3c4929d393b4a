pub mod log;
pub mod scoring;
pub mod snapshot;
pub mod state;
