pub mod batch;
pub mod classifier;
pub mod config;
pub mod determinism;
pub mod golden;
pub mod normalize;
pub mod record;
pub mod taxonomy;

pub mod error;
