pub mod streak;

mod tracker;

pub use tracker::ProgressTracker;
