pub mod engine;

pub use engine::{compute_scores, ScoreSummary};
