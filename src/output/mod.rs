pub mod formatter;

pub use formatter::{format_rubric, format_score_summary, should_use_colors};
