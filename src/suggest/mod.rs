//! Name suggestions built on top of the availability checker

pub mod pipeline;
pub mod variations;

pub use pipeline::{SuggestOptions, SuggestProgress, SuggestionPipeline};
pub use variations::generate_variations;
