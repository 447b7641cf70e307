//! Keyword requester: prompt building, response normalization, result
//! writing and the run that ties them together.

pub mod normalize;
pub mod prompt;
pub mod requester;
pub mod writer;

pub use normalize::{extract_keywords, strip_code_fence};
pub use prompt::build_prompt;
pub use requester::{generate_keywords, run, run_configured, run_with_provider};
pub use writer::{read_result, write_result};
