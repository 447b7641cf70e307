use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Shape of the keyword file handed to downstream automation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordResult {
    pub keywords: Vec<String>,
}

impl KeywordResult {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    /// Single-entry result written in place of keywords when a run fails.
    pub fn from_error(error: &CoreError) -> Self {
        Self {
            keywords: vec![format!("Keyword generation failed: {error}")],
        }
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}
