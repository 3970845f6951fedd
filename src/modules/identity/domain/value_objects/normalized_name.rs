use serde::{Deserialize, Serialize};

/// A raw runner name together with its derived forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedName {
    /// Title-cased `"Given Surname"`
    pub display: String,
    /// Name exactly as it appears in the results data
    pub original: String,
    /// Lowercased surname, truncated to the bucket prefix length
    pub surname_key: String,
    /// Full lowercased surname
    pub surname: String,
}

impl NormalizedName {
    /// Blank names normalize to an empty display and never enter the index
    pub fn is_indexable(&self) -> bool {
        !self.display.is_empty() && !self.surname_key.is_empty()
    }

    pub fn display_lowercase(&self) -> String {
        self.display.to_lowercase()
    }
}
