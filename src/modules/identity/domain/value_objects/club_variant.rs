use serde::{Deserialize, Serialize};

/// One spelling of a club seen for a runner identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubVariant {
    /// Club as written in the results data
    pub raw: String,
    /// Comparison form, see `ClubSimilarityMatcher::tidy`
    pub tidied: String,
    /// Number of race appearances under this spelling
    pub count: u32,
}

impl ClubVariant {
    pub fn new(raw: impl Into<String>, tidied: impl Into<String>, count: u32) -> Self {
        Self {
            raw: raw.into(),
            tidied: tidied.into(),
            count,
        }
    }
}
