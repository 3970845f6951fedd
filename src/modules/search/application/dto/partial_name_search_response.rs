use serde::{Deserialize, Serialize};

use crate::modules::identity::domain::RunnerIdentityView;

/// Autocomplete results for a partial runner name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PartialNameSearchResponse {
    pub items: Vec<RunnerIdentityView>,
}

impl PartialNameSearchResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
