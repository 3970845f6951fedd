use serde::{Deserialize, Serialize};

use crate::modules::statistics::domain::RaceNameGroup;

/// Race name autocomplete results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RaceNameSearchResponse {
    pub items: Vec<RaceNameGroup>,
}
