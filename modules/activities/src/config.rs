use search_core::SearchLimits;
use serde::{Deserialize, Serialize};

/// Configuration for the activities module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActivitiesConfig {
    #[serde(default)]
    pub search: SearchLimits,
}
