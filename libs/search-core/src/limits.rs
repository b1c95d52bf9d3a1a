use serde::{Deserialize, Serialize};

/// Page-size policy for activity search.
///
/// Constructed by the host from its configuration and injected into the
/// service; nothing in this workspace holds it as global state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchLimits {
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "max_page_size")]
    pub max_page_size: u64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: max_page_size(),
        }
    }
}

fn default_page_size() -> u64 {
    20
}

fn max_page_size() -> u64 {
    50
}
