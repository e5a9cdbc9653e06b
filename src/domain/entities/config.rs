use crate::domain::entities::{NsfwFilter, VideoScope};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SORT: &str = "-publishedAt";

/// Settings the host passes to the filters toolbar.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct HeaderConfig {
    pub display_moderation_block: bool,
    pub default_sort: String,
    pub default_scope: VideoScope,
    pub nsfw_policy: NsfwPolicy,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            display_moderation_block: false,
            default_sort: DEFAULT_SORT.to_string(),
            default_scope: VideoScope::Federated,
            nsfw_policy: NsfwPolicy::Display,
        }
    }
}

/// How the viewer wants sensitive videos handled.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub enum NsfwPolicy {
    #[default]
    Display,
    Blur,
    DoNotList,
}

impl NsfwPolicy {
    /// The NSFW filter value a fresh filter set starts with.
    pub fn default_filter(&self) -> NsfwFilter {
        match self {
            NsfwPolicy::DoNotList => NsfwFilter::Hidden,
            NsfwPolicy::Display | NsfwPolicy::Blur => NsfwFilter::Both,
        }
    }
}
