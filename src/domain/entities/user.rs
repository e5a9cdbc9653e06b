use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRight {
    SeeAllVideos,
}

impl UserRight {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().replace('-', "_").as_str() {
            "see_all_videos" => Some(UserRight::SeeAllVideos),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub username: String,
    pub rights: HashSet<UserRight>,
}

impl AuthUser {
    pub fn new(username: String) -> Self {
        Self {
            username,
            rights: HashSet::new(),
        }
    }

    pub fn with_right(mut self, right: UserRight) -> Self {
        self.rights.insert(right);
        self
    }

    pub fn has_right(&self, right: UserRight) -> bool {
        self.rights.contains(&right)
    }
}
