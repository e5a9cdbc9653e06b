use serde::{Deserialize, Serialize};
use std::fmt;

/// Trending algorithms a server can enable for its video listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendingAlgorithm {
    MostViewed,
    Hot,
    Best,
    MostLiked,
}

impl TrendingAlgorithm {
    pub const ALL: [TrendingAlgorithm; 4] = [
        TrendingAlgorithm::MostViewed,
        TrendingAlgorithm::Hot,
        TrendingAlgorithm::Best,
        TrendingAlgorithm::MostLiked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendingAlgorithm::MostViewed => "most-viewed",
            TrendingAlgorithm::Hot => "hot",
            TrendingAlgorithm::Best => "best",
            TrendingAlgorithm::MostLiked => "most-liked",
        }
    }

    /// The video list sort key this algorithm is queried with.
    pub fn sort_key(&self) -> &'static str {
        match self {
            TrendingAlgorithm::MostViewed => "-trending",
            TrendingAlgorithm::Hot => "-hot",
            TrendingAlgorithm::Best => "-best",
            TrendingAlgorithm::MostLiked => "-likes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendingAlgorithm::MostViewed => "Recent views",
            TrendingAlgorithm::Hot => "Hot",
            TrendingAlgorithm::Best => "Best",
            TrendingAlgorithm::MostLiked => "Likes",
        }
    }
}

impl fmt::Display for TrendingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The slice of the server's public configuration the toolbar reads.
///
/// Every level defaults to empty, so a document without a `trending` section
/// means no trending algorithm is enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub trending: TrendingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendingConfig {
    pub videos: TrendingVideosConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendingVideosConfig {
    pub algorithms: TrendingAlgorithms,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendingAlgorithms {
    pub enabled: Vec<String>,
}

impl ServerConfig {
    pub fn with_enabled_algorithms<I, S>(algorithms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        config.trending.videos.algorithms.enabled =
            algorithms.into_iter().map(Into::into).collect();
        config
    }

    pub fn is_algorithm_enabled(&self, algorithm: TrendingAlgorithm) -> bool {
        self.trending
            .videos
            .algorithms
            .enabled
            .iter()
            .any(|enabled| enabled == algorithm.as_str())
    }
}
