pub mod config;
pub mod filters;
pub mod server_config;
pub mod user;
pub mod video_filters;

pub use config::{DEFAULT_SORT, HeaderConfig, NsfwPolicy};
pub use filters::{
    FilterEdit, FilterField, FilterPatch, FilterValues, LiveFilter, NsfwFilter, VideoScope,
};
pub use server_config::{ServerConfig, TrendingAlgorithm};
pub use user::{AuthUser, UserRight};
pub use video_filters::{ActiveFilter, VideoFilters};
