//! Async client for the storefront REST backend.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod normalize;

pub use client::StoreClient;
pub use config::{ApiConfig, ConfigSource, ConfigSources, DEFAULT_BASE_URL, config_path};
pub use endpoints::{
    ALSO_BOUGHT_LIMIT, FRIEND_RECOMMENDATION_LIMIT, LIST_LIMIT, SIMILAR_LIMIT, TOP_RATED_LIMIT,
};
pub use error::ApiError;
pub use normalize::normalize_ids;
