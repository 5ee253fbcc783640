//! MongoDB database connector and utilities
//!
//! Provides connection management, health checks, and MongoDB-specific
//! helpers such as the [`TextFilter`] query specification.

mod config;
mod connector;
mod filter;
mod health;

pub use config::MongoConfig;
pub use connector::{
    MongoError, connect, connect_from_config, connect_from_config_with_retry, connect_with_retry,
};
pub use filter::TextFilter;
pub use health::{HealthStatus, check_health, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
