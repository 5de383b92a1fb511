//! Shared configuration, routes, and small helpers for the LearnLoop client
//!
//! This crate provides common functionality used across the client crates:
//! - Configuration loaded from the environment (12-factor style)
//! - The browser route table that page controllers navigate between
//! - List pagination (`skip`/`limit`) query parameters
//! - Resolution of stored file paths to downloadable URLs

pub mod config;
pub mod error;
pub mod files;
pub mod pagination;
pub mod route;

pub use config::ClientConfig;
pub use error::ConfigError;
pub use files::file_url;
pub use pagination::Pagination;
pub use route::Route;
