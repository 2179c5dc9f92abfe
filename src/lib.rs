/// Quill
///
/// A server-rendered blogging platform: users author posts, organize them
/// into groups, comment, and follow other authors. Feeds are paginated and
/// the rendered home feed is cached for a fixed time window.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers (HTML pages and redirects)
/// - `services`: Business logic layer over PostgreSQL
/// - `models`: Row structures for users, groups, posts, comments, follows
/// - `pagination`: Page resolution and slicing
/// - `forms`: Typed request structs and validation
/// - `cache`: Redis page cache for the home feed
/// - `session`: Session-cookie identity extractors
/// - `views`: Template structs and display-ready view models
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod services;
pub mod session;
pub mod views;

pub use config::Config;
pub use error::{AppError, Result};
