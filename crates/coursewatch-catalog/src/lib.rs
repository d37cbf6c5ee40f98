//! Catalog acquisition.
//!
//! Defines the [`CatalogSource`] trait the watcher polls for fresh
//! snapshots, plus [`BannerCatalog`], a client for Banner-style
//! self-service registration search endpoints.

mod banner;

pub use banner::{BannerCatalog, BannerConfig, SectionFilter};

use async_trait::async_trait;
use coursewatch_model::Snapshot;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while capturing a snapshot.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level failure talking to the catalog host.
    #[error("catalog http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The search session could not be established.
    #[error("catalog session error: {0}")]
    Session(String),

    /// The results payload did not have the expected shape.
    #[error("catalog payload error: {0}")]
    Payload(String),
}

/// A source that can capture the catalog's current offering list.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable name of the source, for logs.
    fn source_name(&self) -> &'static str;

    /// Captures a fresh snapshot of the catalog.
    async fn fetch(&self) -> CatalogResult<Snapshot>;
}
