//! The catalog port.
//!
//! Implementations read from an externally owned store and must never write
//! to it. Fetching is async because the hosted store sits behind a network
//! round trip; the calculator awaits it on a single thread.

use async_trait::async_trait;
use std::fmt;

use crate::entry::ComponentCatalogEntry;
use crate::error::Result;

/// The two independently fetched halves of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogPartition {
    CommonParts,
    Gpus,
}

impl fmt::Display for CatalogPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogPartition::CommonParts => f.write_str("common parts"),
            CatalogPartition::Gpus => f.write_str("GPUs"),
        }
    }
}

/// Read-only access to the component catalog.
#[async_trait(?Send)]
pub trait CatalogSource {
    /// Fetch the generic parts partition.
    async fn fetch_common_parts(&self) -> Result<Vec<ComponentCatalogEntry>>;

    /// Fetch the GPU partition.
    async fn fetch_gpus(&self) -> Result<Vec<ComponentCatalogEntry>>;

    /// Fetch one partition by name.
    async fn fetch(&self, partition: CatalogPartition) -> Result<Vec<ComponentCatalogEntry>> {
        match partition {
            CatalogPartition::CommonParts => self.fetch_common_parts().await,
            CatalogPartition::Gpus => self.fetch_gpus().await,
        }
    }
}
