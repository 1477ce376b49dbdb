//! Hardware component catalog for the TDP calculator.
//!
//! The catalog is externally owned and read-only: it is fetched once per
//! session through a [`source::CatalogSource`] and never written back.
//! Entries come in two partitions, common parts and GPUs, because GPU rows
//! carry throughput figures the other categories do not have.

pub mod catalog;
pub mod category;
pub mod entry;
pub mod error;
#[cfg(feature = "api")]
pub mod rest;
pub mod source;
pub mod specification;

pub use catalog::Catalog;
pub use category::ComponentCategory;
pub use entry::ComponentCatalogEntry;
pub use error::CatalogError;
pub use source::{CatalogPartition, CatalogSource};
pub use specification::{SpecValue, Specifications};
