//! In-memory SQLite catalog store for hardware components.
//!
//! Stands in for the hosted catalog database: CSV exports of the `parts`
//! and `gpus` collections are loaded into an in-memory SQLite database and
//! served back through the [`CatalogSource`] port, so the calculator can run
//! offline against fixture data.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability on a single thread
//! - In-memory SQLite via `rusqlite`
//! - CSV text is validated by `tdp-catalog` before any row is inserted
//! - Typed query methods returning [`ComponentCatalogEntry`] values
//!
//! # Usage
//!
//! ```rust
//! use tdp_db::CatalogDatabase;
//!
//! let db = CatalogDatabase::new().unwrap();
//! db.load_parts("model_name,part_type,tdp\nAMD EPYC 9654,cpu,360\n").unwrap();
//! let parts = db.query_parts().unwrap();
//! assert_eq!(parts.len(), 1);
//! ```

pub mod schema;
mod loader;
mod queries;

use async_trait::async_trait;
use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;
use tdp_catalog::{CatalogError, CatalogSource, ComponentCatalogEntry};

/// In-memory SQLite database holding the component catalog.
///
/// Cheaply cloneable (via `Rc`); clones share the same connection.
#[derive(Clone)]
pub struct CatalogDatabase {
    conn: Rc<RefCell<Connection>>,
}

impl CatalogDatabase {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it with CSV data.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

fn store_error(e: anyhow::Error) -> CatalogError {
    CatalogError::Store(e.to_string())
}

#[async_trait(?Send)]
impl CatalogSource for CatalogDatabase {
    async fn fetch_common_parts(&self) -> tdp_catalog::error::Result<Vec<ComponentCatalogEntry>> {
        self.query_parts().map_err(store_error)
    }

    async fn fetch_gpus(&self) -> tdp_catalog::error::Result<Vec<ComponentCatalogEntry>> {
        self.query_gpus().map_err(store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdp_catalog::CatalogPartition;

    #[test]
    fn database_creates_successfully() {
        let db = CatalogDatabase::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = CatalogDatabase::new().unwrap();
        let db2 = db.clone();
        db.load_parts("model_name,part_type,tdp\nAMD EPYC 9654,cpu,360\n").unwrap();
        let parts = db2.query_parts().unwrap();
        assert_eq!(parts.len(), 1, "Clone should see same data via shared Rc");
    }

    #[tokio::test]
    async fn serves_catalog_through_source_port() {
        let db = CatalogDatabase::new().unwrap();
        db.load_parts("model_name,part_type,tdp\nAMD EPYC 9654,cpu,360\n").unwrap();
        db.load_gpus("model_name,tdp,fp64_tf,tf32_pf,fp16_pf,fp8_pf,int8_pops,fp4_pf\nH100,700,67,,,,,\n")
            .unwrap();
        let parts = db.fetch(CatalogPartition::CommonParts).await.unwrap();
        let gpus = db.fetch(CatalogPartition::Gpus).await.unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(gpus.len(), 1);
        assert_eq!(gpus[0].model_name, "H100");
    }

    #[tokio::test]
    async fn empty_database_is_a_successful_empty_fetch() {
        let db = CatalogDatabase::new().unwrap();
        assert!(db.fetch_common_parts().await.unwrap().is_empty());
        assert!(db.fetch_gpus().await.unwrap().is_empty());
    }
}
