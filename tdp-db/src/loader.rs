//! CSV data loading functions for populating the in-memory catalog.
//!
//! # CSV Formats
//!
//! - **Parts** (has headers): `model_name,part_type,tdp`
//! - **GPUs** (has headers): `model_name,tdp,fp64_tf,tf32_pf,fp16_pf,fp8_pf,int8_pops,fp4_pf`
//!
//! Rows that fail validation (unknown part type, missing or negative TDP)
//! are skipped with a warning. A file missing one of the identifying columns
//! is rejected as a whole. Loading a model that is already present updates
//! it in place and keeps its original position. Each load runs in one
//! transaction, so a failed load leaves the table unchanged.

use crate::CatalogDatabase;
use rusqlite::params;
use tdp_catalog::entry::GPU_SPEC_COLUMNS;
use tdp_catalog::{ComponentCatalogEntry, SpecValue};

fn spec_number(entry: &ComponentCatalogEntry, key: &str) -> Option<f64> {
    match entry.specifications.as_ref()?.get(key)? {
        SpecValue::Number(n) => Some(*n),
        _ => None,
    }
}

impl CatalogDatabase {
    /// Load generic parts from CSV string.
    ///
    /// # Example CSV
    /// ```text
    /// model_name,part_type,tdp
    /// AMD EPYC 9654,cpu,360
    /// ```
    pub fn load_parts(&self, csv_data: &str) -> anyhow::Result<usize> {
        let entries = ComponentCatalogEntry::parse_parts_csv(csv_data)?;
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        for entry in &entries {
            tx.execute(
                "INSERT INTO parts (position, part_type, model_name, tdp)
                 VALUES ((SELECT COALESCE(MAX(position), 0) + 1 FROM parts), ?1, ?2, ?3)
                 ON CONFLICT (part_type, model_name) DO UPDATE SET tdp = excluded.tdp",
                params![entry.category.key(), entry.model_name, entry.tdp_watts],
            )?;
        }
        tx.commit()?;
        log::info!("loader: Loaded {} parts", entries.len());
        Ok(entries.len())
    }

    /// Load GPUs from CSV string. Empty throughput cells are stored as NULL.
    ///
    /// # Example CSV
    /// ```text
    /// model_name,tdp,fp64_tf,tf32_pf,fp16_pf,fp8_pf,int8_pops,fp4_pf
    /// NVIDIA H100 SXM5 80GB,700,67,0.989,1.979,3.958,3.958,
    /// ```
    pub fn load_gpus(&self, csv_data: &str) -> anyhow::Result<usize> {
        let entries = ComponentCatalogEntry::parse_gpus_csv(csv_data)?;
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        for entry in &entries {
            let [fp64, tf32, fp16, fp8, int8, fp4] =
                GPU_SPEC_COLUMNS.map(|key| spec_number(entry, key));
            tx.execute(
                "INSERT INTO gpus (position, model_name, tdp, fp64_tf, tf32_pf, fp16_pf, fp8_pf, int8_pops, fp4_pf)
                 VALUES ((SELECT COALESCE(MAX(position), 0) + 1 FROM gpus), ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT (model_name) DO UPDATE SET
                    tdp = excluded.tdp,
                    fp64_tf = excluded.fp64_tf,
                    tf32_pf = excluded.tf32_pf,
                    fp16_pf = excluded.fp16_pf,
                    fp8_pf = excluded.fp8_pf,
                    int8_pops = excluded.int8_pops,
                    fp4_pf = excluded.fp4_pf",
                params![entry.model_name, entry.tdp_watts, fp64, tf32, fp16, fp8, int8, fp4],
            )?;
        }
        tx.commit()?;
        log::info!("loader: Loaded {} GPUs", entries.len());
        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::CatalogDatabase;

    const PARTS_CSV: &str = "\
model_name,part_type,tdp
AMD EPYC 9654,cpu,360
Samsung DDR5-4800 64GB RDIMM,memory,10
Bad Row,psu,100
";

    #[test]
    fn load_parts_skips_invalid_rows() {
        let db = CatalogDatabase::new().unwrap();
        let loaded = db.load_parts(PARTS_CSV).unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(db.count_parts().unwrap(), 2);
    }

    #[test]
    fn reloading_updates_in_place() {
        let db = CatalogDatabase::new().unwrap();
        db.load_parts(PARTS_CSV).unwrap();
        db.load_parts("model_name,part_type,tdp\nAMD EPYC 9654,cpu,400\n").unwrap();
        let parts = db.query_parts().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].model_name, "AMD EPYC 9654");
        assert!((parts[0].tdp_watts - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn load_gpus_stores_null_throughput() {
        let db = CatalogDatabase::new().unwrap();
        db.load_gpus(
            "model_name,tdp,fp64_tf,tf32_pf,fp16_pf,fp8_pf,int8_pops,fp4_pf\nNVIDIA L40S 48GB,350,,0.366,0.733,1.466,1.466,\n",
        )
        .unwrap();
        let gpus = db.query_gpus().unwrap();
        let specs = gpus[0].specifications.as_ref().unwrap();
        assert_eq!(specs.len(), 4);
        assert!(specs.get("fp64_tf").is_none());
    }

    #[test]
    fn wrong_headers_are_an_error() {
        let db = CatalogDatabase::new().unwrap();
        assert!(db.load_parts("name,type,watts\nEPYC,cpu,360\n").is_err());
        assert!(db.load_gpus("name,watts\nH100,700\n").is_err());
        assert_eq!(db.count_parts().unwrap(), 0);
    }

    #[test]
    fn failed_load_leaves_table_unchanged() {
        let db = CatalogDatabase::new().unwrap();
        db.load_parts(PARTS_CSV).unwrap();
        db.conn
            .borrow()
            .execute_batch(
                "CREATE TRIGGER reject_fans BEFORE INSERT ON parts
                 WHEN NEW.part_type = 'cooling'
                 BEGIN SELECT RAISE(ABORT, 'fans rejected'); END;",
            )
            .unwrap();
        let csv = "model_name,part_type,tdp\nIntel Xeon 6980P,cpu,500\nFan Kit,cooling,12\n";
        assert!(db.load_parts(csv).is_err());
        let names: Vec<String> = db
            .query_parts()
            .unwrap()
            .into_iter()
            .map(|p| p.model_name)
            .collect();
        assert_eq!(names, vec!["AMD EPYC 9654", "Samsung DDR5-4800 64GB RDIMM"]);
    }

    #[test]
    fn malformed_csv_is_an_error() {
        let db = CatalogDatabase::new().unwrap();
        assert!(db.load_parts("model_name,part_type,tdp\nonly,two\n").is_err());
    }
}
