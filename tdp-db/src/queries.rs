//! Typed query methods for reading the catalog back out of the database.

use crate::CatalogDatabase;
use tdp_catalog::entry::{entries_from_rows, GpuRow, PartRow};
use tdp_catalog::ComponentCatalogEntry;

impl CatalogDatabase {
    /// All generic parts in load order.
    pub fn query_parts(&self) -> anyhow::Result<Vec<ComponentCatalogEntry>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT model_name, part_type, tdp
             FROM parts
             ORDER BY position",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(PartRow {
                    model_name: row.get(0)?,
                    part_type: row.get(1)?,
                    tdp: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("query: query_parts returned {} records", rows.len());
        Ok(entries_from_rows(rows))
    }

    /// All GPUs in load order, with their throughput specifications.
    pub fn query_gpus(&self) -> anyhow::Result<Vec<ComponentCatalogEntry>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT model_name, tdp, fp64_tf, tf32_pf, fp16_pf, fp8_pf, int8_pops, fp4_pf
             FROM gpus
             ORDER BY position",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(GpuRow {
                    model_name: row.get(0)?,
                    tdp: row.get(1)?,
                    fp64_tf: row.get(2)?,
                    tf32_pf: row.get(3)?,
                    fp16_pf: row.get(4)?,
                    fp8_pf: row.get(5)?,
                    int8_pops: row.get(6)?,
                    fp4_pf: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("query: query_gpus returned {} records", rows.len());
        Ok(entries_from_rows(rows))
    }

    /// Number of rows across both tables.
    pub fn count_parts(&self) -> anyhow::Result<usize> {
        let conn = self.conn.borrow();
        let count: i64 = conn.query_row(
            "SELECT (SELECT COUNT(*) FROM parts) + (SELECT COUNT(*) FROM gpus)",
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use crate::CatalogDatabase;
    use tdp_catalog::ComponentCategory;

    fn sample_db() -> CatalogDatabase {
        let db = CatalogDatabase::new().unwrap();
        db.load_parts(
            "\
model_name,part_type,tdp
Supermicro SYS-421GE-TNRT 4U,chassis,0
AMD EPYC 9654,cpu,360
고성능 공랭 쿨러 (2U),cooling,12
NVIDIA ConnectX-7 400GbE,nic,25
",
        )
        .unwrap();
        db.load_gpus(
            "\
model_name,tdp,fp64_tf,tf32_pf,fp16_pf,fp8_pf,int8_pops,fp4_pf
NVIDIA H100 SXM5 80GB,700,67,0.989,1.979,3.958,3.958,
NVIDIA B200 SXM6 180GB,1000,40,2.2,4.5,9,9,18
",
        )
        .unwrap();
        db
    }

    #[test]
    fn query_parts_keeps_load_order() {
        let db = sample_db();
        let parts = db.query_parts().unwrap();
        let names: Vec<&str> = parts.iter().map(|p| p.model_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Supermicro SYS-421GE-TNRT 4U",
                "AMD EPYC 9654",
                "고성능 공랭 쿨러 (2U)",
                "NVIDIA ConnectX-7 400GbE",
            ]
        );
        assert_eq!(parts[2].category, ComponentCategory::Cooling);
    }

    #[test]
    fn query_gpus_round_trips_specifications() {
        let db = sample_db();
        let gpus = db.query_gpus().unwrap();
        assert_eq!(gpus.len(), 2);
        assert_eq!(gpus[1].model_name, "NVIDIA B200 SXM6 180GB");
        assert_eq!(gpus[1].specifications.as_ref().unwrap().len(), 6);
        assert_eq!(gpus[0].specifications.as_ref().unwrap().len(), 5);
    }

    #[test]
    fn count_parts_spans_both_tables() {
        let db = sample_db();
        assert_eq!(db.count_parts().unwrap(), 6);
        assert_eq!(CatalogDatabase::new().unwrap().count_parts().unwrap(), 0);
    }
}
