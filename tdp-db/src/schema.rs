//! SQL schema definitions for the in-memory catalog database.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// - `parts` - Generic parts keyed by (part_type, model_name)
/// - `gpus` - GPUs keyed by model_name, with nullable throughput columns
///
/// Both tables use an explicit `position` column so queries return rows in
/// the order they were first loaded.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS parts (
        position INTEGER NOT NULL,
        part_type TEXT NOT NULL,
        model_name TEXT NOT NULL,
        tdp REAL NOT NULL,
        PRIMARY KEY (part_type, model_name)
    );
    CREATE INDEX IF NOT EXISTS idx_parts_position ON parts(position);

    CREATE TABLE IF NOT EXISTS gpus (
        position INTEGER NOT NULL,
        model_name TEXT PRIMARY KEY,
        tdp REAL NOT NULL,
        fp64_tf REAL,
        tf32_pf REAL,
        fp16_pf REAL,
        fp8_pf REAL,
        int8_pops REAL,
        fp4_pf REAL
    );
    CREATE INDEX IF NOT EXISTS idx_gpus_position ON gpus(position);
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_applies_cleanly() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        // Applying twice is harmless
        conn.execute_batch(create_schema()).unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 2);
    }
}
