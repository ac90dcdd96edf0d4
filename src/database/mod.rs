/// Database module for the SQLite station store
///
/// This module provides:
/// - A connection pool built once at start-up and injected into handlers
/// - Embedded migrations for the station / variable / measurement schema
/// - Repository traits with diesel implementations
/// - The sample dataset used by the seeder and tests

pub mod connection;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod seed;

pub use connection::{establish_connection_pool, DatabaseError, DatabasePool};
pub use seed::{seed_sample_data, SeedError, SeedSummary};

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use tempfile::TempDir;

    /// Fresh database with the schema applied; keep the `TempDir` alive
    pub fn migrated_pool() -> (TempDir, DatabasePool) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather.db");
        let pool = establish_connection_pool(path.to_str().unwrap(), 2).unwrap();
        pool.run_migrations().unwrap();
        (dir, pool)
    }

    /// Migrated database loaded with the sample dataset
    pub fn seeded_pool() -> (TempDir, DatabasePool) {
        let (dir, pool) = migrated_pool();
        let mut conn = pool.get_conn().unwrap();
        seed_sample_data(&mut conn).unwrap();
        drop(conn);
        (dir, pool)
    }
}
