use crate::database::connection::{DatabaseError, SqlitePooledConnection};
use crate::database::models::Station;
use crate::database::schema::station;
use diesel::prelude::*;
use std::sync::Arc;

/// Station repository trait - read access to station reference data
pub trait StationRepository: Send + Sync {
    /// Get all stations, ordered by station ID
    fn get_all(&self) -> Result<Vec<Station>, DatabaseError>;

    /// Find station by ID
    fn find_by_id(&self, station_id: i32) -> Result<Option<Station>, DatabaseError>;
}

/// Concrete implementation of StationRepository
pub struct StationRepositoryImpl {
    get_conn: Arc<dyn Fn() -> Result<SqlitePooledConnection, DatabaseError> + Send + Sync>,
}

impl StationRepositoryImpl {
    /// Create new station repository with connection provider
    pub fn new<F>(get_conn: F) -> Self
    where
        F: Fn() -> Result<SqlitePooledConnection, DatabaseError> + Send + Sync + 'static,
    {
        Self {
            get_conn: Arc::new(get_conn),
        }
    }
}

impl StationRepository for StationRepositoryImpl {
    fn get_all(&self) -> Result<Vec<Station>, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        station::table
            .order(station::station_id.asc())
            .select(Station::as_select())
            .load(&mut conn)
            .map_err(DatabaseError::from)
    }

    fn find_by_id(&self, station_id: i32) -> Result<Option<Station>, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        station::table
            .find(station_id)
            .select(Station::as_select())
            .first(&mut conn)
            .optional()
            .map_err(DatabaseError::from)
    }
}
