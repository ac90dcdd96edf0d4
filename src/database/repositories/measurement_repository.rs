use crate::database::connection::{DatabaseError, SqlitePooledConnection};
use crate::database::models::{LatestReading, Measurement};
use crate::database::schema::{measurement, variable};
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

/// Measurement repository trait
///
/// "Latest" for a station is the maximum timestamp across every measurement
/// whose variable belongs to that station.
pub trait MeasurementRepository: Send + Sync {
    /// Get all measurements, ordered by measurement ID
    fn get_all(&self) -> Result<Vec<Measurement>, DatabaseError>;

    /// Latest reading set for a station (empty when it has no measurements)
    ///
    /// Both lookups run inside one read transaction.
    fn latest_readings(&self, station_id: i32) -> Result<Vec<LatestReading>, DatabaseError>;
}

/// Concrete implementation of MeasurementRepository
pub struct MeasurementRepositoryImpl {
    get_conn: Arc<dyn Fn() -> Result<SqlitePooledConnection, DatabaseError> + Send + Sync>,
}

impl MeasurementRepositoryImpl {
    /// Create new measurement repository with connection provider
    pub fn new<F>(get_conn: F) -> Self
    where
        F: Fn() -> Result<SqlitePooledConnection, DatabaseError> + Send + Sync + 'static,
    {
        Self {
            get_conn: Arc::new(get_conn),
        }
    }
}

/// Maximum measurement timestamp across a station's variables
fn query_latest_timestamp(
    conn: &mut SqliteConnection,
    station_id: i32,
) -> QueryResult<Option<String>> {
    measurement::table
        .inner_join(variable::table)
        .filter(variable::station_id.eq(station_id))
        .select(max(measurement::timestamp))
        .get_result::<Option<String>>(conn)
}

/// Every reading of the station's variables taken at exactly `timestamp`
fn query_readings_at(
    conn: &mut SqliteConnection,
    station_id: i32,
    timestamp: &str,
) -> QueryResult<Vec<LatestReading>> {
    measurement::table
        .inner_join(variable::table)
        .filter(variable::station_id.eq(station_id))
        .filter(measurement::timestamp.eq(timestamp))
        .order((variable::variable_id.asc(), measurement::measurement_id.asc()))
        .select((
            measurement::value,
            measurement::timestamp,
            variable::name,
            variable::long_name,
            variable::unit,
        ))
        .load::<LatestReading>(conn)
}

impl MeasurementRepository for MeasurementRepositoryImpl {
    fn get_all(&self) -> Result<Vec<Measurement>, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        measurement::table
            .order(measurement::measurement_id.asc())
            .select(Measurement::as_select())
            .load(&mut conn)
            .map_err(DatabaseError::from)
    }

    fn latest_readings(&self, station_id: i32) -> Result<Vec<LatestReading>, DatabaseError> {
        let mut pooled = (self.get_conn)()?;
        let conn: &mut SqliteConnection = &mut pooled;

        let readings = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            match query_latest_timestamp(conn, station_id)? {
                Some(latest) => query_readings_at(conn, station_id, &latest),
                None => Ok(Vec::new()),
            }
        })?;

        tracing::debug!(
            "Loaded {} latest readings for station {}",
            readings.len(),
            station_id
        );

        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::NewMeasurement;
    use crate::database::test_support::seeded_pool;

    #[test]
    fn test_latest_timestamp() {
        let (_dir, pool) = seeded_pool();
        let mut conn = pool.get_conn().unwrap();

        assert_eq!(
            query_latest_timestamp(&mut conn, 1).unwrap().as_deref(),
            Some("2023-08-29T06:55:00.000Z")
        );
        assert_eq!(
            query_latest_timestamp(&mut conn, 10).unwrap().as_deref(),
            Some("2023-08-28T02:10:00.000Z")
        );
        // Station 2 has variables but no measurements
        assert_eq!(query_latest_timestamp(&mut conn, 2).unwrap(), None);
        assert_eq!(query_latest_timestamp(&mut conn, 999).unwrap(), None);
    }

    #[test]
    fn test_repeated_earlier_rows_do_not_join_the_latest_set() {
        let (_dir, pool) = seeded_pool();
        let repo = MeasurementRepositoryImpl::new(move || pool.get_conn());

        // Station 10 has many rows at 02:00 but its newest pair is at 02:10
        let readings = repo.latest_readings(10).unwrap();
        assert_eq!(readings.len(), 2);
        assert!(readings
            .iter()
            .all(|r| r.timestamp == "2023-08-28T02:10:00.000Z"));
        assert_eq!(readings[0].value, "750");
        assert_eq!(readings[1].value, "17.82");
    }

    #[test]
    fn test_latest_readings_share_the_maximum_timestamp() {
        let (_dir, pool) = seeded_pool();
        let repo = MeasurementRepositoryImpl::new(move || pool.get_conn());

        let readings = repo.latest_readings(1).unwrap();
        assert_eq!(readings.len(), 2);
        assert!(readings
            .iter()
            .all(|r| r.timestamp == "2023-08-29T06:55:00.000Z"));

        assert_eq!(readings[0].variable_name, "AirT_inst");
        assert_eq!(readings[0].value, "17.54");
        assert_eq!(readings[0].unit, "Deg C");
        assert_eq!(readings[1].variable_name, "GHI_inst");
        assert_eq!(readings[1].value, "46");
        assert_eq!(readings[1].long_name, "Solar Irrad.");
    }

    #[test]
    fn test_latest_readings_empty_for_station_without_measurements() {
        let (_dir, pool) = seeded_pool();
        let repo = MeasurementRepositoryImpl::new(move || pool.get_conn());

        assert!(repo.latest_readings(2).unwrap().is_empty());
    }

    #[test]
    fn test_readings_at_omits_variables_without_exact_timestamp() {
        let (_dir, pool) = seeded_pool();
        let pool_for_repo = pool.clone();
        let repo = MeasurementRepositoryImpl::new(move || pool_for_repo.get_conn());

        // Only the air temperature variable of station 1 gets a newer reading
        let mut conn = pool.get_conn().unwrap();
        diesel::insert_into(measurement::table)
            .values(
                NewMeasurement::parse(11, "18.01", "2023-08-29T07:00:00.000Z").unwrap(),
            )
            .execute(&mut conn)
            .unwrap();

        let readings = repo.latest_readings(1).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].variable_name, "AirT_inst");
        assert_eq!(readings[0].value, "18.01");

        let older = query_readings_at(&mut conn, 1, "2023-08-29T06:55:00.000Z").unwrap();
        assert_eq!(older.len(), 2);
    }

    #[test]
    fn test_get_all_measurements() {
        let (_dir, pool) = seeded_pool();
        let repo = MeasurementRepositoryImpl::new(move || pool.get_conn());

        let all = repo.get_all().unwrap();
        assert!(!all.is_empty());
        assert!(all.windows(2).all(|w| w[0].measurement_id < w[1].measurement_id));
    }
}
