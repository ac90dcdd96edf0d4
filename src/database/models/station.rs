use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Station entity - a physical weather monitoring installation
///
/// Reference data: written by the seeder, never mutated by the server.
#[derive(
    Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Insertable, Serialize, Deserialize,
)]
#[diesel(table_name = crate::database::schema::station)]
#[diesel(primary_key(station_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Station {
    /// Unique station ID
    pub station_id: i32,

    /// Weather station name (e.g., "Cohuna North")
    pub name: String,

    /// Name of the site the station is located on
    pub site: String,

    /// Owner of the site
    pub portfolio: String,

    /// Region code the site is located in (e.g., "VIC")
    pub state: String,

    pub latitude: f64,
    pub longitude: f64,
}

impl Station {
    /// Create a new station record
    pub fn new(
        station_id: i32,
        name: impl Into<String>,
        site: impl Into<String>,
        portfolio: impl Into<String>,
        state: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            station_id,
            name: name.into(),
            site: site.into(),
            portfolio: portfolio.into(),
            state: state.into(),
            latitude,
            longitude,
        }
    }
}
