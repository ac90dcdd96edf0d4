use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::Station;

/// Variable entity - a measurable quantity recorded at one station
#[derive(
    Debug,
    Clone,
    PartialEq,
    Queryable,
    Selectable,
    Identifiable,
    Associations,
    Insertable,
    Serialize,
    Deserialize,
)]
#[diesel(table_name = crate::database::schema::variable)]
#[diesel(primary_key(variable_id))]
#[diesel(belongs_to(Station, foreign_key = station_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Variable {
    pub variable_id: i32,

    /// Owning station
    pub station_id: i32,

    /// Short name (e.g., "AirT_inst")
    pub name: String,

    /// Unit of measurement (e.g., "Deg C")
    pub unit: String,

    /// Descriptive name (e.g., "Air Temp.")
    pub long_name: String,
}

impl Variable {
    pub fn new(
        variable_id: i32,
        station_id: i32,
        name: impl Into<String>,
        unit: impl Into<String>,
        long_name: impl Into<String>,
    ) -> Self {
        Self {
            variable_id,
            station_id,
            name: name.into(),
            unit: unit.into(),
            long_name: long_name.into(),
        }
    }
}
