use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Variable;

/// Measurement entity - one timestamped value of a variable
///
/// `value` is a decimal kept as text; `timestamp` is an ISO-8601 UTC string
/// whose lexicographic order matches chronological order.
#[derive(
    Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Associations, Serialize, Deserialize,
)]
#[diesel(table_name = crate::database::schema::measurement)]
#[diesel(primary_key(measurement_id))]
#[diesel(belongs_to(Variable, foreign_key = variable_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Measurement {
    /// Auto-incrementing identifier
    pub measurement_id: i32,
    pub variable_id: i32,
    pub value: String,
    pub timestamp: String,
}

/// New measurement for insertion
#[derive(Debug, Clone, PartialEq, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::database::schema::measurement)]
pub struct NewMeasurement {
    pub variable_id: i32,
    pub value: String,
    pub timestamp: String,
}

impl NewMeasurement {
    /// Create a measurement from a decimal value and an ISO timestamp
    pub fn new(variable_id: i32, value: Decimal, timestamp: impl Into<String>) -> Self {
        Self {
            variable_id,
            value: value.normalize().to_string(),
            timestamp: timestamp.into(),
        }
    }

    /// Create a measurement from a textual value, rejecting anything that is not a decimal
    pub fn parse(
        variable_id: i32,
        value: &str,
        timestamp: impl Into<String>,
    ) -> Result<Self, rust_decimal::Error> {
        let value = Decimal::from_str(value.trim())?;
        Ok(Self::new(variable_id, value, timestamp))
    }
}

/// One row of a station's latest reading set
///
/// Produced by joining `measurement` with `variable`; the column order
/// matches the select clause in the measurement repository.
#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct LatestReading {
    pub value: String,
    pub timestamp: String,
    pub variable_name: String,
    pub long_name: String,
    pub unit: String,
}
