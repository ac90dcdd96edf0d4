//! Sample dataset for local development and tests
//!
//! Ten Australian solar/wind farm stations with 5-minute readings. Station 2
//! deliberately has variables but no measurements.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use thiserror::Error;

use crate::database::connection::DatabaseError;
use crate::database::models::{NewMeasurement, Station, Variable};
use crate::database::schema::{measurement, station, variable};
use crate::utils::{parse_to_iso, TimestampError};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Diesel error: {0}")]
    Diesel(#[from] diesel::result::Error),

    #[error(transparent)]
    Timestamp(#[from] TimestampError),

    #[error("Invalid measurement value '{value}' for variable {variable_id}: {source}")]
    InvalidValue {
        variable_id: i32,
        value: String,
        #[source]
        source: rust_decimal::Error,
    },
}

/// Row counts written by [`seed_sample_data`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub stations: usize,
    pub variables: usize,
    pub measurements: usize,
}

/// A block of readings for one station: the variables each row covers, then
/// `(DD/MM/YYYY HH:mm:ss, values...)` rows in the same variable order.
struct Series {
    variable_ids: &'static [i32],
    rows: &'static [(&'static str, &'static [&'static str])],
}

#[rustfmt::skip]
pub fn sample_stations() -> Vec<Station> {
    vec![
        Station::new(1, "Cohuna North", "Cohuna Solar Farm", "Enel Green Power", "VIC", -35.882762, 144.217208),
        Station::new(2, "Bungala 1 West", "Bungala 1 Solar Farm", "Enel Green Power", "SA", -32.430536, 137.846245),
        Station::new(3, "Bungala 2 East", "Bungala 2 Solar Farm", "Enel Green Power", "SA", -32.405243, 137.833565),
        Station::new(4, "Parkes North", "Parkes Solar Farm", "NEOEN", "NSW", -33.104181, 148.07779),
        Station::new(5, "Parkes South", "Parkes Solar Farm", "NEOEN", "NSW", -33.123945, 148.077615),
        Station::new(6, "Parkes East", "Parkes Solar Farm", "NEOEN", "NSW", -33.110485, 148.101728),
        Station::new(7, "Coopers Gap Mast", "Coopers Gap Wind Farm", "AGL", "QLD", -26.744933, 151.46473),
        Station::new(8, "Bulgana Mast", "Bulgana Green Power Hub", "NEOEN", "VIC", -37.062474, 142.950079),
        Station::new(9, "Childers West", "Childers Solar Farm", "Atmos", "QLD", -25.304253, 152.407882),
        Station::new(10, "Darlington MS", "Darlington Solar Farm", "Edify", "NSW", -34.647727, 146.063079),
    ]
}

pub fn sample_variables() -> Vec<Variable> {
    const AIR_TEMP: (&str, &str, &str) = ("AirT_inst", "Deg C", "Air Temp.");
    const GHI: (&str, &str, &str) = ("GHI_inst", "W/m^2", "Solar Irrad.");
    const WIND_SPEED: (&str, &str, &str) = ("WS_avg", "m/s", "Wind Speed Avg.");
    const WIND_DIR: (&str, &str, &str) = ("WD_avg", "Deg", "Wind Dir. Avg.");

    [
        (11, 1, AIR_TEMP),
        (12, 1, GHI),
        (21, 2, AIR_TEMP),
        (22, 2, GHI),
        (31, 3, AIR_TEMP),
        (32, 3, GHI),
        (41, 4, GHI),
        (51, 5, GHI),
        (61, 6, GHI),
        (71, 7, WIND_SPEED),
        (72, 7, WIND_DIR),
        (81, 8, WIND_SPEED),
        (82, 8, WIND_DIR),
        (91, 9, AIR_TEMP),
        (92, 9, GHI),
        (101, 10, GHI),
        (102, 10, AIR_TEMP),
    ]
    .into_iter()
    .map(|(variable_id, station_id, (name, unit, long_name))| {
        Variable::new(variable_id, station_id, name, unit, long_name)
    })
    .collect()
}

const SAMPLE_SERIES: &[Series] = &[
    Series {
        variable_ids: &[11, 12],
        rows: &[
            ("29/08/2023 06:00:00", &["17.09", "64"]),
            ("29/08/2023 06:05:00", &["17.22", "47"]),
            ("29/08/2023 06:10:00", &["17.32", "46"]),
            ("29/08/2023 06:15:00", &["17.2", "56"]),
            ("29/08/2023 06:20:00", &["17.17", "60"]),
            ("29/08/2023 06:25:00", &["17.24", "58"]),
            ("29/08/2023 06:30:00", &["17.51", "54"]),
            ("29/08/2023 06:35:00", &["17.84", "55"]),
            ("29/08/2023 06:40:00", &["17.97", "56"]),
            ("29/08/2023 06:45:00", &["17.87", "54"]),
            ("29/08/2023 06:50:00", &["17.62", "60"]),
            ("29/08/2023 06:55:00", &["17.54", "46"]),
        ],
    },
    Series {
        variable_ids: &[31, 32],
        rows: &[
            ("29/08/2023 02:05:00", &["19.4833", "728.937"]),
            ("29/08/2023 02:10:00", &["19.4439", "728.64"]),
            ("29/08/2023 02:15:00", &["19.503", "726.759"]),
            ("29/08/2023 02:20:00", &["19.1681", "726.66"]),
            ("29/08/2023 02:25:00", &["19.306", "724.779"]),
            ("29/08/2023 02:30:00", &["18.8529", "722.205"]),
            ("29/08/2023 02:35:00", &["18.84305", "719.829"]),
            ("29/08/2023 02:40:00", &["19.11885", "715.473"]),
            ("29/08/2023 02:45:00", &["19.4833", "710.523"]),
            ("29/08/2023 02:50:00", &["19.55225", "705.969"]),
            ("29/08/2023 02:55:00", &["19.57195", "701.514"]),
            ("29/08/2023 03:00:00", &["19.63105", "695.376"]),
        ],
    },
    Series {
        variable_ids: &[41],
        rows: &[
            ("29/08/2023 02:00:00", &["750"]),
            ("29/08/2023 02:05:00", &["751.7"]),
            ("29/08/2023 02:10:00", &["754.1"]),
            ("29/08/2023 02:15:00", &["759.6"]),
            ("29/08/2023 02:20:00", &["764.7"]),
            ("29/08/2023 02:25:00", &["780.4"]),
            ("29/08/2023 02:30:00", &["783.1"]),
            ("29/08/2023 02:35:00", &["723.4"]),
            ("29/08/2023 02:40:00", &["748.3"]),
            ("29/08/2023 02:45:00", &["749.1"]),
            ("29/08/2023 02:50:00", &["693.1"]),
            ("29/08/2023 02:55:00", &["753.4"]),
            ("29/08/2023 03:00:00", &["750.6"]),
        ],
    },
    Series {
        variable_ids: &[51],
        rows: &[
            ("29/08/2023 02:00:00", &["738.75"]),
            ("29/08/2023 02:05:00", &["740.4245"]),
            ("29/08/2023 02:10:00", &["742.7885"]),
            ("29/08/2023 02:15:00", &["748.206"]),
            ("29/08/2023 02:20:00", &["753.2295"]),
            ("29/08/2023 02:25:00", &["768.694"]),
            ("29/08/2023 02:30:00", &["771.3535"]),
            ("29/08/2023 02:35:00", &["712.549"]),
            ("29/08/2023 02:40:00", &["737.0755"]),
            ("29/08/2023 02:45:00", &["737.8635"]),
            ("29/08/2023 02:50:00", &["682.7035"]),
            ("29/08/2023 02:55:00", &["742.099"]),
            ("29/08/2023 03:00:00", &["739.341"]),
        ],
    },
    Series {
        variable_ids: &[61],
        rows: &[
            ("29/08/2023 02:00:00", &["701.8125"]),
            ("29/08/2023 02:05:00", &["703.403275"]),
            ("29/08/2023 02:10:00", &["705.649075"]),
            ("29/08/2023 02:15:00", &["710.7957"]),
            ("29/08/2023 02:20:00", &["715.568025"]),
            ("29/08/2023 02:25:00", &["730.2593"]),
            ("29/08/2023 02:30:00", &["732.785825"]),
            ("29/08/2023 02:35:00", &["676.92155"]),
            ("29/08/2023 02:40:00", &["700.221725"]),
            ("29/08/2023 02:45:00", &["700.970325"]),
            ("29/08/2023 02:50:00", &["648.568325"]),
            ("29/08/2023 02:55:00", &["704.99405"]),
            ("29/08/2023 03:00:00", &["702.37395"]),
        ],
    },
    Series {
        variable_ids: &[71, 72],
        rows: &[
            ("29/08/2023 02:00:00", &["1.443", "190.4"]),
            ("29/08/2023 02:05:00", &["1.634", "37.11"]),
            ("29/08/2023 02:10:00", &["1.806", "229.1"]),
            ("29/08/2023 02:15:00", &["2.642", "303.9"]),
            ("29/08/2023 02:20:00", &["2.633", "274.6"]),
            ("29/08/2023 02:25:00", &["2.266", "311.9"]),
            ("29/08/2023 02:30:00", &["2.716", "322.9"]),
            ("29/08/2023 02:35:00", &["2.578", "310.6"]),
            ("29/08/2023 02:40:00", &["2.992", "315.1"]),
            ("29/08/2023 02:45:00", &["2.395", "298.0"]),
            ("29/08/2023 02:50:00", &["2.533", "292.8"]),
            ("29/08/2023 02:55:00", &["1.913", "274.1"]),
            ("29/08/2023 03:00:00", &["2.237", "295.5"]),
        ],
    },
    Series {
        variable_ids: &[81, 82],
        rows: &[
            ("29/08/2023 02:00:00", &["2.366", "183.1"]),
            ("29/08/2023 02:05:00", &["2.234", "210.4"]),
            ("29/08/2023 02:10:00", &["2.547", "224.2"]),
            ("29/08/2023 02:15:00", &["2.318", "228.6"]),
            ("29/08/2023 02:20:00", &["2.618", "188.6"]),
            ("29/08/2023 02:25:00", &["1.86", "203.9"]),
            ("29/08/2023 02:30:00", &["2.375", "237.8"]),
            ("29/08/2023 02:35:00", &["2.079", "260.1"]),
            ("29/08/2023 02:40:00", &["2.098", "234.1"]),
            ("29/08/2023 02:45:00", &["1.99", "214.4"]),
            ("29/08/2023 02:50:00", &["2.21", "270.0"]),
            ("29/08/2023 02:55:00", &["2.313", "230.2"]),
            ("29/08/2023 03:00:00", &["1.892", "187.6"]),
        ],
    },
    Series {
        variable_ids: &[91, 92],
        rows: &[
            ("29/08/2023 02:05:00", &["21.88", "120.9"]),
            ("29/08/2023 02:10:00", &["21.79", "127.8"]),
            ("29/08/2023 02:15:00", &["21.29", "147.0"]),
            ("29/08/2023 02:20:00", &["20.81", "129.3"]),
            ("29/08/2023 02:25:00", &["20.7", "110.6"]),
            ("29/08/2023 02:30:00", &["20.46", "113.5"]),
            ("29/08/2023 02:35:00", &["20.25", "108.6"]),
            ("29/08/2023 02:40:00", &["20.02", "114.1"]),
            ("29/08/2023 02:45:00", &["20.1", "116.4"]),
            ("29/08/2023 02:50:00", &["20.0", "106.5"]),
            ("29/08/2023 02:55:00", &["20.14", "103.4"]),
            ("29/08/2023 03:00:00", &["19.9", "126.6"]),
        ],
    },
    Series {
        variable_ids: &[101, 102],
        rows: &[
            ("28/08/2023 02:00:00", &["746.9", "17.71"]),
            ("28/08/2023 02:05:00", &["746.8", "17.57"]),
            ("28/08/2023 02:10:00", &["750.0", "17.82"]),
            ("28/08/2023 02:00:00", &["747.8", "18.4"]),
            ("28/08/2023 02:00:00", &["743.6", "18.2"]),
            ("28/08/2023 02:00:00", &["740.8", "18.65"]),
            ("28/08/2023 02:00:00", &["737.2", "17.87"]),
            ("28/08/2023 02:00:00", &["735.1", "18.47"]),
            ("28/08/2023 02:00:00", &["734.1", "18.85"]),
            ("28/08/2023 02:00:00", &["733.6", "18.48"]),
            ("28/08/2023 02:00:00", &["728.4", "18.6"]),
            ("28/08/2023 02:00:00", &["721.7", "18.41"]),
            ("28/08/2023 02:00:00", &["733.4", "18.57"]),
        ],
    },
];

/// Expand the sample series into insertable measurements
pub fn sample_measurements() -> Result<Vec<NewMeasurement>, SeedError> {
    let mut measurements = Vec::new();

    for series in SAMPLE_SERIES {
        for (time, values) in series.rows {
            let timestamp = parse_to_iso(time)?;

            for (variable_id, value) in series.variable_ids.iter().zip(values.iter()) {
                let m = NewMeasurement::parse(*variable_id, value, timestamp.clone()).map_err(
                    |source| SeedError::InvalidValue {
                        variable_id: *variable_id,
                        value: value.to_string(),
                        source,
                    },
                )?;
                measurements.push(m);
            }
        }
    }

    Ok(measurements)
}

/// Insert the sample dataset in a single transaction
pub fn seed_sample_data(conn: &mut SqliteConnection) -> Result<SeedSummary, SeedError> {
    let stations = sample_stations();
    let variables = sample_variables();
    let measurements = sample_measurements()?;

    conn.transaction::<_, SeedError, _>(|conn| {
        let summary = SeedSummary {
            stations: diesel::insert_into(station::table)
                .values(&stations)
                .execute(conn)?,
            variables: diesel::insert_into(variable::table)
                .values(&variables)
                .execute(conn)?,
            measurements: diesel::insert_into(measurement::table)
                .values(&measurements)
                .execute(conn)?,
        };

        tracing::info!(
            "Seeded {} stations, {} variables, {} measurements",
            summary.stations,
            summary.variables,
            summary.measurements
        );

        Ok(summary)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::migrated_pool;

    #[test]
    fn test_every_series_row_covers_its_variables() {
        for series in SAMPLE_SERIES {
            for (time, values) in series.rows {
                assert_eq!(values.len(), series.variable_ids.len(), "row {}", time);
            }
        }
    }

    #[test]
    fn test_every_measurement_variable_exists() {
        let variable_ids: Vec<i32> = sample_variables().iter().map(|v| v.variable_id).collect();
        for m in sample_measurements().unwrap() {
            assert!(variable_ids.contains(&m.variable_id));
        }
    }

    #[test]
    fn test_seed_sample_data() {
        let (_dir, pool) = migrated_pool();
        let mut conn = pool.get_conn().unwrap();

        let summary = seed_sample_data(&mut conn).unwrap();
        assert_eq!(summary.stations, 10);
        assert_eq!(summary.variables, 17);
        assert_eq!(summary.measurements, sample_measurements().unwrap().len());
    }

    #[test]
    fn test_seeding_twice_rolls_back() {
        let (_dir, pool) = migrated_pool();
        let mut conn = pool.get_conn().unwrap();

        seed_sample_data(&mut conn).unwrap();
        assert!(seed_sample_data(&mut conn).is_err());

        let count: i64 = measurement::table.count().get_result(&mut conn).unwrap();
        assert_eq!(count as usize, sample_measurements().unwrap().len());
    }
}
