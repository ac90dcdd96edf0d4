use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::database::models::{LatestReading, Station, Variable};
use crate::utils::format_timestamp;

/// Station as exposed to the map frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StationResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Cohuna North")]
    pub ws_name: String,
    #[schema(example = "Cohuna Solar Farm")]
    pub site: String,
    #[schema(example = "Enel Green Power")]
    pub portfolio: String,
    #[schema(example = "VIC")]
    pub state: String,
    pub latitude: f64,
    #[schema(example = 144.217208)]
    pub longitude: f64,
}

impl From<Station> for StationResponse {
    fn from(station: Station) -> Self {
        Self {
            id: station.station_id,
            ws_name: station.name,
            site: station.site,
            portfolio: station.portfolio,
            state: station.state,
            latitude: station.latitude,
            longitude: station.longitude,
        }
    }
}

/// One value of a station's latest reading set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementView {
    /// Decimal value as stored
    #[schema(example = "17.54")]
    pub value: String,
    /// UTC time formatted as DD/MM/YYYY HH:mm:ss
    #[schema(example = "29/08/2023 06:55:00")]
    pub timestamp: String,
    #[schema(example = "AirT_inst")]
    pub variable_name: String,
    #[schema(example = "Air Temp.")]
    pub long_name: String,
    #[schema(example = "Deg C")]
    pub unit: String,
}

impl From<LatestReading> for MeasurementView {
    fn from(reading: LatestReading) -> Self {
        let timestamp = format_timestamp(&reading.timestamp).unwrap_or_else(|| {
            tracing::warn!(
                "Stored timestamp {:?} is not ISO-8601, returning it unformatted",
                reading.timestamp
            );
            reading.timestamp.clone()
        });

        Self {
            value: reading.value,
            timestamp,
            variable_name: reading.variable_name,
            long_name: reading.long_name,
            unit: reading.unit,
        }
    }
}

/// Variable metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VariableResponse {
    #[schema(example = 11)]
    pub id: i32,
    #[schema(example = 1)]
    pub station_id: i32,
    #[schema(example = "AirT_inst")]
    pub name: String,
    #[schema(example = "Deg C")]
    pub unit: String,
    #[schema(example = "Air Temp.")]
    pub long_name: String,
}

impl From<Variable> for VariableResponse {
    fn from(variable: Variable) -> Self {
        Self {
            id: variable.variable_id,
            station_id: variable.station_id,
            name: variable.name,
            unit: variable.unit,
            long_name: variable.long_name,
        }
    }
}

/// Station list response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StationListResponse {
    pub data: Vec<StationResponse>,
}

/// Latest measurements response (empty when the station has no readings)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeasurementListResponse {
    pub data: Vec<MeasurementView>,
}

/// Variable list response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VariableListResponse {
    pub data: Vec<VariableResponse>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    pub timestamp: String,
    #[schema(example = "0.1.0")]
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Station not found")]
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_response_field_names() {
        let station = Station::new(1, "Cohuna North", "Cohuna Solar Farm", "Enel Green Power", "VIC", -35.882762, 144.217208);
        let json = serde_json::to_value(StationResponse::from(station)).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["ws_name"], "Cohuna North");
        assert_eq!(json["portfolio"], "Enel Green Power");
        assert_eq!(json["latitude"], -35.882762);
    }

    #[test]
    fn test_measurement_view_is_camel_case_and_formatted() {
        let view = MeasurementView::from(LatestReading {
            value: "17.54".into(),
            timestamp: "2023-08-29T06:55:00.000Z".into(),
            variable_name: "AirT_inst".into(),
            long_name: "Air Temp.".into(),
            unit: "Deg C".into(),
        });
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["timestamp"], "29/08/2023 06:55:00");
        assert_eq!(json["variableName"], "AirT_inst");
        assert_eq!(json["longName"], "Air Temp.");
        assert_eq!(json["unit"], "Deg C");
        assert_eq!(json["value"], "17.54");
    }

    #[test]
    fn test_unparseable_timestamp_passes_through() {
        let view = MeasurementView::from(LatestReading {
            value: "1".into(),
            timestamp: "yesterday".into(),
            variable_name: "WS_avg".into(),
            long_name: "Wind Speed Avg.".into(),
            unit: "m/s".into(),
        });
        assert_eq!(view.timestamp, "yesterday");
    }
}
