use async_trait::async_trait;
use serde_json::Value;

use crate::api::responses::{MeasurementView, StationListResponse, StationResponse};

use super::config::ClientConfig;
use super::error::ClientError;

/// Backend operations the map client needs
#[async_trait]
pub trait WeatherApi: Send + Sync {
    async fn fetch_stations(&self) -> Result<Vec<StationResponse>, ClientError>;

    async fn fetch_measurements(&self, station_id: i32)
        -> Result<Vec<MeasurementView>, ClientError>;
}

/// `WeatherApi` over HTTP/JSON
///
/// No retries and no timeouts; each call is a single request.
#[derive(Debug, Clone)]
pub struct HttpWeatherApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpWeatherApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Pull the `data` array out of a `{data: [...]}` envelope
fn data_array(body: Value) -> Result<Value, ClientError> {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data @ Value::Array(_)) => Ok(data),
            Some(_) => Err(ClientError::MalformedPayload("`data` is not an array".into())),
            None => Err(ClientError::MalformedPayload("missing `data` field".into())),
        },
        _ => Err(ClientError::MalformedPayload("body is not an object".into())),
    }
}

#[async_trait]
impl WeatherApi for HttpWeatherApi {
    async fn fetch_stations(&self) -> Result<Vec<StationResponse>, ClientError> {
        let body = self.get_json("station").await?;
        let list: StationListResponse = serde_json::from_value(body)
            .map_err(|e| ClientError::MalformedPayload(e.to_string()))?;
        Ok(list.data)
    }

    async fn fetch_measurements(
        &self,
        station_id: i32,
    ) -> Result<Vec<MeasurementView>, ClientError> {
        let body = self
            .get_json(&format!("measurement/{}", station_id))
            .await?;
        let data = data_array(body)?;

        serde_json::from_value(data).map_err(|e| ClientError::MalformedPayload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_array() {
        assert_eq!(data_array(json!({"data": [1, 2]})).unwrap(), json!([1, 2]));
        assert!(matches!(
            data_array(json!({"data": {"value": "1"}})),
            Err(ClientError::MalformedPayload(_))
        ));
        assert!(matches!(
            data_array(json!({"error": "Station not found"})),
            Err(ClientError::MalformedPayload(_))
        ));
        assert!(matches!(data_array(json!([])), Err(ClientError::MalformedPayload(_))));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let api = HttpWeatherApi::new("http://localhost:3001/api/");
        assert_eq!(api.base_url, "http://localhost:3001/api");
    }
}
