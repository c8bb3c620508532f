use std::sync::Arc;

use chipp_http::{HttpClient, NoInterceptor};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{Device, Reading, Result, Select};

#[derive(Clone)]
pub struct Api {
    base_url: String,
    client: Arc<HttpClient<NoInterceptor>>,
}

#[derive(Debug, Deserialize)]
struct Response<T> {
    data: T,
}

// `updated_at` is only reported on the single-device route; fleet-wide
// bulk reads carry no timestamps.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LastReading {
    pub id: String,
    #[serde(flatten)]
    pub data: Reading,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DeviceReading {
    #[serde(flatten)]
    pub data: Reading,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TimedReading {
    #[serde(flatten)]
    pub data: Reading,
    pub created_at: DateTime<Utc>,
}

impl Api {
    pub fn new(base_url: &str) -> Api {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = HttpClient::new(&base_url).unwrap();

        Api {
            base_url,
            client: Arc::new(client),
        }
    }

    pub async fn devices(&self) -> Result<Vec<Device>> {
        let request = self.client.new_request(["devices"]);

        let response: Response<Vec<Device>> = self
            .client
            .perform_request(request, chipp_http::json::parse_json)
            .await?;

        Ok(response.data)
    }

    pub async fn device(&self, id: &str) -> Result<Device> {
        let request = self.client.new_request(["devices", id]);

        let response: Response<Device> = self
            .client
            .perform_request(request, chipp_http::json::parse_json)
            .await?;

        Ok(response.data)
    }

    pub async fn devices_last_reading(&self) -> Result<Vec<LastReading>> {
        let request = self.client.new_request(["devices_last_reading"]);

        let response: Response<Vec<LastReading>> = self
            .client
            .perform_request(request, chipp_http::json::parse_json)
            .await?;

        Ok(response.data)
    }

    pub async fn device_last_reading(&self, id: &str) -> Result<DeviceReading> {
        let request = self
            .client
            .new_request_with_url(self.readings_url(id, Select::Last))?;

        let response: Response<DeviceReading> = self
            .client
            .perform_request(request, chipp_http::json::parse_json)
            .await?;

        Ok(response.data)
    }

    /// Historical window for one device, sorted by record time
    /// ascending.
    pub async fn device_readings(&self, id: &str, select: Select) -> Result<Vec<TimedReading>> {
        let request = self.client.new_request_with_url(self.readings_url(id, select))?;

        let response: Response<Vec<TimedReading>> = self
            .client
            .perform_request(request, chipp_http::json::parse_json)
            .await?;

        let mut readings = response.data;
        readings.sort_by_key(|reading| reading.created_at);

        Ok(readings)
    }

    fn readings_url(&self, id: &str, select: Select) -> String {
        format!("{}/devices/{}/readings?select={}", self.base_url, id, select)
    }
}
