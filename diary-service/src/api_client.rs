use async_trait::async_trait;
use chrono::Local;
use common::errors::AppError;
use common::http_client::HttpClient;
use common::models::WeatherSnapshot;
use serde::Deserialize;
use tracing::{info, instrument};

#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    main: MainData,
    weather: Vec<ConditionData>,
}

#[derive(Debug, Deserialize)]
struct MainData {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionData {
    main: String,
    icon: String,
}

/// Source of current-weather snapshots. Implementations must treat every
/// network, HTTP-status, and decode failure as an `Err`, never a sentinel.
#[async_trait]
pub trait FetchWeather: Send + Sync {
    async fn fetch_current(&self) -> Result<WeatherSnapshot, AppError>;
}

/// OpenWeatherMap client for a single configured city
pub struct OpenWeatherClient {
    http_client: HttpClient,
    base_url: String,
    city: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(
        base_url: String,
        city: String,
        api_key: String,
        timeout_secs: u64,
        max_retries: u32,
    ) -> Self {
        Self {
            http_client: HttpClient::new(timeout_secs, max_retries),
            base_url,
            city,
            api_key,
        }
    }
}

#[async_trait]
impl FetchWeather for OpenWeatherClient {
    #[instrument(skip(self), fields(city = %self.city))]
    async fn fetch_current(&self) -> Result<WeatherSnapshot, AppError> {
        let url = format!(
            "{}?q={}&appid={}&units=metric",
            self.base_url, self.city, self.api_key
        );

        // Upstream statuses are the weather provider's fault, not the
        // caller's; a 401 or 429 from the API must not reach the diary
        // client as its own error, so everything collapses to bad gateway.
        let response: OpenWeatherResponse =
            self.http_client.get_json(&url).await.map_err(|e| match e {
                AppError::HttpError { status, message } => AppError::http(
                    502,
                    format!("Weather provider returned {}: {}", status, message),
                ),
                other => other,
            })?;

        // The provider returns a list of condition descriptors; an empty list
        // is a malformed payload, not an index panic.
        let condition = response.weather.into_iter().next().ok_or_else(|| {
            AppError::http(502, "Weather response contained no condition descriptors")
        })?;

        info!(condition = %condition.main, temperature = response.main.temp, "Fetched current weather");

        Ok(WeatherSnapshot {
            date: Local::now().date_naive(),
            condition: condition.main,
            icon: condition.icon,
            temperature: response.main.temp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenWeatherClient {
        OpenWeatherClient::new(
            format!("{}/data/2.5/weather", server.uri()),
            "seoul".to_string(),
            "test-key".to_string(),
            1,
            0,
        )
    }

    #[tokio::test]
    async fn decodes_current_weather_payload() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "seoul"))
            .and(query_param("appid", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "main": { "temp": 15.2, "pressure": 1012, "humidity": 70 },
                "weather": [
                    { "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" },
                    { "id": 701, "main": "Mist", "description": "mist", "icon": "50d" }
                ]
            })))
            .mount(&server)
            .await;

        let snapshot = client_for(&server)
            .fetch_current()
            .await
            .expect("fetch should succeed");

        assert_eq!(snapshot.condition, "Clear");
        assert_eq!(snapshot.icon, "01d");
        assert_eq!(snapshot.temperature, 15.2);
        assert_eq!(snapshot.date, Local::now().date_naive());
    }

    #[tokio::test]
    async fn empty_condition_list_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "main": { "temp": 3.0 },
                "weather": []
            })))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_current().await;

        assert!(matches!(result, Err(AppError::HttpError { status: 502, .. })));
    }

    #[tokio::test]
    async fn upstream_error_status_surfaces_as_bad_gateway() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"cod": 401, "message": "Invalid API key"})),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_current().await;

        // The upstream 401 is the provider's problem; callers see a server
        // error, never a client-error status they did nothing to earn
        match result {
            Err(AppError::HttpError { status, ref message }) => {
                assert_eq!(status, 502);
                assert!(message.contains("401"));
            }
            other => panic!("expected a bad gateway error, got {:?}", other),
        }

        let err = client_for(&server).fetch_current().await.unwrap_err();
        let response = axum::response::IntoResponse::into_response(err);
        assert!(response.status().is_server_error());
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_current().await;

        assert!(matches!(result, Err(AppError::ParseError(_))));
    }
}
