//! Thin asynchronous client for the NHTSA vPIC vehicle catalogue.
//!
//! - Lists the model names known for a make.
//! - Keeps a per-session in-memory memo with stale fallbacks.
//! - Callers that only need a best-effort list use `models_or_empty`.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const DEFAULT_BASE_URL: &str = "https://vpic.nhtsa.dot.gov/api/vehicles/";
const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("dz-import-simulator/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    Fresh,
    Cached,
    Stale,
}

#[derive(Clone, Debug)]
pub struct CachedPayload<T> {
    pub data: T,
    pub fetched_at: SystemTime,
    pub status: CacheStatus,
}

impl<T> CachedPayload<T> {
    fn new(data: T, fetched_at: SystemTime, status: CacheStatus) -> Self {
        Self {
            data,
            fetched_at,
            status,
        }
    }
}

#[derive(Clone)]
pub struct ModelDirectory {
    http: Client,
    base_url: Url,
    cache: Arc<Mutex<HashMap<String, Cached<Vec<String>>>>>,
    ttl: Duration,
}

impl ModelDirectory {
    pub fn new() -> Result<Self, LookupError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base: &str) -> Result<Self, LookupError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url,
            cache: Arc::new(Mutex::new(HashMap::new())),
            ttl: DEFAULT_TTL,
        })
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Model names for `make`, in catalogue order without duplicates.
    pub async fn get_models(&self, make: &str) -> Result<CachedPayload<Vec<String>>, LookupError> {
        let key = normalize_make(make);
        if key.is_empty() {
            return Ok(CachedPayload::new(
                Vec::new(),
                SystemTime::now(),
                CacheStatus::Fresh,
            ));
        }

        if let Some(payload) = self.cached_models(&key).await {
            debug!("[models] serving memoized models for {key}");
            return Ok(payload);
        }

        match self.fetch_models(make.trim()).await {
            Ok(models) => {
                info!("[models] loaded {} models for {key}", models.len());
                Ok(self.store_models(&key, models).await)
            }
            Err(error) => {
                if let Some(stale) = self.cached_models_stale(&key).await {
                    warn!("[models] lookup for {key} failed ({error}); using stale list");
                    return Ok(stale);
                }
                Err(error)
            }
        }
    }

    /// Best-effort variant: an unreachable catalogue yields an empty list so
    /// the user can keep entering vehicle attributes by hand.
    pub async fn models_or_empty(&self, make: &str) -> Vec<String> {
        match self.get_models(make).await {
            Ok(payload) => payload.data,
            Err(error) => {
                warn!("[models] lookup unavailable for {}: {error}", make.trim());
                Vec::new()
            }
        }
    }

    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    async fn cached_models(&self, key: &str) -> Option<CachedPayload<Vec<String>>> {
        let cache = self.cache.lock().await;
        cache.get(key).and_then(|entry| entry.if_fresh(self.ttl))
    }

    async fn cached_models_stale(&self, key: &str) -> Option<CachedPayload<Vec<String>>> {
        let cache = self.cache.lock().await;
        cache.get(key).map(Cached::stale)
    }

    async fn store_models(&self, key: &str, data: Vec<String>) -> CachedPayload<Vec<String>> {
        let fetched_at = SystemTime::now();
        let payload = CachedPayload::new(data.clone(), fetched_at, CacheStatus::Fresh);
        let mut cache = self.cache.lock().await;
        cache.insert(key.to_string(), Cached::new(data, fetched_at));
        payload
    }

    async fn fetch_models(&self, make: &str) -> Result<Vec<String>, LookupError> {
        let url = self.models_url(make)?;
        debug!("[models] requesting {url}");

        let response = self.http.get(url).send().await?.error_for_status()?;
        let envelope: VpicEnvelope = response.json().await?;
        parse_models(envelope)
    }

    fn models_url(&self, make: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.join("GetModelsForMake/")?;
        url.path_segments_mut()
            .map_err(|_| LookupError::Api(format!("base URL {} cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .push(make);
        url.query_pairs_mut().append_pair("format", "json");
        Ok(url)
    }

    #[cfg(test)]
    async fn seed(&self, make: &str, models: Vec<String>, fetched_at: SystemTime) {
        self.cache
            .lock()
            .await
            .insert(normalize_make(make), Cached::new(models, fetched_at));
    }
}

fn normalize_make(make: &str) -> String {
    make.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

struct Cached<T> {
    value: T,
    fetched_at: SystemTime,
}

impl<T: Clone> Cached<T> {
    fn new(value: T, fetched_at: SystemTime) -> Self {
        Self { value, fetched_at }
    }

    fn if_fresh(&self, ttl: Duration) -> Option<CachedPayload<T>> {
        if self
            .fetched_at
            .elapsed()
            .map(|elapsed| elapsed <= ttl)
            .unwrap_or(false)
        {
            Some(CachedPayload::new(
                self.value.clone(),
                self.fetched_at,
                CacheStatus::Cached,
            ))
        } else {
            None
        }
    }

    fn stale(&self) -> CachedPayload<T> {
        CachedPayload::new(self.value.clone(), self.fetched_at, CacheStatus::Stale)
    }
}

#[derive(Debug, Deserialize)]
struct VpicEnvelope {
    #[serde(rename = "Message", default)]
    message: Option<String>,
    #[serde(rename = "Results", default)]
    results: Option<Vec<ModelDto>>,
}

#[derive(Debug, Deserialize)]
struct ModelDto {
    #[serde(rename = "Model_Name", default, deserialize_with = "optional_string_from_json")]
    model_name: Option<String>,
}

fn parse_models(envelope: VpicEnvelope) -> Result<Vec<String>, LookupError> {
    let VpicEnvelope { message, results } = envelope;
    let Some(results) = results else {
        return Err(LookupError::Api(
            message.unwrap_or_else(|| "response missing Results".to_string()),
        ));
    };

    let mut models: Vec<String> = Vec::with_capacity(results.len());
    for name in results.into_iter().filter_map(|dto| dto.model_name) {
        let name = name.trim();
        if name.is_empty() || models.iter().any(|known| known.eq_ignore_ascii_case(name)) {
            continue;
        }
        models.push(name.to_string());
    }
    Ok(models)
}

/// vPIC occasionally sends purely numeric model names as JSON numbers.
fn optional_string_from_json<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct StringOrNumber;

    impl<'de> serde::de::Visitor<'de> for StringOrNumber {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string, a number or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RENAULT_PAYLOAD: &str = r#"{
        "Count": 5,
        "Message": "Response returned successfully",
        "SearchCriteria": "Make:renault",
        "Results": [
            {"Make_ID": 493, "Make_Name": "RENAULT", "Model_ID": 2056, "Model_Name": "Clio"},
            {"Make_ID": 493, "Make_Name": "RENAULT", "Model_ID": 2057, "Model_Name": "Megane"},
            {"Make_ID": 493, "Make_Name": "RENAULT", "Model_ID": 2058, "Model_Name": " clio "},
            {"Make_ID": 493, "Make_Name": "RENAULT", "Model_ID": 2059, "Model_Name": 5},
            {"Make_ID": 493, "Make_Name": "RENAULT", "Model_ID": 2060, "Model_Name": null}
        ]
    }"#;

    #[test]
    fn parses_models_in_order_without_duplicates() {
        let envelope: VpicEnvelope = serde_json::from_str(RENAULT_PAYLOAD).unwrap();
        let models = parse_models(envelope).unwrap();
        assert_eq!(models, vec!["Clio", "Megane", "5"]);
    }

    #[test]
    fn missing_results_is_an_api_error() {
        let envelope: VpicEnvelope =
            serde_json::from_str(r#"{"Message": "Invalid make"}"#).unwrap();
        match parse_models(envelope) {
            Err(LookupError::Api(message)) => assert_eq!(message, "Invalid make"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_results_are_fine() {
        let envelope: VpicEnvelope =
            serde_json::from_str(r#"{"Count": 0, "Results": []}"#).unwrap();
        assert!(parse_models(envelope).unwrap().is_empty());
    }

    #[test]
    fn make_is_escaped_into_the_path() {
        let client = ModelDirectory::new().unwrap();
        let url = client.models_url("Land Rover").unwrap();
        assert_eq!(
            url.as_str(),
            "https://vpic.nhtsa.dot.gov/api/vehicles/GetModelsForMake/Land%20Rover?format=json"
        );
    }

    #[test]
    fn make_keys_ignore_case_and_spacing() {
        assert_eq!(normalize_make("  Land   ROVER "), "land rover");
    }

    #[tokio::test]
    async fn blank_make_skips_the_network() {
        let client = ModelDirectory::with_base_url("http://127.0.0.1:9/").unwrap();
        let payload = client.get_models("   ").await.unwrap();
        assert!(payload.data.is_empty());
        assert_eq!(payload.status, CacheStatus::Fresh);
    }

    #[tokio::test]
    async fn memo_within_ttl_is_served_as_cached() {
        let client = ModelDirectory::with_base_url("http://127.0.0.1:9/").unwrap();
        client
            .seed("Renault", vec!["Clio".to_string()], SystemTime::now())
            .await;

        let payload = client.get_models("renault").await.unwrap();
        assert_eq!(payload.status, CacheStatus::Cached);
        assert_eq!(payload.data, vec!["Clio"]);
    }

    #[tokio::test]
    async fn expired_memo_is_served_stale_when_lookup_fails() {
        let client = ModelDirectory::with_base_url("http://127.0.0.1:9/")
            .unwrap()
            .with_ttl(Duration::from_secs(60));
        let long_ago = SystemTime::now() - Duration::from_secs(3600);
        client
            .seed("Peugeot", vec!["208".to_string(), "3008".to_string()], long_ago)
            .await;

        let payload = client.get_models("Peugeot").await.unwrap();
        assert_eq!(payload.status, CacheStatus::Stale);
        assert_eq!(payload.data, vec!["208", "3008"]);
    }
}
