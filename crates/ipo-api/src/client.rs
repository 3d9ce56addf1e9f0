use {
    crate::{
        error::{IpoError, Result},
        record::IpoRecord,
    },
    serde::{Deserialize, Serialize},
};

/// Base URL used when nothing else is configured (local backend)
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable holding the API base URL
pub const API_URL_ENV: &str = "IPO_API_URL";

/// Environment variable name used by the web frontend
pub const LEGACY_API_URL_ENV: &str = "VITE_API_URL";

/// Response of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}

/// Pick the first non-blank base URL, falling back to [`DEFAULT_API_URL`]
pub fn resolve_base_url<'a>(primary: Option<&'a str>, legacy: Option<&'a str>) -> &'a str {
    [primary, legacy]
        .into_iter()
        .flatten()
        .find(|url| !url.trim().is_empty())
        .unwrap_or(DEFAULT_API_URL)
}

/// Client for the IPO data API.
///
/// All requests share one base URL.
#[derive(Debug, Clone)]
pub struct IpoClient {
    client: reqwest::Client,
    base_url: String,
}

impl IpoClient {
    /// Create a client for the given base URL (e.g., "http://localhost:8000").
    ///
    /// Only http and https URLs are accepted. A trailing slash is ignored.
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| IpoError::InvalidData(format!("Invalid API URL '{}': {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(IpoError::InvalidData(format!(
                "Unsupported API URL scheme '{}' in '{}'",
                parsed.scheme(),
                base_url
            )));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from `IPO_API_URL` (or `VITE_API_URL`), falling back
    /// to the local default.
    pub fn from_env() -> Result<Self> {
        let primary = std::env::var(API_URL_ENV).ok();
        let legacy = std::env::var(LEGACY_API_URL_ENV).ok();
        let base_url = resolve_base_url(primary.as_deref(), legacy.as_deref());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch every IPO record, in the order the backend returns them
    pub async fn list_ipos(&self) -> Result<Vec<IpoRecord>> {
        let url = self.endpoint("/api/ipos");
        log_info!("GET {}", url);

        let response = self.client.get(&url).send().await.inspect_err(|_e| {
            log_error!("Failed to send list request: {}", _e);
        })?;

        let status = response.status();
        log_info!("GET {} -> status: {}", url, status);

        if !status.is_success() {
            return Err(IpoError::Status {
                endpoint: url,
                status,
            });
        }

        let body: serde_json::Value = response.json().await?;
        decode_ipo_list(body)
    }

    /// Ask the backend to re-scrape its data. The response body is ignored.
    pub async fn refresh(&self) -> Result<()> {
        let url = self.endpoint("/api/refresh");
        log_info!("POST {}", url);

        let response = self.client.post(&url).send().await.inspect_err(|_e| {
            log_error!("Failed to send refresh request: {}", _e);
        })?;

        let status = response.status();
        log_info!("POST {} -> status: {}", url, status);

        if !status.is_success() {
            log_warn!("Refresh rejected: status={}", status);
            return Err(IpoError::Status {
                endpoint: url,
                status,
            });
        }

        Ok(())
    }

    /// Check that the API is up
    pub async fn status(&self) -> Result<StatusResponse> {
        let url = self.endpoint("/");
        log_debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(IpoError::Status {
                endpoint: url,
                status,
            });
        }

        let body: StatusResponse = response.json().await?;
        Ok(body)
    }
}

impl Default for IpoClient {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Decode the body of `GET /api/ipos`.
///
/// The backend answers failures with `200 {"error": "..."}`, so an object
/// carrying an `error` key is reported as [`IpoError::Api`].
pub fn decode_ipo_list(body: serde_json::Value) -> Result<Vec<IpoRecord>> {
    match body {
        serde_json::Value::Array(_) => {
            let records: Vec<IpoRecord> = serde_json::from_value(body)?;
            log_debug!("Decoded {} IPO records", records.len());
            Ok(records)
        },
        serde_json::Value::Object(ref map) if map.contains_key("error") => {
            let message = match map.get("error") {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            log_warn!("IPO list API error: {}", message);
            Err(IpoError::Api(message))
        },
        other => Err(IpoError::InvalidData(format!(
            "Expected a JSON array of IPO records, got: {}",
            truncate_body(&other.to_string(), 200)
        ))),
    }
}

fn truncate_body(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}
