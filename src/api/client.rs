//! HTTP client for a TimeTagger-compatible server.
//!
//! The client is constructed explicitly from the configuration and passed to
//! whatever needs it; switching servers or credentials means building a new
//! client and dropping the old one.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::api::models::{PutResponse, RecordsQuery, RecordsResponse};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::record::Record;

/// Access to the remote record store. The production implementation is
/// [`ApiClient`]; tests substitute in-memory fakes.
#[async_trait]
pub trait RecordsApi: Send + Sync {
    /// Replace (or create) the given records. The server answers with the
    /// keys it accepted or rejected.
    async fn put_records(&self, records: &[Record]) -> AppResult<PutResponse>;

    /// Fetch records matching the query.
    async fn get_records(&self, query: &RecordsQuery) -> AppResult<RecordsResponse>;

    /// Cheap authenticated call used to verify credentials during login.
    async fn probe(&self) -> AppResult<()>;
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// `<server>/timetagger/api/v2/`, normalizing the trailing slash.
pub fn api_base(server_url: &str) -> String {
    let mut base = server_url.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    format!("{}timetagger/api/v2/", base)
}

impl ApiClient {
    /// Build a client for the configured server.
    pub fn new(cfg: &Config) -> AppResult<Self> {
        if !cfg.is_logged_in() {
            return Err(AppError::NotLoggedIn);
        }
        Self::with_credentials(&cfg.server_url, &cfg.api_token)
    }

    /// Build a client from explicit credentials (login flow, before they
    /// are saved).
    pub fn with_credentials(server_url: &str, token: &str) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(token)
            .map_err(|_| AppError::Config("API token contains invalid characters".to_string()))?;
        headers.insert("authtoken", value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: api_base(server_url),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl RecordsApi for ApiClient {
    async fn put_records(&self, records: &[Record]) -> AppResult<PutResponse> {
        let response = self
            .http
            .put(self.url("records"))
            .json(records)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn get_records(&self, query: &RecordsQuery) -> AppResult<RecordsResponse> {
        let mut params: Vec<(&str, String)> = vec![("timerange", query.timerange())];
        if let Some(running) = query.running {
            params.push(("running", flag(running)));
        }
        if let Some(hidden) = query.hidden {
            params.push(("hidden", flag(hidden)));
        }
        if let Some(tag) = &query.tag {
            params.push(("tag", tag.clone()));
        }

        let response = self
            .http
            .get(self.url("records"))
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn probe(&self) -> AppResult<()> {
        // The settings endpoint doubles as a "ping" to verify credentials.
        let response = self.http.get(self.url("settings")).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::Api(format!(
                "credential check failed with status {}",
                response.status()
            )))
        }
    }
}

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}
