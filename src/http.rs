use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::Method;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_USER_AGENT: &str = "Clockify-Reporter";
pub const API_KEY_HEADER: &str = "x-api-key";

const MAX_IDLE_PER_HOST: usize = 100;
const BODY_METHODS: [Method; 4] = [Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),
    #[error("invalid header value for {name}")]
    InvalidHeader { name: &'static str },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode JSON body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_key: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl ClientSettings {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_key: api_key.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Only 200 counts as success.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn as_json(&self) -> Result<Map<String, Value>, HttpError> {
        as_json(&self.body)
    }
}

pub fn as_json(body: &[u8]) -> Result<Map<String, Value>, HttpError> {
    Ok(serde_json::from_slice(body)?)
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    defaults: HeaderMap,
}

impl HttpClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
            .build()?;

        let mut defaults = HeaderMap::new();
        defaults.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        defaults.insert(
            USER_AGENT,
            HeaderValue::from_str(&settings.user_agent)
                .map_err(|_| HttpError::InvalidHeader { name: "User-Agent" })?,
        );
        let mut api_key = HeaderValue::from_str(&settings.api_key)
            .map_err(|_| HttpError::InvalidHeader { name: "X-Api-Key" })?;
        api_key.set_sensitive(true);
        defaults.insert(HeaderName::from_static(API_KEY_HEADER), api_key);

        Ok(Self { client, defaults })
    }

    pub fn request(
        &self,
        method: &str,
        url: &str,
        payload: Option<&[u8]>,
        headers: Option<&HeaderMap>,
    ) -> Result<HttpResponse, HttpError> {
        let method = parse_method(method)?;
        let headers = merge_headers(&self.defaults, headers);

        let mut builder = self.client.request(method.clone(), url).headers(headers);
        if let Some(body) = request_body(&method, payload) {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes()?.to_vec();
        debug!(%method, url, status, bytes = body.len(), "http request finished");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    pub fn get(&self, url: &str, headers: Option<&HeaderMap>) -> Result<HttpResponse, HttpError> {
        let fallback = read_headers();
        self.request("GET", url, None, Some(headers.unwrap_or(&fallback)))
    }

    pub fn head(&self, url: &str, headers: Option<&HeaderMap>) -> Result<HttpResponse, HttpError> {
        let fallback = read_headers();
        self.request("HEAD", url, None, Some(headers.unwrap_or(&fallback)))
    }

    pub fn post(
        &self,
        url: &str,
        payload: Option<&[u8]>,
        headers: Option<&HeaderMap>,
    ) -> Result<HttpResponse, HttpError> {
        self.write("POST", url, payload, headers)
    }

    pub fn put(
        &self,
        url: &str,
        payload: Option<&[u8]>,
        headers: Option<&HeaderMap>,
    ) -> Result<HttpResponse, HttpError> {
        self.write("PUT", url, payload, headers)
    }

    pub fn patch(
        &self,
        url: &str,
        payload: Option<&[u8]>,
        headers: Option<&HeaderMap>,
    ) -> Result<HttpResponse, HttpError> {
        self.write("PATCH", url, payload, headers)
    }

    pub fn delete(
        &self,
        url: &str,
        payload: Option<&[u8]>,
        headers: Option<&HeaderMap>,
    ) -> Result<HttpResponse, HttpError> {
        self.write("DELETE", url, payload, headers)
    }

    fn write(
        &self,
        method: &str,
        url: &str,
        payload: Option<&[u8]>,
        headers: Option<&HeaderMap>,
    ) -> Result<HttpResponse, HttpError> {
        let fallback = write_headers();
        self.request(method, url, payload, Some(headers.unwrap_or(&fallback)))
    }
}

fn parse_method(method: &str) -> Result<Method, HttpError> {
    let upper = method.trim().to_ascii_uppercase();
    Method::from_bytes(upper.as_bytes()).map_err(|_| HttpError::InvalidMethod(method.to_string()))
}

fn request_body<'a>(method: &Method, payload: Option<&'a [u8]>) -> Option<&'a [u8]> {
    if !BODY_METHODS.contains(method) {
        return None;
    }
    payload.filter(|body| !body.is_empty())
}

/// Every value of an overridden header name replaces the defaults for that name.
fn merge_headers(defaults: &HeaderMap, overrides: Option<&HeaderMap>) -> HeaderMap {
    let mut merged = defaults.clone();
    let Some(overrides) = overrides else {
        return merged;
    };
    for name in overrides.keys() {
        merged.remove(name);
    }
    for (name, value) in overrides {
        merged.append(name.clone(), value.clone());
    }
    merged
}

fn read_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers
}

fn write_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}
