//! Alpaca HTTP Client

use crate::{AlpacaDevice, AlpacaDeviceType};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::trace;

/// Client ID for Alpaca API calls (thread-safe)
static CLIENT_ID: AtomicU32 = AtomicU32::new(1);
static TRANSACTION_ID: AtomicU32 = AtomicU32::new(0);

/// Alpaca-specific error types
#[derive(Debug, Error)]
pub enum AlpacaError {
    #[error("Connection timeout after {duration_ms}ms during {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    #[error("Connection refused: {url} - {cause}")]
    ConnectionRefused {
        url: String,
        cause: String,
    },

    #[error("HTTP error {status}: {message}")]
    HttpError { status: u16, message: String },

    #[error("Device error {code}: {message}")]
    DeviceError { code: i32, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

impl AlpacaError {
    /// Create a timeout error with operation context
    pub fn timeout(operation: impl Into<String>, duration_ms: u64) -> Self {
        AlpacaError::Timeout {
            operation: operation.into(),
            duration_ms,
        }
    }

    /// Create a connection refused error
    pub fn connection_refused(url: impl Into<String>, cause: impl Into<String>) -> Self {
        AlpacaError::ConnectionRefused {
            url: url.into(),
            cause: cause.into(),
        }
    }

    /// ASCOM error number reported by the device, if this is a device error
    pub fn device_error_code(&self) -> Option<i32> {
        match self {
            AlpacaError::DeviceError { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AlpacaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            let url = err.url()
                .map(|u| u.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            AlpacaError::ConnectionRefused {
                url,
                cause: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            AlpacaError::HttpError {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            AlpacaError::ParseError(err.to_string())
        } else {
            AlpacaError::RequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AlpacaError {
    fn from(err: serde_json::Error) -> Self {
        AlpacaError::ParseError(err.to_string())
    }
}

pub fn get_client_transaction() -> (u32, u32) {
    let client_id = CLIENT_ID.load(Ordering::SeqCst);
    let transaction_id = TRANSACTION_ID.fetch_add(1, Ordering::SeqCst);
    (client_id, transaction_id)
}

/// Get the current client ID
pub fn get_client_id() -> u32 {
    CLIENT_ID.load(Ordering::SeqCst)
}

/// Set the client ID
pub fn set_client_id(id: u32) {
    CLIENT_ID.store(id, Ordering::SeqCst);
}

/// Timeouts applied by the HTTP layer.
///
/// Property reads and writes use `request_ms`; method calls, which may block
/// on the device for the whole of a slew or an exposure, use `long_operation_ms`.
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    pub connect_ms: u64,
    pub request_ms: u64,
    pub long_operation_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: 10_000,
            request_ms: 30_000,
            long_operation_ms: 600_000,
        }
    }
}

/// Alpaca API response wrapper
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlpacaResponse {
    #[serde(default)]
    pub value: Value,
    #[serde(rename = "ClientTransactionID", default)]
    pub client_transaction_id: u32,
    #[serde(rename = "ServerTransactionID", default)]
    pub server_transaction_id: u32,
    #[serde(default)]
    pub error_number: i32,
    #[serde(default)]
    pub error_message: String,
}

impl AlpacaResponse {
    /// Split the envelope into its value or the device error it reports
    pub fn into_result(self) -> Result<Value, AlpacaError> {
        if self.error_number != 0 {
            return Err(AlpacaError::DeviceError {
                code: self.error_number,
                message: self.error_message,
            });
        }
        Ok(self.value)
    }
}

/// Render a parameter value the way Alpaca servers expect it on the wire
pub fn param_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Alpaca client bound to one device on one server.
///
/// Each call is a single HTTP request: no retries, so the device's own
/// failure behaviour reaches the caller unchanged.
#[derive(Debug, Clone)]
pub struct AlpacaClient {
    http_client: Client,
    base_url: String,
    device_type: AlpacaDeviceType,
    device_number: u32,
    timeout_config: TimeoutConfig,
}

impl AlpacaClient {
    /// Create a new Alpaca client for a device with default configuration
    pub fn new(device: &AlpacaDevice) -> Result<Self, AlpacaError> {
        Self::with_config(device, TimeoutConfig::default())
    }

    /// Create a new Alpaca client with custom timeouts
    pub fn with_config(device: &AlpacaDevice, timeout_config: TimeoutConfig) -> Result<Self, AlpacaError> {
        let http_client = Client::builder()
            .timeout(Duration::from_millis(timeout_config.request_ms))
            .connect_timeout(Duration::from_millis(timeout_config.connect_ms))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AlpacaError::RequestFailed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: device.base_url(),
            device_type: device.device_type,
            device_number: device.device_number,
            timeout_config,
        })
    }

    /// Get the base URL for this client
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn device_type(&self) -> AlpacaDeviceType {
        self.device_type
    }

    /// Get the device number for this client
    pub fn device_number(&self) -> u32 {
        self.device_number
    }

    /// Get the timeout configuration
    pub fn timeout_config(&self) -> &TimeoutConfig {
        &self.timeout_config
    }

    /// Build the URL for a member; Alpaca endpoints are lower-cased member names
    pub fn build_url(&self, member: &str) -> String {
        format!(
            "{}/api/v{}/{}/{}/{}",
            self.base_url,
            crate::ALPACA_API_VERSION,
            self.device_type.as_str(),
            self.device_number,
            member.to_lowercase()
        )
    }

    /// Read a property, or call a read-only method, with query parameters
    pub async fn get(&self, member: &str, params: &[(&str, Value)]) -> Result<Value, AlpacaError> {
        let (client_id, transaction_id) = get_client_transaction();
        let mut query: Vec<(String, String)> = vec![
            ("ClientID".to_string(), client_id.to_string()),
            ("ClientTransactionID".to_string(), transaction_id.to_string()),
        ];
        query.extend(params.iter().map(|(k, v)| (k.to_string(), param_string(v))));

        trace!("GET {} {:?}", member, params);
        let request = self.http_client.get(self.build_url(member)).query(&query);
        self.send(member, request, self.timeout_config.request_ms).await
    }

    /// Write a property with form parameters
    pub async fn put(&self, member: &str, params: &[(&str, Value)]) -> Result<Value, AlpacaError> {
        self.put_with_timeout(member, params, self.timeout_config.request_ms).await
    }

    /// Call a method that may block on the device for a long time
    pub async fn put_long(&self, member: &str, params: &[(&str, Value)]) -> Result<Value, AlpacaError> {
        self.put_with_timeout(member, params, self.timeout_config.long_operation_ms).await
    }

    async fn put_with_timeout(
        &self,
        member: &str,
        params: &[(&str, Value)],
        timeout_ms: u64,
    ) -> Result<Value, AlpacaError> {
        let (client_id, transaction_id) = get_client_transaction();
        let mut form: Vec<(String, String)> = vec![
            ("ClientID".to_string(), client_id.to_string()),
            ("ClientTransactionID".to_string(), transaction_id.to_string()),
        ];
        form.extend(params.iter().map(|(k, v)| (k.to_string(), param_string(v))));

        trace!("PUT {} {:?}", member, params);
        let request = self.http_client
            .put(self.build_url(member))
            .timeout(Duration::from_millis(timeout_ms))
            .form(&form);
        self.send(member, request, timeout_ms).await
    }

    async fn send(&self, member: &str, request: RequestBuilder, timeout_ms: u64) -> Result<Value, AlpacaError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AlpacaError::timeout(member, timeout_ms)
            } else {
                e.into()
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AlpacaError::HttpError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let envelope: AlpacaResponse = serde_json::from_str(&body)?;
        envelope.into_result()
    }
}
