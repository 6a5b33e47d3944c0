use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::models::{ChatReply, ChatRequest, ComprehensiveStats, FilterOptions, Location, Report};

pub type ClientResult<T> = Result<T, ClientError>;

const GENERIC_FAILURE: &str = "Request failed";

/// Stateless gateway over the grievance backend. Cloning shares the
/// underlying connection pool and config.
#[derive(Clone)]
pub struct GrievanceClient {
    inner: reqwest::Client,
    config: Arc<AppConfig>,
}

impl PartialEq for GrievanceClient {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.config, &other.config)
    }
}

impl GrievanceClient {
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> Arc<AppConfig> {
        Arc::clone(&self.config)
    }

    pub async fn list_reports(&self) -> ClientResult<Vec<Report>> {
        let builder = self.request(Method::GET, "reports");
        let data = self.send_enveloped(builder).await?;
        Ok(decode_list(data, "reports"))
    }

    pub async fn get_report_stats(&self) -> ClientResult<ComprehensiveStats> {
        let builder = self.request(Method::GET, "reports/stats");
        let data = self.send_enveloped(builder).await?;
        decode_payload(data)
    }

    pub async fn get_locations(&self, query: &LocationQuery) -> ClientResult<Vec<Location>> {
        let builder = self.locations_request(query);
        let data = self.send_enveloped(builder).await?;
        Ok(decode_list(data, "locations"))
    }

    pub async fn get_filter_options(&self) -> ClientResult<FilterOptions> {
        let builder = self.request(Method::GET, "filter-options");
        let data = self.send_enveloped(builder).await?;
        decode_payload(data)
    }

    pub async fn get_report(&self, report_id: &str) -> ClientResult<Report> {
        let builder = self.report_request(report_id);
        let data = self.send_enveloped(builder).await?;
        decode_payload(data)
    }

    /// Resolves to `false` on any failure; never surfaces an error.
    pub async fn check_health(&self) -> bool {
        match self.inner.get(self.config.health_url()).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!("health probe failed: {err}");
                false
            }
        }
    }

    pub async fn send_chat_message(&self, payload: &ChatRequest) -> ClientResult<ChatReply> {
        let builder = self.chat_request(payload);
        let bytes = self.send_raw(builder).await?;
        serde_json::from_slice(&bytes).map_err(ClientError::from)
    }

    pub async fn get_chat_stats(&self) -> ClientResult<Value> {
        let builder = self.request(Method::GET, "chatbot/stats");
        let bytes = self.send_raw(builder).await?;
        serde_json::from_slice(&bytes).map_err(ClientError::from)
    }

    fn locations_request(&self, query: &LocationQuery) -> reqwest::RequestBuilder {
        let mut builder = self.request(Method::GET, "reports/by-location");
        if !query.is_empty() {
            builder = builder.query(query);
        }
        builder
    }

    /// The id travels as a single escaped path segment, so `/` or `?` inside
    /// it cannot reshape the request.
    fn report_request(&self, report_id: &str) -> reqwest::RequestBuilder {
        let base = self.join_path("reports");
        match reqwest::Url::parse(&base) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push(report_id);
                }
                self.inner.request(Method::GET, url)
            }
            // Surfaces as a transport error on send.
            Err(_) => self.inner.request(Method::GET, base),
        }
    }

    fn chat_request(&self, payload: &ChatRequest) -> reqwest::RequestBuilder {
        self.request(Method::POST, "chatbot/message").json(payload)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.inner.request(method, self.join_path(path))
    }

    fn join_path(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url(), path.trim_start_matches('/'))
    }

    async fn send_raw(&self, builder: reqwest::RequestBuilder) -> ClientResult<Vec<u8>> {
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            Ok(bytes.to_vec())
        } else {
            Err(rejection_from_body(status, &bytes))
        }
    }

    async fn send_enveloped(&self, builder: reqwest::RequestBuilder) -> ClientResult<Value> {
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        decode_envelope(status, &bytes)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Optional `/reports/by-location` constraints. Unset dimensions are omitted
/// from the query string entirely.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct LocationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl LocationQuery {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.priority.is_none()
            && self.department.is_none()
            && self.status.is_none()
    }

    #[cfg(test)]
    pub fn get(&self, dimension: crate::models::FilterDimension) -> Option<&str> {
        use crate::models::FilterDimension;
        match dimension {
            FilterDimension::Category => self.category.as_deref(),
            FilterDimension::Priority => self.priority.as_deref(),
            FilterDimension::Department => self.department.as_deref(),
            FilterDimension::Status => self.status.as_deref(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
    #[error("empty response body: {0}")]
    EmptyResponse(StatusCode),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(err) => err.status(),
            Self::Rejected { status, .. } => Some(*status),
            Self::EmptyResponse(status) => Some(*status),
            Self::Decode(_) => None,
        }
    }

    /// The one message views show, whatever went wrong underneath.
    pub fn display_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Rejected { status, .. } | Self::EmptyResponse(status) => {
                format!("{GENERIC_FAILURE} (HTTP {})", status.as_u16())
            }
            Self::Transport(err) => match err.status() {
                Some(status) => format!("{GENERIC_FAILURE} (HTTP {})", status.as_u16()),
                None => GENERIC_FAILURE.to_string(),
            },
            Self::Decode(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Unwraps `{success, data, error}`. Both non-2xx statuses and
/// `success: false` become [`ClientError::Rejected`].
pub fn decode_envelope(status: StatusCode, bytes: &[u8]) -> ClientResult<Value> {
    if bytes.is_empty() {
        return Err(if status.is_success() {
            ClientError::EmptyResponse(status)
        } else {
            ClientError::Rejected {
                status,
                message: String::new(),
            }
        });
    }

    if !status.is_success() {
        return Err(rejection_from_body(status, bytes));
    }

    let envelope: ApiEnvelope<Value> = serde_json::from_slice(bytes)?;
    if envelope.success {
        Ok(envelope.data.unwrap_or(Value::Null))
    } else {
        Err(ClientError::Rejected {
            status,
            message: envelope.error.unwrap_or_default(),
        })
    }
}

fn rejection_from_body(status: StatusCode, bytes: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<Value>(bytes)
        .ok()
        .and_then(|body| {
            body.get("error")
                .or_else(|| body.get("detail"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_default();
    ClientError::Rejected { status, message }
}

fn decode_payload<T: DeserializeOwned>(data: Value) -> ClientResult<T> {
    serde_json::from_value(data).map_err(ClientError::from)
}

/// Lenient list decoding: a non-array payload becomes an empty list and
/// malformed elements are skipped.
pub fn decode_list<T: DeserializeOwned>(data: Value, what: &str) -> Vec<T> {
    let Value::Array(items) = data else {
        if !data.is_null() {
            warn!("expected an array of {what}, got something else; treating as empty");
        }
        return Vec::new();
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!("skipping malformed {what} entry: {err}");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        warn!("dropped {} malformed {what} entries", total - decoded.len());
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatTurn, Sender};
    use serde_json::json;

    fn client() -> GrievanceClient {
        GrievanceClient::new(AppConfig::default())
    }

    #[test]
    fn unfiltered_location_request_has_no_query() {
        let request = client()
            .locations_request(&LocationQuery::default())
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8000/api/reports/by-location"
        );
        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn location_request_carries_only_set_dimensions() {
        let query = LocationQuery {
            category: Some("water_sanitation".into()),
            status: Some("in_progress".into()),
            ..LocationQuery::default()
        };
        let request = client().locations_request(&query).build().unwrap();
        let pairs: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("category".to_string(), "water_sanitation".to_string()),
                ("status".to_string(), "in_progress".to_string()),
            ]
        );
    }

    #[test]
    fn department_values_are_url_encoded() {
        let query = LocationQuery {
            department: Some("Water & Sanitation Department".into()),
            ..LocationQuery::default()
        };
        let request = client().locations_request(&query).build().unwrap();
        let value = request
            .url()
            .query_pairs()
            .find(|(k, _)| k == "department")
            .map(|(_, v)| v.into_owned());
        assert_eq!(value.as_deref(), Some("Water & Sanitation Department"));
    }

    #[test]
    fn chat_request_posts_message_and_history() {
        let payload = ChatRequest {
            message: "latest complaints".into(),
            chat_history: vec![ChatTurn {
                sender: Sender::Assistant,
                text: "Hi".into(),
            }],
        };
        let request = client().chat_request(&payload).build().unwrap();
        assert_eq!(request.method(), Method::POST);
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8000/api/chatbot/message"
        );
        let body: Value =
            serde_json::from_slice(request.body().and_then(|b| b.as_bytes()).unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "message": "latest complaints",
                "chat_history": [{"sender": "bot", "text": "Hi"}]
            })
        );
    }

    #[test]
    fn report_detail_path_includes_id() {
        let request = client().report_request("abc-123").build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8000/api/reports/abc-123"
        );
    }

    #[test]
    fn report_id_is_escaped_as_one_segment() {
        let request = client().report_request("a/b?c#d").build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8000/api/reports/a%2Fb%3Fc%23d"
        );
        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn envelope_success_yields_data() {
        let data = decode_envelope(StatusCode::OK, br#"{"success":true,"data":[1,2]}"#).unwrap();
        assert_eq!(data, json!([1, 2]));
    }

    #[test]
    fn envelope_failure_surfaces_error_text() {
        let err = decode_envelope(StatusCode::OK, br#"{"success":false,"error":"db down"}"#)
            .unwrap_err();
        assert_eq!(err.display_message(), "db down");
        assert_eq!(err.status(), Some(StatusCode::OK));
    }

    #[test]
    fn non_success_status_uses_detail_or_generic_message() {
        let err = decode_envelope(StatusCode::NOT_FOUND, br#"{"detail":"Report not found"}"#)
            .unwrap_err();
        assert_eq!(err.display_message(), "Report not found");

        let err = decode_envelope(StatusCode::BAD_GATEWAY, b"<html>").unwrap_err();
        assert_eq!(err.display_message(), "Request failed (HTTP 502)");
    }

    #[test]
    fn empty_success_body_is_an_error() {
        let err = decode_envelope(StatusCode::OK, b"").unwrap_err();
        assert!(matches!(err, ClientError::EmptyResponse(StatusCode::OK)));
    }

    #[test]
    fn non_array_list_payload_becomes_empty() {
        let reports: Vec<Report> = decode_list(json!({"unexpected": true}), "reports");
        assert!(reports.is_empty());
        let reports: Vec<Report> = decode_list(Value::Null, "reports");
        assert!(reports.is_empty());
    }

    #[test]
    fn malformed_list_entries_are_skipped() {
        let reports: Vec<Report> = decode_list(
            json!([
                {"report_id": "r1", "priority": "low", "status": "submitted"},
                {"priority": "low"},
                {"report_id": "r3", "priority": "critical"}
            ]),
            "reports",
        );
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].report_id, "r1");
    }

    #[tokio::test]
    async fn health_probe_reports_false_when_unreachable() {
        let client = GrievanceClient::new(AppConfig {
            api_base_url: "http://127.0.0.1:9/api".into(),
            ..AppConfig::default()
        });
        assert!(!client.check_health().await);
    }
}
