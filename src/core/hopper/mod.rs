// ─── Crash Report Service ───
// Message model of the crash-report endpoint. The HTTP transport is supplied by
// the host through `ReportTransport`.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sysinfo::System;
use tracing::{debug, warn};

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::version::arch_bits;

pub const ROUTE_SUBMIT: &str = "http://hopper.minecraft.net/crashes/submit_report/";
pub const ROUTE_PUBLISH: &str = "http://hopper.minecraft.net/crashes/publish_report/";

/// Posts a JSON body and returns the raw response body.
#[async_trait]
pub trait ReportTransport: Send + Sync {
    async fn post_json(&self, url: &str, body: String) -> LauncherResult<String>;
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest {
    pub report: String,
    pub version: String,
    pub product: String,
    pub environment: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublishRequest {
    pub token: String,
    pub report_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    pub id: i64,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub token: Option<String>,
}

impl Report {
    pub fn can_be_published(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Crash {
    pub id: i64,
    #[serde(default)]
    pub jira_issue: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Problem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub report: Option<Report>,
    #[serde(default)]
    pub crash: Option<Crash>,
    #[serde(default)]
    pub problem: Option<Problem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub report: Option<Report>,
    #[serde(default)]
    pub crash: Option<Crash>,
}

/// Responses that may carry an error message from the service.
pub trait ServiceResponse {
    fn error(&self) -> Option<&str>;
}

impl ServiceResponse for SubmitResponse {
    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl ServiceResponse for PublishResponse {
    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Decode a response body. A `null` body yields `None`; a body carrying an
/// `error` becomes `LauncherError::Remote`.
pub fn decode_response<T>(body: &str) -> LauncherResult<Option<T>>
where
    T: DeserializeOwned + ServiceResponse,
{
    let response: Option<T> = serde_json::from_str(body)?;
    match response {
        Some(resp) => match resp.error() {
            Some(error) => {
                warn!("Crash report service returned an error: {}", error);
                Err(LauncherError::Remote(error.to_string()))
            }
            None => Ok(Some(resp)),
        },
        None => Ok(None),
    }
}

/// Platform facts attached to every submitted report.
pub fn platform_environment() -> HashMap<String, String> {
    let mut environment = HashMap::new();
    if let Some(name) = System::name() {
        environment.insert("os.name".to_string(), name);
    }
    if let Some(version) = System::os_version() {
        environment.insert("os.version".to_string(), version);
    }
    environment.insert("os.arch".to_string(), std::env::consts::ARCH.to_string());
    environment.insert("arch.data.model".to_string(), arch_bits().to_string());
    environment
}

pub struct HopperService<T: ReportTransport> {
    transport: T,
}

impl<T: ReportTransport> HopperService<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Submit a crash report. Caller-supplied environment entries are
    /// overridden by the detected platform facts.
    pub async fn submit_report(
        &self,
        report: &str,
        product: &str,
        version: &str,
        env: Option<HashMap<String, String>>,
    ) -> LauncherResult<Option<SubmitResponse>> {
        let mut environment = env.unwrap_or_default();
        environment.extend(platform_environment());

        let request = SubmitRequest {
            report: report.to_string(),
            version: version.to_string(),
            product: product.to_string(),
            environment,
        };
        self.make_request(ROUTE_SUBMIT, &request).await
    }

    pub async fn publish_report(&self, report: &Report) -> LauncherResult<Option<PublishResponse>> {
        let token = report.token.clone().ok_or_else(|| {
            LauncherError::InvalidArgument(format!("report {} has no publish token", report.id))
        })?;
        let request = PublishRequest {
            token,
            report_id: report.id,
        };
        self.make_request(ROUTE_PUBLISH, &request).await
    }

    async fn make_request<Req, Resp>(&self, url: &str, request: &Req) -> LauncherResult<Option<Resp>>
    where
        Req: Serialize,
        Resp: DeserializeOwned + ServiceResponse,
    {
        let body = serde_json::to_string(request)?;
        debug!("POST {}", url);
        let raw = self.transport.post_json(url, body).await?;
        decode_response(&raw)
    }
}
