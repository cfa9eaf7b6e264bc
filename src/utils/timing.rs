use std::time::Instant;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use tracing::info;

pub const TIMING_TARGET: &str = "ownshot.timing";

/// Received/completed timing events for one API operation.
#[derive(Debug)]
pub struct RequestTimer {
    operation: &'static str,
    domain: Option<String>,
    started_at: DateTime<Utc>,
    started_perf: Instant,
    status: &'static str,
    detail: Option<String>,
    completed: bool,
}

impl RequestTimer {
    pub fn start(operation: &'static str) -> Self {
        let timer = RequestTimer {
            operation,
            domain: None,
            started_at: Utc::now(),
            started_perf: Instant::now(),
            status: "success",
            detail: None,
            completed: false,
        };
        info!(
            target: TIMING_TARGET,
            "event=request_received operation={} received_at={}",
            timer.operation,
            timer.started_at.to_rfc3339()
        );
        timer
    }

    pub fn set_domain(&mut self, domain: impl Into<String>) {
        self.domain = Some(domain.into());
    }

    pub fn complete(&mut self, status: &'static str, detail: Option<String>) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.status = status;
        self.detail = detail;
        let completed_at = Utc::now();
        let duration = self.started_perf.elapsed().as_secs_f64();
        info!(
            target: TIMING_TARGET,
            "event=request_completed operation={} domain={} started_at={} completed_at={} duration_s={:.3} status={} detail={}",
            self.operation,
            self.domain.as_deref().unwrap_or("-"),
            self.started_at.to_rfc3339(),
            completed_at.to_rfc3339(),
            duration,
            self.status,
            self.detail.as_deref().unwrap_or_default()
        );
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        if !self.completed {
            self.complete("aborted", None);
        }
    }
}

pub async fn log_llm_timing<T, F, Fut>(
    provider: &str,
    model: &str,
    operation: &str,
    metadata: Option<JsonValue>,
    call: F,
) -> Result<T, anyhow::Error>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, anyhow::Error>>,
{
    let started_at = Utc::now();
    let started_perf = Instant::now();
    let metadata_text = metadata
        .as_ref()
        .map(|value| value.to_string())
        .unwrap_or_else(|| "{}".to_string());
    info!(
        target: TIMING_TARGET,
        "event=llm_request provider={} model={} operation={} started_at={} metadata={}",
        provider,
        model,
        operation,
        started_at.to_rfc3339(),
        metadata_text
    );

    let result = call().await;
    let status = if result.is_ok() { "success" } else { "error" };

    let completed_at = Utc::now();
    let duration = started_perf.elapsed().as_secs_f64();
    info!(
        target: TIMING_TARGET,
        "event=llm_response provider={} model={} operation={} completed_at={} duration_s={:.3} status={} metadata={}",
        provider,
        model,
        operation,
        completed_at.to_rfc3339(),
        duration,
        status,
        metadata_text
    );

    result
}
