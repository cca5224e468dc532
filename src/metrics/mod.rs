/*!
 * # Metrics
 *
 * Prometheus counters for the command pipeline, exposed in text format at
 * `/metrics`.
 */

use crate::errors::ServiceError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref COMMANDS_APPLIED: IntCounterVec = register(
        IntCounterVec::new(
            Opts::new(
                "retail_commands_applied_total",
                "Total number of write commands committed"
            ),
            &["command"]
        )
        .expect("metric can be created")
    );
    pub static ref COMMANDS_REJECTED: IntCounterVec = register(
        IntCounterVec::new(
            Opts::new(
                "retail_commands_rejected_total",
                "Total number of write commands rolled back, by error code"
            ),
            &["command", "code"]
        )
        .expect("metric can be created")
    );
    pub static ref IMPORTING_REQUEST_TRANSITIONS: IntCounterVec = register(
        IntCounterVec::new(
            Opts::new(
                "retail_importing_request_transitions_total",
                "Importing requests moved out of pending, by target status"
            ),
            &["status"]
        )
        .expect("metric can be created")
    );
}

fn register(counter: IntCounterVec) -> IntCounterVec {
    if let Err(e) = REGISTRY.register(Box::new(counter.clone())) {
        tracing::warn!("Failed to register metric: {}", e);
    }
    counter
}

/// Renders every registered metric in the Prometheus text format
pub fn render() -> Result<String, ServiceError> {
    // Touch the statics so the families exist before the first command runs
    lazy_static::initialize(&COMMANDS_APPLIED);
    lazy_static::initialize(&COMMANDS_REJECTED);
    lazy_static::initialize(&IMPORTING_REQUEST_TRANSITIONS);

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&REGISTRY.gather(), &mut buffer)
        .map_err(|e| ServiceError::Other(anyhow::anyhow!("failed to encode metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| ServiceError::Other(anyhow::anyhow!("metrics are not utf-8: {}", e)))
}

pub async fn metrics_handler() -> Result<Response, ServiceError> {
    let body = render()?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, TextEncoder::new().format_type().to_string())],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_output_contains_counters() {
        COMMANDS_APPLIED.with_label_values(&["add_category"]).inc();
        COMMANDS_REJECTED
            .with_label_values(&["add_category", "DUPLICATED_CATEGORY"])
            .inc();

        let text = render().unwrap();
        assert!(text.contains("retail_commands_applied_total"));
        assert!(text.contains("DUPLICATED_CATEGORY"));
    }
}
