//! Telemetry for the agent runtime.
//!
//! This crate owns two things: [`config`] — the settings that decide whether
//! telemetry is exported anywhere — and [`OtelManager`], the sink tool
//! execution reports permission decisions to. Export wiring (OTLP over HTTP
//! or gRPC) is initialized once per process via [`install`]; everything else
//! goes through `tracing` and is picked up by whatever layer `install`
//! registered.

pub mod config;

use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::SpanExporter;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::SdkTracerProvider;

use crate::config::OtelExporter;
use crate::config::OtelSettings;

/// Where a permission/approval decision for a tool call came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolDecisionSource {
    /// Resolved by the static permission ruleset, with no user prompt.
    Config,
    /// Resolved by an interactive approval prompt.
    User,
}

impl ToolDecisionSource {
    fn as_str(self) -> &'static str {
        match self {
            ToolDecisionSource::Config => "config",
            ToolDecisionSource::User => "user",
        }
    }
}

/// Reports structured telemetry events from the tool pipeline.
///
/// Cheap to clone-by-reference (callers hold it behind an `Arc`); recording
/// an event never blocks on the network, it only emits a `tracing` event.
#[derive(Debug)]
pub struct OtelManager {
    settings: OtelSettings,
}

impl OtelManager {
    /// Build a manager from resolved settings.
    pub fn new(settings: OtelSettings) -> Self {
        Self { settings }
    }

    /// A manager that records nothing but still satisfies the interface.
    pub fn disabled() -> Self {
        Self::new(OtelSettings::default())
    }

    /// The settings this manager was built from.
    pub fn settings(&self) -> &OtelSettings {
        &self.settings
    }

    /// Record a permission/approval decision for a tool call.
    pub fn tool_decision(
        &self,
        tool_name: &str,
        call_id: &str,
        decision: &str,
        source: ToolDecisionSource,
    ) {
        tracing::info!(
            target: "tessera_otel::tool_decision",
            tool = %tool_name,
            call_id = %call_id,
            decision = %decision,
            source = %source.as_str(),
            "tool decision"
        );
    }
}

impl std::fmt::Display for ToolDecisionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle returned by [`install`]; dropping it flushes and shuts down the
/// exporter pipeline.
pub struct OtelGuard {
    provider: Option<SdkTracerProvider>,
}

impl Drop for OtelGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(err) = provider.shutdown() {
                tracing::warn!(error = %err, "failed to shut down OTel tracer provider");
            }
        }
    }
}

/// Initialize the trace exporter pipeline described by `settings`, if any.
///
/// When `settings.trace_exporter` is [`OtelExporter::None`], this only
/// constructs a no-op guard; no network resources are created.
pub fn install(settings: &OtelSettings) -> Result<OtelGuard, OtelError> {
    let endpoint = match &settings.trace_exporter {
        OtelExporter::None => return Ok(OtelGuard { provider: None }),
        OtelExporter::OtlpHttp { endpoint, .. } | OtelExporter::OtlpGrpc { endpoint, .. } => {
            endpoint.clone()
        }
    };

    let exporter = SpanExporter::builder()
        .with_http()
        .with_endpoint(endpoint)
        .build()
        .map_err(|source| OtelError::ExporterInit {
            message: source.to_string(),
        })?;

    let resource = Resource::builder()
        .with_service_name(settings.service_name.clone())
        .with_attributes(vec![
            KeyValue::new("service.version", settings.service_version.clone()),
            KeyValue::new("deployment.environment", settings.environment.clone()),
        ])
        .build();

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build();

    let _tracer = provider.tracer(settings.service_name.clone());

    Ok(OtelGuard {
        provider: Some(provider),
    })
}

/// Errors from initializing the telemetry export pipeline.
#[derive(Debug, thiserror::Error)]
pub enum OtelError {
    #[error("failed to initialize OTel exporter: {message}")]
    ExporterInit { message: String },
}

#[cfg(test)]
#[path = "lib.test.rs"]
mod tests;
