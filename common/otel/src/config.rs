//! Settings consumed by [`crate::OtelManager`] to decide whether, and where,
//! to export telemetry.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

/// Transport used for an OTLP HTTP exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OtelHttpProtocol {
    /// `application/x-protobuf`.
    Binary,
    /// `application/json`.
    Json,
}

/// TLS material for an OTLP exporter connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtelTlsConfig {
    pub ca_cert_path: Option<PathBuf>,
    pub client_cert_path: Option<PathBuf>,
    pub client_key_path: Option<PathBuf>,
}

/// Where a telemetry signal (traces or metrics) is exported to, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OtelExporter {
    /// Telemetry is recorded locally (as tracing events) but not exported.
    None,
    /// Export over OTLP/HTTP.
    OtlpHttp {
        endpoint: String,
        headers: HashMap<String, String>,
        protocol: OtelHttpProtocol,
        tls: Option<OtelTlsConfig>,
    },
    /// Export over OTLP/gRPC.
    OtlpGrpc {
        endpoint: String,
        headers: HashMap<String, String>,
        tls: Option<OtelTlsConfig>,
    },
}

impl Default for OtelExporter {
    fn default() -> Self {
        OtelExporter::None
    }
}

impl OtelExporter {
    /// Whether this exporter actually ships telemetry anywhere.
    pub fn is_active(&self) -> bool {
        !matches!(self, OtelExporter::None)
    }
}

/// Resolved OpenTelemetry configuration for one process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtelSettings {
    pub environment: String,
    pub service_name: String,
    pub service_version: String,
    pub home_dir: PathBuf,
    pub exporter: OtelExporter,
    pub trace_exporter: OtelExporter,
    pub metrics_exporter: OtelExporter,
}

impl OtelSettings {
    /// Whether any of the three signal exporters is active.
    pub fn any_exporter_active(&self) -> bool {
        self.exporter.is_active() || self.trace_exporter.is_active() || self.metrics_exporter.is_active()
    }
}

#[cfg(test)]
#[path = "config.test.rs"]
mod tests;
