use super::*;

#[test]
fn none_exporter_is_not_active() {
    assert!(!OtelExporter::None.is_active());
}

#[test]
fn otlp_http_exporter_is_active() {
    let exporter = OtelExporter::OtlpHttp {
        endpoint: "http://localhost:4318".to_string(),
        headers: HashMap::new(),
        protocol: OtelHttpProtocol::Binary,
        tls: None,
    };
    assert!(exporter.is_active());
}

#[test]
fn settings_report_any_exporter_active() {
    let mut settings = OtelSettings {
        environment: "development".to_string(),
        service_name: "tessera".to_string(),
        service_version: "0.0.0".to_string(),
        home_dir: PathBuf::from("/home/user/.tessera"),
        exporter: OtelExporter::None,
        trace_exporter: OtelExporter::None,
        metrics_exporter: OtelExporter::None,
    };
    assert!(!settings.any_exporter_active());

    settings.trace_exporter = OtelExporter::OtlpGrpc {
        endpoint: "http://localhost:4317".to_string(),
        headers: HashMap::new(),
        tls: None,
    };
    assert!(settings.any_exporter_active());
}
