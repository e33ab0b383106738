//! Configuration integration tests
//!
//! Loading from YAML files and registering the configured probes.

#[cfg(test)]
mod tests {
    use healthgate::config::ProbeKind;
    use healthgate::server::builder::build_engine;
    use healthgate::{Config, HealthError, HealthStatus};
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_config(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_full_config() {
        let file = write_config(
            r#"
server:
  host: 127.0.0.1
  port: 9090
health:
  path: /status
  default_timeout_ms: 2000
  max_concurrency: 4
  query_timeout_ms: 3000
probes:
  - name: self
    kind: self
    tags: [live]
  - name: db
    kind: tcp
    address: localhost:5432
    timeout_ms: 500
  - name: api
    kind: http
    url: http://localhost:8081/ping
    expected_status: 204
    degraded_after_ms: 250
logging:
  level: debug
"#,
        );

        let config = Config::from_file(file.path()).await.unwrap();

        assert_eq!(config.server().port, 9090);
        assert_eq!(config.health().path, "/status");
        let engine_config = config.health().engine_config();
        assert_eq!(engine_config.default_timeout, Duration::from_secs(2));
        assert_eq!(engine_config.max_concurrency, 4);
        assert_eq!(engine_config.query_timeout, Some(Duration::from_secs(3)));

        let names: Vec<&str> = config.probes().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["self", "db", "api"]);
        assert_eq!(config.probes()[0].kind, ProbeKind::SelfCheck {});
        assert_eq!(
            config.probes()[2].kind,
            ProbeKind::Http {
                url: "http://localhost:8081/ping".to_string(),
                expected_status: Some(204),
            }
        );
        assert_eq!(config.logging().level, "debug");
    }

    #[tokio::test]
    async fn test_empty_file_uses_defaults() {
        let file = write_config("{}\n");

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.health().path, "/api/health");
        assert!(config.probes().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_probes_rejected_at_load() {
        let file = write_config(
            r#"
probes:
  - name: db
    kind: self
  - name: db
    kind: self
"#,
        );

        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, HealthError::Config(_)));
        assert!(err.to_string().contains("Duplicate probe name"));
    }

    #[tokio::test]
    async fn test_unknown_probe_kind_rejected() {
        let file = write_config(
            r#"
probes:
  - name: queue
    kind: amqp
"#,
        );

        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let err = Config::from_file("/nonexistent/healthgate.yaml")
            .await
            .unwrap_err();
        assert!(matches!(err, HealthError::Config(_)));
    }

    #[tokio::test]
    async fn test_configured_self_probe_runs() {
        let file = write_config(
            r#"
probes:
  - name: self
    kind: self
"#,
        );
        let config = Config::from_file(file.path()).await.unwrap();
        let engine = build_engine(&config, Vec::new()).unwrap();

        let report = engine.check_all().await;
        assert_eq!(report.overall_status(), HealthStatus::Healthy);
        let entry = report.entry("self").unwrap();
        assert!(entry.data.contains_key("uptime_seconds"));
    }

    #[test]
    fn test_yaml_round_trip_keeps_probe_order() {
        let mut config = Config::default();
        config.gateway.probes = serde_yaml::from_str(
            r#"
- name: b
  kind: self
- name: a
  kind: tcp
  address: 127.0.0.1:6379
"#,
        )
        .unwrap();

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.find("name: b").unwrap() < yaml.find("name: a").unwrap());
    }
}
