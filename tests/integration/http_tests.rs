//! HTTP endpoint integration tests
//!
//! Builds the app the way the server does and exercises it in-process.

#[cfg(test)]
mod tests {
    use crate::common::ProbeFactory;
    use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
    use actix_web::{App, test as actix_test, web};
    use healthgate::config::{ProbeConfig, ProbeKind};
    use healthgate::server::builder::build_engine;
    use healthgate::server::server::HttpServer;
    use healthgate::server::state::AppState;
    use healthgate::{Config, HealthStatus, ProbeRegistration};
    use std::time::Duration;
    use tokio::net::TcpListener;

    fn app_state(config: Config, extra: Vec<ProbeRegistration>) -> web::Data<AppState> {
        let engine = build_engine(&config, extra).unwrap();
        web::Data::new(AppState::new(config, engine))
    }

    #[actix_web::test]
    async fn test_healthy_response_shape() {
        let state = app_state(
            Config::default(),
            vec![ProbeFactory::fixed("self", HealthStatus::Healthy)],
        );
        let app = actix_test::init_service(
            App::new().configure(|cfg| HttpServer::configure_app(cfg, state)),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/api/health").to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 200);
        assert_eq!(
            resp.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            resp.headers().get(CACHE_CONTROL).unwrap(),
            "no-store, no-cache"
        );

        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["status"], "Healthy");
        let entry = &body["entries"][0];
        assert_eq!(entry["name"], "self");
        assert_eq!(entry["status"], "Healthy");
        assert!(entry["duration"].as_str().unwrap().starts_with("00:00:"));
        assert!(entry["data"].is_object());
    }

    #[actix_web::test]
    async fn test_unhealthy_probe_returns_service_unavailable() {
        let state = app_state(
            Config::default(),
            vec![
                ProbeFactory::fixed("self", HealthStatus::Healthy),
                ProbeFactory::failing("db", "connection refused"),
            ],
        );
        let app = actix_test::init_service(
            App::new().configure(|cfg| HttpServer::configure_app(cfg, state)),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/api/health").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 503);

        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["status"], "Unhealthy");
        assert_eq!(body["entries"][1]["description"], "connection refused");
    }

    #[actix_web::test]
    async fn test_timed_out_probe_in_response() {
        let state = app_state(
            Config::default(),
            vec![ProbeFactory::hanging("stuck").with_timeout(Duration::from_millis(50))],
        );
        let app = actix_test::init_service(
            App::new().configure(|cfg| HttpServer::configure_app(cfg, state)),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/api/health").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 503);

        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["entries"][0]["description"], "timed out");
    }

    #[actix_web::test]
    async fn test_custom_path_from_config() {
        let mut config = Config::default();
        config.gateway.health.path = "/healthz".to_string();
        let state = app_state(config, vec![]);
        let app = actix_test::init_service(
            App::new().configure(|cfg| HttpServer::configure_app(cfg, state)),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/healthz").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let req = actix_test::TestRequest::get().uri("/api/health").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);
    }

    #[actix_web::test]
    async fn test_configured_tcp_probe() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let mut config = Config::default();
        config.gateway.probes.push(ProbeConfig {
            name: "upstream".to_string(),
            kind: ProbeKind::Tcp { address },
            timeout_ms: Some(1000),
            tags: vec!["ready".to_string()],
            degraded_after_ms: None,
        });
        let state = app_state(config, vec![]);
        let app = actix_test::init_service(
            App::new().configure(|cfg| HttpServer::configure_app(cfg, state)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/api/health?tags=ready")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["entries"][0]["name"], "upstream");
        assert_eq!(body["entries"][0]["status"], "Healthy");
        drop(listener);
    }

    #[actix_web::test]
    async fn test_repeated_tags_parameter() {
        let state = app_state(
            Config::default(),
            vec![
                ProbeFactory::fixed("self", HealthStatus::Healthy).with_tags(["live"]),
                ProbeFactory::fixed("db", HealthStatus::Healthy).with_tags(["ready"]),
                ProbeFactory::failing("batch", "queue stalled").with_tags(["jobs"]),
            ],
        );
        let app = actix_test::init_service(
            App::new().configure(|cfg| HttpServer::configure_app(cfg, state)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/api/health?tags=live&tags=ready")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        let names: Vec<&str> = body["entries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["self", "db"]);
    }

    #[actix_web::test]
    async fn test_malformed_query_still_reports() {
        let state = app_state(
            Config::default(),
            vec![ProbeFactory::fixed("self", HealthStatus::Healthy)],
        );
        let app = actix_test::init_service(
            App::new().configure(|cfg| HttpServer::configure_app(cfg, state)),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/api/health?tags&=&&tags=,%20")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["entries"][0]["name"], "self");
    }

    #[actix_web::test]
    async fn test_post_is_not_allowed() {
        let state = app_state(Config::default(), vec![]);
        let app = actix_test::init_service(
            App::new().configure(|cfg| HttpServer::configure_app(cfg, state)),
        )
        .await;

        let req = actix_test::TestRequest::post().uri("/api/health").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());
    }
}
