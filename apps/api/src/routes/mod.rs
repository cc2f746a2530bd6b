pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::config::Config;
use crate::shell::handlers;

pub fn build_router(config: &Config) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/cv/render", post(handlers::handle_render))
        .route("/api/v1/cv/viewer", post(handlers::handle_viewer))
        .route(
            "/api/v1/cv/download/html",
            post(handlers::handle_download_html),
        )
        .route(
            "/api/v1/cv/download/json",
            post(handlers::handle_download_json),
        )
        .route(
            "/api/v1/cv/download/pdf",
            post(handlers::handle_download_pdf),
        )
        .layer(DefaultBodyLimit::max(config.max_cv_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, HeaderMap, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(&Config::default())
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, HeaderMap, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["service"], "ojtech-cv");
    }

    #[tokio::test]
    async fn test_render_json_payload() {
        let cv = json!({ "contactInfo": { "name": "Jane Doe" } }).to_string();
        let (status, headers, body) =
            post_json(app(), "/api/v1/cv/render", json!({ "cvHtml": cv })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(
            headers[header::CONTENT_SECURITY_POLICY],
            "sandbox allow-same-origin allow-scripts"
        );
        assert!(body.contains("<h1>Jane Doe</h1>"));
        assert!(body.contains("No skills listed"));
        assert!(!body.contains("Certifications"));
    }

    #[tokio::test]
    async fn test_render_html_passes_through() {
        let cv = "<html><body><p>Prebuilt</p></body></html>";
        let (status, _, body) =
            post_json(app(), "/api/v1/cv/render", json!({ "cvHtml": cv })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, cv);
    }

    #[tokio::test]
    async fn test_render_missing_content_is_placeholder() {
        let (status, _, body) = post_json(app(), "/api/v1/cv/render", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No Resume Content Available"));
    }

    #[tokio::test]
    async fn test_viewer_source_tab() {
        let (status, headers, body) = post_json(
            app(),
            "/api/v1/cv/viewer?tab=source",
            json!({ "cvHtml": "Plain CV", "firstName": "Jane", "lastName": "Doe" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert!(body.contains(r#"<div id="source-pane" class="pane active">"#));
        assert!(body.contains("Jane_Doe_CV.html"));
    }

    #[tokio::test]
    async fn test_download_html() {
        let (status, headers, body) = post_json(
            app(),
            "/api/v1/cv/download/html",
            json!({
                "cvHtml": "{\"contactInfo\":{\"name\":\"Jane Doe\"}}",
                "firstName": "Jane",
                "lastName": "Doe"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Jane_Doe_CV.html\"; filename*=UTF-8''Jane_Doe_CV.html"
        );
        assert!(body.contains("<h1>Jane Doe</h1>"));
    }

    #[tokio::test]
    async fn test_download_html_requires_names() {
        let (status, _, body) = post_json(
            app(),
            "/api/v1/cv/download/html",
            json!({ "cvHtml": "x", "firstName": "", "lastName": "Doe" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_download_json() {
        let resume = json!({ "contactInfo": { "name": "Jane Doe" } });
        let (status, headers, body) = post_json(
            app(),
            "/api/v1/cv/download/json",
            json!({ "resume": resume, "firstName": "Jane", "lastName": "Doe" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Jane_Doe_CV_data.json\"; filename*=UTF-8''Jane_Doe_CV_data.json"
        );
        assert_eq!(body, serde_json::to_string_pretty(&resume).unwrap());
    }

    #[tokio::test]
    async fn test_download_pdf_is_not_implemented() {
        let (status, _, body) = post_json(app(), "/api/v1/cv/download/pdf", json!({})).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["error"]["code"], "NOT_IMPLEMENTED");
        assert!(value["error"]["message"]
            .as_str()
            .unwrap()
            .contains("server-side conversion"));
    }

    #[tokio::test]
    async fn test_body_limit() {
        let config = Config {
            max_cv_bytes: 64,
            ..Config::default()
        };
        let (status, _, _) = post_json(
            build_router(&config),
            "/api/v1/cv/render",
            json!({ "cvHtml": "x".repeat(1024) }),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
