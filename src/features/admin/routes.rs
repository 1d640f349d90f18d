use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Admin application and dashboard routes, mounted under `/api/admin`
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/applications", get(handlers::list_applications))
        .route("/applications/export", get(handlers::export_applications))
        .route("/applications/{tracking_code}", get(handlers::admin_get_application))
        .route(
            "/applications/{tracking_code}/status",
            patch(handlers::update_application_status),
        )
        .with_state(admin_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{lazy_pool, with_admin_auth};
    use axum_test::TestServer;
    use serde_json::json;

    fn server(authenticated: bool) -> TestServer {
        let router = Router::new().nest(
            "/api/admin",
            routes(Arc::new(AdminService::new(lazy_pool()))),
        );
        let router = if authenticated {
            with_admin_auth(router)
        } else {
            router
        };
        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn test_routes_require_identity() {
        let server = server(false);
        server.get("/api/admin/dashboard").await.assert_status_unauthorized();
        server
            .get("/api/admin/applications/export")
            .await
            .assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_invalid_list_filter() {
        let response = server(true)
            .get("/api/admin/applications")
            .add_query_param("status", "DONE")
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<serde_json::Value>()["success"], false);
    }

    #[tokio::test]
    async fn test_invalid_export_filter() {
        server(true)
            .get("/api/admin/applications/export")
            .add_query_param("projectType", "tiktok")
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_invalid_status_value() {
        let server = server(true);
        server
            .patch("/api/admin/applications/WD-ABC-12345/status")
            .json(&json!({ "status": "ARCHIVED" }))
            .await
            .assert_status_bad_request();

        let response = server
            .patch("/api/admin/applications/WD-ABC-12345/status")
            .json(&json!({}))
            .await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<serde_json::Value>()["details"]["status"],
            "Status is required"
        );
    }
}
