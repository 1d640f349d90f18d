use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::applications::handlers::{
    create_application, find_application, get_application,
};
use crate::features::applications::services::ApplicationService;

/// Public application intake and lookup routes
pub fn routes(service: Arc<ApplicationService>) -> Router {
    Router::new()
        .route(
            "/api/applications",
            post(create_application).get(find_application),
        )
        .route("/api/applications/{tracking_code}", get(get_application))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::lazy_pool;
    use axum_test::TestServer;
    use serde_json::json;

    fn server() -> TestServer {
        let pool = lazy_pool();
        TestServer::new(routes(Arc::new(ApplicationService::new(pool)))).unwrap()
    }

    #[tokio::test]
    async fn test_missing_field_returns_field_map() {
        let response = server()
            .post("/api/applications")
            .json(&json!({
                "contactName": "Kim",
                "contactEmail": "kim@example.com",
                "contactPhone": "010-1234-5678",
                "projectTitle": "Retail",
                "projectType": "seo",
                "budgetRange": "under_10m",
                "timeline": "Next month",
                "description": "Handmade furniture shop",
                "aiRequirements": "Blog posts by hand",
                "blockchainNeeds": "More organic traffic"
            }))
            .await;

        response.assert_status_bad_request();
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "The submitted data is invalid.");
        assert_eq!(body["details"]["companyName"], "Company name is required");
        assert_eq!(body["details"].as_object().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_enum_and_attachments() {
        let response = server()
            .post("/api/applications")
            .json(&json!({
                "companyName": "Acme",
                "contactName": "Kim",
                "contactEmail": "kim@example.com",
                "contactPhone": "010-1234-5678",
                "projectTitle": "Retail",
                "projectType": "tiktok",
                "budgetRange": "unlimited",
                "timeline": "Next month",
                "description": "Handmade furniture shop",
                "aiRequirements": "Blog posts by hand",
                "blockchainNeeds": "More organic traffic",
                "attachmentIds": ["1", "2", "3", "4", "5", "6"]
            }))
            .await;

        response.assert_status_bad_request();
        let details = response.json::<serde_json::Value>()["details"].clone();
        assert_eq!(details["projectType"], "Invalid project type");
        assert_eq!(details["budgetRange"], "Invalid budget range");
        assert!(details["attachmentIds"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_json_uses_envelope() {
        let response = server()
            .post("/api/applications")
            .content_type("application/json")
            .text("{\"companyName\":")
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<serde_json::Value>()["success"], false);
    }

    #[tokio::test]
    async fn test_query_lookup_requires_id() {
        let response = server().get("/api/applications").await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<serde_json::Value>()["message"],
            "Tracking code is required"
        );
    }
}
