use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, post},
    Router,
};
use std::sync::Arc;

use crate::features::attachments::handlers::{delete_attachment, upload_attachment};
use crate::features::attachments::services::AttachmentService;

/// Create routes for the attachments feature
pub fn routes(service: Arc<AttachmentService>, body_limit: usize) -> Router {
    Router::new()
        .route(
            "/api/upload",
            post(upload_attachment).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/api/upload/{id}", delete(delete_attachment))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::UploadConfig;
    use crate::modules::storage::LocalStorage;
    use crate::shared::test_helpers::lazy_pool;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;

    fn server(max_file_size: usize) -> TestServer {
        let config = UploadConfig {
            upload_dir: std::env::temp_dir(),
            max_file_size,
            public_path: "/uploads".to_string(),
        };
        let pool = lazy_pool();
        let service = Arc::new(AttachmentService::new(
            pool,
            Arc::new(LocalStorage::new(&config)),
            config.max_file_size,
        ));
        TestServer::new(routes(service, config.body_limit())).unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_part() {
        let form = MultipartForm::new().add_text("other", "value");
        let response = server(1024).post("/api/upload").multipart(form).await;

        response.assert_status_bad_request();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "No file was provided");
    }

    #[tokio::test]
    async fn test_second_file_part_rejected() {
        let first = Part::bytes(b"GIF89a".to_vec())
            .file_name("one.gif")
            .mime_type("image/gif");
        let second = Part::bytes(b"GIF89a".to_vec())
            .file_name("two.gif")
            .mime_type("image/gif");
        let form = MultipartForm::new()
            .add_part("file", first)
            .add_part("file", second);

        let response = server(1024).post("/api/upload").multipart(form).await;

        response.assert_status_bad_request();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["message"], "Only one file may be uploaded per request");
    }

    #[tokio::test]
    async fn test_png_with_wrong_signature_rejected() {
        let part = Part::bytes(b"this is plainly not a png".to_vec())
            .file_name("fake.png")
            .mime_type("image/png");
        let form = MultipartForm::new().add_part("file", part);

        let response = server(1024).post("/api/upload").multipart(form).await;

        response.assert_status_bad_request();
        let json = response.json::<serde_json::Value>();
        assert!(json["message"].as_str().unwrap().contains("does not match"));
    }

    #[tokio::test]
    async fn test_oversized_file_rejected_before_signature() {
        let part = Part::bytes(vec![0u8; 2048])
            .file_name("big.png")
            .mime_type("image/png");
        let form = MultipartForm::new().add_part("file", part);

        let response = server(1024).post("/api/upload").multipart(form).await;

        response.assert_status_bad_request();
        let json = response.json::<serde_json::Value>();
        assert!(json["message"]
            .as_str()
            .unwrap()
            .starts_with("File too large"));
    }

    #[tokio::test]
    async fn test_disallowed_type_rejected() {
        let part = Part::bytes(b"GIF89a".to_vec())
            .file_name("anim.gif")
            .mime_type("image/gif");
        let form = MultipartForm::new().add_part("file", part);

        server(1024)
            .post("/api/upload")
            .multipart(form)
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_delete_with_malformed_id_is_not_found() {
        server(1024)
            .delete("/api/upload/not-a-uuid")
            .await
            .assert_status_not_found();
    }
}
