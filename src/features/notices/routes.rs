use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::features::notices::handlers::{
    admin_list_notices, create_notice, delete_notice, get_notice, list_notices, update_notice,
};
use crate::features::notices::services::NoticeService;

/// Public notice routes
pub fn routes(service: Arc<NoticeService>) -> Router {
    Router::new()
        .route("/api/notices", get(list_notices))
        .route("/api/notices/{id}", get(get_notice))
        .with_state(service)
}

/// Admin notice routes, mounted under `/api/admin`
pub fn admin_routes(service: Arc<NoticeService>) -> Router {
    Router::new()
        .route("/notices", get(admin_list_notices).post(create_notice))
        .route("/notices/{id}", put(update_notice).delete(delete_notice))
        .with_state(service)
}
