use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::contacts::handlers::{create_contact, get_contact, list_contacts};
use crate::features::contacts::services::ContactService;

/// Public contact form route
pub fn routes(service: Arc<ContactService>) -> Router {
    Router::new()
        .route("/api/contact", post(create_contact))
        .with_state(service)
}

/// Admin contact routes, mounted under `/api/admin`
pub fn admin_routes(service: Arc<ContactService>) -> Router {
    Router::new()
        .route("/contacts", get(list_contacts))
        .route("/contacts/{id}", get(get_contact))
        .with_state(service)
}
