use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::contacts::dtos::{ContactCreatedDto, ContactInquiryDto, CreateContactDto};
use crate::features::contacts::services::ContactService;
use crate::shared::types::{ApiResponse, PaginationQuery};
use crate::shared::validation::parse_id;

/// Submit the contact form
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = CreateContactDto,
    responses(
        (status = 201, description = "Inquiry received", body = ApiResponse<ContactCreatedDto>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_contact(
    State(service): State<Arc<ContactService>>,
    AppJson(dto): AppJson<CreateContactDto>,
) -> Result<(StatusCode, Json<ApiResponse<ContactCreatedDto>>)> {
    let dto = dto.normalized();
    dto.validate()?;

    let created = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(created),
            Some("Your inquiry has been received.".to_string()),
            None,
        )),
    ))
}

/// List contact inquiries, newest first
#[utoipa::path(
    get,
    path = "/api/admin/contacts",
    tag = "admin",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Contact inquiries", body = ApiResponse<Vec<ContactInquiryDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_contacts(
    _admin: RequireAdmin,
    State(service): State<Arc<ContactService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ContactInquiryDto>>>> {
    let (inquiries, total) = service.list(&pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(inquiries),
        None,
        Some(pagination.meta(total)),
    )))
}

/// Get a contact inquiry
#[utoipa::path(
    get,
    path = "/api/admin/contacts/{id}",
    tag = "admin",
    params(("id" = uuid::Uuid, Path, description = "Inquiry ID")),
    responses(
        (status = 200, description = "Contact inquiry", body = ApiResponse<ContactInquiryDto>),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_contact(
    _admin: RequireAdmin,
    State(service): State<Arc<ContactService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ContactInquiryDto>>> {
    let inquiry = service.get(parse_id(&id, "Contact inquiry")?).await?;
    Ok(Json(ApiResponse::success(Some(inquiry), None, None)))
}
