use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::applications::{
    dtos as applications_dtos, handlers as applications_handlers, models as applications_models,
};
use crate::features::attachments::{dtos as attachments_dtos, handlers as attachments_handlers};
use crate::features::auth;
use crate::features::contacts::{dtos as contacts_dtos, handlers as contacts_handlers};
use crate::features::notices::{dtos as notices_dtos, handlers as notices_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Applications (public)
        applications_handlers::create_application,
        applications_handlers::get_application,
        applications_handlers::find_application,
        // Attachments (public)
        attachments_handlers::upload_attachment,
        attachments_handlers::delete_attachment,
        // Notices (public)
        notices_handlers::list_notices,
        notices_handlers::get_notice,
        // Contact (public)
        contacts_handlers::create_contact,
        // Admin auth
        auth::handlers::login,
        auth::handlers::get_me,
        // Admin
        admin_handlers::get_dashboard,
        admin_handlers::list_applications,
        admin_handlers::export_applications,
        admin_handlers::admin_get_application,
        admin_handlers::update_application_status,
        notices_handlers::admin_list_notices,
        notices_handlers::create_notice,
        notices_handlers::update_notice,
        notices_handlers::delete_notice,
        contacts_handlers::list_contacts,
        contacts_handlers::get_contact,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Applications
            applications_models::ApplicationStatus,
            applications_models::ProjectType,
            applications_models::BudgetRange,
            applications_dtos::CreateApplicationDto,
            ApiResponse<applications_dtos::ApplicationCreatedDto>,
            ApiResponse<applications_dtos::ApplicationLookupDto>,
            // Attachments
            attachments_dtos::UploadAttachmentDto,
            ApiResponse<attachments_dtos::AttachmentResponseDto>,
            ApiResponse<attachments_dtos::DeleteAttachmentResponseDto>,
            // Notices
            notices_dtos::CreateNoticeDto,
            notices_dtos::UpdateNoticeDto,
            ApiResponse<Vec<notices_dtos::NoticeResponseDto>>,
            ApiResponse<notices_dtos::NoticeResponseDto>,
            // Contact
            contacts_dtos::CreateContactDto,
            ApiResponse<contacts_dtos::ContactCreatedDto>,
            ApiResponse<Vec<contacts_dtos::ContactInquiryDto>>,
            ApiResponse<contacts_dtos::ContactInquiryDto>,
            // Admin auth
            auth::model::AdminRole,
            auth::dtos::LoginRequestDto,
            ApiResponse<auth::dtos::LoginResponseDto>,
            ApiResponse<auth::dtos::AdminProfileDto>,
            // Admin
            admin_dtos::UpdateStatusDto,
            ApiResponse<admin_dtos::DashboardDto>,
            ApiResponse<Vec<admin_dtos::AdminApplicationDto>>,
            ApiResponse<admin_dtos::AdminApplicationDto>,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "applications", description = "Service application intake and status lookup (public)"),
        (name = "attachments", description = "Application file uploads (public)"),
        (name = "notices", description = "Published notices (public)"),
        (name = "contact", description = "Contact form (public)"),
        (name = "admin-auth", description = "Admin login and session"),
        (name = "admin", description = "Admin endpoints (admin token required)"),
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
