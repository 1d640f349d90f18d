pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod signature;

pub use routes::routes;
pub use services::AttachmentService;
