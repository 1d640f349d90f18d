pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod tracking_code;

pub use routes::routes;
pub use services::ApplicationService;
