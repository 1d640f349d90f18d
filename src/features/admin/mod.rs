pub mod dtos;
pub mod export;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::AdminService;
