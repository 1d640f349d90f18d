pub mod admin;
pub mod applications;
pub mod attachments;
pub mod auth;
pub mod contacts;
pub mod notices;
