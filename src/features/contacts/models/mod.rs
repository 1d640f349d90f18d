pub mod contact_inquiry;

pub use contact_inquiry::*;
