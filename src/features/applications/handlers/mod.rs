pub mod application_handler;

pub use application_handler::{
    __path_create_application, __path_find_application, __path_get_application,
    create_application, find_application, get_application,
};
