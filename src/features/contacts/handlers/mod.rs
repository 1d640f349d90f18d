pub mod contact_handler;

pub use contact_handler::{
    __path_create_contact, __path_get_contact, __path_list_contacts, create_contact, get_contact,
    list_contacts,
};
