pub mod attachment_handler;

pub use attachment_handler::{
    __path_delete_attachment, __path_upload_attachment, delete_attachment, upload_attachment,
};
