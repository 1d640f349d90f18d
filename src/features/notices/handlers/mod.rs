pub mod notice_handler;

pub use notice_handler::{
    __path_admin_list_notices, __path_create_notice, __path_delete_notice, __path_get_notice,
    __path_list_notices, __path_update_notice, admin_list_notices, create_notice, delete_notice,
    get_notice, list_notices, update_notice,
};
