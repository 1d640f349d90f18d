/// Default page size for public list endpoints
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Default page size for admin application listings
pub const ADMIN_DEFAULT_PAGE_SIZE: i64 = 50;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Prefix of every application tracking code
pub const TRACKING_CODE_PREFIX: &str = "WD";
