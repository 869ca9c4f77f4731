pub mod admin_service;
pub mod ai_service;
pub mod change_log_service;
pub mod entertainment_service;
pub mod guest_service;
pub mod upstream_cache;
