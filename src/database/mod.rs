pub mod guest_changes_repo;
pub mod guest_repo;
pub mod schema;
