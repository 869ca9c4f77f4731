pub mod admin;
pub mod ai;
pub mod entertainment;
pub mod guest_changes;
pub mod guests;
pub mod public;
