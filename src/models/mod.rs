pub mod guest_changes;
pub mod guests;

pub use guest_changes::GuestChangeRow;
pub use guest_changes::GuestChangeWithGuestRow;
pub use guests::GuestRow;
