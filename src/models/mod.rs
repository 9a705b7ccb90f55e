pub mod booking;
pub mod hold;
pub mod slot;
pub mod table;

pub use booking::Booking;
pub use hold::BookingHold;
pub use slot::TimeSlot;
pub use table::DiningTable;
