pub mod cleanup;
pub mod confirm;
pub mod holds;
pub mod slots;
