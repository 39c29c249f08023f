pub mod appointments;
pub mod catalog;
pub mod professionals;
pub mod users;
