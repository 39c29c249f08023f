pub mod appointments;
pub mod catalog;
pub mod extract;
pub mod health;
pub mod professionals;
pub mod users;

pub use health::health_check;
