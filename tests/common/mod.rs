pub mod database;
pub mod helpers;
pub mod test_app;

#[allow(unused_imports)]
pub use database::TestDb;
#[allow(unused_imports)]
pub use helpers::{appointment_request, professional_request, register_request, service_request, timestamp};
#[allow(unused_imports)]
pub use test_app::TestApp;
