pub mod toml_loader;

pub use toml_loader::{load_booking_requests, parse_booking_requests};
