pub mod booking_attempter;
pub mod bookings_page;
pub mod login_service;
pub mod outcome_classifier;
pub mod report;
pub mod retry;
pub mod slot_resolver;
pub mod summary;
pub mod verification;

pub use booking_attempter::{Attempt, BookingAttempter};
pub use bookings_page::{open_bookings_page, BookingsListing};
pub use login_service::LoginService;
pub use outcome_classifier::classify;
pub use report::RunReport;
pub use retry::RetryExecutor;
pub use slot_resolver::SlotResolver;
pub use summary::summarize;
pub use verification::{verify, VerificationReport};
