pub mod booking;
pub mod loaders;

pub use booking::{
    AggregatedResult, BookingRecord, BookingRequest, ButtonState, ClassSlot, DaySection,
    OutcomeStatus, Summary,
};
pub use loaders::{load_booking_requests, parse_booking_requests};
