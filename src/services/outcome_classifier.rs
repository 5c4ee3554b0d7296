//! 结果分类 - 业务能力层

use crate::models::{BookingRecord, ButtonState, ClassSlot, DaySection, OutcomeStatus};

/// 根据点击前的按钮状态生成预订记录
///
/// | 点击前状态 | 结果 |
/// |---|---|
/// | booked | already_booked |
/// | waitlisted | already_waitlisted |
/// | book class | booked |
/// | join waitlist | waitlisted |
/// | 其他 | error |
pub fn classify<H>(
    slot: &ClassSlot<H>,
    section: &DaySection<H>,
    initial_state: &ButtonState,
) -> BookingRecord {
    let identifier = BookingRecord::identifier_for(&slot.name, &slot.time, &section.title);

    let (status, prefix) = match initial_state {
        ButtonState::Booked => (OutcomeStatus::AlreadyBooked, "Already booked"),
        ButtonState::Waitlisted => (OutcomeStatus::AlreadyWaitlisted, "Already waitlisted"),
        ButtonState::BookClass => (OutcomeStatus::Booked, "✅Successfully booked"),
        ButtonState::JoinWaitlist => (OutcomeStatus::Waitlisted, "✅Joined Waitlist on"),
        ButtonState::Unknown(text) => {
            return BookingRecord::new(
                OutcomeStatus::Error,
                identifier,
                format!("invalid button state with text: {}", text),
            );
        }
    };

    let message = format!("{}: {}", prefix, identifier);
    BookingRecord::new(status, identifier, message)
}
