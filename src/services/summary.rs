//! 预订汇总 - 业务能力层

use crate::models::{BookingRecord, OutcomeStatus, Summary};

/// 统计全部记录，并为每条有效记录生成一行明细
///
/// not_found / error 不计入四类计数，也不生成明细，但计入 `total_processed`。
pub fn summarize(all: &[BookingRecord]) -> (Summary, Vec<String>) {
    let mut summary = Summary {
        total_processed: all.len(),
        ..Default::default()
    };
    let mut details = Vec::new();

    for record in all {
        let tag = match record.status {
            OutcomeStatus::Booked => {
                summary.new_bookings += 1;
                "[New Booking]"
            }
            OutcomeStatus::Waitlisted => {
                summary.new_waitlists += 1;
                "[New Waitlist]"
            }
            OutcomeStatus::AlreadyBooked => {
                summary.already_processed += 1;
                "[Booked]"
            }
            OutcomeStatus::AlreadyWaitlisted => {
                summary.already_processed += 1;
                "[Waitlisted]"
            }
            OutcomeStatus::NotFound | OutcomeStatus::Error => continue,
        };
        details.push(format!("{}: {}", tag, record.identifier));
    }

    (summary, details)
}
