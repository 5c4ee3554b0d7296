//! "我的预订"页 - 业务能力层

use tracing::{info, warn};

use crate::config::Timing;
use crate::error::{BookingError, BookingResult};
use crate::infrastructure::selectors;
use crate::infrastructure::{wait_for_element, wait_until, Scope, SessionSurface};

/// "我的预订"页上的卡片
#[derive(Debug, Clone)]
pub struct BookingsListing<H> {
    pub booking_cards: Vec<H>,
    pub waitlist_cards: Vec<H>,
}

impl<H> BookingsListing<H> {
    pub fn total(&self) -> usize {
        self.booking_cards.len() + self.waitlist_cards.len()
    }
}

/// 进入"我的预订"页并收集预订 / 候补卡片
///
/// `expect_cards` 为真时先等待第一张卡片出现；超时后按空列表继续，由核对结果报告差异。
pub async fn open_bookings_page<S: SessionSurface>(
    surface: &S,
    timing: &Timing,
    expect_cards: bool,
) -> BookingResult<BookingsListing<S::Handle>> {
    let link = wait_for_element(surface, Scope::Document, selectors::MY_BOOKINGS_LINK, timing).await?;
    surface.click(&link).await?;

    if expect_cards {
        let loaded = wait_until(timing.wait_timeout, timing.poll_interval, || async move {
            let booking = surface.locate(Scope::Document, selectors::BOOKING_CARD).await?;
            let waitlist = surface.locate(Scope::Document, selectors::WAITLIST_CARD).await?;
            Ok::<_, BookingError>(booking.is_some() || waitlist.is_some())
        })
        .await?;
        if !loaded {
            warn!("⚠️ 我的预订页在 {:?} 内没有出现任何卡片", timing.wait_timeout);
        }
    }

    let booking_cards = surface
        .locate_all(Scope::Document, selectors::BOOKING_CARD)
        .await?;
    let waitlist_cards = surface
        .locate_all(Scope::Document, selectors::WAITLIST_CARD)
        .await?;

    let listing = BookingsListing {
        booking_cards,
        waitlist_cards,
    };
    info!("---Total classes on bookings page: {}", listing.total());
    Ok(listing)
}
