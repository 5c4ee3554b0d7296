//! 页面选择器

// 登录
pub const LOGIN_BUTTON: &str = "#login-button";
pub const EMAIL_INPUT: &str = "#email-input";
pub const PASSWORD_INPUT: &str = "#password-input";
pub const SUBMIT_BUTTON: &str = "#submit-button";
pub const SCHEDULE_PAGE: &str = "#schedule-page";

// 课程类型筛选
pub const TYPE_FILTER: &str = "#type-filter";
pub const TYPE_FILTER_OPTION: &str = "#type-filter > option:nth-of-type(3)";

// 课程表
pub const DAY_GROUP: &str = r#"[id^="day-group"]"#;
pub const DAY_TITLE: &str = r#"[id^="day-title"]"#;
pub const CLASS_CARD: &str = r#"[id^="class-card"]"#;
pub const CLASS_TIME: &str = r#"[id^="class-time"]"#;
pub const CLASS_NAME: &str = r#"[id^="class-name"]"#;
pub const BOOK_BUTTON: &str = r#"[id^="book-button"]"#;

// 我的预订
pub const MY_BOOKINGS_LINK: &str = "#my-bookings-link";
pub const BOOKING_CARD: &str = r#"[id^="booking-card"]"#;
pub const WAITLIST_CARD: &str = r#"[id^="waitlist-card"]"#;
pub const BOOKING_CLASS_NAME: &str = r#"[id^="booking-class-name"]"#;
pub const WAITLIST_CLASS_NAME: &str = r#"[id^="waitlist-class-name"]"#;
