use std::collections::HashSet;
use std::time::Duration;

use gym_booker::browser::connect_to_browser_and_page;
use gym_booker::infrastructure::mock_surface::ClickAction;
use gym_booker::utils::logging;
use gym_booker::{
    BookingError, BookingRequest, CdpSurface, Config, GymBooker, MockSurface, OutcomeStatus,
    Timing,
};

fn create_test_config() -> Config {
    Config {
        email: "me@example.com".into(),
        password: "hunter2".into(),
        timing: Timing {
            max_retries: 3,
            retry_delay: Duration::from_millis(1),
            wait_timeout: Duration::from_millis(20),
            poll_interval: Duration::from_millis(2),
            settle_delay: Duration::from_millis(0),
        },
        ..Config::default()
    }
}

/// 登录页 + 三天课程
fn create_gym_page() -> MockSurface {
    let surface = MockSurface::new();
    surface.add_login_flow();

    let thu = surface.add_day("Thu, Aug 7");
    surface.add_class(thu, "Spin Class", "Time: 6:00 PM", "Book Class");

    let fri = surface.add_day("Fri, Aug 8");
    surface.add_class(fri, "Yoga Flow", "Time: 6:00 AM", "Join Waitlist");
    surface.add_class(fri, "HIIT Blast", "Time: 8:00 AM", "Book Class");

    let sat = surface.add_day("Sat, Aug 9");
    surface.add_class(sat, "Boxing Basics", "Time: 10:00 AM", "Booked");

    surface
}

fn default_requests() -> Vec<BookingRequest> {
    vec![
        BookingRequest::new("Thu", "6:00"),
        BookingRequest::new("Fri", "6:00"),
        BookingRequest::new("Fri", "8:00"),
        BookingRequest::new("Fri", "6:00"),
    ]
}

#[tokio::test]
async fn test_full_run_books_and_verifies() {
    logging::init(false);
    let surface = create_gym_page();
    let config = create_test_config();

    let report = GymBooker::new(&surface, &config)
        .run(&default_requests())
        .await
        .expect("运行应该成功");

    let aggregated = &report.aggregated;
    assert_eq!(aggregated.all.len(), 4);
    assert_eq!(aggregated.unique_by_identifier.len(), 3);

    let identifiers: HashSet<_> = aggregated
        .unique_by_identifier
        .iter()
        .map(|r| r.identifier.as_str())
        .collect();
    assert_eq!(identifiers.len(), aggregated.unique_by_identifier.len());
    assert!(identifiers.contains("Spin Class for 6:00 PM by Thu, Aug 7"));

    // Sat 的已有预订未被请求，页面卡片比期望多一张
    assert_eq!(report.verification.verified.len(), 3);
    assert_eq!(report.verification.expected_count, 3);
    assert_eq!(report.verification.found_count, 4);
    assert_eq!(report.verification.mismatch(), -1);

    assert_eq!(report.summary.new_bookings, 2);
    assert_eq!(report.summary.new_waitlists, 1);
    assert_eq!(report.summary.already_processed, 1);
    assert_eq!(report.summary.total_processed, 4);
    assert_eq!(report.details.len(), 4);
    assert!(surface.was_called("navigate:https://appbrewery.github.io/gym"));
}

#[tokio::test]
async fn test_reconciliation_matches_exactly() {
    let surface = MockSurface::new();
    surface.add_login_flow();
    let thu = surface.add_day("Thu, Aug 7");
    surface.add_class(thu, "Spin Class", "Time: 6:00 PM", "Book Class");
    let fri = surface.add_day("Fri, Aug 8");
    surface.add_class(fri, "Yoga Flow", "Time: 6:00 AM", "Join Waitlist");
    surface.add_class(fri, "HIIT Blast", "Time: 8:00 AM", "Book Class");
    let config = create_test_config();

    let report = GymBooker::new(&surface, &config)
        .run(&default_requests())
        .await
        .unwrap();

    assert_eq!(report.verification.verified.len(), 3);
    assert_eq!(report.verification.mismatch(), 0);
    assert!(report.verification.is_success());
}

#[tokio::test]
async fn test_unknown_day_is_recorded_and_run_continues() {
    let surface = create_gym_page();
    let config = create_test_config();
    let requests = vec![
        BookingRequest::new("Sun", "6:00"),
        BookingRequest::new("Thu", "6:00"),
        BookingRequest::new("", "6:00"),
    ];

    let report = GymBooker::new(&surface, &config)
        .run(&requests)
        .await
        .unwrap();

    let all = &report.aggregated.all;
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].status, OutcomeStatus::NotFound);
    assert_eq!(all[0].message, "No section for Sun");
    assert_eq!(all[1].status, OutcomeStatus::Booked);
    assert_eq!(all[2].status, OutcomeStatus::NotFound);

    assert_eq!(report.aggregated.unique_by_identifier.len(), 1);
    assert_eq!(report.summary.total_processed, 3);
    assert_eq!(report.summary.new_bookings, 1);
}

#[tokio::test]
async fn test_prebooked_class_is_never_clicked() {
    let surface = MockSurface::new();
    surface.add_login_flow();
    let sat = surface.add_day("Sat, Aug 9");
    let button = surface.add_class(sat, "Boxing Basics", "Time: 10:00 AM", "Booked");
    let config = create_test_config();

    let report = GymBooker::new(&surface, &config)
        .run(&[BookingRequest::new("Sat", "10:00")])
        .await
        .unwrap();

    assert_eq!(surface.click_count(button), 0);
    assert_eq!(report.aggregated.all[0].status, OutcomeStatus::AlreadyBooked);
    assert!(report.verification.is_success());
}

#[tokio::test]
async fn test_unrecognised_label_is_kept_as_error() {
    let surface = create_gym_page();
    let config = create_test_config();
    let wed = surface.add_day("Wed, Aug 13");
    let button = surface.add_class(wed, "Kettlebell", "Time: 9:00 AM", "Class Full");

    let report = GymBooker::new(&surface, &config)
        .run(&[
            BookingRequest::new("Wed", "9:00"),
            BookingRequest::new("Thu", "6:00"),
        ])
        .await
        .unwrap();

    // 按钮点击后变为 Booked，但点击前的文字无法识别
    assert_eq!(surface.click_count(button), 1);
    assert_eq!(surface.text_of(button), "Booked");

    let all = &report.aggregated.all;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].status, OutcomeStatus::Error);
    assert_eq!(all[0].identifier, "Kettlebell for 9:00 AM by Wed, Aug 13");
    assert_eq!(all[0].message, "invalid button state with text: Class Full");

    let unique = &report.aggregated.unique_by_identifier;
    assert_eq!(unique.len(), 1);
    assert_eq!(unique[0].status, OutcomeStatus::Booked);

    assert_eq!(report.summary.total_processed, 2);
    assert_eq!(report.summary.new_bookings, 1);
    assert_eq!(report.details.len(), 1);
    assert!(report.details.iter().all(|d| !d.contains("Kettlebell")));
}

#[tokio::test]
async fn test_stuck_button_aborts_run() {
    let surface = create_gym_page();
    let config = create_test_config();
    let mon = surface.add_day("Mon, Aug 11");
    let button = surface.add_class(mon, "Pilates", "Time: 7:00 AM", "Book Class");
    surface.set_on_click(button, ClickAction::default());

    let err = GymBooker::new(&surface, &config)
        .run(&[
            BookingRequest::new("Thu", "6:00"),
            BookingRequest::new("Mon", "7:00"),
        ])
        .await
        .unwrap_err();

    match err {
        BookingError::Terminal {
            description,
            attempts,
            ..
        } => {
            assert_eq!(description, "booking");
            assert_eq!(attempts, 3);
        }
        other => panic!("应为 Terminal 错误: {}", other),
    }
    assert!(!surface.was_called("click:my-bookings-link"));
}

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_real_site_run() {
    logging::init(true);

    let config = Config::from_env();
    config.validate().expect("需要设置 EMAIL_ADDRESS 和 APP_PASSWORD");
    let port = config.browser_debug_port.unwrap_or(9222);

    let (_browser, page) =
        connect_to_browser_and_page(port, config.page_title_match.as_deref())
            .await
            .expect("连接浏览器失败");
    let surface = CdpSurface::new(page);

    let report = GymBooker::new(&surface, &config)
        .run(&default_requests())
        .await
        .expect("运行失败");

    println!("{:#?}", report.summary);
    assert_eq!(report.aggregated.all.len(), 4);
}
