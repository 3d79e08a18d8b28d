// tests/banner_text.rs

use std::time::{Duration, UNIX_EPOCH};

use watchdo::engine::banner::{build_footer, build_header, format_clock, join_causes};
use watchdo::types::WatchMethod;

#[test]
fn header_pluralizes_the_file_count() {
    assert_eq!(
        build_header(1, WatchMethod::Hash),
        "Watching 1 file for changes using the Hash method...\n\n"
    );
    assert_eq!(
        build_header(3, WatchMethod::ModificationTime),
        "Watching 3 files for changes using the ModificationTime method...\n\n"
    );
}

#[test]
fn causes_read_as_a_sentence() {
    assert_eq!(join_causes::<&str>(&[]), "");
    assert_eq!(join_causes(&["a"]), "a");
    assert_eq!(join_causes(&["a", "b"]), "a and b");
    assert_eq!(join_causes(&["a", "b", "c"]), "a, b and c");
}

#[test]
fn clock_is_hours_minutes_seconds() {
    assert_eq!(format_clock(UNIX_EPOCH), "00:00:00");
    assert_eq!(format_clock(UNIX_EPOCH + Duration::from_secs(3_661)), "01:01:01");
    // Wraps at midnight.
    assert_eq!(
        format_clock(UNIX_EPOCH + Duration::from_secs(86_400 + 45_296)),
        "12:34:56"
    );
}

#[test]
fn footer_reports_trigger_and_run_time() {
    let footer = build_footer(
        UNIX_EPOCH + Duration::from_secs(45_296),
        &["src/a.rs", "src/b.rs"],
        Duration::from_millis(1_234),
    );

    assert_eq!(
        footer,
        "\n\nDoers triggered at 12:34:56 from: src/a.rs and src/b.rs\nRan doers in 1.23 seconds."
    );
}
