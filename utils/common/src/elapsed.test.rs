use super::*;

#[test]
fn formats_sub_second_as_millis() {
    assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
}

#[test]
fn formats_sub_minute_with_two_decimals() {
    assert_eq!(format_duration(Duration::from_millis(1_500)), "1.50s");
    assert_eq!(format_duration(Duration::from_secs(59)), "59.00s");
}

#[test]
fn formats_minutes_and_seconds() {
    assert_eq!(format_duration(Duration::from_secs(75)), "1m 15s");
    assert_eq!(format_duration(Duration::from_secs(61)), "1m 01s");
}

#[test]
fn format_elapsed_reflects_instant_start() {
    let start = Instant::now();
    let rendered = format_elapsed(start);
    assert!(rendered.ends_with("ms") || rendered.ends_with('s'));
}
