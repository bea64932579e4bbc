use memodeck::format_elapsed;

#[test]
fn formats_zero() {
    assert_eq!(format_elapsed(0), "00:00:00");
}

#[test]
fn formats_minutes_seconds_centis() {
    assert_eq!(format_elapsed(1_234), "00:01:23");
    assert_eq!(format_elapsed(65_432), "01:05:43");
    assert_eq!(format_elapsed(59 * 60_000 + 59_990), "59:59:99");
}

#[test]
fn wraps_at_one_hour_like_the_stopwatch_display() {
    assert_eq!(format_elapsed(3_600_000), "00:00:00");
    assert_eq!(format_elapsed(3_601_500), "00:01:50");
}

#[test]
fn sub_centisecond_remainders_truncate() {
    assert_eq!(format_elapsed(9), "00:00:00");
    assert_eq!(format_elapsed(10), "00:00:01");
}
