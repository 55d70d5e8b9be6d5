use std::fmt::Write;

use mutbuf::{MutBuf, MutBufError, Status};

fn filled(content: &str) -> MutBuf {
    let mut buf = MutBuf::new().unwrap();
    buf.push_str(content).unwrap();
    buf
}

#[test]
fn append_empty_changes_nothing() {
    let mut buf = filled("stable");
    let cap = buf.capacity();

    buf.push_bytes(b"").unwrap();

    assert_eq!(buf.as_bytes(), b"stable");
    assert_eq!(buf.len(), 6);
    assert_eq!(buf.capacity(), cap);
    assert_eq!(buf.last_status(), Status::Ok);
}

#[test]
fn push_byte_appends_one_byte() {
    let mut buf = filled("ab");
    buf.push_byte(b'c').unwrap();
    assert_eq!(buf.as_bytes(), b"abc");
}

#[test]
fn append_other_buffer() {
    let mut left = filled("left");
    let right = filled("-right");

    left.append(&right).unwrap();

    assert_eq!(left.as_bytes(), b"left-right");
    assert_eq!(right.as_bytes(), b"-right");
}

#[test]
fn push_fmt_probes_then_renders() {
    let mut buf = MutBuf::with_capacity(2).unwrap();

    buf.push_fmt(format_args!("{}-{}", 12, "ab")).unwrap();

    assert_eq!(buf.as_bytes(), b"12-ab");
}

#[test]
fn write_macro_goes_through_fmt_write() {
    let mut buf = MutBuf::new().unwrap();

    write!(buf, "x={}", 7).unwrap();

    assert_eq!(buf.as_bytes(), b"x=7");
}

#[test]
fn push_i64_single_digit_fast_path() {
    let mut buf = MutBuf::new().unwrap();
    buf.push_i64(7).unwrap();
    buf.push_i64(0).unwrap();
    assert_eq!(buf.as_bytes(), b"70");
}

#[test]
fn push_i64_renders_negative_and_wide_values() {
    let mut buf = MutBuf::new().unwrap();
    buf.push_i64(-1234).unwrap();
    buf.push_byte(b' ').unwrap();
    buf.push_i64(i64::MIN).unwrap();
    assert_eq!(buf.as_bytes(), b"-1234 -9223372036854775808");
}

#[test]
fn push_u64_renders_max() {
    let mut buf = MutBuf::new().unwrap();
    buf.push_u64(u64::MAX).unwrap();
    assert_eq!(buf.as_bytes(), b"18446744073709551615");
}

#[test]
fn push_f64_uses_fixed_point_precision() {
    let mut buf = MutBuf::new().unwrap();
    buf.push_f64(3.14159, 2).unwrap();
    buf.push_byte(b'|').unwrap();
    buf.push_f64(2.0, 3).unwrap();
    assert_eq!(buf.as_bytes(), b"3.14|2.000");
}

#[test]
fn repeat_duplicates_original_fragment() {
    let mut buf = filled("ab");
    buf.repeat(3).unwrap();
    assert_eq!(buf.as_bytes(), b"ababab");
}

#[test]
fn repeat_zero_empties() {
    let mut buf = filled("gone");
    buf.repeat(0).unwrap();
    assert!(buf.is_empty());
    assert_eq!(buf.as_bytes_with_nul(), b"\0");
}

#[test]
fn repeat_once_is_identity() {
    let mut buf = filled("same");
    buf.repeat(1).unwrap();
    assert_eq!(buf.as_bytes(), b"same");
}

#[test]
fn repeat_single_byte_content() {
    let mut buf = filled("x");
    buf.repeat(5).unwrap();
    assert_eq!(buf.as_bytes(), b"xxxxx");
}

#[test]
fn repeat_negative_is_out_of_range_and_keeps_content() {
    let mut buf = filled("kept");

    assert_eq!(buf.repeat(-1).unwrap_err(), MutBufError::OutOfRange);

    assert_eq!(buf.last_status(), Status::OutOfRange);
    assert_eq!(buf.as_bytes(), b"kept");
}

#[test]
fn trim_strips_both_ends() {
    let mut buf = filled("  hi  ");
    buf.trim();
    assert_eq!(buf.as_bytes(), b"hi");
}

#[test]
fn trim_all_whitespace_empties() {
    let mut buf = filled("   ");
    buf.trim();
    assert!(buf.is_empty());
    assert_eq!(buf.as_bytes_with_nul(), b"\0");
}

#[test]
fn trim_handles_tabs_and_newlines() {
    let mut buf = filled("\t\n hop \r\n");
    buf.trim();
    assert_eq!(buf.as_bytes(), b"hop");
}

#[test]
fn trim_without_leading_whitespace_needs_no_shift() {
    let mut buf = filled("hi  ");
    buf.trim();
    assert_eq!(buf.as_bytes(), b"hi");
}

#[test]
fn trim_start_and_trim_end_are_one_sided() {
    let mut buf = filled(" x ");
    buf.trim_start();
    assert_eq!(buf.as_bytes(), b"x ");

    let mut buf = filled(" x ");
    buf.trim_end();
    assert_eq!(buf.as_bytes(), b" x");
}

#[test]
fn case_conversion_is_ascii_only() {
    let mut buf = filled("Grüße 123");
    buf.make_ascii_uppercase();
    assert_eq!(buf.as_bytes(), "GRüßE 123".as_bytes());

    buf.make_ascii_lowercase();
    assert_eq!(buf.as_bytes(), "grüße 123".as_bytes());
}

#[test]
fn replace_byte_counts_replacements() {
    let mut buf = filled("a,b,,c");

    let n = buf.replace_byte(b',', b';');

    assert_eq!(n, 3);
    assert_eq!(buf.as_bytes(), b"a;b;;c");
}

#[test]
fn replace_byte_missing_is_zero() {
    let mut buf = filled("abc");
    assert_eq!(buf.replace_byte(b'z', b'!'), 0);
    assert_eq!(buf.as_bytes(), b"abc");
}

#[test]
fn successful_mutation_overwrites_sticky_error() {
    let mut buf = MutBuf::new().unwrap();

    assert!(buf.repeat(-5).is_err());
    assert_eq!(buf.last_status(), Status::OutOfRange);

    buf.push_byte(b'a').unwrap();
    assert_eq!(buf.last_status(), Status::Ok);
}
