use super::*;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_parse_dotted() {
    assert_eq!(parse_release_date("24.12.2025"), Some(ymd(2025, 12, 24)));
    assert_eq!(parse_release_date(" 01.02.2023 "), Some(ymd(2023, 2, 1)));
}

#[test]
fn test_parse_iso() {
    assert_eq!(parse_release_date("2025-12-24"), Some(ymd(2025, 12, 24)));
}

#[test]
fn test_parse_compact() {
    assert_eq!(parse_release_date("20251224"), Some(ymd(2025, 12, 24)));
}

#[test]
fn test_all_formats_agree() {
    let a = parse_release_date("05.03.2027");
    let b = parse_release_date("2027-03-05");
    let c = parse_release_date("20270305");
    assert!(a.is_some());
    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn test_rejects_malformed() {
    for raw in [
        "",
        "TBA",
        "5.3.2027",
        "2027-3-5",
        "2027/03/05",
        "05.03.27",
        "2027030",
        "202703055",
        "31.02.2024",
        "2024-13-01",
        "05.03.2027.1",
    ] {
        assert_eq!(parse_release_date(raw), None, "{raw:?} should not parse");
    }
}

#[test]
fn test_format_release_date() {
    assert_eq!(format_release_date(ymd(2024, 1, 9)), "09.01.2024");
}

#[test]
fn test_mask_compact_input() {
    assert_eq!(mask_release_date_input("20241231"), "31.12.2024");
    assert_eq!(mask_release_date_input("2024-12-31"), "31.12.2024");
}

#[test]
fn test_mask_day_first_input() {
    assert_eq!(mask_release_date_input("01022024"), "01.02.2024");
}

#[test]
fn test_mask_leaves_partial_input() {
    assert_eq!(mask_release_date_input("2024"), "2024");
    assert_eq!(mask_release_date_input("01.02."), "01.02.");
    assert_eq!(mask_release_date_input("123456789"), "123456789");
}

#[test]
fn test_free_to_play() {
    assert!(is_free_to_play(&Game::new("a", "Free", 0.0)));
    assert!(!is_free_to_play(&Game::new("b", "Paid", 0.99)));
}

#[test]
fn test_pre_order() {
    let today = ymd(2025, 6, 15);
    let future = Game::new("f", "Future", 59.99).with_release_date("16.06.2025");
    let same_day = Game::new("s", "Today", 59.99).with_release_date("2025-06-15");
    let past = Game::new("p", "Past", 59.99).with_release_date("20200101");
    let undated = Game::new("u", "Undated", 59.99);
    let garbage = Game::new("g", "Garbage", 59.99).with_release_date("coming soon");

    assert!(is_pre_order(&future, today));
    assert!(!is_pre_order(&same_day, today));
    assert!(!is_pre_order(&past, today));
    assert!(!is_pre_order(&undated, today));
    assert!(!is_pre_order(&garbage, today));
}

#[test]
fn test_parse_timestamp_variants() {
    let expected = ymd(2024, 3, 1).and_hms_opt(12, 30, 0).unwrap();
    assert_eq!(parse_timestamp("2024-03-01T12:30:00"), Some(expected));
    assert_eq!(parse_timestamp("2024-03-01 12:30:00"), Some(expected));
    assert_eq!(parse_timestamp("2024-03-01T12:30:00Z"), Some(expected));
    assert_eq!(parse_timestamp("2024-03-01T14:30:00+02:00"), Some(expected));
    assert!(parse_timestamp("2024-03-01T12:30:00.123456").is_some());
    assert_eq!(
        parse_timestamp("2024-03-01"),
        Some(ymd(2024, 3, 1).and_hms_opt(0, 0, 0).unwrap())
    );
    assert_eq!(parse_timestamp("yesterday"), None);
}
