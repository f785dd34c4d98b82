use super::*;

#[test]
fn cell_text_replaces_blank_values() {
    assert_eq!(cell_text(""), "-");
    assert_eq!(cell_text("   "), "-");
    assert_eq!(cell_text(" 10.0.0.4 "), "10.0.0.4");
}

#[test]
fn page_count_rounds_up_and_never_reaches_zero() {
    assert_eq!(page_count(0, 20), 1);
    assert_eq!(page_count(-3, 20), 1);
    assert_eq!(page_count(20, 20), 1);
    assert_eq!(page_count(21, 20), 2);
    assert_eq!(page_count(93, 20), 5);
    assert_eq!(page_count(5, 0), 1);
}

#[test]
fn page_summary_reports_position_and_total() {
    assert_eq!(page_summary(2, 93, 20), "Page 2 of 5 (93 total)");
    assert_eq!(page_summary(1, 0, 20), "Page 1 of 1 (0 total)");
}

#[test]
fn optional_text_drops_blank_input() {
    assert_eq!(optional_text("  "), None);
    assert_eq!(optional_text(" report "), Some("report".to_owned()));
}
