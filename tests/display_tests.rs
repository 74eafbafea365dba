//! Tests for display and formatting utilities.

use ogcalc::display::{format_amount, format_duration, level_label};
use ogcalc::models::TechKind;

#[test]
fn test_format_duration_seconds() {
    assert_eq!(format_duration(30.0), "30s");
    assert_eq!(format_duration(59.0), "59s");
}

#[test]
fn test_format_duration_minutes() {
    assert_eq!(format_duration(60.0), "1m 0s");
    assert_eq!(format_duration(90.0), "1m 30s");
}

#[test]
fn test_format_duration_hours_days_weeks() {
    assert_eq!(format_duration(3600.0), "1h 0m 0s");
    assert_eq!(format_duration(3661.0), "1h 1m 1s");
    assert_eq!(format_duration(86400.0), "1d 0h 0m 0s");
    assert_eq!(format_duration(694861.0), "1w 1d 1h 1m 1s");
}

#[test]
fn test_format_duration_zero() {
    assert_eq!(format_duration(0.0), "0s");
}

#[test]
fn test_format_duration_fractional() {
    // Fractions are truncated, never rounded up
    assert_eq!(format_duration(30.5), "30s");
    assert_eq!(format_duration(90.9), "1m 30s");
}

#[test]
fn test_format_duration_lab_sentinel() {
    assert_eq!(format_duration(-1.0), "-");
    assert_eq!(format_duration(f64::NAN), "-");
}

#[test]
fn test_format_amount() {
    assert_eq!(format_amount(0.0), "0");
    assert_eq!(format_amount(999.0), "999");
    assert_eq!(format_amount(1000.0), "1,000");
    assert_eq!(format_amount(100000.0), "100,000");
    assert_eq!(format_amount(72000.0), "72,000");
    assert_eq!(format_amount(-0.5), "0");
    assert_eq!(format_amount(-1234.0), "-1,234");
}

#[test]
fn test_level_label() {
    assert_eq!(level_label(TechKind::Building), "level");
    assert_eq!(level_label(TechKind::Research), "level");
    assert_eq!(level_label(TechKind::Unit), "quantity");
}
