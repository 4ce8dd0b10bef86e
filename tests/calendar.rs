#![forbid(unsafe_code)]
use chrono::Datelike;
use roulement::{classify, days_in_month, HolidayTable, SchedError};

fn period_days(periods: &[roulement::WeekendPeriod]) -> String {
    let days: Vec<Vec<u32>> = periods.iter().map(|p| p.days.clone()).collect();
    format!("{days:?}")
}

#[test]
fn december_2025_weekends() {
    let cal = classify(2025, 12, None).unwrap();
    assert_eq!(cal.days_in_month, 31);
    assert_eq!(cal.rest_eligible, vec![6, 7, 13, 14, 20, 21, 27, 28]);
    assert_eq!(cal.weekend_periods.len(), 4);
    assert_eq!(cal.period_of(21), Some(2));
    assert_eq!(cal.period_of(22), None);
    assert!(cal.is_rest_eligible(28));
    assert!(!cal.is_rest_eligible(1));
}

#[test]
fn february_2026_splits_edge_weekends() {
    // 1er = dimanche, 28 = samedi
    let cal = classify(2026, 2, None).unwrap();
    assert_eq!(cal.days_in_month, 28);
    insta::assert_snapshot!(period_days(&cal.weekend_periods), @"[[1], [7, 8], [14, 15], [21, 22], [28]]");
}

#[test]
fn holidays_join_adjacent_weekend_days() {
    let table = HolidayTable::indonesia();

    let jan = classify(2026, 1, Some(&table)).unwrap();
    assert!(jan.is_rest_eligible(1));
    assert_eq!(jan.weekend_periods[0].days, vec![1]);
    assert_eq!(jan.weekend_periods[1].days, vec![3, 4]);

    let dec = classify(2025, 12, Some(&table)).unwrap();
    assert_eq!(
        dec.rest_eligible,
        vec![6, 7, 13, 14, 20, 21, 25, 26, 27, 28]
    );
    let tail: Vec<_> = dec.weekend_periods.iter().rev().take(2).collect();
    assert_eq!(tail[0].days, vec![27, 28]);
    assert_eq!(tail[1].days, vec![25, 26]);
}

#[test]
fn holidays_ignored_without_table() {
    let plain = classify(2025, 12, None).unwrap();
    let empty = classify(2025, 12, Some(&HolidayTable::default())).unwrap();
    assert_eq!(plain, empty);
}

#[test]
fn leap_february() {
    assert_eq!(days_in_month(2024, 2).unwrap(), 29);
    assert_eq!(days_in_month(2025, 2).unwrap(), 28);
    assert_eq!(days_in_month(2025, 4).unwrap(), 30);
}

#[test]
fn invalid_month_is_rejected() {
    assert!(matches!(classify(2025, 0, None), Err(SchedError::InvalidMonth(0))));
    assert!(matches!(classify(2025, 13, None), Err(SchedError::InvalidMonth(13))));
    assert!(matches!(days_in_month(1900, 1), Err(SchedError::UnsupportedYear(1900))));
}

#[test]
fn classification_is_pure() {
    let table = HolidayTable::indonesia();
    assert_eq!(
        classify(2026, 3, Some(&table)).unwrap(),
        classify(2026, 3, Some(&table)).unwrap()
    );
}

#[test]
fn holiday_table_lookup() {
    use chrono::NaiveDate;
    assert!(HolidayTable::default().is_empty());
    let table = HolidayTable::indonesia();
    assert!(!table.is_empty());
    let christmas = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
    assert_eq!(table.find(christmas).unwrap().name, "Hari Natal");
    assert!(!table.contains(NaiveDate::from_ymd_opt(2025, 12, 24).unwrap()));
    let december: Vec<_> = table.in_month(2025, 12).map(|h| h.date.day()).collect();
    assert_eq!(december, vec![25, 26]);
}
