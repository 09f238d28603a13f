use chrono::{NaiveDate, NaiveDateTime};
use leaven_core::{
    CalibrationTable, EstimateRequest, EstimateSummary, RiseTarget, project_completion,
};
use rstest::rstest;

fn jan1(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

#[test]
fn seven_and_a_half_hours_from_eight() {
    assert_eq!(project_completion(Some(jan1(8, 0)), 7.5), Some(jan1(15, 30)));
}

#[rstest]
#[case(0.0)]
#[case(7.5)]
#[case(-3.0)]
#[case(f64::NAN)]
fn no_start_no_completion(#[case] hours: f64) {
    assert_eq!(project_completion(None, hours), None);
}

#[test]
fn summary_combines_estimate_and_projection() {
    let req = EstimateRequest::new(71.0, 15.0, RiseTarget::Percent100);
    let result = CalibrationTable::standard().estimate(&req);
    let s = EstimateSummary::new(result, Some(jan1(8, 0)));
    assert_eq!(s.estimate.to_string(), "6h 30m");
    assert_eq!(s.completion, Some(jan1(14, 30)));
}
