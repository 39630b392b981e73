/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs: date/time formatting,
/// status toggling, and query-parameter omission.
use leads_report::client::LeadsApiClient;
use leads_report::models::{ReportStatus, StatusFilter};
use leads_report::render::{format_dob, format_time};
use proptest::prelude::*;

// Property: formatting should never panic
proptest! {
    #[test]
    fn format_dob_never_panics(
        day in any::<Option<u32>>(),
        month in any::<Option<u32>>(),
        year in any::<Option<u32>>()
    ) {
        let _ = format_dob(day, month, year);
    }

    #[test]
    fn format_time_never_panics(
        hour in any::<Option<u32>>(),
        minute in any::<Option<u32>>()
    ) {
        let _ = format_time(hour, minute);
    }
}

// Property: complete dates join with slashes, anything else is unknown
proptest! {
    #[test]
    fn complete_dates_join_with_slashes(
        day in 1u32..=31,
        month in 1u32..=12,
        year in 1900u32..=2100
    ) {
        prop_assert_eq!(
            format_dob(Some(day), Some(month), Some(year)),
            format!("{}/{}/{}", day, month, year)
        );
    }

    #[test]
    fn a_missing_or_zero_part_makes_the_date_unknown(
        month in 1u32..=12,
        year in 1900u32..=2100
    ) {
        prop_assert_eq!(format_dob(None, Some(month), Some(year)), "-");
        prop_assert_eq!(format_dob(Some(0), Some(month), Some(year)), "-");
        prop_assert_eq!(format_dob(Some(15), None, Some(year)), "-");
        prop_assert_eq!(format_dob(Some(15), Some(month), None), "-");
    }
}

// Property: minutes are always rendered with two digits
proptest! {
    #[test]
    fn minutes_always_render_two_digits(hour in 0u32..=23, minute in 0u32..=59) {
        let rendered = format_time(Some(hour), Some(minute));
        let (h, m) = rendered.split_once(':').expect("time has a colon");
        prop_assert_eq!(h, hour.to_string());
        prop_assert_eq!(m.len(), 2);
        prop_assert_eq!(m.parse::<u32>().unwrap(), minute);
    }
}

// Property: toggling is a fixpoint-free involution over {PENDING, DONE}
proptest! {
    #[test]
    fn toggling_twice_returns_the_original_status(
        status in prop::sample::select(vec![ReportStatus::Pending, ReportStatus::Done])
    ) {
        prop_assert_ne!(status.toggled(), status);
        prop_assert_eq!(status.toggled().toggled(), status);
    }
}

// Property: a query parameter is present iff its filter is not the default
proptest! {
    #[test]
    fn params_present_iff_filter_not_default(
        name in "[a-zA-Z ]{0,12}",
        filter in prop::sample::select(vec![
            StatusFilter::All,
            StatusFilter::Pending,
            StatusFilter::Done,
        ])
    ) {
        let params = LeadsApiClient::query_params(filter, &name);
        let has_status = params.iter().any(|(key, _)| *key == "report_status");
        let has_name = params.iter().any(|(key, _)| *key == "name");
        prop_assert_eq!(has_status, filter != StatusFilter::All);
        prop_assert_eq!(has_name, !name.is_empty());
        // The sent values are exactly the filter state.
        if let Some(expected) = filter.as_param() {
            let sent = params.iter().find(|(key, _)| *key == "report_status").unwrap();
            prop_assert_eq!(sent.1.as_str(), expected);
        }
        if !name.is_empty() {
            let sent = params.iter().find(|(key, _)| *key == "name").unwrap();
            prop_assert_eq!(sent.1.as_str(), name.as_str());
        }
    }
}
