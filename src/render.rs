//! Plain-text rendering of the report: the leads table plus the loading and
//! empty states.

use crate::models::Lead;
use crate::report::ReportSnapshot;

/// Shown for absent text fields and unknown dates/times.
const PLACEHOLDER: &str = "-";
/// Replaces the status label while a row's toggle is settling.
const IN_FLIGHT: &str = "...";

const HEADERS: [&str; 8] = [
    "Id",
    "Name",
    "Contact",
    "Email",
    "Birth Details",
    "Place",
    "Gender",
    "Status",
];

/// Formats the date-of-birth parts as `D/M/Y`.
///
/// Any missing part makes the whole date unknown. A zero part counts as
/// missing too, matching the intake form's unset value.
pub fn format_dob(day: Option<u32>, month: Option<u32>, year: Option<u32>) -> String {
    match (day, month, year) {
        (Some(d), Some(m), Some(y)) if d != 0 && m != 0 && y != 0 => {
            format!("{}/{}/{}", d, m, y)
        }
        _ => PLACEHOLDER.to_string(),
    }
}

/// Formats the birth time as `H:MM` with the minute zero-padded.
///
/// Unlike the date parts, zero is a valid hour and a valid minute.
pub fn format_time(hour: Option<u32>, minute: Option<u32>) -> String {
    match (hour, minute) {
        (Some(h), Some(m)) => format!("{}:{:02}", h, m),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Renders the whole report for the given snapshot: header, filters, and
/// one of the loading state, the explicit empty state, or the table.
pub fn render_report(snapshot: &ReportSnapshot) -> String {
    let mut out = String::new();
    out.push_str("Inauguration Leads\n");
    out.push_str("List of all user submissions\n");
    out.push_str(&format!(
        "Search: {:?}  Status: {}\n\n",
        snapshot.search_term, snapshot.status_filter
    ));

    if snapshot.is_loading {
        out.push_str("Loading data...\n");
        return out;
    }
    if snapshot.records.is_empty() {
        out.push_str("No records found.\n");
        return out;
    }

    let rows: Vec<[String; 8]> = snapshot
        .records
        .iter()
        .map(|lead| row_cells(lead, snapshot))
        .collect();

    let mut widths: [usize; 8] = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let ruler: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(ruler));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 8], widths: &[usize; 8]) {
    let mut line = String::new();
    for (cell, width) in cells.iter().zip(widths.iter().copied()) {
        line.push_str(&format!("{:<width$}  ", cell, width = width));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn row_cells(lead: &Lead, snapshot: &ReportSnapshot) -> [String; 8] {
    let status = if snapshot.active_toggles.contains(&lead.id) {
        IN_FLIGHT.to_string()
    } else {
        lead.report_status.to_string()
    };
    [
        lead.id.clone(),
        text_or_placeholder(&lead.name),
        text_or_placeholder(&lead.contact),
        text_or_placeholder(&lead.email),
        format!(
            "{} {}",
            format_dob(lead.day, lead.month, lead.year),
            format_time(lead.hour, lead.minute)
        ),
        text_or_placeholder(&lead.birth_place),
        text_or_placeholder(&lead.gender),
        status,
    ]
}

fn text_or_placeholder(field: &Option<String>) -> String {
    match field {
        Some(text) if !text.is_empty() => text.clone(),
        _ => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportStatus;

    fn lead(id: &str) -> Lead {
        Lead {
            id: id.to_string(),
            name: None,
            contact: None,
            email: None,
            day: None,
            month: None,
            year: None,
            hour: None,
            minute: None,
            birth_place: None,
            gender: None,
            report_status: ReportStatus::Pending,
        }
    }

    #[test]
    fn complete_dates_render_day_month_year() {
        assert_eq!(format_dob(Some(5), Some(6), Some(1990)), "5/6/1990");
    }

    #[test]
    fn incomplete_dates_render_placeholder() {
        assert_eq!(format_dob(None, Some(6), Some(1990)), "-");
        assert_eq!(format_dob(Some(5), None, Some(1990)), "-");
        assert_eq!(format_dob(Some(5), Some(6), None), "-");
        // A zero part counts as unset.
        assert_eq!(format_dob(Some(0), Some(6), Some(1990)), "-");
    }

    #[test]
    fn times_zero_pad_the_minute() {
        assert_eq!(format_time(Some(9), Some(5)), "9:05");
        assert_eq!(format_time(Some(9), Some(45)), "9:45");
    }

    #[test]
    fn midnight_is_a_valid_time() {
        assert_eq!(format_time(Some(0), Some(0)), "0:00");
    }

    #[test]
    fn missing_time_parts_render_placeholder() {
        assert_eq!(format_time(None, None), "-");
        assert_eq!(format_time(Some(9), None), "-");
        assert_eq!(format_time(None, Some(5)), "-");
    }

    #[test]
    fn loading_state_hides_the_table() {
        let snapshot = ReportSnapshot {
            records: vec![lead("1")],
            is_loading: true,
            ..ReportSnapshot::default()
        };
        let rendered = render_report(&snapshot);
        assert!(rendered.contains("Loading data..."));
        // The record set is not rendered while a read is loading.
        assert!(!rendered.contains("PENDING"));
    }

    #[test]
    fn empty_non_loading_state_is_explicit() {
        let snapshot = ReportSnapshot {
            is_loading: false,
            ..ReportSnapshot::default()
        };
        assert!(render_report(&snapshot).contains("No records found."));
    }

    #[test]
    fn absent_fields_render_placeholders() {
        let snapshot = ReportSnapshot {
            records: vec![lead("1")],
            is_loading: false,
            ..ReportSnapshot::default()
        };
        let rendered = render_report(&snapshot);
        let row = rendered.lines().last().unwrap();
        assert!(row.starts_with('1'));
        assert!(row.contains("- -")); // unknown date and time
        assert!(row.trim_end().ends_with("PENDING"));
    }

    #[test]
    fn in_flight_toggle_masks_the_status_label() {
        let mut snapshot = ReportSnapshot {
            records: vec![lead("1"), lead("2")],
            is_loading: false,
            ..ReportSnapshot::default()
        };
        snapshot.active_toggles.insert("2".to_string());
        let rendered = render_report(&snapshot);
        let rows: Vec<&str> = rendered.lines().rev().take(2).collect();
        // Row for id 2 shows the in-flight marker, row for id 1 its status.
        assert!(rows[0].trim_end().ends_with("..."));
        assert!(rows[1].trim_end().ends_with("PENDING"));
    }
}
