use std::collections::HashMap;
use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::display::{self, format_score, status_label};
use crate::filter::FilterState;
use crate::models::{Assessment, AssessmentData, AssessmentStatus, StatusSummary};
use crate::pagination;
use crate::session::DashboardSession;

const RECENT_DAYS: i64 = 30;

pub fn summarize_by_status(assessments: &[&Assessment]) -> Vec<StatusSummary> {
    let mut map: HashMap<AssessmentStatus, (usize, f64, usize)> = HashMap::new();

    for assessment in assessments {
        let entry = map.entry(assessment.status).or_insert((0, 0.0, 0));
        entry.0 += 1;
        if let Some(score) = assessment.score {
            entry.1 += score;
            entry.2 += 1;
        }
    }

    let mut summaries: Vec<StatusSummary> = AssessmentStatus::ALL
        .iter()
        .filter_map(|status| {
            map.get(status).map(|(count, total, scored)| StatusSummary {
                status: *status,
                count: *count,
                avg_score: if *scored == 0 {
                    None
                } else {
                    Some(total / *scored as f64)
                },
            })
        })
        .collect();

    // Stable sort keeps the canonical status order for ties.
    summaries.sort_by(|a, b| b.count.cmp(&a.count));
    summaries
}

fn describe_filters(filters: &FilterState) -> Vec<String> {
    let mut parts = Vec::new();
    if !filters.search.is_empty() {
        parts.push(format!("search \"{}\"", filters.search));
    }
    if let Some(status) = filters.status {
        parts.push(format!("status {}", status.as_str()));
    }
    if let Some(type_code) = filters.type_code {
        parts.push(format!("type {}", type_code.as_str()));
    }
    if let Some(range) = filters.date_range {
        if let Some(start) = range.start {
            parts.push(format!("from {}", start.to_rfc3339()));
        }
        if let Some(end) = range.end {
            parts.push(format!("to {}", end.to_rfc3339()));
        }
    }
    parts
}

pub fn build_report(
    data: &AssessmentData,
    session: &DashboardSession,
    now: DateTime<Utc>,
) -> String {
    let filtered = session.all_filtered();
    let page = session.page();
    let state = session.pagination();
    let summaries = summarize_by_status(&filtered);
    let recent = filtered
        .iter()
        .filter(|a| display::is_within_days(a.date, RECENT_DAYS, now))
        .count();

    let mut output = String::new();

    let _ = writeln!(output, "# Assessment Report");
    let _ = writeln!(output, "Generated {}", display::format_date_time(now));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Dashboard");
    let stats = &data.stats;
    let _ = writeln!(
        output,
        "- Total assessments: {} ({:+.1}%)",
        stats.total_assessments, stats.total_assessments_trend
    );
    let _ = writeln!(
        output,
        "- Completed: {} ({:+.1}%)",
        stats.completed, stats.completed_trend
    );
    let _ = writeln!(
        output,
        "- In progress: {} ({:+.1}%)",
        stats.in_progress, stats.in_progress_trend
    );
    let _ = writeln!(output, "- Active patients: {}", stats.active_patients);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Filters");
    if session.filters().is_empty() {
        let _ = writeln!(
            output,
            "None (showing all {} assessments).",
            session.records().len()
        );
    } else {
        for filter in describe_filters(session.filters()) {
            let _ = writeln!(output, "- {filter}");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Status Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No assessments match the current filters.");
    } else {
        for summary in summaries.iter() {
            let average = match summary.avg_score {
                Some(avg) => format!("avg score {avg:.1}"),
                None => "no scores".to_string(),
            };
            let _ = writeln!(
                output,
                "- {}: {} assessments ({})",
                status_label(summary.status),
                summary.count,
                average
            );
        }
        let _ = writeln!(output, "- Within the last {RECENT_DAYS} days: {recent}");
    }

    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "## Page {} of {} ({} results)",
        state.current_page,
        state.total_pages(),
        state.total_items
    );

    if page.is_empty() {
        let _ = writeln!(output, "No assessments match the current filters.");
    } else {
        let _ = writeln!(output, "| ID | Patient | Type | Status | Score | Date |");
        let _ = writeln!(output, "|----|---------|------|--------|-------|------|");
        for assessment in page.iter() {
            let _ = writeln!(
                output,
                "| {} | {} ({}) | {} | {} | {} | {} |",
                assessment.id,
                assessment.patient.name,
                assessment.patient.id,
                assessment.type_name,
                status_label(assessment.status),
                format_score(assessment.score),
                display::format_date(assessment.date)
            );
        }
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "Pages: {}",
            pagination::render_controls(&session.page_numbers(), state.current_page)
        );
    }

    output
}

pub fn build_detail(assessment: &Assessment) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# {} · {}", assessment.id, assessment.type_name);
    let _ = writeln!(output);
    let patient = &assessment.patient;
    let _ = writeln!(output, "## Patient");
    let _ = writeln!(output, "- [{}] {} ({})", patient.initials, patient.name, patient.id);
    let _ = writeln!(output, "- Born {}", patient.date_of_birth.format("%b %-d, %Y"));
    let _ = writeln!(output, "- {}", patient.email);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Session");
    let _ = writeln!(output, "- Status: {}", status_label(assessment.status));
    let _ = writeln!(output, "- Date: {}", display::format_date_time(assessment.date));
    let _ = writeln!(
        output,
        "- Duration: {}",
        assessment.duration.as_deref().unwrap_or("—")
    );
    let clinician = &assessment.administered_by;
    if clinician.title.is_empty() {
        let _ = writeln!(output, "- Administered by: {}", clinician.name);
    } else {
        let _ = writeln!(
            output,
            "- Administered by: {}, {}",
            clinician.name, clinician.title
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Score");
    let _ = writeln!(output, "- Overall: {}", format_score(assessment.score));
    if let Some(interpretation) = &assessment.score_interpretation {
        let _ = writeln!(output, "- Interpretation: {interpretation}");
    }
    for subscale in assessment.subscales.iter() {
        let _ = writeln!(
            output,
            "- {}: {:.0} / {:.0}",
            subscale.name, subscale.score, subscale.max_score
        );
    }

    if !assessment.notes.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Notes");
        let _ = writeln!(output, "{}", assessment.notes);
    }

    output
}
