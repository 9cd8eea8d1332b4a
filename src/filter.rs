use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::DashboardError;
use crate::models::{Assessment, AssessmentStatus, AssessmentTypeCode};

/// Inclusive date bounds. Either end may be left open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    fn contains(&self, date: DateTime<Utc>) -> bool {
        if self.start.is_some_and(|start| date < start) {
            return false;
        }
        if self.end.is_some_and(|end| date > end) {
            return false;
        }
        true
    }
}

/// Active constraints for the listing. Empty fields constrain nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub status: Option<AssessmentStatus>,
    pub type_code: Option<AssessmentTypeCode>,
    pub date_range: Option<DateRange>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.status.is_none()
            && self.type_code.is_none()
            && self.date_range.map_or(true, |range| range.is_open())
    }

    pub fn matches(&self, assessment: &Assessment) -> bool {
        if !self.search.is_empty() && !matches_search(assessment, &self.search.to_lowercase()) {
            return false;
        }

        if self.status.is_some_and(|status| assessment.status != status) {
            return false;
        }

        if self
            .type_code
            .is_some_and(|type_code| assessment.type_code != type_code)
        {
            return false;
        }

        match self.date_range {
            Some(range) => range.contains(assessment.date),
            None => true,
        }
    }
}

fn matches_search(assessment: &Assessment, needle: &str) -> bool {
    [
        assessment.patient.name.as_str(),
        assessment.patient.id.as_str(),
        assessment.id.as_str(),
    ]
    .iter()
    .any(|haystack| haystack.to_lowercase().contains(needle))
}

/// Keep the records that pass every active constraint, in input order.
pub fn apply_filters<'a>(records: &'a [Assessment], filters: &FilterState) -> Vec<&'a Assessment> {
    records
        .iter()
        .filter(|assessment| filters.matches(assessment))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Start,
    End,
}

/// Parse a date bound from user input. A bare day expands to the first
/// instant of that day for a start bound and the last for an end bound.
pub fn parse_bound(raw: &str, kind: BoundKind) -> Result<DateTime<Utc>, DashboardError> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| DashboardError::InvalidDate(raw.to_string()))?;
    let time = match kind {
        BoundKind::Start => NaiveTime::MIN,
        BoundKind::End => NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
            .ok_or_else(|| DashboardError::InvalidDate(raw.to_string()))?,
    };
    Ok(day.and_time(time).and_utc())
}
