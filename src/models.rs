use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AssessmentStatus {
    Completed,
    InProgress,
    Pending,
    Cancelled,
}

impl AssessmentStatus {
    pub const ALL: [AssessmentStatus; 4] = [
        AssessmentStatus::Completed,
        AssessmentStatus::InProgress,
        AssessmentStatus::Pending,
        AssessmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentStatus::Completed => "completed",
            AssessmentStatus::InProgress => "in-progress",
            AssessmentStatus::Pending => "pending",
            AssessmentStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentTypeCode {
    Mmpi,
    Beck,
    Anxiety,
    Personality,
}

impl AssessmentTypeCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentTypeCode::Mmpi => "mmpi",
            AssessmentTypeCode::Beck => "beck",
            AssessmentTypeCode::Anxiety => "anxiety",
            AssessmentTypeCode::Personality => "personality",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clinician {
    pub id: String,
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscale {
    pub name: String,
    pub score: f64,
    pub max_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub patient: Patient,
    /// Display name of the instrument, e.g. "MMPI-2".
    #[serde(rename = "type")]
    pub type_name: String,
    pub type_code: AssessmentTypeCode,
    pub status: AssessmentStatus,
    pub score: Option<f64>,
    pub score_interpretation: Option<String>,
    pub date: DateTime<Utc>,
    pub duration: Option<String>,
    pub administered_by: Clinician,
    #[serde(default)]
    pub subscales: Vec<Subscale>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_assessments: u32,
    pub total_assessments_trend: f64,
    pub completed: u32,
    pub completed_trend: f64,
    pub in_progress: u32,
    pub in_progress_trend: f64,
    pub active_patients: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentTypeOption {
    pub code: AssessmentTypeCode,
    pub name: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusOption {
    pub value: AssessmentStatus,
    pub label: String,
}

/// The dataset document: records plus the static dashboard metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentData {
    #[serde(default)]
    pub stats: DashboardStats,
    pub assessments: Vec<Assessment>,
    #[serde(default)]
    pub assessment_types: Vec<AssessmentTypeOption>,
    #[serde(default)]
    pub status_options: Vec<StatusOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreRange {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusSummary {
    pub status: AssessmentStatus,
    pub count: usize,
    pub avg_score: Option<f64>,
}
