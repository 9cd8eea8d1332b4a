use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::display;
use crate::error::DashboardError;
use crate::models::{
    Assessment, AssessmentData, AssessmentStatus, AssessmentTypeCode, Clinician, DashboardStats,
    Patient, StatusOption,
};

const SAMPLE: &str = include_str!("../data/assessments.json");

/// The bundled sample dataset.
pub fn sample() -> Result<AssessmentData, DashboardError> {
    serde_json::from_str(SAMPLE).map_err(|source| DashboardError::Json {
        path: PathBuf::from("<bundled sample>"),
        source,
    })
}

pub fn load_json(path: &Path) -> Result<AssessmentData, DashboardError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data: AssessmentData =
        serde_json::from_str(&raw).map_err(|source| DashboardError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    info!(
        path = %path.display(),
        records = data.assessments.len(),
        "loaded assessment dataset"
    );
    Ok(data)
}

/// Load from `path` when given, otherwise fall back to the bundled sample.
pub fn load(path: Option<&Path>) -> Result<AssessmentData, DashboardError> {
    match path {
        Some(path) => load_json(path),
        None => {
            let data = sample()?;
            info!(records = data.assessments.len(), "using bundled sample dataset");
            Ok(data)
        }
    }
}

pub fn write_json(path: &Path, data: &AssessmentData) -> Result<(), DashboardError> {
    let body = serde_json::to_string_pretty(data).map_err(|source| DashboardError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, body).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Headline counts for a set of records. Trends need history, so they stay at zero.
pub fn summarize_stats(assessments: &[Assessment]) -> DashboardStats {
    let count = |status: AssessmentStatus| {
        assessments.iter().filter(|a| a.status == status).count() as u32
    };
    let patients: HashSet<&str> = assessments.iter().map(|a| a.patient.id.as_str()).collect();

    DashboardStats {
        total_assessments: assessments.len() as u32,
        completed: count(AssessmentStatus::Completed),
        in_progress: count(AssessmentStatus::InProgress),
        active_patients: patients.len() as u32,
        ..DashboardStats::default()
    }
}

pub fn status_options() -> Vec<StatusOption> {
    AssessmentStatus::ALL
        .iter()
        .map(|status| StatusOption {
            value: *status,
            label: display::status_label(*status).to_string(),
        })
        .collect()
}

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    id: String,
    patient_id: String,
    patient_name: String,
    patient_email: String,
    date_of_birth: NaiveDate,
    #[serde(rename = "type")]
    type_name: String,
    type_code: AssessmentTypeCode,
    status: AssessmentStatus,
    score: Option<f64>,
    date: DateTime<Utc>,
    clinician: String,
    #[serde(default)]
    notes: String,
}

impl From<CsvRow> for Assessment {
    fn from(row: CsvRow) -> Self {
        Assessment {
            id: row.id,
            patient: Patient {
                id: row.patient_id,
                initials: display::initials(&row.patient_name),
                name: row.patient_name,
                date_of_birth: row.date_of_birth,
                email: row.patient_email,
            },
            type_name: row.type_name,
            type_code: row.type_code,
            status: row.status,
            score: row.score,
            score_interpretation: None,
            date: row.date,
            duration: None,
            administered_by: Clinician {
                id: String::new(),
                name: row.clinician,
                title: String::new(),
            },
            subscales: Vec::new(),
            notes: row.notes,
        }
    }
}

pub fn import_csv(path: &Path) -> Result<Vec<Assessment>, DashboardError> {
    let file = File::open(path).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_csv(file)?;
    info!(path = %path.display(), records = records.len(), "imported csv rows");
    Ok(records)
}

fn read_csv<R: std::io::Read>(reader: R) -> Result<Vec<Assessment>, DashboardError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.map_err(|source| DashboardError::Csv {
            row: index + 1,
            source,
        })?;
        records.push(Assessment::from(row));
    }

    Ok(records)
}
