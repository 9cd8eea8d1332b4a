use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Assessment, AssessmentStatus, AssessmentTypeCode, Clinician, Patient};

pub fn at(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid rfc3339 timestamp")
        .with_timezone(&Utc)
}

pub fn assessment(id: &str, patient_id: &str, patient_name: &str) -> Assessment {
    Assessment {
        id: id.to_string(),
        patient: Patient {
            id: patient_id.to_string(),
            name: patient_name.to_string(),
            initials: crate::display::initials(patient_name),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).expect("valid date"),
            email: "patient@example.com".to_string(),
        },
        type_name: "MMPI-2".to_string(),
        type_code: AssessmentTypeCode::Mmpi,
        status: AssessmentStatus::Completed,
        score: Some(72.0),
        score_interpretation: Some("Within normal limits".to_string()),
        date: at("2024-01-15T10:30:00Z"),
        duration: Some("1h 45m".to_string()),
        administered_by: Clinician {
            id: "CLN-001".to_string(),
            name: "Dr. Rebecca Torres".to_string(),
            title: "Clinical Psychologist".to_string(),
        },
        subscales: Vec::new(),
        notes: String::new(),
    }
}

pub fn numbered(count: usize) -> Vec<Assessment> {
    (1..=count)
        .map(|n| {
            assessment(
                &format!("ASM-{n:03}"),
                &format!("PAT-{n:04}"),
                &format!("Patient {n}"),
            )
        })
        .collect()
}
