use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::entities::candidate::Candidate;
use crate::domain::visibility::is_known_field;
use crate::errors::AppError;

/// Exported columns, in order, with their human-readable header labels.
/// Same selection as the legacy admin export action.
pub const EXPORT_FIELDS: &[(&str, &str)] = &[
    ("username", "Name"),
    ("city", "City"),
    ("phone", "Phone"),
    ("bachelor_school", "Bachelor school"),
    ("master_school", "Master school"),
    ("degree", "Degree"),
    ("first_result", "First round result"),
    ("first_interviewer_id", "First interviewer"),
    ("second_result", "Second round result"),
    ("second_interviewer_id", "Second interviewer"),
    ("hr_result", "HR result"),
    ("hr_score", "HR score"),
    ("hr_remark", "HR remark"),
    ("hr_interviewer_id", "HR interviewer"),
];

pub const EXPORT_FILENAME_PREFIX: &str = "recruitment-candidates-list";

pub fn export_filename(date: NaiveDate) -> String {
    format!("{}-{}.csv", EXPORT_FILENAME_PREFIX, date.format("%Y%m%d"))
}

/// Serializes the selected candidates as CSV: one header row of labels, one
/// row per record with raw values.
pub fn write_csv(candidates: &[Candidate]) -> Result<Vec<u8>, AppError> {
    write_csv_with(EXPORT_FIELDS, candidates)
}

fn write_csv_with(
    fields: &[(&str, &str)],
    candidates: &[Candidate],
) -> Result<Vec<u8>, AppError> {
    // A field list referencing a nonexistent attribute is a configuration
    // defect: fail before emitting anything, not per row.
    for &(name, _) in fields {
        if !is_known_field(name) {
            return Err(AppError::InternalError(format!(
                "Export field `{}` does not exist on candidate",
                name
            )));
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(fields.iter().map(|(_, label)| *label))?;

    for candidate in candidates {
        let doc = serde_json::to_value(candidate)?;
        writer.write_record(
            fields
                .iter()
                .map(|(name, _)| cell(doc.get(*name).unwrap_or(&Value::Null))),
        )?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::InternalError(format!("CSV flush failed: {}", e)))
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
