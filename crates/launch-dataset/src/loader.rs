//! CSV ingestion for the launch table
//!
//! The source must carry the four required headers below. Any other columns
//! (flight number, mission outcome, booster version, ...) are ignored.

use crate::dataset::Dataset;
use crate::error::DataLoadError;
use crate::record::{LaunchRecord, Outcome};
use serde::Deserialize;
use std::fs::File;
use std::io;
use std::path::Path;

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const OUTCOME_COLUMN: &str = "class";
pub const BOOSTER_COLUMN: &str = "Booster Version Category";

const REQUIRED_COLUMNS: [&str; 4] = [SITE_COLUMN, PAYLOAD_COLUMN, OUTCOME_COLUMN, BOOSTER_COLUMN];

/// Raw row as it appears on disk; blank cells deserialize to `None`
#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Launch Site")]
    launch_site: Option<String>,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: Option<f64>,
    #[serde(rename = "class")]
    class: Option<f64>,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: Option<String>,
}

impl RawLaunchRow {
    fn into_record(self, row: usize) -> Result<LaunchRecord, DataLoadError> {
        let launch_site = self.launch_site.ok_or(DataLoadError::MissingField {
            row,
            column: SITE_COLUMN,
        })?;
        let payload_mass_kg = self.payload_mass_kg.ok_or(DataLoadError::MissingField {
            row,
            column: PAYLOAD_COLUMN,
        })?;
        let class = self.class.ok_or(DataLoadError::MissingField {
            row,
            column: OUTCOME_COLUMN,
        })?;
        let booster_version_category =
            self.booster_version_category
                .ok_or(DataLoadError::MissingField {
                    row,
                    column: BOOSTER_COLUMN,
                })?;

        let outcome =
            Outcome::from_value(class).ok_or(DataLoadError::InvalidOutcome { row, value: class })?;

        Ok(LaunchRecord {
            launch_site,
            payload_mass_kg,
            outcome,
            booster_version_category,
        })
    }
}

/// Load the launch table from a CSV file
///
/// # Errors
/// Returns [`DataLoadError`] when the file is missing, a required column or
/// cell is absent, or a value fails validation.
pub fn load(path: impl AsRef<Path>) -> Result<Dataset, DataLoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DataLoadError::io(path, source))?;
    let dataset = load_from_reader(file)?;

    let bounds = dataset.payload_bounds();
    tracing::info!(
        path = %path.display(),
        rows = dataset.len(),
        sites = dataset.sites().len(),
        "Loaded launch table (payload {}..={} kg)",
        bounds.min,
        bounds.max
    );
    Ok(dataset)
}

/// Load the launch table from any CSV reader
///
/// # Errors
/// Same as [`load`], minus the file-open failure.
pub fn load_from_reader<R: io::Read>(reader: R) -> Result<Dataset, DataLoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|source| DataLoadError::Malformed { row: 0, source })?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for (idx, result) in rdr.deserialize::<RawLaunchRow>().enumerate() {
        let row = idx + 1;
        let raw = result.map_err(|source| DataLoadError::Malformed { row, source })?;
        records.push(raw.into_record(row)?);
    }

    tracing::debug!("Parsed {} launch rows", records.len());
    Dataset::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category\n";

    #[test]
    fn ignores_extra_columns_and_trims() {
        let csv = format!(
            "{HEADER}1, CCAFS LC-40 ,0,0,F9 v1.0  B0003,v1.0\n2,CCAFS LC-40,1,525,F9 v1.0  B0005,v1.0\n"
        );
        let ds = load_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.sites(), ["CCAFS LC-40"]);
        assert_eq!(ds.records()[1].outcome, Outcome::Success);
        assert_eq!(ds.records()[1].booster_version_category, "v1.0");
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "Launch Site,class,Payload Mass (kg)\nA,1,100\n";
        let err = load_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(BOOSTER_COLUMN)));
    }

    #[test]
    fn blank_cell_is_missing_field() {
        let csv = format!("{HEADER}1,A,1,,F9,v1.1\n");
        let err = load_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::MissingField { row: 1, column: PAYLOAD_COLUMN }
        ));
    }

    #[test]
    fn non_numeric_payload_is_malformed() {
        let csv = format!("{HEADER}1,A,1,heavy,F9,v1.1\n");
        let err = load_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::Malformed { row: 1, .. }));
    }

    #[test]
    fn non_binary_class_is_rejected() {
        let csv = format!("{HEADER}1,A,2,100,F9,v1.1\n");
        let err = load_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidOutcome { row: 1, .. }));
    }

    #[test]
    fn header_only_is_empty() {
        let err = load_from_reader(HEADER.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::Empty));
    }
}
