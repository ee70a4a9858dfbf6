//! Dataset loader — reads the row-oriented crop dataset from CSV.
//!
//! Validation is deliberately shallow: every required column must be
//! present in the header, nothing else is checked. Malformed rows
//! surface as deserialization errors and abort the run.

use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::Path;

/// The ten columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Crop",
    "Crop_Year",
    "Season",
    "State",
    "Area",
    "Production",
    "Annual_Rainfall",
    "Fertilizer",
    "Pesticide",
    "Yield",
];

/// One row of the dataset. Immutable once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct CropRecord {
    #[serde(rename = "Crop")]
    pub crop: String,
    #[serde(rename = "Crop_Year")]
    pub crop_year: i32,
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Area")]
    pub area: f64,
    #[serde(rename = "Production")]
    pub production: f64,
    #[serde(rename = "Annual_Rainfall")]
    pub annual_rainfall: f64,
    #[serde(rename = "Fertilizer")]
    pub fertilizer: f64,
    #[serde(rename = "Pesticide")]
    pub pesticide: f64,
    #[serde(rename = "Yield")]
    pub yield_: f64,
}

/// Dataset loading errors.
#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// Required columns absent from the header.
    MissingColumns(Vec<String>),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Csv(e) => write!(f, "CSV error: {}", e),
            Self::MissingColumns(cols) => write!(
                f,
                "the input file must contain the following columns: {} (missing: {})",
                REQUIRED_COLUMNS.join(", "),
                cols.join(", "),
            ),
        }
    }
}

impl std::error::Error for DatasetError {}

impl From<std::io::Error> for DatasetError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for DatasetError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

/// Load every record from a CSV file.
///
/// Fails before reading any row if a required column is missing from
/// the header, so schema errors always precede geocoding and rendering.
pub fn load_records(path: &Path) -> Result<Vec<CropRecord>, DatasetError> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);

    let headers = rdr.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: CropRecord = result?;
        records.push(record);
    }
    Ok(records)
}

/// First-n preview block for the console, one line per row.
pub fn preview(records: &[CropRecord], n: usize) -> String {
    let mut out = String::new();
    for r in records.iter().take(n) {
        out.push_str(&format!(
            "  {} | {} | {} | {} | area={} production={} yield={}\n",
            r.crop, r.crop_year, r.season.trim(), r.state, r.area, r.production, r.yield_,
        ));
    }
    out
}

/// Distinct state names in first-appearance order.
pub fn distinct_states(records: &[CropRecord]) -> Vec<String> {
    let mut states: Vec<String> = Vec::new();
    for r in records {
        if !states.iter().any(|s| s == &r.state) {
            states.push(r.state.clone());
        }
    }
    states
}

/// Distinct crop names in first-appearance order.
pub fn distinct_crops(records: &[CropRecord]) -> Vec<String> {
    let mut crops: Vec<String> = Vec::new();
    for r in records {
        if !crops.iter().any(|c| c == &r.crop) {
            crops.push(r.crop.clone());
        }
    }
    crops
}
