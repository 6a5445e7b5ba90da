use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::{DonorRecord, RegistryOptions};

/// Errors that can occur when reading the donor registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Donor registry not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to open donor registry {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Raw CSV row; numeric columns are parsed after trimming
#[derive(Debug, Deserialize)]
struct RegistryRow {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Age", default)]
    age: String,
    #[serde(rename = "Gender", default)]
    gender: String,
    #[serde(rename = "Blood Type", default)]
    blood_type: String,
    #[serde(rename = "Organ Type", default)]
    organ_type: String,
    #[serde(rename = "HLA Typing", default)]
    hla_typing: String,
    #[serde(rename = "Rh Factor", default)]
    rh_factor: String,
    #[serde(rename = "BMI", default)]
    bmi: String,
    #[serde(rename = "Cause of death", alias = "Cause of Death", default)]
    cause_of_death: String,
    #[serde(rename = "health condition", alias = "Health Condition", default)]
    health_condition: String,
    #[serde(rename = "City", default)]
    city: String,
    #[serde(rename = "State", default)]
    state: String,
    #[serde(rename = "Hospital", default)]
    hospital: String,
}

/// Accepts "40" as well as "40.0" as written by spreadsheet exports
fn parse_age(raw: &str) -> Option<u32> {
    if let Ok(age) = raw.parse::<u32>() {
        return Some(age);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

fn parse_bmi(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl RegistryRow {
    fn into_record(self) -> Option<DonorRecord> {
        let age = parse_age(&self.age)?;
        let bmi = parse_bmi(&self.bmi)?;

        Some(DonorRecord {
            name: self.name,
            age,
            gender: self.gender,
            blood_type: self.blood_type,
            organ_type: self.organ_type,
            hla_typing: self.hla_typing,
            rh_factor: self.rh_factor,
            bmi,
            cause_of_death: self.cause_of_death,
            health_condition: self.health_condition,
            city: self.city,
            state: self.state,
            hospital: self.hospital,
        })
    }
}

/// Parse donor records from CSV with a header row
///
/// Rows without a usable Age or BMI are skipped with a warning.
pub fn read_donors<R: io::Read>(reader: R) -> Result<Vec<DonorRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // Spreadsheet exports may prefix the first header with a UTF-8 BOM
    let headers: csv::StringRecord = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}'))
        .collect();
    reader.set_headers(headers);

    let mut donors = Vec::new();
    for (row_idx, result) in reader.deserialize::<RegistryRow>().enumerate() {
        let row = result?;
        let name = row.name.clone();
        match row.into_record() {
            Some(record) => donors.push(record),
            None => tracing::warn!(
                "Skipping registry row {} ({}): Age or BMI is not numeric",
                row_idx + 1,
                name
            ),
        }
    }

    Ok(donors)
}

/// Derive dropdown data (states, cities per state, hospitals) from a snapshot
pub fn registry_options(pool: &[DonorRecord]) -> RegistryOptions {
    let mut cities_by_state: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut hospitals = BTreeSet::new();

    for donor in pool {
        if !donor.state.is_empty() {
            let cities = cities_by_state.entry(donor.state.clone()).or_default();
            if !donor.city.is_empty() {
                cities.insert(donor.city.clone());
            }
        }
        if !donor.hospital.is_empty() {
            hospitals.insert(donor.hospital.clone());
        }
    }

    RegistryOptions {
        states: cities_by_state.keys().cloned().collect(),
        cities_by_state: cities_by_state
            .into_iter()
            .map(|(state, cities)| (state, cities.into_iter().collect()))
            .collect(),
        hospitals: hospitals.into_iter().collect(),
    }
}

/// CSV-backed donor pool
///
/// Holds only the file location; every snapshot reads the file in full so
/// rows appended by the intake side are visible to the next query.
#[derive(Debug, Clone)]
pub struct DonorRegistry {
    path: PathBuf,
}

impl DonorRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole pool once
    pub fn snapshot(&self) -> Result<Vec<DonorRecord>, RegistryError> {
        let file = std::fs::File::open(&self.path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => RegistryError::NotFound(self.path.clone()),
            _ => RegistryError::Io {
                path: self.path.clone(),
                source,
            },
        })?;
        let donors = read_donors(file).map_err(|source| RegistryError::Csv {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!("Read {} donors from {}", donors.len(), self.path.display());
        Ok(donors)
    }

    /// Dropdown data computed from a fresh snapshot
    pub fn options(&self) -> Result<RegistryOptions, RegistryError> {
        Ok(registry_options(&self.snapshot()?))
    }

    /// Check that the registry file is present
    pub fn health_check(&self) -> bool {
        self.path.is_file()
    }
}
