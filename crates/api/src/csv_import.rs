// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV parsing and validation for bulk vessel-call import.
//!
//! Parsing never touches persistence; the caller decides whether to import
//! once every row is valid.

use csv::StringRecord;
use portcall::NewVesselCall;
use portcall_domain::{
    OperationDuration, PortClock, VesselCall, parse_schedule_timestamp, validate_vessel_call_fields,
    validate_vessel_unique,
};
use std::collections::{HashMap, HashSet};
use time::PrimitiveDateTime;

use crate::error::ApiError;
use crate::request_response::CsvRowInfo;

/// Required CSV column headers (case-insensitive, normalized).
const REQUIRED_HEADERS: &[&str] = &["vessel", "loa", "operation_time", "eta"];

/// The outcome of validating a whole file.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvImportPlan {
    /// Per-row validation results, in file order.
    pub rows: Vec<CsvRowInfo>,
    /// The parsed records of valid rows.
    pub calls: Vec<NewVesselCall>,
}

impl CsvImportPlan {
    /// Returns whether every row passed validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.rows.iter().all(|row| row.errors.is_empty())
    }

    #[must_use]
    pub fn invalid_count(&self) -> usize {
        self.rows.iter().filter(|row| !row.errors.is_empty()).count()
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

fn validate_headers(headers: &StringRecord) -> Result<HashMap<String, usize>, ApiError> {
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| (normalize_header(header), idx))
        .collect();

    let missing: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|required| !header_map.contains_key(*required))
        .collect();

    if !missing.is_empty() {
        return Err(ApiError::InvalidCsvFormat {
            reason: format!("Missing required headers: {}", missing.join(", ")),
        });
    }

    Ok(header_map)
}

/// Parses one row, collecting every problem rather than stopping at the first.
fn parse_csv_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    clock: &PortClock,
) -> Result<NewVesselCall, Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    let get_field = |name: &str| -> Option<String> {
        header_map
            .get(name)
            .and_then(|&idx| record.get(idx))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };
    let mut required = |name: &str| -> String {
        get_field(name).unwrap_or_else(|| {
            errors.push(format!("{name}: required field is missing or empty"));
            String::new()
        })
    };

    let vessel: String = required("vessel");
    let loa_text: String = required("loa");
    let operation_time: String = required("operation_time");
    let eta_text: String = required("eta");
    let cargo: String = get_field("cargo").unwrap_or_default();

    let loa: f64 = if loa_text.is_empty() {
        0.0
    } else {
        loa_text.parse::<f64>().unwrap_or_else(|_| {
            errors.push(format!("loa: invalid number '{loa_text}'"));
            0.0
        })
    };

    if !vessel.is_empty() {
        if let Err(e) = validate_vessel_call_fields(&vessel, loa) {
            errors.push(format!("validation: {e}"));
        }
    }

    if !operation_time.is_empty() {
        if let Err(e) = OperationDuration::parse(&operation_time) {
            errors.push(format!("operation_time: {e}"));
        }
    }

    let eta: Option<PrimitiveDateTime> = if eta_text.is_empty() {
        None
    } else {
        parse_schedule_timestamp(&eta_text, clock)
            .map_err(|e| errors.push(format!("eta: {e}")))
            .ok()
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewVesselCall {
        vessel,
        loa,
        operation_time,
        eta,
        cargo,
    })
}

/// Parses and validates a CSV file of vessel calls.
///
/// Each row is checked on its own, then against the current schedule and
/// the rows above it for duplicate vessels.
///
/// # Arguments
///
/// * `csv_content` - The raw CSV text, header first
/// * `clock` - Resolves the year of `DD/MM HH:mm` timestamps
/// * `schedule` - The current open schedule
///
/// # Errors
///
/// Returns an error if the file cannot be read as CSV or lacks a required
/// header. Row-level problems are reported in the plan instead.
pub fn parse_vessel_call_csv(
    csv_content: &str,
    clock: &PortClock,
    schedule: &[VesselCall],
) -> Result<CsvImportPlan, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_content.as_bytes());

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| ApiError::InvalidCsvFormat {
            reason: format!("Failed to read headers: {e}"),
        })?
        .clone();
    let header_map: HashMap<String, usize> = validate_headers(&headers)?;

    let mut rows: Vec<CsvRowInfo> = Vec::new();
    let mut calls: Vec<NewVesselCall> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (idx, result) in reader.records().enumerate() {
        let row_number: usize = idx + 1;
        let record: StringRecord = result.map_err(|e| ApiError::InvalidCsvFormat {
            reason: format!("Failed to read row {row_number}: {e}"),
        })?;

        match parse_csv_row(&record, &header_map, clock) {
            Ok(call) => {
                let mut errors: Vec<String> = Vec::new();
                let key: String = call.vessel.trim().to_lowercase();
                if !seen.insert(key) {
                    errors.push(format!(
                        "vessel: '{}' appears more than once in the file",
                        call.vessel
                    ));
                }
                if let Err(e) = validate_vessel_unique(&call.vessel, schedule, None) {
                    errors.push(format!("vessel: {e}"));
                }

                let valid: bool = errors.is_empty();
                rows.push(CsvRowInfo {
                    row_number,
                    vessel: Some(call.vessel.clone()),
                    errors,
                });
                if valid {
                    calls.push(call);
                }
            }
            Err(errors) => {
                let vessel: Option<String> = header_map
                    .get("vessel")
                    .and_then(|&i| record.get(i))
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty());
                rows.push(CsvRowInfo {
                    row_number,
                    vessel,
                    errors,
                });
            }
        }
    }

    if rows.is_empty() {
        return Err(ApiError::InvalidCsvFormat {
            reason: String::from("The file has no data rows"),
        });
    }

    Ok(CsvImportPlan { rows, calls })
}
