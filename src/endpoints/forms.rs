//! Form and query payloads for the HTML endpoints
//!
//! Every field arrives as a string and is parsed strictly: a malformed number
//! or date is a `BadRequest`, never a silent zero.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::StepType;
use crate::services::{BatchInput, SpeciesInput, StepInput};

#[derive(Debug, Default, Deserialize)]
pub struct BatchForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub species_id: String,
    #[serde(default)]
    pub num_cells: String,
    #[serde(default)]
    pub seeds_per_cell: String,
    #[serde(default)]
    pub total_seeds: String,
    #[serde(default)]
    pub date_created: String,
}

impl BatchForm {
    pub fn into_input(self) -> Result<BatchInput> {
        let total_seeds = match self.total_seeds.as_str() {
            "" => None,
            raw => Some(parse_number("total seeds", raw)?),
        };

        let input = BatchInput {
            species_id: parse_number("species", &self.species_id)?,
            num_cells: parse_number("number of cells", &self.num_cells)?,
            seeds_per_cell: parse_number("seeds per cell", &self.seeds_per_cell)?,
            total_seeds,
            date_created: parse_date(&self.date_created)?,
        };
        input.validate()?;
        Ok(input)
    }
}

/// Species form with its step rows as parallel arrays. `step_moist[]` lists
/// the row indexes whose moist box was checked.
#[derive(Debug, Default, Deserialize)]
pub struct SpeciesForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "step_type[]", default)]
    pub step_types: Vec<String>,
    #[serde(rename = "step_moist[]", default)]
    pub step_moist: Vec<String>,
    #[serde(rename = "step_days[]", default)]
    pub step_days: Vec<String>,
}

impl SpeciesForm {
    pub fn into_input(self) -> Result<SpeciesInput> {
        let mut steps = Vec::with_capacity(self.step_types.len());

        for (index, raw_type) in self.step_types.iter().enumerate() {
            if raw_type.is_empty() {
                continue;
            }

            let step_type = raw_type
                .parse::<StepType>()
                .map_err(AppError::BadRequest)?;
            let days = match self.step_days.get(index) {
                Some(raw) => parse_number("step days", raw)?,
                None => {
                    return Err(AppError::BadRequest(format!(
                        "Missing days for step {}",
                        index + 1
                    )))
                }
            };
            let position = index.to_string();
            let moist = self.step_moist.iter().any(|m| *m == position);

            steps.push(StepInput {
                step_type,
                moist,
                days,
            });
        }

        let input = SpeciesInput {
            name: self.name.trim().to_string(),
            steps,
        };
        input.validate()?;
        Ok(input)
    }
}

/// Body of the delete forms
#[derive(Debug, Default, Deserialize)]
pub struct IdForm {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

/// Parse a record id submitted with a write. Malformed ids are a `BadRequest`.
pub fn parse_record_id(raw: &str) -> Result<i64> {
    parse_number("id", raw)
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T> {
    if raw.is_empty() {
        return Err(AppError::BadRequest(format!("Missing {}", field)));
    }
    raw.parse::<T>()
        .map_err(|_| AppError::BadRequest(format!("Invalid {}: '{}'", field, raw)))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", raw))
    })
}
