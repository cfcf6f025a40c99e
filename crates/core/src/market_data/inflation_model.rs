use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::MONTHS_PER_YEAR;
use crate::errors::{Result, ValidationError};

/// Monthly consumer inflation, percent per month, addressed by year.
///
/// Each year holds its months in calendar order. Only the most recent year
/// may be incomplete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InflationTable {
    years: BTreeMap<i32, Vec<f64>>,
}

impl InflationTable {
    pub fn from_years(years: BTreeMap<i32, Vec<f64>>) -> Self {
        InflationTable { years }
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.years.keys().next_back().copied()
    }

    /// Years from the most recent backwards.
    pub fn years_desc(&self) -> impl Iterator<Item = (i32, &[f64])> {
        self.years
            .iter()
            .rev()
            .map(|(year, months)| (*year, months.as_slice()))
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.years.contains_key(&year)
    }

    /// Number of months known for `year`, zero when the year is absent.
    pub fn months_in(&self, year: i32) -> usize {
        self.years.get(&year).map_or(0, Vec::len)
    }

    /// Rate for a 1-based `month` of `year`.
    pub fn rate(&self, year: i32, month: u32) -> Option<f64> {
        let index = (month as usize).checked_sub(1)?;
        self.years.get(&year)?.get(index).copied()
    }

    /// Adds a forward-looking estimate for the month after the last known one.
    ///
    /// The estimate extends a partial latest year, or starts the next year
    /// when the latest one is complete.
    pub fn with_extra_estimate(mut self, estimate: f64) -> Self {
        let Some(latest) = self.latest_year() else {
            return self;
        };
        let months = self.years.entry(latest).or_default();
        if months.len() < MONTHS_PER_YEAR {
            months.push(estimate);
            debug!("Extra inflation estimate {} appended to {}", estimate, latest);
        } else {
            self.years.insert(latest + 1, vec![estimate]);
            debug!("Extra inflation estimate {} starts {}", estimate, latest + 1);
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let latest = self.latest_year();
        for (year, months) in &self.years {
            if months.is_empty() || months.len() > MONTHS_PER_YEAR {
                return Err(ValidationError::InvalidInput(format!(
                    "Inflation year {} holds {} months",
                    year,
                    months.len()
                ))
                .into());
            }
            if months.len() < MONTHS_PER_YEAR && Some(*year) != latest {
                return Err(ValidationError::InvalidInput(format!(
                    "Inflation year {} is incomplete but is not the latest year",
                    year
                ))
                .into());
            }
            if let Some(bad) = months.iter().find(|rate| !rate.is_finite()) {
                return Err(ValidationError::InvalidInput(format!(
                    "Inflation year {} holds a non-finite rate {}",
                    year, bad
                ))
                .into());
            }
        }
        Ok(())
    }
}
