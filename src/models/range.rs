use crate::utils::constants::DEFAULT_RANGE_TABLE;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::{Validate, ValidationError};

/// Physical bounds for one measurement channel, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_bounds"))]
pub struct StationRange {
    #[validate(length(min = 1))]
    pub channel: String,

    pub min: f64,

    pub max: f64,
}

impl StationRange {
    pub fn new(channel: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            channel: channel.into(),
            min,
            max,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

fn validate_bounds(range: &StationRange) -> Result<(), ValidationError> {
    if !range.min.is_finite() || !range.max.is_finite() {
        return Err(ValidationError::new("non_finite_bound"));
    }
    if range.min > range.max {
        return Err(ValidationError::new("min_exceeds_max"));
    }
    Ok(())
}

/// The built-in bounds for the fifteen monitored channels
pub fn default_ranges() -> Vec<StationRange> {
    DEFAULT_RANGE_TABLE
        .iter()
        .map(|&(channel, min, max)| StationRange::new(channel, min, max))
        .collect()
}

/// Read-only lookup from channel name to its bounds.
#[derive(Debug, Clone, Default)]
pub struct RangeTable {
    ranges: HashMap<String, StationRange>,
}

impl RangeTable {
    /// Later entries replace earlier ones for the same channel.
    pub fn from_ranges(ranges: &[StationRange]) -> Self {
        let ranges = ranges
            .iter()
            .map(|r| (r.channel.clone(), r.clone()))
            .collect();
        Self { ranges }
    }

    pub fn get(&self, channel: &str) -> Option<&StationRange> {
        self.ranges.get(channel)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
