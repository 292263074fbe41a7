use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A named hour-of-day range, half-open: `start_hour <= hour < end_hour`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DayPart {
    pub label: String,
    pub start_hour: u32,
    pub end_hour: u32,
}

impl DayPart {
    pub fn new(label: &str, start_hour: u32, end_hour: u32) -> Self {
        DayPart {
            label: label.to_string(),
            start_hour,
            end_hour,
        }
    }

    pub fn contains(&self, hour: u32) -> bool {
        hour >= self.start_hour && hour < self.end_hour
    }
}

/// Tunable constants used by the reports.
///
/// Every field has a default, so a partial JSON document only overrides what it names.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Weekly hours above which an employee is on overtime.
    pub overtime_threshold_hours: f64,
    /// Items selling fewer units than this are segmented as "Removal".
    pub removal_below: i64,
    /// Items selling at most this many units (and not "Removal") are "Discount".
    pub discount_up_to: i64,
    pub loyalty_min_orders: i64,
    pub loyalty_min_days: i64,
    /// N for top/bottom item reports when the caller gives no limit.
    pub top_n: usize,
    /// Ingredient stock at or below this quantity is reported as low.
    pub low_stock_threshold: f64,
    /// Checked in order; an order lands in the first part that contains its hour.
    pub day_parts: Vec<DayPart>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            overtime_threshold_hours: 25.0,
            removal_below: 5,
            discount_up_to: 15,
            loyalty_min_orders: 10,
            loyalty_min_days: 5,
            top_n: 5,
            low_stock_threshold: 10.0,
            day_parts: vec![
                DayPart::new("Morning", 7, 12),
                DayPart::new("Afternoon", 12, 17),
                DayPart::new("Evening", 17, 22),
            ],
        }
    }
}

impl ReportConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ReportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.overtime_threshold_hours.is_finite() || self.overtime_threshold_hours <= 0.0 {
            return Err(ReportError::InvalidConfig(format!(
                "overtime_threshold_hours must be positive, got {}",
                self.overtime_threshold_hours
            )));
        }
        if self.removal_below < 0 || self.discount_up_to < self.removal_below {
            return Err(ReportError::InvalidConfig(format!(
                "segmentation cut-offs out of order: removal_below={}, discount_up_to={}",
                self.removal_below, self.discount_up_to
            )));
        }
        if self.loyalty_min_orders < 1 || self.loyalty_min_days < 1 {
            return Err(ReportError::InvalidConfig(
                "loyalty minimums must be at least 1".to_string(),
            ));
        }
        if self.top_n == 0 || self.top_n > crate::report::MAX_LIMIT {
            return Err(ReportError::InvalidConfig(format!(
                "top_n must be within 1..={}, got {}",
                crate::report::MAX_LIMIT,
                self.top_n
            )));
        }
        if !self.low_stock_threshold.is_finite() || self.low_stock_threshold < 0.0 {
            return Err(ReportError::InvalidConfig(format!(
                "low_stock_threshold must be non-negative, got {}",
                self.low_stock_threshold
            )));
        }
        let mut labels = HashSet::new();
        for part in &self.day_parts {
            if part.start_hour >= part.end_hour || part.end_hour > 24 {
                return Err(ReportError::InvalidConfig(format!(
                    "day part {} has invalid hours {}..{}",
                    part.label, part.start_hour, part.end_hour
                )));
            }
            if !labels.insert(part.label.as_str()) {
                return Err(ReportError::InvalidConfig(format!(
                    "day part label {} is used more than once",
                    part.label
                )));
            }
        }
        Ok(())
    }

    /// Position in `day_parts` of the first part containing `hour`, if any.
    pub fn day_part_index(&self, hour: u32) -> Option<usize> {
        self.day_parts.iter().position(|part| part.contains(hour))
    }
}
