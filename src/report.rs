use crate::error::{ReportError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound for the `limit` parameter.
pub const MAX_LIMIT: usize = 1000;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One result row: column name -> value.
pub type Row = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    WeeklyHours,
    OvertimeEmployees,
    HoursRank,
    ShiftOverlaps,
    UnderstaffedShifts,
    StaffCost,
    RevenueByHour,
    RevenueByMonth,
    RevenueByCategory,
    ItemSales,
    TopItems,
    BottomItems,
    ItemSegmentation,
    OrdersByDayPart,
    LoyaltyCustomers,
    SalesSummary,
    LowInventory,
    IngredientUsage,
}

impl ReportKind {
    pub const ALL: [ReportKind; 18] = [
        ReportKind::WeeklyHours,
        ReportKind::OvertimeEmployees,
        ReportKind::HoursRank,
        ReportKind::ShiftOverlaps,
        ReportKind::UnderstaffedShifts,
        ReportKind::StaffCost,
        ReportKind::RevenueByHour,
        ReportKind::RevenueByMonth,
        ReportKind::RevenueByCategory,
        ReportKind::ItemSales,
        ReportKind::TopItems,
        ReportKind::BottomItems,
        ReportKind::ItemSegmentation,
        ReportKind::OrdersByDayPart,
        ReportKind::LoyaltyCustomers,
        ReportKind::SalesSummary,
        ReportKind::LowInventory,
        ReportKind::IngredientUsage,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReportKind::WeeklyHours => "weekly-hours",
            ReportKind::OvertimeEmployees => "overtime-employees",
            ReportKind::HoursRank => "hours-rank",
            ReportKind::ShiftOverlaps => "shift-overlaps",
            ReportKind::UnderstaffedShifts => "understaffed-shifts",
            ReportKind::StaffCost => "staff-cost",
            ReportKind::RevenueByHour => "revenue-by-hour",
            ReportKind::RevenueByMonth => "revenue-by-month",
            ReportKind::RevenueByCategory => "revenue-by-category",
            ReportKind::ItemSales => "item-sales",
            ReportKind::TopItems => "top-items",
            ReportKind::BottomItems => "bottom-items",
            ReportKind::ItemSegmentation => "item-segmentation",
            ReportKind::OrdersByDayPart => "orders-by-day-part",
            ReportKind::LoyaltyCustomers => "loyalty-customers",
            ReportKind::SalesSummary => "sales-summary",
            ReportKind::LowInventory => "low-inventory",
            ReportKind::IngredientUsage => "ingredient-usage",
        }
    }

    /// Output columns in display order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            ReportKind::WeeklyHours | ReportKind::OvertimeEmployees => &[
                "staff_id",
                "staff_name",
                "week_start",
                "shift_count",
                "total_worked_hours",
            ],
            ReportKind::HoursRank => &["staff_id", "staff_name", "total_worked_hours", "hours_rank"],
            ReportKind::ShiftOverlaps | ReportKind::UnderstaffedShifts => &[
                "shift_id",
                "date",
                "start_time",
                "end_time",
                "staff_count",
                "staff_names",
            ],
            ReportKind::StaffCost => &[
                "staff_id",
                "staff_name",
                "position",
                "hourly_rate",
                "total_worked_hours",
                "total_cost",
            ],
            ReportKind::RevenueByHour => &["hour", "order_count", "items_sold", "revenue"],
            ReportKind::RevenueByMonth => &["month", "order_count", "items_sold", "revenue"],
            ReportKind::RevenueByCategory => &["category", "items_sold", "revenue"],
            ReportKind::ItemSales | ReportKind::TopItems | ReportKind::BottomItems => &[
                "item_id",
                "item_name",
                "category",
                "quantity_sold",
                "revenue",
            ],
            ReportKind::ItemSegmentation => &["item_id", "item_name", "quantity_sold", "segment"],
            ReportKind::OrdersByDayPart => &["day_part", "order_count", "total_orders"],
            ReportKind::LoyaltyCustomers => &[
                "customer_name",
                "order_count",
                "distinct_days",
                "total_spent",
            ],
            ReportKind::SalesSummary => &[
                "order_count",
                "items_sold",
                "total_revenue",
                "average_order_value",
            ],
            ReportKind::LowInventory => &["ingredient_id", "ingredient_name", "unit", "quantity"],
            ReportKind::IngredientUsage => &[
                "ingredient_id",
                "ingredient_name",
                "unit",
                "used_quantity",
                "in_stock",
                "usage_cost",
            ],
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ReportError::UnknownReport(s.to_string()))
    }
}

/// Caller supplied parameters. All optional; the date window is inclusive on both ends.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ReportParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub threshold: Option<f64>,
    pub limit: Option<usize>,
}

impl ReportParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `YYYY-MM-DD` bounds; either may be omitted.
    pub fn with_window(mut self, from: Option<&str>, to: Option<&str>) -> Result<Self> {
        self.from = from.map(|value| parse_date("from", value)).transpose()?;
        self.to = to.map(|value| parse_date("to", value)).transpose()?;
        self.validate_window()?;
        Ok(self)
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn validate_window(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(ReportError::InvalidDateRange {
                    from: from.format(DATE_FORMAT).to_string(),
                    to: to.format(DATE_FORMAT).to_string(),
                });
            }
        }
        Ok(())
    }

    /// Window bounds as SQLite date strings, bound as `?1` and `?2` by every windowed query.
    pub fn window_args(&self) -> (Option<String>, Option<String>) {
        (
            self.from.map(|d| d.format(DATE_FORMAT).to_string()),
            self.to.map(|d| d.format(DATE_FORMAT).to_string()),
        )
    }
}

fn parse_date(param: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ReportError::InvalidDate {
        param,
        value: value.to_string(),
    })
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ReportOutput {
    pub report: ReportKind,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Serialize for ReportKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl ReportOutput {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column across all rows.
    pub fn column(&self, name: &str) -> Vec<&serde_json::Value> {
        self.rows.iter().filter_map(|row| row.get(name)).collect()
    }
}
