use crate::config::ReportConfig;
use crate::db::Database;
use crate::error::{ReportError, Result};
use crate::report::{ReportKind, ReportOutput, ReportParams, Row, MAX_LIMIT};
use crate::reports::{inventory, sales, staffing};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Longest week an overtime threshold can describe.
const MAX_WEEKLY_HOURS: f64 = 168.0;

/// Runs named reports against a shop database.
///
/// Each call validates its parameters, runs one independent read and returns the rows.
/// Nothing is cached between calls.
pub struct ReportRunner {
    db: Database,
    config: ReportConfig,
}

impl ReportRunner {
    pub fn new(db: Database, config: ReportConfig) -> Result<Self> {
        config.validate()?;
        Ok(ReportRunner { db, config })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Runs the report called `name` (e.g. `"weekly-hours"`).
    pub fn run(&self, name: &str, params: &ReportParams) -> Result<ReportOutput> {
        let kind = name.parse::<ReportKind>().map_err(|e| {
            warn!(report = name, error = %e, "rejected report request");
            e
        })?;
        self.run_kind(kind, params)
    }

    #[instrument(skip_all, fields(report = %kind))]
    pub fn run_kind(&self, kind: ReportKind, params: &ReportParams) -> Result<ReportOutput> {
        if let Err(e) = self.validate(kind, params) {
            warn!(error = %e, "rejected report parameters");
            return Err(e);
        }

        debug!(from = ?params.from, to = ?params.to, "running report");

        let conn = self.db.lock()?;
        let config = &self.config;

        let rows = match kind {
            ReportKind::WeeklyHours => to_rows(staffing::weekly_hours(&conn, params, None)?)?,
            ReportKind::OvertimeEmployees => {
                let threshold = params.threshold.unwrap_or(config.overtime_threshold_hours);
                to_rows(staffing::weekly_hours(&conn, params, Some(threshold))?)?
            }
            ReportKind::HoursRank => to_rows(staffing::hours_rank(&conn, params)?)?,
            ReportKind::ShiftOverlaps => to_rows(staffing::shift_overlaps(&conn, params)?)?,
            ReportKind::UnderstaffedShifts => {
                to_rows(staffing::understaffed_shifts(&conn, params)?)?
            }
            ReportKind::StaffCost => to_rows(staffing::staff_cost(&conn, params)?)?,
            ReportKind::RevenueByHour => to_rows(sales::revenue_by_hour(&conn, params)?)?,
            ReportKind::RevenueByMonth => to_rows(sales::revenue_by_month(&conn, params)?)?,
            ReportKind::RevenueByCategory => to_rows(sales::revenue_by_category(&conn, params)?)?,
            ReportKind::ItemSales => to_rows(sales::item_sales(&conn, params)?)?,
            ReportKind::TopItems => {
                let limit = params.limit.unwrap_or(config.top_n);
                to_rows(sales::top_items(&conn, params, limit)?)?
            }
            ReportKind::BottomItems => {
                let limit = params.limit.unwrap_or(config.top_n);
                to_rows(sales::bottom_items(&conn, params, limit)?)?
            }
            ReportKind::ItemSegmentation => {
                to_rows(sales::item_segmentation(&conn, params, config)?)?
            }
            ReportKind::OrdersByDayPart => {
                to_rows(sales::orders_by_day_part(&conn, params, config)?)?
            }
            ReportKind::LoyaltyCustomers => {
                to_rows(sales::loyalty_customers(&conn, params, config)?)?
            }
            ReportKind::SalesSummary => to_rows(vec![sales::sales_summary(&conn, params)?])?,
            ReportKind::LowInventory => {
                let threshold = params.threshold.unwrap_or(config.low_stock_threshold);
                to_rows(inventory::low_inventory(&conn, threshold)?)?
            }
            ReportKind::IngredientUsage => to_rows(inventory::ingredient_usage(&conn, params)?)?,
        };

        info!(rows = rows.len(), "report complete");

        Ok(ReportOutput {
            report: kind,
            columns: kind.columns().iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    fn validate(&self, kind: ReportKind, params: &ReportParams) -> Result<()> {
        params.validate_window()?;

        if let Some(threshold) = params.threshold {
            match kind {
                ReportKind::OvertimeEmployees => {
                    if !threshold.is_finite() || threshold <= 0.0 || threshold > MAX_WEEKLY_HOURS {
                        return Err(ReportError::ThresholdOutOfRange {
                            report: kind.name(),
                            value: threshold,
                            allowed: "(0, 168]",
                        });
                    }
                }
                ReportKind::LowInventory => {
                    if !threshold.is_finite() || threshold < 0.0 {
                        return Err(ReportError::ThresholdOutOfRange {
                            report: kind.name(),
                            value: threshold,
                            allowed: "[0, inf)",
                        });
                    }
                }
                _ => return Err(ReportError::ThresholdNotSupported(kind.name())),
            }
        }

        if let Some(limit) = params.limit {
            if limit == 0 || limit > MAX_LIMIT {
                return Err(ReportError::LimitOutOfRange(limit));
            }
        }

        Ok(())
    }
}

/// Typed report rows into column maps; field names become column names.
fn to_rows<T: Serialize>(records: Vec<T>) -> Result<Vec<Row>> {
    records
        .into_iter()
        .map(|record| match serde_json::to_value(record)? {
            Value::Object(map) => Ok(map),
            other => Err(ReportError::Serialization(serde::ser::Error::custom(format!(
                "report row did not serialize to an object: {other}"
            )))),
        })
        .collect()
}
