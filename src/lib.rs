//! Staffing, sales and inventory reports over a coffee shop's SQLite database.
//!
//! ```no_run
//! use cafe_reports::{Database, ReportConfig, ReportParams, ReportRunner};
//!
//! # fn main() -> cafe_reports::Result<()> {
//! let runner = ReportRunner::new(Database::open("shop.db")?, ReportConfig::default())?;
//! let params = ReportParams::new().with_window(Some("2024-03-04"), Some("2024-03-10"))?;
//! let overtime = runner.run("overtime-employees", &params)?;
//! for row in &overtime.rows {
//!     println!("{} {}", row["staff_name"], row["total_worked_hours"]);
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod db;
mod error;
mod models;
mod report;
mod reports;
mod runner;


pub use config::{DayPart, ReportConfig};
pub use db::Database;
pub use error::{ReportError, Result};
pub use models::*;
pub use report::{ReportKind, ReportOutput, ReportParams, Row, MAX_LIMIT};
pub use reports::{inventory, sales, staffing};
pub use runner::ReportRunner;
