use thiserror::Error;

/// Everything a report invocation can fail with.
///
/// The first group are input validation failures raised before any query runs.
/// The rest wrap the storage and serialization layers.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("unknown report: {0}")]
    UnknownReport(String),

    #[error("invalid date for `{param}`: {value} (expected YYYY-MM-DD)")]
    InvalidDate { param: &'static str, value: String },

    #[error("invalid date range: {from} is after {to}")]
    InvalidDateRange { from: String, to: String },

    #[error("threshold for {report} out of range: {value} (allowed {allowed})")]
    ThresholdOutOfRange {
        report: &'static str,
        value: f64,
        allowed: &'static str,
    },

    #[error("{0} takes no threshold")]
    ThresholdNotSupported(&'static str),

    #[error("limit out of range: {0} (allowed 1..={max})", max = crate::report::MAX_LIMIT)]
    LimitOutOfRange(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("database connection lock poisoned")]
    ConnectionPoisoned,

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// True for errors caused by the caller's input rather than the data layer.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownReport(_)
                | Self::InvalidDate { .. }
                | Self::InvalidDateRange { .. }
                | Self::ThresholdOutOfRange { .. }
                | Self::ThresholdNotSupported(_)
                | Self::LimitOutOfRange(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
