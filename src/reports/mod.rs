pub mod inventory;
pub mod sales;
pub mod staffing;

/// Restricts `orders o` to the inclusive date window bound as `?1`/`?2`.
pub(crate) const ORDER_WINDOW: &str =
    "(?1 IS NULL OR date(o.created_at) >= ?1) AND (?2 IS NULL OR date(o.created_at) <= ?2)";

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn seconds_to_hours(seconds: i64) -> f64 {
    seconds as f64 / 3600.0
}
