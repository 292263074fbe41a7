use crate::config::ReportConfig;
use serde::{Deserialize, Serialize};

// ===== STAFFING =====

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeeklyHours {
    pub staff_id: i64,
    pub staff_name: String,
    /// Monday of the calendar week, YYYY-MM-DD.
    pub week_start: String,
    pub shift_count: i64,
    pub total_worked_hours: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HoursRank {
    pub staff_id: i64,
    pub staff_name: String,
    pub total_worked_hours: f64,
    pub hours_rank: i64,
}

/// One (shift, date) group of the rota.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShiftCoverage {
    pub shift_id: i64,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub staff_count: i64,
    /// Comma separated, ordered by staff id.
    pub staff_names: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StaffCost {
    pub staff_id: i64,
    pub staff_name: String,
    pub position: Option<String>,
    pub hourly_rate: f64,
    pub total_worked_hours: f64,
    pub total_cost: f64,
}

// ===== SALES =====

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HourlyRevenue {
    pub hour: i64,
    pub order_count: i64,
    pub items_sold: i64,
    pub revenue: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MonthlyRevenue {
    /// YYYY-MM
    pub month: String,
    pub order_count: i64,
    pub items_sold: i64,
    pub revenue: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CategoryRevenue {
    pub category: String,
    pub items_sold: i64,
    pub revenue: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ItemSales {
    pub item_id: i64,
    pub item_name: String,
    pub category: String,
    pub quantity_sold: i64,
    pub revenue: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Removal,
    Discount,
    Keep,
}

impl Segment {
    /// Thresholds are checked in ascending order and the first match wins.
    pub fn classify(quantity_sold: i64, config: &ReportConfig) -> Self {
        if quantity_sold < config.removal_below {
            Segment::Removal
        } else if quantity_sold <= config.discount_up_to {
            Segment::Discount
        } else {
            Segment::Keep
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ItemSegment {
    pub item_id: i64,
    pub item_name: String,
    pub quantity_sold: i64,
    pub segment: Segment,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DayPartCount {
    pub day_part: String,
    pub order_count: i64,
    /// All orders in the window, including those outside every day part.
    pub total_orders: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoyalCustomer {
    pub customer_name: String,
    pub order_count: i64,
    pub distinct_days: i64,
    pub total_spent: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SalesSummary {
    pub order_count: i64,
    pub items_sold: i64,
    pub total_revenue: f64,
    pub average_order_value: f64,
}

// ===== INVENTORY =====

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LowStock {
    pub ingredient_id: i64,
    pub ingredient_name: String,
    pub unit: String,
    pub quantity: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IngredientUsage {
    pub ingredient_id: i64,
    pub ingredient_name: String,
    pub unit: String,
    pub used_quantity: f64,
    pub in_stock: f64,
    pub usage_cost: f64,
}
