use super::{round_cents, ORDER_WINDOW};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::models::{
    CategoryRevenue, DayPartCount, HourlyRevenue, ItemSales, ItemSegment, LoyalCustomer,
    MonthlyRevenue, SalesSummary, Segment,
};
use crate::report::ReportParams;
use rusqlite::Connection;

pub fn revenue_by_hour(conn: &Connection, params: &ReportParams) -> Result<Vec<HourlyRevenue>> {
    let (from, to) = params.window_args();

    let sql = format!(
        "SELECT CAST(strftime('%H', o.created_at) AS INTEGER) AS hour,
                COUNT(DISTINCT o.order_id), SUM(o.quantity),
                ROUND(SUM(o.quantity * m.price), 2)
         FROM orders o
         JOIN menu_items m ON m.id = o.item_id
         WHERE {ORDER_WINDOW}
         GROUP BY hour
         ORDER BY hour"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params![from, to], |row| {
            Ok(HourlyRevenue {
                hour: row.get(0)?,
                order_count: row.get(1)?,
                items_sold: row.get(2)?,
                revenue: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

pub fn revenue_by_month(conn: &Connection, params: &ReportParams) -> Result<Vec<MonthlyRevenue>> {
    let (from, to) = params.window_args();

    let sql = format!(
        "SELECT strftime('%Y-%m', o.created_at) AS month,
                COUNT(DISTINCT o.order_id), SUM(o.quantity),
                ROUND(SUM(o.quantity * m.price), 2)
         FROM orders o
         JOIN menu_items m ON m.id = o.item_id
         WHERE {ORDER_WINDOW}
         GROUP BY month
         ORDER BY month"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params![from, to], |row| {
            Ok(MonthlyRevenue {
                month: row.get(0)?,
                order_count: row.get(1)?,
                items_sold: row.get(2)?,
                revenue: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

pub fn revenue_by_category(
    conn: &Connection,
    params: &ReportParams,
) -> Result<Vec<CategoryRevenue>> {
    let (from, to) = params.window_args();

    let sql = format!(
        "SELECT m.category, SUM(o.quantity), ROUND(SUM(o.quantity * m.price), 2) AS revenue
         FROM orders o
         JOIN menu_items m ON m.id = o.item_id
         WHERE {ORDER_WINDOW}
         GROUP BY m.category
         ORDER BY revenue DESC, m.category"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params![from, to], |row| {
            Ok(CategoryRevenue {
                category: row.get(0)?,
                items_sold: row.get(1)?,
                revenue: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Quantity and revenue for every menu item, including items with no sales in the window.
pub fn item_sales(conn: &Connection, params: &ReportParams) -> Result<Vec<ItemSales>> {
    let (from, to) = params.window_args();

    // Window goes in the join so unsold items still come back with zero.
    let sql = format!(
        "SELECT m.id, m.name, m.category,
                COALESCE(SUM(o.quantity), 0),
                ROUND(COALESCE(SUM(o.quantity * m.price), 0), 2)
         FROM menu_items m
         LEFT JOIN orders o ON o.item_id = m.id AND {ORDER_WINDOW}
         GROUP BY m.id
         ORDER BY m.id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params![from, to], |row| {
            Ok(ItemSales {
                item_id: row.get(0)?,
                item_name: row.get(1)?,
                category: row.get(2)?,
                quantity_sold: row.get(3)?,
                revenue: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Best sellers by quantity; ties go to the lower item id.
pub fn top_items(conn: &Connection, params: &ReportParams, limit: usize) -> Result<Vec<ItemSales>> {
    let mut items = item_sales(conn, params)?;
    items.sort_by(|a, b| {
        b.quantity_sold
            .cmp(&a.quantity_sold)
            .then(a.item_id.cmp(&b.item_id))
    });
    items.truncate(limit);
    Ok(items)
}

/// Worst sellers by quantity; ties go to the lower item id.
pub fn bottom_items(
    conn: &Connection,
    params: &ReportParams,
    limit: usize,
) -> Result<Vec<ItemSales>> {
    let mut items = item_sales(conn, params)?;
    items.sort_by(|a, b| {
        a.quantity_sold
            .cmp(&b.quantity_sold)
            .then(a.item_id.cmp(&b.item_id))
    });
    items.truncate(limit);
    Ok(items)
}

pub fn item_segmentation(
    conn: &Connection,
    params: &ReportParams,
    config: &ReportConfig,
) -> Result<Vec<ItemSegment>> {
    Ok(item_sales(conn, params)?
        .into_iter()
        .map(|item| ItemSegment {
            segment: Segment::classify(item.quantity_sold, config),
            item_id: item.item_id,
            item_name: item.item_name,
            quantity_sold: item.quantity_sold,
        })
        .collect())
}

/// Orders per configured day part. An order is placed at its earliest line's timestamp.
pub fn orders_by_day_part(
    conn: &Connection,
    params: &ReportParams,
    config: &ReportConfig,
) -> Result<Vec<DayPartCount>> {
    let (from, to) = params.window_args();

    let sql = format!(
        "SELECT o.order_id, CAST(strftime('%H', MIN(o.created_at)) AS INTEGER)
         FROM orders o
         WHERE {ORDER_WINDOW}
         GROUP BY o.order_id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let hours = stmt
        .query_map(rusqlite::params![from, to], |row| row.get::<_, u32>(1))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let total_orders = hours.len() as i64;
    let mut counts = vec![0i64; config.day_parts.len()];
    for hour in hours {
        if let Some(index) = config.day_part_index(hour) {
            counts[index] += 1;
        }
    }

    Ok(config
        .day_parts
        .iter()
        .zip(counts)
        .map(|(part, order_count)| DayPartCount {
            day_part: part.label.clone(),
            order_count,
            total_orders,
        })
        .collect())
}

/// Customers with enough distinct orders spread over enough distinct days.
pub fn loyalty_customers(
    conn: &Connection,
    params: &ReportParams,
    config: &ReportConfig,
) -> Result<Vec<LoyalCustomer>> {
    let (from, to) = params.window_args();

    let sql = format!(
        "SELECT o.customer_name,
                COUNT(DISTINCT o.order_id) AS order_count,
                COUNT(DISTINCT date(o.created_at)) AS distinct_days,
                ROUND(SUM(o.quantity * m.price), 2)
         FROM orders o
         JOIN menu_items m ON m.id = o.item_id
         WHERE o.customer_name IS NOT NULL AND trim(o.customer_name) <> '' AND {ORDER_WINDOW}
         GROUP BY o.customer_name
         HAVING COUNT(DISTINCT o.order_id) >= ?3 AND COUNT(DISTINCT date(o.created_at)) >= ?4
         ORDER BY order_count DESC, o.customer_name"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(
            rusqlite::params![from, to, config.loyalty_min_orders, config.loyalty_min_days],
            |row| {
                Ok(LoyalCustomer {
                    customer_name: row.get(0)?,
                    order_count: row.get(1)?,
                    distinct_days: row.get(2)?,
                    total_spent: row.get(3)?,
                })
            },
        )?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Totals for the window and the average order value.
pub fn sales_summary(conn: &Connection, params: &ReportParams) -> Result<SalesSummary> {
    let (from, to) = params.window_args();

    let sql = format!(
        "SELECT COUNT(DISTINCT o.order_id),
                COALESCE(SUM(o.quantity), 0),
                COALESCE(SUM(o.quantity * m.price), 0)
         FROM orders o
         JOIN menu_items m ON m.id = o.item_id
         WHERE {ORDER_WINDOW}"
    );

    let (order_count, items_sold, revenue): (i64, i64, f64) =
        conn.query_row(&sql, rusqlite::params![from, to], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?;

    let average_order_value = if order_count > 0 {
        round_cents(revenue / order_count as f64)
    } else {
        0.0
    };

    Ok(SalesSummary {
        order_count,
        items_sold,
        total_revenue: round_cents(revenue),
        average_order_value,
    })
}
