use super::{round_cents, ORDER_WINDOW};
use crate::error::Result;
use crate::models::{IngredientUsage, LowStock};
use crate::report::ReportParams;
use rusqlite::Connection;

/// Ingredients whose total stock is at or below `threshold`. No inventory row counts as zero.
pub fn low_inventory(conn: &Connection, threshold: f64) -> Result<Vec<LowStock>> {
    let mut stmt = conn.prepare(
        "SELECT i.id, i.name, i.unit, COALESCE(SUM(inv.quantity), 0) AS stock
         FROM ingredients i
         LEFT JOIN inventory inv ON inv.ingredient_id = i.id
         GROUP BY i.id
         HAVING stock <= ?1
         ORDER BY stock ASC, i.id",
    )?;

    let rows = stmt
        .query_map([threshold], |row| {
            Ok(LowStock {
                ingredient_id: row.get(0)?,
                ingredient_name: row.get(1)?,
                unit: row.get(2)?,
                quantity: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Ingredient consumption implied by the window's orders and the recipes table.
pub fn ingredient_usage(conn: &Connection, params: &ReportParams) -> Result<Vec<IngredientUsage>> {
    let (from, to) = params.window_args();

    let sql = format!(
        "WITH used AS (
             SELECT r.ingredient_id, SUM(o.quantity * r.quantity) AS used_quantity
             FROM orders o
             JOIN recipes r ON r.item_id = o.item_id
             WHERE {ORDER_WINDOW}
             GROUP BY r.ingredient_id
         ),
         stock AS (
             SELECT ingredient_id, SUM(quantity) AS in_stock
             FROM inventory
             GROUP BY ingredient_id
         )
         SELECT i.id, i.name, i.unit,
                COALESCE(u.used_quantity, 0) AS used_quantity,
                COALESCE(st.in_stock, 0),
                COALESCE(u.used_quantity, 0) * i.unit_cost
         FROM ingredients i
         LEFT JOIN used u ON u.ingredient_id = i.id
         LEFT JOIN stock st ON st.ingredient_id = i.id
         ORDER BY used_quantity DESC, i.id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params![from, to], |row| {
            Ok(IngredientUsage {
                ingredient_id: row.get(0)?,
                ingredient_name: row.get(1)?,
                unit: row.get(2)?,
                used_quantity: row.get(3)?,
                in_stock: row.get(4)?,
                usage_cost: round_cents(row.get(5)?),
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
