use super::seconds_to_hours;
use crate::error::Result;
use crate::models::{HoursRank, ShiftCoverage, StaffCost, WeeklyHours};
use crate::report::ReportParams;
use rusqlite::Connection;

/// Rota entries in the window joined to their shift duration in seconds.
/// A staff member listed twice on the same shift and date counts once.
/// A shift whose end is earlier than its start runs past midnight.
const SHIFT_DURATIONS: &str = "
    WITH worked AS (
        SELECT DISTINCT r.staff_id, r.shift_id, r.date,
               CAST(strftime('%s', sh.start_time) AS INTEGER) AS start_s,
               CAST(strftime('%s', sh.end_time) AS INTEGER) AS end_s
        FROM rota r
        JOIN shifts sh ON sh.id = r.shift_id
        WHERE (?1 IS NULL OR r.date >= ?1) AND (?2 IS NULL OR r.date <= ?2)
    ),
    durations AS (
        SELECT staff_id, shift_id, date,
               CASE WHEN end_s < start_s THEN end_s - start_s + 86400
                    ELSE end_s - start_s END AS seconds
        FROM worked
    )";

/// Hours per employee per calendar week (weeks start on Monday).
///
/// With `min_hours` set, only weeks strictly above it are kept.
pub fn weekly_hours(
    conn: &Connection,
    params: &ReportParams,
    min_hours: Option<f64>,
) -> Result<Vec<WeeklyHours>> {
    let (from, to) = params.window_args();
    let min_seconds = min_hours.map(|hours| hours * 3600.0);

    let sql = format!(
        "{SHIFT_DURATIONS}
         SELECT s.id, s.name, date(d.date, '-6 days', 'weekday 1') AS week_start,
                COUNT(*) AS shift_count, SUM(d.seconds) AS worked_seconds
         FROM durations d
         JOIN staff s ON s.id = d.staff_id
         GROUP BY s.id, week_start
         HAVING ?3 IS NULL OR SUM(d.seconds) > ?3
         ORDER BY week_start, s.id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params![from, to, min_seconds], |row| {
            Ok(WeeklyHours {
                staff_id: row.get(0)?,
                staff_name: row.get(1)?,
                week_start: row.get(2)?,
                shift_count: row.get(3)?,
                total_worked_hours: seconds_to_hours(row.get(4)?),
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Total hours per employee over the window with a dense rank, busiest first.
pub fn hours_rank(conn: &Connection, params: &ReportParams) -> Result<Vec<HoursRank>> {
    let (from, to) = params.window_args();

    let sql = format!(
        "{SHIFT_DURATIONS}
         SELECT s.id, s.name, SUM(d.seconds) AS worked_seconds,
                DENSE_RANK() OVER (ORDER BY SUM(d.seconds) DESC) AS hours_rank
         FROM durations d
         JOIN staff s ON s.id = d.staff_id
         GROUP BY s.id
         ORDER BY hours_rank, s.id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params![from, to], |row| {
            Ok(HoursRank {
                staff_id: row.get(0)?,
                staff_name: row.get(1)?,
                total_worked_hours: seconds_to_hours(row.get(2)?),
                hours_rank: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Every (shift, date) group of the rota with the distinct staff assigned to it.
pub fn shift_coverage(conn: &Connection, params: &ReportParams) -> Result<Vec<ShiftCoverage>> {
    let (from, to) = params.window_args();

    let mut stmt = conn.prepare(
        "SELECT shift_id, date, start_time, end_time,
                COUNT(*) AS staff_count,
                group_concat(staff_name, ', ' ORDER BY staff_id) AS staff_names
         FROM (
             SELECT DISTINCT r.shift_id, r.date, sh.start_time, sh.end_time,
                    s.id AS staff_id, s.name AS staff_name
             FROM rota r
             JOIN shifts sh ON sh.id = r.shift_id
             JOIN staff s ON s.id = r.staff_id
             WHERE (?1 IS NULL OR r.date >= ?1) AND (?2 IS NULL OR r.date <= ?2)
         )
         GROUP BY shift_id, date
         ORDER BY date, shift_id",
    )?;

    let rows = stmt
        .query_map(rusqlite::params![from, to], |row| {
            Ok(ShiftCoverage {
                shift_id: row.get(0)?,
                date: row.get(1)?,
                start_time: row.get(2)?,
                end_time: row.get(3)?,
                staff_count: row.get(4)?,
                staff_names: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Groups with more than one staff member on the same shift and date.
pub fn shift_overlaps(conn: &Connection, params: &ReportParams) -> Result<Vec<ShiftCoverage>> {
    Ok(shift_coverage(conn, params)?
        .into_iter()
        .filter(|group| group.staff_count > 1)
        .collect())
}

/// Groups covered by at most one staff member.
pub fn understaffed_shifts(
    conn: &Connection,
    params: &ReportParams,
) -> Result<Vec<ShiftCoverage>> {
    Ok(shift_coverage(conn, params)?
        .into_iter()
        .filter(|group| group.staff_count <= 1)
        .collect())
}

/// Worked hours times hourly rate per employee, most expensive first.
pub fn staff_cost(conn: &Connection, params: &ReportParams) -> Result<Vec<StaffCost>> {
    let (from, to) = params.window_args();

    let sql = format!(
        "{SHIFT_DURATIONS}
         SELECT s.id, s.name, s.position, s.hourly_rate, SUM(d.seconds) AS worked_seconds
         FROM durations d
         JOIN staff s ON s.id = d.staff_id
         GROUP BY s.id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt
        .query_map(rusqlite::params![from, to], |row| {
            let hourly_rate: f64 = row.get(3)?;
            let total_worked_hours = seconds_to_hours(row.get(4)?);
            Ok(StaffCost {
                staff_id: row.get(0)?,
                staff_name: row.get(1)?,
                position: row.get(2)?,
                hourly_rate,
                total_worked_hours,
                total_cost: super::round_cents(hourly_rate * total_worked_hours),
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.sort_by(|a, b| {
        b.total_cost
            .total_cmp(&a.total_cost)
            .then(a.staff_id.cmp(&b.staff_id))
    });

    Ok(rows)
}
