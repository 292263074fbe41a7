use crate::error::{ReportError, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub struct Database {
    pub conn: Mutex<Connection>,
}

impl Database {
    /// Opens an existing shop database. Reports only read, so the file is opened read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    /// Writable scratch database, used for fixtures and tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Database {
            conn: Mutex::new(conn),
        }
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| ReportError::ConnectionPoisoned)
    }

    /// Creates the reference schema if it does not exist yet.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.lock()?;
        Self::create_schema(&conn)
    }

    pub fn create_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "
            -- Employees
            CREATE TABLE IF NOT EXISTS staff (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                position TEXT,
                hourly_rate REAL NOT NULL DEFAULT 0
            );

            -- Shift templates, times as HH:MM or HH:MM:SS
            CREATE TABLE IF NOT EXISTS shifts (
                id INTEGER PRIMARY KEY,
                day_of_week TEXT,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL
            );

            -- Who works which shift on which date
            CREATE TABLE IF NOT EXISTS rota (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date DATE NOT NULL,
                shift_id INTEGER NOT NULL,
                staff_id INTEGER NOT NULL,
                FOREIGN KEY (shift_id) REFERENCES shifts(id),
                FOREIGN KEY (staff_id) REFERENCES staff(id)
            );

            CREATE TABLE IF NOT EXISTS menu_items (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                size TEXT,
                price REAL NOT NULL
            );

            -- One row per ordered line; lines sharing order_id form one order
            CREATE TABLE IF NOT EXISTS orders (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                order_id TEXT NOT NULL,
                created_at DATETIME NOT NULL,
                item_id INTEGER NOT NULL,
                quantity INTEGER NOT NULL,
                customer_name TEXT,
                in_or_out TEXT,
                FOREIGN KEY (item_id) REFERENCES menu_items(id)
            );

            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                unit TEXT NOT NULL DEFAULT 'unit',
                unit_cost REAL NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS inventory (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                ingredient_id INTEGER NOT NULL,
                quantity REAL NOT NULL,
                FOREIGN KEY (ingredient_id) REFERENCES ingredients(id)
            );

            -- Ingredient amount consumed per unit of a menu item sold
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                item_id INTEGER NOT NULL,
                ingredient_id INTEGER NOT NULL,
                quantity REAL NOT NULL,
                FOREIGN KEY (item_id) REFERENCES menu_items(id),
                FOREIGN KEY (ingredient_id) REFERENCES ingredients(id)
            );

            CREATE INDEX IF NOT EXISTS idx_rota_date ON rota(date);
            CREATE INDEX IF NOT EXISTS idx_orders_created_at ON orders(created_at);
            ",
        )?;

        Ok(())
    }
}
