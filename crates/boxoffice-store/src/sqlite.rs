//! SQLite implementation of the store traits.
//!
//! This is the primary storage backend. It uses rusqlite with bundled
//! SQLite; the single connection sits behind a mutex so the store can be
//! shared by reference.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::debug;

use boxoffice_core::{
    parse_storage_timestamp, Event, EventDraft, EventId, Order, OrderLine, OrderNumber,
    PasswordHash, User, UserRecord,
};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{EventStore, OrderStore, SeatUpdate, Store, UserStore};

const EVENT_COLUMNS: &str = "id, name, date, venue, price, remainingSeats, disabled";

/// SQLite-based store implementation.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening sqlite store");
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    /// Execute an operation on the connection.
    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.lock()?;
        f(&conn)
    }

    /// Execute an operation that needs mutable access (transactions).
    fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self.lock()?;
        f(&mut conn)
    }
}

// Helper to convert a row to Event
fn row_to_event(row: &rusqlite::Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: EventId(row.get("id")?),
        name: row.get("name")?,
        date: row.get("date")?,
        venue: row.get("venue")?,
        price: row.get("price")?,
        remaining_seats: row.get("remainingSeats")?,
        disabled: row.get("disabled")?,
    })
}

/// Fail with `NotFound` when an UPDATE/DELETE touched no row.
fn expect_row(affected: usize, id: EventId) -> Result<()> {
    if affected == 0 {
        return Err(StoreError::NotFound(format!("event {}", id)));
    }
    Ok(())
}

fn insert_event_row(conn: &Connection, draft: &EventDraft) -> Result<EventId> {
    conn.execute(
        "INSERT INTO events (name, date, venue, price, remainingSeats, disabled)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            draft.name,
            draft.date,
            draft.venue,
            draft.price,
            draft.remaining_seats,
            draft.disabled,
        ],
    )?;
    Ok(EventId(conn.last_insert_rowid()))
}

fn insert_order_rows(conn: &Connection, order: &Order) -> Result<()> {
    conn.execute(
        "INSERT INTO orders (order_number, timestamp, total) VALUES (?1, ?2, ?3)",
        params![order.number.get(), order.storage_timestamp(), order.total],
    )?;
    let order_id = conn.last_insert_rowid();

    let mut stmt =
        conn.prepare("INSERT INTO order_items (order_id, event_id, quantity) VALUES (?1, ?2, ?3)")?;
    for line in &order.lines {
        stmt.execute(params![order_id, line.event.id.get(), line.quantity])?;
    }
    Ok(())
}

fn set_remaining_seats(conn: &Connection, id: EventId, remaining_seats: u32) -> Result<()> {
    let affected = conn.execute(
        "UPDATE events SET remainingSeats = ?1 WHERE id = ?2",
        params![remaining_seats, id.get()],
    )?;
    expect_row(affected, id)
}

impl UserStore for SqliteStore {
    fn find_user(&self, username: &str) -> Result<Option<UserRecord>> {
        let row: Option<(String, String, String)> = self.with_conn(|conn| {
            conn.query_row(
                "SELECT username, password_hash, preferred_name FROM users WHERE username = ?1",
                params![username],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()
            .map_err(StoreError::from)
        })?;

        row.map(|(username, hash, preferred_name)| {
            Ok(UserRecord {
                user: User::new(username, preferred_name),
                password_hash: PasswordHash::decode(&hash)?,
            })
        })
        .transpose()
    }

    fn create_user(&self, record: &UserRecord) -> Result<()> {
        self.with_conn(|conn| {
            let result = conn.execute(
                "INSERT INTO users (username, password_hash, preferred_name) VALUES (?1, ?2, ?3)",
                params![
                    record.user.username,
                    record.password_hash.encode(),
                    record.user.preferred_name,
                ],
            );
            match result {
                Ok(_) => Ok(()),
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == ErrorCode::ConstraintViolation =>
                {
                    Err(StoreError::DuplicateUser(record.user.username.clone()))
                }
                Err(e) => Err(e.into()),
            }
        })
    }
}

impl EventStore for SqliteStore {
    fn all_events(&self) -> Result<Vec<Event>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY id"))?;
            let events = stmt
                .query_map([], row_to_event)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(events)
        })
    }

    fn count_events(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
            usize::try_from(count).map_err(|e| StoreError::InvalidData(e.to_string()))
        })
    }

    fn insert_event(&self, draft: &EventDraft) -> Result<EventId> {
        self.with_conn(|conn| insert_event_row(conn, draft))
    }

    fn insert_events(&self, drafts: &[EventDraft]) -> Result<Vec<EventId>> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let ids = drafts
                .iter()
                .map(|draft| insert_event_row(&tx, draft))
                .collect::<Result<Vec<_>>>()?;
            tx.commit()?;
            Ok(ids)
        })
    }

    fn update_event(&self, event: &Event) -> Result<()> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE events
                 SET name = ?1, date = ?2, venue = ?3, price = ?4, remainingSeats = ?5, disabled = ?6
                 WHERE id = ?7",
                params![
                    event.name,
                    event.date,
                    event.venue,
                    event.price,
                    event.remaining_seats,
                    event.disabled,
                    event.id.get(),
                ],
            )?;
            expect_row(affected, event.id)
        })
    }

    fn delete_event(&self, id: EventId) -> Result<()> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM events WHERE id = ?1", params![id.get()])?;
            expect_row(affected, id)
        })
    }

    fn update_remaining_seats(&self, id: EventId, remaining_seats: u32) -> Result<()> {
        self.with_conn(|conn| set_remaining_seats(conn, id, remaining_seats))
    }

    fn update_disabled(&self, id: EventId, disabled: bool) -> Result<()> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE events SET disabled = ?1 WHERE id = ?2",
                params![disabled, id.get()],
            )?;
            expect_row(affected, id)
        })
    }
}

impl OrderStore for SqliteStore {
    fn save_order(&self, order: &Order) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            insert_order_rows(&tx, order)?;
            tx.commit()?;
            Ok(())
        })
    }

    fn all_orders(&self) -> Result<Vec<Order>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, order_number, timestamp, total FROM orders ORDER BY id DESC")?;
            let heads: Vec<(i64, u32, String, f64)> = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let mut orders = Vec::with_capacity(heads.len());
            let mut index = HashMap::with_capacity(heads.len());
            for (row_id, number, timestamp, total) in heads {
                let timestamp = parse_storage_timestamp(&timestamp)?;
                index.insert(row_id, orders.len());
                orders.push(Order::from_parts(OrderNumber(number), timestamp, Vec::new(), total));
            }

            if orders.is_empty() {
                return Ok(orders);
            }

            let mut stmt = conn.prepare(
                "SELECT oi.order_id, oi.quantity,
                        e.id, e.name, e.date, e.venue, e.price, e.remainingSeats, e.disabled
                 FROM order_items oi
                 JOIN events e ON e.id = oi.event_id
                 ORDER BY oi.order_id DESC, oi.rowid",
            )?;
            let lines: Vec<(i64, OrderLine)> = stmt
                .query_map([], |row| {
                    let order_id: i64 = row.get("order_id")?;
                    let quantity: u32 = row.get("quantity")?;
                    Ok((
                        order_id,
                        OrderLine {
                            event: row_to_event(row)?,
                            quantity,
                        },
                    ))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            for (order_id, line) in lines {
                match index.get(&order_id) {
                    Some(&i) => orders[i].lines.push(line),
                    None => {
                        return Err(StoreError::InvalidData(format!(
                            "order item references unknown order row {}",
                            order_id
                        )))
                    }
                }
            }

            Ok(orders)
        })
    }
}

impl Store for SqliteStore {
    fn record_checkout(&self, seats: &[SeatUpdate], order: &Order) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            for update in seats {
                set_remaining_seats(&tx, update.event_id, update.remaining_seats)?;
            }
            insert_order_rows(&tx, order)?;
            // Dropping `tx` on any error above rolls everything back.
            tx.commit()?;
            debug!(order_number = %order.number, seat_updates = seats.len(), "checkout committed");
            Ok(())
        })
    }
}
