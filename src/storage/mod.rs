//! SQLite persistence for journal items.
//!
//! A single `items` table holds the whole journal. The parent/child
//! relation is a self-referencing foreign key with `ON DELETE CASCADE`,
//! so deleting an item always removes its entire subtree. Timestamps are
//! stored as lexicographically sortable text.

use chrono::NaiveDateTime;
use rusqlite::{Connection, Row, params};
use std::fs;
use std::path::Path;

use crate::models::{self, Item, Signifier, Status};
use crate::render::ChildSource;
use crate::{Error, Result};

/// Timestamp format used in database columns.
const DB_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

const COLUMNS: &str =
    "id, description, status, signifier, scheduled_time, created_at, updated_at, parent_id";

/// Sort order for [`Store::find`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
    /// Newest first by id (insertion order reversed).
    #[default]
    IdDesc,
    /// Scheduled time ascending.
    TimeAsc,
    /// Most recently updated first.
    UpdatedDesc,
}

/// Filter predicates for [`Store::find`]. Unset fields do not constrain
/// the result.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub status: Option<Status>,
    pub exclude_status: Option<Status>,
    pub signifier: Option<Signifier>,
    pub scheduled_after: Option<NaiveDateTime>,
    pub scheduled_before: Option<NaiveDateTime>,
    pub description_contains: Option<String>,
    pub order: Order,
    pub limit: Option<usize>,
}

/// Store for a single journal database.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the journal database under `root`, creating the directory
    /// and schema on first use.
    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        let conn = Connection::open(root.join("journal.db"))?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY,
                description TEXT NOT NULL,
                status TEXT NOT NULL,
                signifier TEXT,
                scheduled_time TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                parent_id INTEGER REFERENCES items(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_items_status ON items(status);
            CREATE INDEX IF NOT EXISTS idx_items_signifier ON items(signifier);
            CREATE INDEX IF NOT EXISTS idx_items_parent ON items(parent_id);
            CREATE INDEX IF NOT EXISTS idx_items_time ON items(scheduled_time);
            "#,
        )?;
        Ok(())
    }

    /// Insert an item and return it with its assigned id.
    ///
    /// Items carrying an explicit id (import) keep it; otherwise SQLite
    /// assigns the next rowid.
    pub fn insert(&mut self, item: &Item) -> Result<Item> {
        if let Some(parent_id) = item.parent_id {
            // Missing parents surface as NotFound, not as an FK error.
            self.get(parent_id)?;
        }
        self.conn.execute(
            &format!(
                "INSERT INTO items ({COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
            ),
            params![
                item.id,
                item.description,
                item.status.value(),
                item.signifier.map(|s| s.value()),
                item.scheduled_time.map(format_db_time),
                format_db_time(item.created_at),
                format_db_time(item.updated_at),
                item.parent_id,
            ],
        )?;
        let id = match item.id {
            Some(id) => id,
            None => self.conn.last_insert_rowid(),
        };
        self.get(id)
    }

    /// Get an item by id.
    pub fn get(&self, id: i64) -> Result<Item> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM items WHERE id = ?1"))?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => item_from_row(row),
            None => Err(Error::NotFound(id)),
        }
    }

    /// Children of an item, in insertion order (id ascending).
    pub fn children_of(&self, parent_id: i64) -> Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM items WHERE parent_id = ?1 ORDER BY id ASC"
        ))?;
        let mut rows = stmt.query(params![parent_id])?;
        collect_items(&mut rows)
    }

    /// Every item, in insertion order. Export relies on parents sorting
    /// before their children.
    pub fn all(&self) -> Result<Vec<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM items ORDER BY id ASC"))?;
        let mut rows = stmt.query([])?;
        collect_items(&mut rows)
    }

    /// Find items matching `query`, ordered and limited as requested.
    pub fn find(&self, query: &Query) -> Result<Vec<Item>> {
        let mut sql = format!("SELECT {COLUMNS} FROM items WHERE 1=1");
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            values.push(Box::new(status.value()));
        }
        if let Some(status) = query.exclude_status {
            sql.push_str(" AND status <> ?");
            values.push(Box::new(status.value()));
        }
        if let Some(signifier) = query.signifier {
            sql.push_str(" AND signifier = ?");
            values.push(Box::new(signifier.value()));
        }
        if let Some(after) = query.scheduled_after {
            sql.push_str(" AND scheduled_time > ?");
            values.push(Box::new(format_db_time(after)));
        }
        if let Some(before) = query.scheduled_before {
            sql.push_str(" AND scheduled_time < ?");
            values.push(Box::new(format_db_time(before)));
        }
        if let Some(needle) = &query.description_contains {
            sql.push_str(" AND instr(description, ?) > 0");
            values.push(Box::new(needle.clone()));
        }

        sql.push_str(match query.order {
            Order::IdDesc => " ORDER BY id DESC",
            Order::TimeAsc => " ORDER BY scheduled_time ASC",
            Order::UpdatedDesc => " ORDER BY updated_at DESC",
        });

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            values.push(Box::new(limit as i64));
        }

        let refs: Vec<&dyn rusqlite::ToSql> = values.iter().map(|v| v.as_ref()).collect();
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(refs.as_slice())?;
        collect_items(&mut rows)
    }

    /// Set the status of each listed item, refreshing `updated_at`.
    /// All-or-nothing: an unknown id rolls the whole batch back.
    pub fn set_status(&mut self, ids: &[i64], status: Status) -> Result<usize> {
        let now = format_db_time(models::now());
        let tx = self.conn.transaction()?;
        let mut changed = 0;
        for &id in ids {
            let n = tx.execute(
                "UPDATE items SET status = ?1, updated_at = ?2 WHERE id = ?3",
                params![status.value(), now, id],
            )?;
            if n == 0 {
                return Err(Error::NotFound(id));
            }
            changed += n;
        }
        tx.commit()?;
        Ok(changed)
    }

    /// Set or clear an item's signifier, refreshing `updated_at`.
    pub fn set_signifier(&mut self, id: i64, signifier: Option<Signifier>) -> Result<()> {
        let now = format_db_time(models::now());
        let n = self.conn.execute(
            "UPDATE items SET signifier = ?1, updated_at = ?2 WHERE id = ?3",
            params![signifier.map(|s| s.value()), now, id],
        )?;
        if n == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    /// Delete an item and, via cascade, its entire subtree.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1", params![id])?;
        if n == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }
}

impl ChildSource for Store {
    fn children_of(&self, parent_id: i64) -> Result<Vec<Item>> {
        Store::children_of(self, parent_id)
    }
}

fn format_db_time(time: NaiveDateTime) -> String {
    time.format(DB_TIME_FORMAT).to_string()
}

fn parse_db_time(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DB_TIME_FORMAT)
        .map_err(|e| Error::InvalidInput(format!("malformed timestamp '{s}': {e}")))
}

fn item_from_row(row: &Row<'_>) -> Result<Item> {
    let status: String = row.get(2)?;
    let signifier: Option<String> = row.get(3)?;
    let scheduled_time: Option<String> = row.get(4)?;
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;

    Ok(Item {
        id: Some(row.get(0)?),
        description: row.get(1)?,
        status: status.parse()?,
        signifier: signifier
            .as_deref()
            .map(|s| s.parse::<Signifier>())
            .transpose()?,
        scheduled_time: scheduled_time.as_deref().map(parse_db_time).transpose()?,
        created_at: parse_db_time(&created_at)?,
        updated_at: parse_db_time(&updated_at)?,
        parent_id: row.get(7)?,
    })
}

fn collect_items(rows: &mut rusqlite::Rows<'_>) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(item_from_row(row)?);
    }
    Ok(items)
}
