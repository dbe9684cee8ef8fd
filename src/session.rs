//! Session lifecycle and the schema registrar.
//!
//! A [`Session`] replaces the usual process-wide database handle with an
//! explicit object: every operation runs against the session it was asked
//! on, so independent sessions (and tests) never interfere. A session
//! starts uninitialized; [`Session::init`] opens the backing store —
//! in-memory when no filename is given — and must come before `define`,
//! `hook` or any table operation. Re-initializing opens a fresh store and
//! drops the table registry and hook subscription along with the old one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::Connection;
use rusqlite::hooks::Action;
use tracing::{debug, info};

use crate::error::{Result, SlatedError};
use crate::hook::{Broadcaster, Mutation};
use crate::schema::TableSchema;
use crate::settings::Settings;
use crate::table::Table;

pub struct Session {
    conn: Option<Connection>,
    tables: Mutex<HashMap<String, Arc<TableSchema>>>,
    broadcaster: Broadcaster,
}

impl Session {
    /// An uninitialized session; every operation fails with a state error
    /// until [`Session::init`] succeeds.
    pub fn new() -> Self {
        Self {
            conn: None,
            tables: Mutex::new(HashMap::new()),
            broadcaster: Broadcaster::new(),
        }
    }

    /// Opens the backing store: an in-memory database when `store` is
    /// `None`, a named persistent one otherwise. Installs the session's
    /// single engine-level row-change listener. Calling this on a live
    /// session opens a fresh store and clears everything bound to the old
    /// session lifetime (table registry, hook subscription).
    pub fn init(&mut self, store: Option<&str>) -> Result<()> {
        let conn = match store {
            None => Connection::open_in_memory()?,
            Some(path) => Connection::open(path)?,
        };
        let broadcaster = self.broadcaster.clone();
        conn.update_hook(Some(
            move |action: Action, _db: &str, table: &str, rowid: i64| {
                let mutation = match action {
                    Action::SQLITE_INSERT => Mutation::Insert,
                    Action::SQLITE_UPDATE => Mutation::Update,
                    Action::SQLITE_DELETE => Mutation::Delete,
                    _ => return,
                };
                broadcaster.fire(mutation, table, Some(rowid));
            },
        ));
        self.broadcaster.clear();
        self.tables.lock().unwrap().clear();
        self.conn = Some(conn);
        info!(store = store.unwrap_or(":memory:"), "session initialized");
        Ok(())
    }

    pub fn open_in_memory() -> Result<Self> {
        let mut session = Self::new();
        session.init(None)?;
        Ok(session)
    }

    pub fn open(store: &str) -> Result<Self> {
        let mut session = Self::new();
        session.init(Some(store))?;
        Ok(session)
    }

    /// Opens a session as described by loaded [`Settings`].
    pub fn open_with(settings: &Settings) -> Result<Self> {
        let mut session = Self::new();
        session.init(settings.database.as_deref())?;
        if let Some(ms) = settings.busy_timeout_ms {
            session.conn()?.busy_timeout(Duration::from_millis(ms))?;
        }
        Ok(session)
    }

    /// Parses `column_block` into a schema, creates the table in the
    /// engine if it is absent (an existing table is left untouched — this
    /// is intentionally not a migration mechanism), registers the schema,
    /// and returns the bound operation handle.
    pub fn define(&self, table: &str, column_block: &str) -> Result<Table<'_>> {
        let conn = self.conn()?;
        let schema = Arc::new(TableSchema::parse(table, column_block)?);
        let known: i64 = conn.query_row(
            "select count(*) from sqlite_master where type = 'table' and name = ?",
            [table],
            |row| row.get(0),
        )?;
        if known == 0 {
            let sql = schema.create_sql();
            debug!(%sql, "creating table");
            conn.execute(&sql, [])?;
            info!(table, "table created");
        } else {
            debug!(table, "table already exists, schema untouched");
        }
        self.tables
            .lock()
            .unwrap()
            .insert(table.to_owned(), Arc::clone(&schema));
        Ok(Table::new(self, schema))
    }

    /// Re-obtains the operation handle for a previously defined table.
    pub fn table(&self, name: &str) -> Result<Table<'_>> {
        let schema = self
            .tables
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| SlatedError::Schema(format!("table '{}' has not been defined", name)))?;
        Ok(Table::new(self, schema))
    }

    /// Registers the session's hook: `template` is formatted with
    /// `%%`/`%o`/`%t`/`%r` on every mutation and handed to `notify`.
    /// A session carries at most one hook; registering another discards
    /// the previous one.
    pub fn hook(&self, template: &str, notify: impl FnMut(&str) + Send + 'static) -> Result<()> {
        self.conn()?;
        self.broadcaster.set(template, Box::new(notify));
        Ok(())
    }

    /// The rowid of the most recent successful insert on this session.
    pub fn last_insert_rowid(&self) -> Result<i64> {
        Ok(self.conn()?.last_insert_rowid())
    }

    pub(crate) fn conn(&self) -> Result<&Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| SlatedError::State("session not initialized".to_owned()))
    }

    pub(crate) fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
