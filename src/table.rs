//! Table-scoped operations.
//!
//! [`Session::define`] hands out a [`Table`]: a typed handle with the
//! operations {add, del, update, upsert, get, cols} bound to one table
//! name. The handle keeps no state of its own — each call compiles its
//! clauses, executes one statement against the session's engine and
//! normalizes the result. Malformed argument combinations fail before any
//! SQL is compiled; engine failures propagate with their diagnostic text
//! untouched.

use std::sync::Arc;

use rusqlite::types;
use tracing::debug;

use crate::bind::Binder;
use crate::clause::{self, Format, OrderSpec, RowLimit, Selector};
use crate::error::{Result, SlatedError};
use crate::hook::Mutation;
use crate::schema::TableSchema;
use crate::session::Session;
use crate::value::Value;

// ------------- Operation arguments -------------

/// Options for [`Table::get`].
#[derive(Debug, Default, Clone)]
pub struct Get {
    pub(crate) selector: Selector,
    pub(crate) order: OrderSpec,
    pub(crate) limit: Option<RowLimit>,
    pub(crate) format: Format,
}

impl Get {
    pub fn new() -> Self {
        Self::default()
    }
    /// A get constrained by an existing selector, as used by upsert's
    /// match probe.
    pub fn matching(selector: Selector) -> Self {
        Self {
            selector,
            ..Self::default()
        }
    }
    pub fn rowid(mut self, id: impl ToString) -> Self {
        self.selector = self.selector.rowid(id);
        self
    }
    pub fn expr(mut self, expr: impl Into<String>) -> Self {
        self.selector = self.selector.expr(expr);
        self
    }
    pub fn order(mut self, column: impl Into<String>) -> Self {
        self.order.plain = Some(column.into());
        self
    }
    pub fn order_asc(mut self, column: impl Into<String>) -> Self {
        self.order.asc = Some(column.into());
        self
    }
    pub fn order_desc(mut self, column: impl Into<String>) -> Self {
        self.order.desc = Some(column.into());
        self
    }
    pub fn limit(mut self, rows: i64) -> Self {
        self.limit = Some(RowLimit::Count(rows));
        self
    }
    pub fn limit_none(mut self) -> Self {
        self.limit = Some(RowLimit::Unbounded);
        self
    }
    pub fn row_limit(mut self, limit: RowLimit) -> Self {
        self.limit = Some(limit);
        self
    }
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }
}

/// Arguments for [`Table::del`]: either the explicit all-rows form or a
/// selector, never both and never neither.
#[derive(Debug, Default, Clone)]
pub struct Del {
    all: bool,
    selector: Selector,
}

impl Del {
    pub fn new() -> Self {
        Self::default()
    }
    /// Delete every row.
    pub fn all() -> Self {
        Self {
            all: true,
            ..Self::default()
        }
    }
    pub fn rowid(mut self, id: impl ToString) -> Self {
        self.selector = self.selector.rowid(id);
        self
    }
    pub fn expr(mut self, expr: impl Into<String>) -> Self {
        self.selector = self.selector.expr(expr);
        self
    }
}

// ------------- Results -------------

/// A normalized query result.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    /// The collapsed form: exactly one requested column, effective limit 1,
    /// list format. `Value::Null` when nothing matched.
    Scalar(Value),
    /// Row-major flattened values.
    List(Vec<Value>),
    /// A single record as (column, value) pairs, in projection order.
    Record(Vec<(String, Value)>),
}

impl Fetched {
    pub fn scalar(self) -> Option<Value> {
        match self {
            Fetched::Scalar(value) => Some(value),
            _ => None,
        }
    }
    pub fn list(self) -> Vec<Value> {
        match self {
            Fetched::Scalar(value) => vec![value],
            Fetched::List(values) => values,
            Fetched::Record(pairs) => pairs.into_iter().map(|(_, value)| value).collect(),
        }
    }
    pub fn record(self) -> Vec<(String, Value)> {
        match self {
            Fetched::Record(pairs) => pairs,
            _ => Vec::new(),
        }
    }
}

// ------------- The operation surface -------------

/// The generated operation surface for one defined table.
pub struct Table<'s> {
    session: &'s Session,
    schema: Arc<TableSchema>,
}

impl std::fmt::Debug for Table<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl<'s> Table<'s> {
    pub(crate) fn new(session: &'s Session, schema: Arc<TableSchema>) -> Self {
        Self { session, schema }
    }

    pub fn name(&self) -> &str {
        self.schema.name()
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Inserts one row from a column→value map.
    pub fn add(&self, values: &[(&str, Value)]) -> Result<usize> {
        if values.is_empty() {
            return Err(SlatedError::Argument(
                "add requires at least one column value".to_owned(),
            ));
        }
        let mut binder = Binder::new();
        let fragment = clause::values(values, &mut binder);
        let sql = format!("insert into {} {}", self.name(), fragment);
        debug!(%sql, bound = binder.len(), "add");
        let conn = self.session.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        Ok(stmt.execute(binder.params().as_slice())?)
    }

    /// Deletes rows. `Del::all()` removes every row and raises the
    /// distinguished delete-all event; any other form must select rows by
    /// rowid or expression.
    pub fn del(&self, del: &Del) -> Result<usize> {
        if del.all && !del.selector.is_empty() {
            return Err(SlatedError::Argument(
                "deleting everything cannot be combined with row selectors".to_owned(),
            ));
        }
        if !del.all && del.selector.is_empty() {
            return Err(SlatedError::Argument(
                "del requires a rowid or expression selector, or the explicit all-rows form"
                    .to_owned(),
            ));
        }
        let conn = self.session.conn()?;
        let mut sql = format!("delete from {}", self.name());
        if del.all {
            debug!(%sql, "del all");
            let removed = conn.execute(&sql, [])?;
            // An unfiltered delete is erased wholesale by the engine, so no
            // per-row events arrive; the synthetic event carries no rowid.
            self.session
                .broadcaster()
                .fire(Mutation::DeleteAll, self.name(), None);
            Ok(removed)
        } else {
            push_fragment(&mut sql, clause::where_clause(&del.selector));
            debug!(%sql, "del");
            Ok(conn.execute(&sql, [])?)
        }
    }

    /// Updates the selected rows from a column→value map. An empty
    /// selector updates every row.
    pub fn update(&self, selector: &Selector, values: &[(&str, Value)]) -> Result<usize> {
        if values.is_empty() {
            return Err(SlatedError::Argument(
                "update requires at least one column value".to_owned(),
            ));
        }
        let mut binder = Binder::new();
        let fragment = clause::set(values, &mut binder);
        let mut sql = format!("update {} {}", self.name(), fragment);
        push_fragment(&mut sql, clause::where_clause(selector));
        debug!(%sql, bound = binder.len(), "update");
        let conn = self.session.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        Ok(stmt.execute(binder.params().as_slice())?)
    }

    /// Update-if-matched-else-insert: probes the selector with a count
    /// query, then delegates to [`Table::update`] or [`Table::add`].
    pub fn upsert(&self, selector: &Selector, values: &[(&str, Value)]) -> Result<usize> {
        if values.is_empty() {
            return Err(SlatedError::Argument(
                "upsert requires at least one column value".to_owned(),
            ));
        }
        let matched = match self.get(&["count(*)"], &Get::matching(selector.clone()))? {
            Fetched::Scalar(Value::Integer(n)) => n,
            _ => 0,
        };
        if matched == 0 {
            self.add(values)
        } else {
            self.update(selector, values)
        }
    }

    /// Selects rows. An empty projection reads as `*`. The list format
    /// returns the row-major flattened value sequence, collapsing to a
    /// bare scalar when exactly one column was requested and the effective
    /// limit is one; the dict format returns a single record keyed by
    /// column name.
    pub fn get(&self, columns: &[&str], options: &Get) -> Result<Fetched> {
        let projection = if columns.is_empty() {
            "*".to_owned()
        } else {
            columns.join(", ")
        };
        let mut sql = format!("select {} from {}", projection, self.name());
        push_fragment(&mut sql, clause::where_clause(&options.selector));
        push_fragment(&mut sql, clause::order_by(&options.order));
        push_fragment(&mut sql, clause::limit(options.limit, options.format));
        debug!(%sql, "get");
        let conn = self.session.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let names: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        match options.format {
            Format::Dict => {
                let mut rows = stmt.query([])?;
                let mut record = Vec::with_capacity(names.len());
                if let Some(row) = rows.next()? {
                    for (i, name) in names.iter().enumerate() {
                        let value: types::Value = row.get(i)?;
                        record.push((name.clone(), Value::from(value)));
                    }
                }
                Ok(Fetched::Record(record))
            }
            Format::List => {
                let mut flat = Vec::new();
                let mut rows = stmt.query([])?;
                while let Some(row) = rows.next()? {
                    for i in 0..names.len() {
                        let value: types::Value = row.get(i)?;
                        flat.push(Value::from(value));
                    }
                }
                let effective_limit = match options.limit {
                    None => 1,
                    Some(RowLimit::Count(n)) => n,
                    Some(RowLimit::Unbounded) => -1,
                };
                if columns.len() == 1 && columns[0] != "*" && effective_limit == 1 {
                    Ok(Fetched::Scalar(
                        flat.into_iter().next().unwrap_or(Value::Null),
                    ))
                } else {
                    Ok(Fetched::List(flat))
                }
            }
        }
    }

    /// The ordered column names from engine metadata.
    pub fn cols(&self) -> Result<Vec<String>> {
        let conn = self.session.conn()?;
        let mut stmt = conn.prepare(&format!("pragma table_info({})", self.name()))?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(columns)
    }
}

fn push_fragment(sql: &mut String, fragment: String) {
    if !fragment.is_empty() {
        sql.push(' ');
        sql.push_str(&fragment);
    }
}
