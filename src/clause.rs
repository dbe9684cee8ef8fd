//! Compilation of operation arguments into SQL fragments.
//!
//! Everything here is a pure function from structured arguments to a piece
//! of statement text; nothing in this module ever touches the engine.
//! Caller-supplied *values* always pass through the [`Binder`] and come out
//! as bound placeholders. Column and table names are emitted literally:
//! they are trusted identifiers originating from a schema definition, never
//! from untrusted input. Expression text (`Selector::expr`) is likewise
//! spliced in as written — apart from rewriting the informal operators it
//! is the caller's job to embed any external values into an expression
//! safely, because the injection-safety guarantee of this layer covers
//! value maps only.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use std::str::FromStr;

use crate::bind::Binder;
use crate::error::SlatedError;
use crate::value::Value;

// ------------- Selector -------------
/// Row selection options shared by get, update, upsert and del.
#[derive(Debug, Default, Clone)]
pub struct Selector {
    pub(crate) rowid: Option<String>,
    pub(crate) expr: Option<String>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }
    /// Select by rowid. Anything that does not read as an integer keeps the
    /// original fail-closed behavior and matches nothing.
    pub fn rowid(mut self, id: impl ToString) -> Self {
        self.rowid = Some(id.to_string());
        self
    }
    /// Select by a compact expression, e.g. `model='Ranger' && year > 1990`.
    pub fn expr(mut self, expr: impl Into<String>) -> Self {
        self.expr = Some(expr.into());
        self
    }
    pub fn is_empty(&self) -> bool {
        self.rowid.is_none() && self.expr.as_deref().is_none_or(str::is_empty)
    }
}

// ------------- Ordering -------------
/// The three ways a caller can ask for ordering. Only one is honored:
/// a plain order wins, then ascending, then descending.
#[derive(Debug, Default, Clone)]
pub struct OrderSpec {
    pub(crate) plain: Option<String>,
    pub(crate) asc: Option<String>,
    pub(crate) desc: Option<String>,
}

// ------------- Limit -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLimit {
    /// All matching rows (`limit -1`).
    Unbounded,
    Count(i64),
}

impl FromStr for RowLimit {
    type Err = SlatedError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("none") {
            return Ok(RowLimit::Unbounded);
        }
        s.parse::<i64>()
            .map(RowLimit::Count)
            .map_err(|_| SlatedError::Argument(format!("unusable limit '{}'", s)))
    }
}

// ------------- Result format -------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// Row-major flattened sequence of values.
    #[default]
    List,
    /// A single record as (column, value) pairs.
    Dict,
}

impl FromStr for Format {
    type Err = SlatedError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(Format::List),
            "dict" => Ok(Format::Dict),
            other => Err(SlatedError::Format(format!(
                "unsupported result format '{}'",
                other
            ))),
        }
    }
}

// ------------- Fragment builders -------------

/// `(c1, c2, …) values (:v1, :v2, …)` with every value bound.
pub fn values(assignments: &[(&str, Value)], binder: &mut Binder) -> String {
    let mut columns = Vec::with_capacity(assignments.len());
    let mut slots = Vec::with_capacity(assignments.len());
    for (column, value) in assignments {
        columns.push(*column);
        slots.push(binder.bind(value.clone()));
    }
    format!("({}) values ({})", columns.join(", "), slots.join(", "))
}

/// `set c1 = :v1, c2 = :v2, …` with the same binding discipline.
pub fn set(assignments: &[(&str, Value)], binder: &mut Binder) -> String {
    let mut pairs = Vec::with_capacity(assignments.len());
    for (column, value) in assignments {
        pairs.push(format!("{} = {}", column, binder.bind(value.clone())));
    }
    format!("set {}", pairs.join(", "))
}

/// `where …` or an empty string. A rowid that is not an integer collapses
/// to the always-false `rowid = ''` rather than erroring; the rowid
/// predicate and the rewritten expression are joined with `and`.
pub fn where_clause(selector: &Selector) -> String {
    let mut predicates = Vec::new();
    if let Some(rowid) = &selector.rowid {
        match rowid.trim().parse::<i64>() {
            Ok(id) => predicates.push(format!("rowid = {}", id)),
            Err(_) => predicates.push("rowid = ''".to_owned()),
        }
    }
    if let Some(expr) = &selector.expr {
        if !expr.is_empty() {
            predicates.push(rewrite_expr(expr));
        }
    }
    if predicates.is_empty() {
        String::new()
    } else {
        format!("where {}", predicates.join(" and "))
    }
}

/// `order by …` or an empty string, honoring exactly one ordering option.
pub fn order_by(order: &OrderSpec) -> String {
    if let Some(column) = &order.plain {
        format!("order by {}", column)
    } else if let Some(column) = &order.asc {
        format!("order by {} asc", column)
    } else if let Some(column) = &order.desc {
        format!("order by {} desc", column)
    } else {
        String::new()
    }
}

/// `limit …`, never empty: the single-record form pins the limit to 1, an
/// unbounded request becomes `limit -1`, and no request at all defaults
/// to one row.
pub fn limit(limit: Option<RowLimit>, format: Format) -> String {
    if format == Format::Dict {
        return "limit 1".to_owned();
    }
    match limit {
        Some(RowLimit::Unbounded) => "limit -1".to_owned(),
        Some(RowLimit::Count(n)) => format!("limit {}", n),
        None => "limit 1".to_owned(),
    }
}

lazy_static! {
    static ref INFORMAL_OPS: Regex = Regex::new(r"~=|&&|\|\|").unwrap();
}

/// Rewrites the informal operators to their SQL spellings:
/// `~=` → ` like `, `&&` → ` and `, `||` → ` or `.
pub fn rewrite_expr(expr: &str) -> String {
    INFORMAL_OPS
        .replace_all(expr, |captures: &Captures| match &captures[0] {
            "~=" => " like ",
            "&&" => " and ",
            _ => " or ",
        })
        .into_owned()
}
