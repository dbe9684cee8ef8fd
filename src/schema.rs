//! Table schemas parsed from declarative column blocks.
//!
//! A schema is defined once, at `define` time, from line-oriented text:
//!
//! ```text
//! make  text collate nocase   # manufacturer
//! model text
//! year  integer
//! primary key (make, model)
//! ```
//!
//! Each line is truncated at its first `#`; blank lines are skipped; the
//! first token is the column name and the rest is opaque type/constraint
//! text handed to the engine verbatim. A line whose leading tokens spell
//! `primary key` is not a column but a table-level constraint, also passed
//! through verbatim.
//!
//! Identifiers in a schema are trusted: they are emitted into statement
//! text literally and are never parameter-bound, so a column block must
//! originate from static program text, never from untrusted input. Only
//! values are bound at query time.

use crate::error::{Result, SlatedError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    name: String,
    spec: String,
}

impl ColumnSpec {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn spec(&self) -> &str {
        &self.spec
    }
}

#[derive(Debug, Clone)]
pub struct TableSchema {
    name: String,
    columns: Vec<ColumnSpec>,
    constraints: Vec<String>,
}

impl TableSchema {
    /// Parses a column block into a schema for `table`.
    pub fn parse(table: &str, column_block: &str) -> Result<Self> {
        let mut columns = Vec::new();
        let mut constraints = Vec::new();
        for line in column_block.lines() {
            let line = match line.find('#') {
                Some(at) => &line[..at],
                None => line,
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if is_table_constraint(line) {
                constraints.push(line.to_owned());
                continue;
            }
            let mut tokens = line.split_whitespace();
            let name = match tokens.next() {
                Some(token) => token.to_owned(),
                None => continue,
            };
            let spec = tokens.collect::<Vec<_>>().join(" ");
            columns.push(ColumnSpec { name, spec });
        }
        if columns.is_empty() {
            return Err(SlatedError::Schema(format!(
                "no column definitions for table '{}'",
                table
            )));
        }
        Ok(Self {
            name: table.to_owned(),
            columns,
            constraints,
        })
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }
    /// The `create table` statement with column specs and constraint lines
    /// joined verbatim, in source order.
    pub fn create_sql(&self) -> String {
        let mut items: Vec<String> = self
            .columns
            .iter()
            .map(|column| {
                if column.spec.is_empty() {
                    column.name.clone()
                } else {
                    format!("{} {}", column.name, column.spec)
                }
            })
            .collect();
        items.extend(self.constraints.iter().cloned());
        format!("create table {} ({})", self.name, items.join(", "))
    }
}

// A literal "primary key" directive marks a composite-key line.
fn is_table_constraint(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    matches!(
        (tokens.next(), tokens.next()),
        (Some(first), Some(second))
            if first.eq_ignore_ascii_case("primary") && second.eq_ignore_ascii_case("key")
    )
}
