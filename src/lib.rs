//! Slated – a thin declarative layer over SQLite.
//!
//! Slated lets a caller describe a table schema once and get back a typed,
//! table-bound operation surface, with all caller values reaching the
//! engine through bound parameters:
//! * A [`session::Session`] owns the engine connection, the table
//!   registry and the one mutation hook; it replaces any notion of global
//!   database state, so independent sessions never interfere.
//! * [`session::Session::define`] parses a line-oriented column block into
//!   a [`schema::TableSchema`], creates the table only if it is absent,
//!   and returns a [`table::Table`] handle.
//! * A [`table::Table`] carries the operations {add, del, update, upsert,
//!   get, cols}; requests are compiled into SQL fragments by [`clause`]
//!   with every value passing through a [`bind::Binder`] slot.
//! * [`session::Session::hook`] registers a formatted callback that fires
//!   on every insert, update, delete and all-rows delete.
//!
//! ## Modules
//! * [`session`] – session lifecycle, schema registration, hook wiring.
//! * [`schema`] – column-block parsing and table DDL.
//! * [`table`] – the per-table operation surface and result shapes.
//! * [`clause`] – compilation of operation arguments into SQL fragments.
//! * [`bind`] – transient named parameter slots for one statement.
//! * [`hook`] – mutation events and template formatting.
//! * [`value`] – the owned value type moving data in and out of the engine.
//! * [`settings`] – optional file/environment configuration.
//! * [`error`] – the error taxonomy shared by everything above.
//!
//! ## Compact expressions
//! Row selection accepts a compact expression syntax whose informal
//! operators `~=`, `&&` and `||` are rewritten to `like`, `and` and `or`.
//! Expression text is spliced into the statement as written; only value
//! maps are parameter-bound, so any external value belongs in a value map,
//! not in expression text.
//!
//! ## Quick Start
//! ```
//! use slated::session::Session;
//! use slated::table::Get;
//!
//! let session = Session::open_in_memory().unwrap();
//! let car = session
//!     .define("car", "make text\nmodel text\nyear integer\ncolor text")
//!     .unwrap();
//! car.add(&[
//!     ("make", "Ford".into()),
//!     ("model", "Ranger".into()),
//!     ("year", 1996.into()),
//!     ("color", "tan".into()),
//! ])
//! .unwrap();
//! let color = car
//!     .get(&["color"], &Get::new().expr("model='Ranger' && make='Ford'"))
//!     .unwrap();
//! assert_eq!(color.scalar().unwrap().to_string(), "tan");
//! ```

pub mod bind;
pub mod clause;
pub mod error;
pub mod hook;
pub mod schema;
pub mod session;
pub mod settings;
pub mod table;
pub mod value;
