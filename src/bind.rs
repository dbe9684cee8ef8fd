//! Transient named bindings for one statement.
//!
//! A [`Binder`] lives for exactly one dispatch call: the clause compiler
//! asks it for a slot per caller value, the dispatcher hands its collected
//! parameters to the engine, and dropping the binder at the end of the call
//! releases every slot whether the statement succeeded or failed. Slot
//! names come from a monotonic counter, so no two slots within a
//! statement's parameter set can ever collide.

use rusqlite::types::ToSql;

use crate::value::Value;

pub struct Binder {
    next: usize,
    bound: Vec<(String, Value)>,
}

impl Binder {
    pub fn new() -> Self {
        Self {
            next: 0,
            bound: Vec::new(),
        }
    }
    /// Takes ownership of one caller value and returns the placeholder
    /// (`:v1`, `:v2`, …) to splice into the statement text.
    pub fn bind(&mut self, value: Value) -> String {
        self.next += 1;
        let slot = format!(":v{}", self.next);
        self.bound.push((slot.clone(), value));
        slot
    }
    /// The engine-facing view of every slot bound so far.
    pub fn params(&self) -> Vec<(&str, &dyn ToSql)> {
        self.bound
            .iter()
            .map(|(slot, value)| (slot.as_str(), value as &dyn ToSql))
            .collect()
    }
    pub fn len(&self) -> usize {
        self.bound.len()
    }
    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}
