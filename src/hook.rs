//! The single formatted callback fired on row mutation events.
//!
//! A session registers at most one hook: a template plus a callback.
//! Insert, update and delete events arrive from the engine's row-change
//! listener; the synthetic delete-all event is raised by the dispatcher,
//! since the engine erases an unfiltered delete wholesale without visiting
//! rows. Either way the template is formatted once and the callback runs
//! synchronously, in-line with the mutating call.

use std::fmt;
use std::sync::{Arc, Mutex};

/// What happened to a row (or, for `DeleteAll`, to a whole table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Insert,
    Update,
    Delete,
    DeleteAll,
}

impl Mutation {
    pub fn name(self) -> &'static str {
        match self {
            Mutation::Insert => "insert",
            Mutation::Update => "update",
            Mutation::Delete => "delete",
            Mutation::DeleteAll => "delete_all",
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Formats an event through a hook template in a single left-to-right
/// pass: `%%` → `%`, `%o` → operation name, `%t` → table, `%r` → rowid
/// (empty for delete-all). Substituted text is never rescanned, so the
/// formatting cannot re-enter itself. Unrecognized `%x` pairs are kept
/// as written.
pub fn format_event(template: &str, operation: &str, table: &str, rowid: &str) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut chars = template.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => out.push('%'),
            Some('o') => out.push_str(operation),
            Some('t') => out.push_str(table),
            Some('r') => out.push_str(rowid),
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }
    out
}

struct Hook {
    template: String,
    notify: Box<dyn FnMut(&str) + Send>,
}

/// Holds the one hook subscription of a session and re-emits mutation
/// events through it. Shared between the session, the table handles and
/// the engine-level listener, which is why the state sits behind an
/// `Arc<Mutex<…>>`.
#[derive(Clone, Default)]
pub struct Broadcaster {
    hook: Arc<Mutex<Option<Hook>>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }
    /// Installs a subscription, discarding any previous one.
    pub fn set(&self, template: impl Into<String>, notify: Box<dyn FnMut(&str) + Send>) {
        *self.hook.lock().unwrap() = Some(Hook {
            template: template.into(),
            notify,
        });
    }
    /// Drops the subscription, e.g. when its session is re-initialized.
    pub fn clear(&self) {
        *self.hook.lock().unwrap() = None;
    }
    /// Formats and delivers one event; a no-op without a subscription.
    pub fn fire(&self, mutation: Mutation, table: &str, rowid: Option<i64>) {
        if let Some(hook) = self.hook.lock().unwrap().as_mut() {
            let rowid = rowid.map(|id| id.to_string()).unwrap_or_default();
            let message = format_event(&hook.template, mutation.name(), table, &rowid);
            (hook.notify)(&message);
        }
    }
}
