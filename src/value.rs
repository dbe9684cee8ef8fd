// used to move values in and out of the engine
use rusqlite::types::{self, ToSql, ToSqlOutput, ValueRef};

// used to print out readable forms of a value
use std::fmt;

/// An owned value shaped like the engine's storage classes.
///
/// Value maps handed to `add`/`update`/`upsert` carry these; they are the
/// only things that ever reach a statement through a bound parameter, so a
/// value is stored and retrieved as data no matter what text it contains.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(types::Value::Null),
            Value::Integer(i) => ToSqlOutput::Owned(types::Value::Integer(*i)),
            Value::Real(r) => ToSqlOutput::Owned(types::Value::Real(*r)),
            Value::Text(t) => ToSqlOutput::Borrowed(ValueRef::Text(t.as_bytes())),
            Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

impl From<types::Value> for Value {
    fn from(v: types::Value) -> Self {
        match v {
            types::Value::Null => Value::Null,
            types::Value::Integer(i) => Value::Integer(i),
            types::Value::Real(r) => Value::Real(r),
            types::Value::Text(t) => Value::Text(t),
            types::Value::Blob(b) => Value::Blob(b),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}
impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}
impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}
impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}
impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Integer(v as i64)
    }
}
impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => write!(f, ""),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Text(t) => write!(f, "{}", t),
            Value::Blob(b) => write!(f, "<{} byte blob>", b.len()),
        }
    }
}
