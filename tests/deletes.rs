use slated::error::SlatedError;
use slated::session::Session;
use slated::table::{Del, Get};
use slated::value::Value;

fn seeded() -> Session {
    let session = Session::open_in_memory().expect("session");
    let car = session
        .define("car", "make text\nmodel text\nyear integer\ncolor text")
        .expect("define");
    for (make, year) in [("Ford", 1996), ("Saab", 2005), ("Volvo", 1999)] {
        car.add(&[
            ("make", make.into()),
            ("model", "M".into()),
            ("year", year.into()),
            ("color", "white".into()),
        ])
        .expect("add");
    }
    session
}

fn count(session: &Session) -> Value {
    session
        .table("car")
        .expect("handle")
        .get(&["count(*)"], &Get::new())
        .expect("count")
        .scalar()
        .expect("scalar")
}

#[test]
fn delete_all_removes_every_row() {
    let session = seeded();
    let car = session.table("car").expect("handle");
    car.del(&Del::all()).expect("del all");
    assert_eq!(count(&session), Value::Integer(0));
}

#[test]
fn delete_all_rejects_other_options() {
    let session = seeded();
    let car = session.table("car").expect("handle");
    let err = car.del(&Del::all().rowid(1)).unwrap_err();
    assert!(matches!(err, SlatedError::Argument(_)));
    let err = car.del(&Del::all().expr("year > 2000")).unwrap_err();
    assert!(matches!(err, SlatedError::Argument(_)));
    // nothing was removed by the rejected calls
    assert_eq!(count(&session), Value::Integer(3));
}

#[test]
fn delete_requires_a_selector() {
    let session = seeded();
    let car = session.table("car").expect("handle");
    let err = car.del(&Del::new()).unwrap_err();
    assert!(matches!(err, SlatedError::Argument(_)));
    assert_eq!(count(&session), Value::Integer(3));
}

#[test]
fn delete_by_rowid_and_expression() {
    let session = seeded();
    let car = session.table("car").expect("handle");
    assert_eq!(car.del(&Del::new().rowid(1)).expect("del"), 1);
    assert_eq!(car.del(&Del::new().expr("year > 2000")).expect("del"), 1);
    assert_eq!(count(&session), Value::Integer(1));
}

#[test]
fn non_integer_rowid_fails_closed() {
    let session = seeded();
    let car = session.table("car").expect("handle");
    // a rowid that does not read as an integer matches nothing at all
    assert_eq!(car.del(&Del::new().rowid("abc")).expect("del"), 0);
    assert_eq!(count(&session), Value::Integer(3));
    assert_eq!(
        car.get(&["year"], &Get::new().rowid("abc")).expect("get"),
        slated::table::Fetched::Scalar(Value::Null)
    );
}
