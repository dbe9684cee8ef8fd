use slated::clause::Selector;
use slated::session::Session;
use slated::table::{Fetched, Get};
use slated::value::Value;

fn car_session() -> Session {
    let session = Session::open_in_memory().expect("session");
    session
        .define("car", "make text\nmodel text\nyear integer\ncolor text")
        .expect("define");
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
fn upsert_inserts_when_nothing_matches() {
    let session = car_session();
    let car = session.table("car").expect("handle");
    car.upsert(
        &Selector::new().expr("make='Ford'"),
        &[
            ("make", "Ford".into()),
            ("model", "Ranger".into()),
            ("year", 1996.into()),
            ("color", "tan".into()),
        ],
    )
    .expect("upsert");
    assert_eq!(count(&session), Value::Integer(1));
}

#[test]
fn upsert_updates_when_matched() {
    let session = car_session();
    let car = session.table("car").expect("handle");
    let selector = Selector::new().expr("make='Ford'");
    car.upsert(
        &selector,
        &[
            ("make", "Ford".into()),
            ("model", "Ranger".into()),
            ("year", 1996.into()),
            ("color", "tan".into()),
        ],
    )
    .expect("first upsert");
    car.upsert(&selector, &[("color", "red".into())])
        .expect("second upsert");
    assert_eq!(count(&session), Value::Integer(1));
    assert_eq!(
        car.get(&["color"], &Get::new().expr("make='Ford'")).expect("get"),
        Fetched::Scalar(Value::Text("red".into()))
    );
}

#[test]
fn upsert_is_idempotent() {
    let session = car_session();
    let car = session.table("car").expect("handle");
    let selector = Selector::new().expr("make='Ford'");
    let values: &[(&str, Value)] = &[
        ("make", "Ford".into()),
        ("model", "Ranger".into()),
        ("year", 1996.into()),
        ("color", "tan".into()),
    ];
    car.upsert(&selector, values).expect("upsert");
    car.upsert(&selector, values).expect("upsert again");
    assert_eq!(count(&session), Value::Integer(1));
    let fetched = car.get(&[], &Get::new().rowid(1)).expect("get");
    assert_eq!(
        fetched,
        Fetched::List(vec![
            Value::Text("Ford".into()),
            Value::Text("Ranger".into()),
            Value::Integer(1996),
            Value::Text("tan".into()),
        ])
    );
}

#[test]
fn upsert_updates_all_matching_rows() {
    let session = car_session();
    let car = session.table("car").expect("handle");
    for year in [1996, 1998] {
        car.add(&[
            ("make", "Ford".into()),
            ("model", "Ranger".into()),
            ("year", year.into()),
            ("color", "tan".into()),
        ])
        .expect("add");
    }
    let changed = car
        .upsert(&Selector::new().expr("make='Ford'"), &[("color", "blue".into())])
        .expect("upsert");
    assert_eq!(changed, 2);
    let colors = car
        .get(&["color"], &Get::new().limit_none())
        .expect("get")
        .list();
    assert_eq!(
        colors,
        vec![Value::Text("blue".into()), Value::Text("blue".into())]
    );
}
