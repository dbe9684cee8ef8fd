use slated::session::Session;
use slated::table::Get;
use slated::value::Value;

fn seeded() -> Session {
    let session = Session::open_in_memory().expect("session");
    let car = session
        .define("car", "make text\nyear integer")
        .expect("define");
    for (make, year) in [("Ford", 1996), ("Saab", 2005), ("Volvo", 1990)] {
        car.add(&[("make", make.into()), ("year", year.into())])
            .expect("add");
    }
    session
}

fn years(session: &Session, options: Get) -> Vec<Value> {
    session
        .table("car")
        .expect("handle")
        .get(&["year"], &options.limit_none())
        .expect("get")
        .list()
}

#[test]
fn ascending_and_descending() {
    let session = seeded();
    assert_eq!(
        years(&session, Get::new().order_asc("year")),
        vec![Value::Integer(1990), Value::Integer(1996), Value::Integer(2005)]
    );
    assert_eq!(
        years(&session, Get::new().order_desc("year")),
        vec![Value::Integer(2005), Value::Integer(1996), Value::Integer(1990)]
    );
}

#[test]
fn plain_order_uses_engine_default() {
    let session = seeded();
    assert_eq!(
        years(&session, Get::new().order("year")),
        vec![Value::Integer(1990), Value::Integer(1996), Value::Integer(2005)]
    );
}

#[test]
fn ascending_wins_over_descending() {
    let session = seeded();
    assert_eq!(
        years(&session, Get::new().order_asc("year").order_desc("year")),
        vec![Value::Integer(1990), Value::Integer(1996), Value::Integer(2005)]
    );
}

#[test]
fn plain_order_wins_over_both() {
    let session = seeded();
    assert_eq!(
        years(
            &session,
            Get::new().order("year").order_asc("year").order_desc("year")
        ),
        vec![Value::Integer(1990), Value::Integer(1996), Value::Integer(2005)]
    );
}
