use slated::error::SlatedError;
use slated::session::Session;
use slated::settings::Settings;
use slated::table::Get;
use slated::value::Value;

#[test]
fn operations_before_init_are_state_errors() {
    let session = Session::new();
    let err = session.define("car", "make text").unwrap_err();
    assert!(matches!(err, SlatedError::State(_)));
    let err = session.last_insert_rowid().unwrap_err();
    assert!(matches!(err, SlatedError::State(_)));
}

#[test]
fn unknown_table_handles_are_rejected() {
    let session = Session::open_in_memory().expect("session");
    let err = session.table("car").unwrap_err();
    assert!(matches!(err, SlatedError::Schema(_)));
}

#[test]
fn reinit_opens_a_fresh_session_lifetime() {
    let mut session = Session::open_in_memory().expect("session");
    let car = session.define("car", "make text").expect("define");
    car.add(&[("make", "Ford".into())]).expect("add");
    session.init(None).expect("reinit");
    // the registry belonged to the previous lifetime
    let err = session.table("car").unwrap_err();
    assert!(matches!(err, SlatedError::Schema(_)));
    // and the fresh store has no car table
    let car = session.define("car", "make text").expect("redefine");
    assert_eq!(
        car.get(&["count(*)"], &Get::new()).expect("count").scalar(),
        Some(Value::Integer(0))
    );
}

#[test]
fn file_mode_persists_between_sessions() {
    let path = "test_slated_temp.db";
    let _ = std::fs::remove_file(path);
    {
        let session = Session::open(path).expect("session");
        let car = session.define("car", "make text\nyear integer").expect("define");
        car.add(&[("make", "Ford".into()), ("year", 1996.into())])
            .expect("add");
    }
    {
        let session = Session::open(path).expect("reopen");
        // the table already exists, so this definition touches no schema
        let car = session.define("car", "make text\nyear integer").expect("define");
        assert_eq!(
            car.get(&["make"], &Get::new().rowid(1)).expect("get").scalar(),
            Some(Value::Text("Ford".into()))
        );
    }
    let _ = std::fs::remove_file(path);
}

#[test]
fn settings_driven_session() {
    let settings = Settings {
        database: None,
        busy_timeout_ms: Some(250),
    };
    let session = Session::open_with(&settings).expect("session");
    let car = session.define("car", "make text").expect("define");
    car.add(&[("make", "Ford".into())]).expect("add");
    assert_eq!(
        car.get(&["make"], &Get::new()).expect("get").scalar(),
        Some(Value::Text("Ford".into()))
    );
}

#[test]
fn settings_load_defaults_to_in_memory() {
    let settings = Settings::load().expect("load");
    assert!(settings.database.is_none());
}
