//! A small demonstration driver for the slated library: opens a session
//! from settings, defines a table, registers a hook and runs a handful of
//! operations against it. The library itself is the product; this binary
//! only shows the surface.

use tracing::info;
use tracing_subscriber::EnvFilter;

use slated::error::Result;
use slated::session::Session;
use slated::settings::Settings;
use slated::table::{Del, Get};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = Settings::load()?;
    let session = Session::open_with(&settings)?;
    session.hook("%o on %t (row %r)", |event| println!("hook: {}", event))?;

    let car = session.define(
        "car",
        "
        make  text    # manufacturer
        model text
        year  integer # model year
        color text
        ",
    )?;
    let columns = car.cols()?;
    info!(?columns, "defined car");

    car.add(&[
        ("make", "Ford".into()),
        ("model", "Ranger".into()),
        ("year", 1996.into()),
        ("color", "tan".into()),
    ])?;
    let rowid = session.last_insert_rowid()?;

    let color = car.get(&["color"], &Get::new().expr("model='Ranger' && make='Ford'"))?;
    println!("color: {}", color.scalar().unwrap_or_default());

    car.update(
        &slated::clause::Selector::new().rowid(rowid),
        &[("model", "Ranger XL".into())],
    )?;
    let model = car.get(&["model"], &Get::new().rowid(rowid))?;
    println!("model: {}", model.scalar().unwrap_or_default());

    car.del(&Del::all())?;
    Ok(())
}
