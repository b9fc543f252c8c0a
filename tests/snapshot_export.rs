use fertility_scatter::export::save_snapshot;
use fertility_scatter::loader;
use fertility_scatter::{PlotConfig, Session, UiEvent};
use std::fs;
use tempfile::tempdir;

fn session() -> Session {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/dataEveryYear.csv");
    let file = fs::File::open(path).unwrap();
    let data = loader::parse_csv(file).unwrap();
    Session::new(data, PlotConfig::default()).unwrap()
}

#[test]
fn svg_snapshot_is_written() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("plot.svg");
    save_snapshot(session().surface(), &out).unwrap();
    let txt = fs::read_to_string(&out).unwrap();
    assert!(txt.contains("<svg"));
    assert!(txt.contains("<circle"));
    assert!(txt.contains("Life Expectancy"));
}

#[test]
fn snapshot_only_draws_selected_year() {
    let dir = tempdir().unwrap();
    let mut s = session();
    let a = dir.path().join("a.svg");
    save_snapshot(s.surface(), &a).unwrap();

    s.handle(UiEvent::SelectYear("2050".into()));
    let b = dir.path().join("b.svg");
    save_snapshot(s.surface(), &b).unwrap();

    let circles = |p: &std::path::Path| fs::read_to_string(p).unwrap().matches("<circle").count();
    assert_eq!(circles(a.as_path()), 6);
    assert_eq!(circles(b.as_path()), 0);
}

#[test]
fn png_without_font_still_renders() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("plot.png");
    save_snapshot(session().surface(), &out).unwrap();
    assert!(fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("plot.gif");
    assert!(save_snapshot(session().surface(), &out).is_err());
    assert!(!out.exists());
}
