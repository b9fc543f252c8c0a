use fertility_scatter::controller::filter_points;
use fertility_scatter::models::{Dataset, Row};
use fertility_scatter::surface::Display;
use fertility_scatter::{PlotConfig, Session, UiEvent};

fn two_rows() -> Dataset {
    Dataset::new(vec![
        Row::new("Aland", "1960", 5.0, 50.0, 10.0),
        Row::new("Bland", "1970", 3.0, 60.0, 20.0),
    ])
}

fn visible_rows(session: &Session) -> Vec<usize> {
    session.surface().visible_markers().map(|m| m.row).collect()
}

#[test]
fn filter_by_year_round_trip() {
    let data = two_rows();
    let plan = filter_points(data.rows(), "1960");
    assert_eq!(plan.displays, [Display::Inline, Display::None]);
    let plan = filter_points(data.rows(), "1970");
    assert_eq!(plan.displays, [Display::None, Display::Inline]);
    assert_eq!(plan.shown().collect::<Vec<_>>(), [1]);
}

#[test]
fn session_starts_on_1960() {
    let s = Session::new(two_rows(), PlotConfig::default()).unwrap();
    assert_eq!(s.config().initial_year, "1960");
    assert_eq!(s.selected_year(), "1960");
    // raw limits, before padding
    assert_eq!(s.limits().x_min, 3.0);
    assert_eq!(s.limits().y_max, 60.0);
    assert_eq!(s.radius().map(20.0), 20.0);
    assert_eq!(s.surface().markers().count(), 2);
    assert_eq!(visible_rows(&s), [0]);
}

#[test]
fn dropdown_change_inverts_visibility() {
    let mut s = Session::new(two_rows(), PlotConfig::default()).unwrap();
    let resp = s.handle(UiEvent::SelectYear("1970".into()));
    assert_eq!(resp.visibility.unwrap().shown_count(), 1);
    assert_eq!(visible_rows(&s), [1]);
    s.handle(UiEvent::SelectYear("1960".into()));
    assert_eq!(visible_rows(&s), [0]);
}

#[test]
fn prev_and_next_stop_at_the_ends() {
    let mut s = Session::new(two_rows(), PlotConfig::default()).unwrap();

    let resp = s.handle(UiEvent::Prev);
    assert!(resp.is_noop());
    assert_eq!(s.selected_year(), "1960");

    let resp = s.handle(UiEvent::Next);
    assert_eq!(resp.visibility.unwrap().year, "1970");
    assert_eq!(s.selector().selected_index(), 1);

    let resp = s.handle(UiEvent::Next);
    assert!(resp.is_noop());
    assert_eq!(s.selected_year(), "1970");
    assert_eq!(visible_rows(&s), [1]);

    s.handle(UiEvent::Prev);
    assert_eq!(s.selected_year(), "1960");
    assert_eq!(visible_rows(&s), [0]);
}

#[test]
fn unknown_year_hides_everything() {
    let mut s = Session::new(two_rows(), PlotConfig::default()).unwrap();
    let resp = s.handle(UiEvent::SelectYear("2020".into()));
    assert_eq!(resp.visibility.unwrap().shown_count(), 0);
    assert!(visible_rows(&s).is_empty());
    assert_eq!(s.surface().markers().count(), 2);
}

#[test]
fn initial_year_not_in_data() {
    let cfg = PlotConfig {
        initial_year: "1900".into(),
        ..PlotConfig::default()
    };
    let mut s = Session::new(two_rows(), cfg).unwrap();
    assert!(visible_rows(&s).is_empty());
    // dropdown sits on its first option, so next moves to the second
    s.handle(UiEvent::Next);
    assert_eq!(s.selected_year(), "1970");
}

#[test]
fn hover_shows_and_leave_hides_tooltip() {
    let mut s = Session::new(two_rows(), PlotConfig::default()).unwrap();
    let resp = s.handle(UiEvent::PointerEnter {
        row: 1,
        x: 40.0,
        y: 60.0,
    });
    let tip = resp.tooltip.unwrap();
    assert_eq!(tip.fade.to, 0.9);
    assert_eq!(tip.fade.duration_ms, 200);
    assert_eq!(tip.position, Some((45.0, 70.0)));
    let lines = tip.lines.unwrap();
    assert_eq!(lines[0], "Bland");
    assert_eq!(lines[1], "population: 20,000,000");
    assert_eq!(lines[2], "year: 1970");
    assert!(s.tooltip().is_visible());

    // a leave for some other marker changes nothing
    assert!(s.handle(UiEvent::PointerLeave { row: 0 }).is_noop());

    let resp = s.handle(UiEvent::PointerLeave { row: 1 });
    assert_eq!(resp.tooltip.unwrap().fade.duration_ms, 500);
    assert!(!s.tooltip().is_visible());
}

#[test]
fn hover_overwrites_previous_content() {
    let mut s = Session::new(two_rows(), PlotConfig::default()).unwrap();
    s.handle(UiEvent::PointerEnter {
        row: 1,
        x: 0.0,
        y: 0.0,
    });
    s.handle(UiEvent::PointerEnter {
        row: 0,
        x: 0.0,
        y: 0.0,
    });
    assert_eq!(s.tooltip().lines()[0], "Aland");
    assert_eq!(s.tooltip().hovered(), Some(0));
}

#[test]
fn hover_outside_dataset_is_ignored() {
    let mut s = Session::new(two_rows(), PlotConfig::default()).unwrap();
    let resp = s.handle(UiEvent::PointerEnter {
        row: 99,
        x: 0.0,
        y: 0.0,
    });
    assert!(resp.is_noop());
}
