use fertility_scatter::models::{NumericField, Row};
use fertility_scatter::scale::{
    AxisLimits, LinearScale, PixelRange, build_scales, compute_limits, radius_scale,
};

fn row(time: &str, fert: f64, life: f64, pop: f64) -> Row {
    Row::new(format!("C{time}"), time, fert, life, pop)
}

fn sample() -> Vec<Row> {
    vec![
        row("1960", 7.45, 32.29, 8.996),
        row("1960", 2.37, 69.31, 72.815),
        row("1970", 2.03, 70.56, 78.169),
        row("1970", 6.38, 40.62, 56.132),
        row("1980", 1.56, 72.68, 227.225),
    ]
}

const RANGE: PixelRange = PixelRange {
    x: (50.0, 450.0),
    y: (50.0, 450.0),
};

fn limits_of(rows: &[Row]) -> Option<AxisLimits> {
    compute_limits(
        rows,
        NumericField::FertilityRate,
        NumericField::LifeExpectancy,
    )
}

#[test]
fn limits_contain_every_raw_value() {
    let rows = sample();
    let l = limits_of(&rows).unwrap();
    assert!(l.x_min <= l.x_max);
    assert!(l.y_min <= l.y_max);
    for r in &rows {
        assert!(r.fertility_rate >= l.x_min && r.fertility_rate <= l.x_max);
        assert!(r.life_expectancy >= l.y_min && r.life_expectancy <= l.y_max);
    }
    assert_eq!(l.x_min, 1.56);
    assert_eq!(l.y_max, 72.68);
}

#[test]
fn limits_of_nothing_is_none() {
    assert!(limits_of(&[]).is_none());
}

#[test]
fn padding_widens_both_sides() {
    let l = AxisLimits {
        x_min: 1.0,
        x_max: 7.0,
        y_min: 30.0,
        y_max: 80.0,
    }
    .padded(0.5, 5.0);
    assert_eq!((l.x_min, l.x_max, l.y_min, l.y_max), (0.5, 7.5, 25.0, 85.0));
}

#[test]
fn x_is_increasing_and_y_is_inverted() {
    let rows = sample();
    let limits = limits_of(&rows).unwrap().padded(0.5, 5.0);
    let s = build_scales(
        &limits,
        RANGE,
        NumericField::FertilityRate,
        NumericField::LifeExpectancy,
    );

    let mut by_x = rows.clone();
    by_x.sort_by(|a, b| a.fertility_rate.total_cmp(&b.fertility_rate));
    for w in by_x.windows(2) {
        assert!(s.x(&w[0]) <= s.x(&w[1]));
    }

    let mut by_y = rows.clone();
    by_y.sort_by(|a, b| a.life_expectancy.total_cmp(&b.life_expectancy));
    for w in by_y.windows(2) {
        assert!(s.y(&w[0]) >= s.y(&w[1]));
    }

    assert!(s.x_scale.is_clamped() && s.y_scale.is_clamped());
    assert_eq!(s.y_scale.domain(), (limits.y_max, limits.y_min));

    // padded domain ends land on the pixel range ends
    assert_eq!(s.x_scale.map(limits.x_min), 50.0);
    assert_eq!(s.x_scale.map(limits.x_max), 450.0);
    assert_eq!(s.y_scale.map(limits.y_max), 50.0);
    assert_eq!(s.y_scale.map(limits.y_min), 450.0);
}

#[test]
fn positional_scales_clamp() {
    let limits = AxisLimits {
        x_min: 0.0,
        x_max: 10.0,
        y_min: 0.0,
        y_max: 10.0,
    };
    let s = build_scales(
        &limits,
        RANGE,
        NumericField::FertilityRate,
        NumericField::LifeExpectancy,
    );
    assert_eq!(s.x_scale.map(-5.0), 50.0);
    assert_eq!(s.x_scale.map(50.0), 450.0);
    assert_eq!(s.y_scale.map(100.0), 50.0);
    assert_eq!(s.y_scale.map(-100.0), 450.0);
}

#[test]
fn radius_hits_range_ends_and_interpolates() {
    let rows = vec![
        row("1960", 1.0, 50.0, 10.0),
        row("1960", 1.0, 50.0, 20.0),
        row("1960", 1.0, 50.0, 110.0),
    ];
    let r = radius_scale(&rows, NumericField::PopMlns, (3.0, 20.0)).unwrap();
    assert!(!r.is_clamped());
    assert_eq!(r.domain(), (10.0, 110.0));
    assert_eq!(r.map(10.0), 3.0);
    assert_eq!(r.map(110.0), 20.0);
    assert!((r.map(60.0) - 11.5).abs() < 1e-12);
    assert!((r.map(20.0) - 4.7).abs() < 1e-12);
}

#[test]
fn invert_undoes_map() {
    let s = LinearScale::new((0.5, 8.5), (50.0, 450.0));
    for v in [0.5, 2.0, 4.25, 8.5] {
        assert!((s.invert(s.map(v)) - v).abs() < 1e-9);
    }
}

#[test]
fn tick_labels_for_default_axes() {
    // fertility domain after padding
    let x = LinearScale::new((1.06, 7.95), (50.0, 450.0));
    let labels: Vec<String> = x.tick_labels(10).into_iter().map(|(_, l)| l).collect();
    assert_eq!(labels.first().map(String::as_str), Some("1.5"));
    assert_eq!(labels.last().map(String::as_str), Some("7.5"));
    assert_eq!(labels.len(), 13);

    // life expectancy domain after padding, inverted
    let y = LinearScale::new((77.68, 27.29), (50.0, 450.0));
    let ticks = y.ticks(10);
    assert_eq!(ticks.first().copied(), Some(30.0));
    assert_eq!(ticks.last().copied(), Some(75.0));
}
