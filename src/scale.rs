//! Data-to-pixel mapping: axis limits, linear scales and tick generation.

use crate::format::format_fixed;
use crate::models::{NumericField, Row};

/// Raw min/max of the two plotted columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl AxisLimits {
    /// Widen each side of the x domain by `x_pad` and of the y domain by `y_pad`,
    /// so extreme points are not drawn flush against an axis.
    pub fn padded(&self, x_pad: f64, y_pad: f64) -> AxisLimits {
        AxisLimits {
            x_min: self.x_min - x_pad,
            x_max: self.x_max + x_pad,
            y_min: self.y_min - y_pad,
            y_max: self.y_max + y_pad,
        }
    }
}

/// Min and max of one column. `None` for no rows.
pub fn extent(rows: &[Row], field: NumericField) -> Option<(f64, f64)> {
    rows.iter().map(|r| field.value(r)).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Scan all rows once and collect the raw limits of both fields.
pub fn compute_limits(
    rows: &[Row],
    x_field: NumericField,
    y_field: NumericField,
) -> Option<AxisLimits> {
    let (x_min, x_max) = extent(rows, x_field)?;
    let (y_min, y_max) = extent(rows, y_field)?;
    Some(AxisLimits {
        x_min,
        x_max,
        y_min,
        y_max,
    })
}

/// Continuous linear map from a domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            clamp: false,
        }
    }

    /// Restrict outputs to the range (and `invert` outputs to the domain).
    pub fn clamped(mut self) -> Self {
        self.clamp = true;
        self
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn is_clamped(&self) -> bool {
        self.clamp
    }

    pub fn map(&self, v: f64) -> f64 {
        interpolate(self.range, self.normalize(self.domain, v))
    }

    pub fn invert(&self, px: f64) -> f64 {
        interpolate(self.domain, self.normalize(self.range, px))
    }

    fn normalize(&self, (a, b): (f64, f64), v: f64) -> f64 {
        // a collapsed interval maps everything to its midpoint
        if b == a {
            return 0.5;
        }
        let t = (v - a) / (b - a);
        if self.clamp { t.clamp(0.0, 1.0) } else { t }
    }

    /// Roughly `count` evenly spaced round values inside the domain, ascending.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = ordered(self.domain);
        ticks(lo, hi, count)
    }

    /// Spacing between the values returned by [`LinearScale::ticks`].
    pub fn tick_step(&self, count: usize) -> f64 {
        let (lo, hi) = ordered(self.domain);
        tick_step(lo, hi, count)
    }

    /// Tick labels with as many decimals as the tick spacing needs.
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let decimals = decimals_for_step(self.tick_step(count));
        self.ticks(count)
            .into_iter()
            .map(|v| (v, format_fixed(v, decimals)))
            .collect()
    }
}

fn interpolate((a, b): (f64, f64), t: f64) -> f64 {
    // exact at both endpoints
    a * (1.0 - t) + b * t
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Increment for nice ticks: 1, 2 or 5 times a power of ten.
/// Negative results mean "divide by `-inc`", which keeps small steps exact.
fn tick_increment(start: f64, stop: f64, count: usize) -> (f64, i32) {
    let step = (stop - start) / count as f64;
    let power = step.log10().floor() as i32;
    let error = step / 10f64.powi(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    if power < 0 {
        (-(10f64.powi(-power) / factor), power)
    } else {
        (10f64.powi(power) * factor, power)
    }
}

pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || !(stop > start) {
        return 0.0;
    }
    let (inc, _) = tick_increment(start, stop, count);
    if inc < 0.0 { -1.0 / inc } else { inc }
}

pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (inc, _) = tick_increment(start, stop, count);
    if inc < 0.0 {
        let inv = -inc;
        let mut i1 = (start * inv).round();
        let mut i2 = (stop * inv).round();
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        let n = (i2 - i1 + 1.0).max(0.0) as usize;
        (0..n).map(|i| (i1 + i as f64) / inv).collect()
    } else {
        let mut i1 = (start / inc).round();
        let mut i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        let n = (i2 - i1 + 1.0).max(0.0) as usize;
        (0..n).map(|i| (i1 + i as f64) * inc).collect()
    }
}

fn decimals_for_step(step: f64) -> usize {
    if step <= 0.0 || step >= 1.0 {
        0
    } else {
        (-step.log10() - 1e-9).ceil().max(0.0) as usize
    }
}

/// Pixel extents of the plotting area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRange {
    /// Left to right.
    pub x: (f64, f64),
    /// Top to bottom.
    pub y: (f64, f64),
}

/// The x and y scales together with the columns they read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleMapping {
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub x_field: NumericField,
    pub y_field: NumericField,
}

impl ScaleMapping {
    pub fn x(&self, row: &Row) -> f64 {
        self.x_scale.map(self.x_field.value(row))
    }

    pub fn y(&self, row: &Row) -> f64 {
        self.y_scale.map(self.y_field.value(row))
    }
}

/// Build clamped scales for a domain given by `limits`.
///
/// x grows left to right. y is inverted: the largest value lands at the top of the range.
pub fn build_scales(
    limits: &AxisLimits,
    range: PixelRange,
    x_field: NumericField,
    y_field: NumericField,
) -> ScaleMapping {
    ScaleMapping {
        x_scale: LinearScale::new((limits.x_min, limits.x_max), range.x).clamped(),
        y_scale: LinearScale::new((limits.y_max, limits.y_min), range.y).clamped(),
        x_field,
        y_field,
    }
}

/// Marker radius from the observed extent of `field`. Not clamped.
pub fn radius_scale(rows: &[Row], field: NumericField, radius: (f64, f64)) -> Option<LinearScale> {
    let (lo, hi) = extent(rows, field)?;
    Some(LinearScale::new((lo, hi), radius))
}
