//! Floating info panel shown while the pointer is over a marker.

use crate::format::number_with_commas;
use crate::models::Row;

pub const VISIBLE_OPACITY: f64 = 0.9;
pub const FADE_IN_MS: u32 = 200;
pub const FADE_OUT_MS: u32 = 500;
/// Panel offset from the pointer, in pixels.
pub const POINTER_OFFSET: (f64, f64) = (5.0, 10.0);

/// Text lines for one row.
pub fn tooltip_lines(row: &Row) -> Vec<String> {
    // population is stored in millions; show whole people
    let people = (row.pop_mlns * 1_000_000.0).round();
    vec![
        row.location.clone(),
        format!("population: {}", number_with_commas(people)),
        format!("year: {}", row.time),
        format!("life expectancy: {}", row.life_expectancy_text()),
        format!("fertility_rate: {}", row.fertility_rate_text()),
    ]
}

/// Opacity change the presentation layer should animate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub to: f64,
    pub duration_ms: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipUpdate {
    pub fade: Fade,
    /// New content, or `None` to keep whatever is shown while fading out.
    pub lines: Option<Vec<String>>,
    /// Top-left corner of the panel in page coordinates.
    pub position: Option<(f64, f64)>,
}

/// Tooltip state. Created once, hidden until the first hover.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    opacity: f64,
    lines: Vec<String>,
    position: (f64, f64),
    hovered: Option<usize>,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self::new()
    }
}

impl Tooltip {
    pub fn new() -> Self {
        Self {
            opacity: 0.0,
            lines: Vec::new(),
            position: (0.0, 0.0),
            hovered: None,
        }
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    /// Row currently under the pointer.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Pointer entered the marker of `row_idx` at page coordinates `pointer`.
    pub fn enter(&mut self, row_idx: usize, row: &Row, pointer: (f64, f64)) -> TooltipUpdate {
        self.lines = tooltip_lines(row);
        self.position = (pointer.0 + POINTER_OFFSET.0, pointer.1 + POINTER_OFFSET.1);
        self.opacity = VISIBLE_OPACITY;
        self.hovered = Some(row_idx);
        TooltipUpdate {
            fade: Fade {
                to: VISIBLE_OPACITY,
                duration_ms: FADE_IN_MS,
            },
            lines: Some(self.lines.clone()),
            position: Some(self.position),
        }
    }

    pub fn leave(&mut self) -> TooltipUpdate {
        self.opacity = 0.0;
        self.hovered = None;
        TooltipUpdate {
            fade: Fade {
                to: 0.0,
                duration_ms: FADE_OUT_MS,
            },
            lines: None,
            position: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Row {
        Row::new("Germany", "1960", 2.37, 69.31, 72.81)
    }

    #[test]
    fn lines_are_formatted() {
        let lines = tooltip_lines(&row());
        assert_eq!(
            lines,
            [
                "Germany",
                "population: 72,810,000",
                "year: 1960",
                "life expectancy: 69.31",
                "fertility_rate: 2.37",
            ]
        );
    }

    #[test]
    fn enter_then_leave() {
        let mut t = Tooltip::new();
        assert!(!t.is_visible());
        let up = t.enter(3, &row(), (100.0, 200.0));
        assert_eq!(up.fade.to, 0.9);
        assert_eq!(up.fade.duration_ms, 200);
        assert_eq!(up.position, Some((105.0, 210.0)));
        assert_eq!(t.hovered(), Some(3));
        let up = t.leave();
        assert_eq!(up.fade.to, 0.0);
        assert_eq!(up.fade.duration_ms, 500);
        assert!(up.lines.is_none());
        assert!(!t.is_visible());
        // content stays until the next hover overwrites it
        assert_eq!(t.lines()[0], "Germany");
    }
}
