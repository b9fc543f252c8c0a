//! Year selection: dropdown + prev/next state machine and the visibility filter.

use crate::models::{Row, YearSet};
use crate::surface::{Display, MARKER_CLASS, Surface};

/// Input to the year selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearEvent {
    /// Dropdown `change` with the chosen option's value.
    Change(String),
    Prev,
    Next,
}

/// Dropdown options plus the selected year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSelector {
    years: YearSet,
    index: usize,
    selected: String,
}

impl YearSelector {
    /// Starts on `initial` when it is one of the options, on the first option otherwise.
    pub fn new(years: YearSet, initial: &str) -> Self {
        let index = years.position(initial).unwrap_or(0);
        Self {
            years,
            index,
            selected: initial.to_string(),
        }
    }

    pub fn years(&self) -> &YearSet {
        &self.years
    }

    pub fn selected_year(&self) -> &str {
        &self.selected
    }

    pub fn selected_index(&self) -> usize {
        self.index
    }

    /// Apply an event. Returns the year to filter by, or `None` for a boundary no-op.
    pub fn handle(&mut self, event: YearEvent) -> Option<&str> {
        match event {
            YearEvent::Change(value) => {
                if let Some(i) = self.years.position(&value) {
                    self.index = i;
                }
                self.selected = value;
            }
            YearEvent::Prev => {
                if self.index == 0 {
                    return None;
                }
                self.index -= 1;
                self.emit_change();
            }
            YearEvent::Next => {
                if self.years.is_empty() || self.index + 1 >= self.years.len() {
                    return None;
                }
                self.index += 1;
                self.emit_change();
            }
        }
        log::debug!("selected year {}", self.selected);
        Some(&self.selected)
    }

    fn emit_change(&mut self) {
        if let Some(year) = self.years.get(self.index) {
            self.selected = year.to_string();
        }
    }
}

/// Display instruction for every marker, indexed by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityPlan {
    pub year: String,
    pub displays: Vec<Display>,
}

impl VisibilityPlan {
    pub fn shown(&self) -> impl Iterator<Item = usize> + '_ {
        self.displays
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_visible())
            .map(|(i, _)| i)
    }

    pub fn shown_count(&self) -> usize {
        self.shown().count()
    }
}

/// Show rows whose `time` equals `year`, hide the rest.
pub fn filter_points(rows: &[Row], year: &str) -> VisibilityPlan {
    VisibilityPlan {
        year: year.to_string(),
        displays: rows
            .iter()
            .map(|r| {
                if r.time == year {
                    Display::Inline
                } else {
                    Display::None
                }
            })
            .collect(),
    }
}

/// Write a plan onto the markers of `surface`.
pub fn apply_visibility(surface: &mut Surface, plan: &VisibilityPlan) {
    for marker in surface.select_mut(MARKER_CLASS) {
        if let Some(d) = plan.displays.get(marker.row) {
            marker.display = *d;
        }
    }
}
