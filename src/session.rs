//! Session: the context object behind one rendered page.
//!
//! Holds the dataset, scales, surface, year selector and tooltip. UI input is fed
//! through [`Session::handle`], which runs the pure transition and then applies the
//! resulting display instructions to the surface.

use crate::config::PlotConfig;
use crate::controller::{VisibilityPlan, YearEvent, YearSelector, apply_visibility, filter_points};
use crate::loader::{DataSource, LoadError, Loader};
use crate::models::Dataset;
use crate::render::{RenderError, Renderer};
use crate::scale::{
    AxisLimits, LinearScale, PixelRange, ScaleMapping, build_scales, compute_limits, radius_scale,
};
use crate::surface::Surface;
use crate::tooltip::{Tooltip, TooltipUpdate};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("dataset has no rows")]
    NoRows,
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// User input, in page terms.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Dropdown `change`.
    SelectYear(String),
    Prev,
    Next,
    /// Pointer entered the marker of a row, at page coordinates.
    PointerEnter { row: usize, x: f64, y: f64 },
    PointerLeave { row: usize },
}

/// What a handled event changed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    pub visibility: Option<VisibilityPlan>,
    pub tooltip: Option<TooltipUpdate>,
}

impl Response {
    pub fn is_noop(&self) -> bool {
        self.visibility.is_none() && self.tooltip.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    config: PlotConfig,
    dataset: Dataset,
    limits: AxisLimits,
    scales: ScaleMapping,
    radius: LinearScale,
    surface: Surface,
    selector: YearSelector,
    tooltip: Tooltip,
}

impl Session {
    /// Compute scales, draw everything once and filter to the initial year.
    pub fn new(dataset: Dataset, config: PlotConfig) -> Result<Self, SessionError> {
        let rows = dataset.rows();
        let limits = compute_limits(rows, config.x_field, config.y_field)
            .ok_or(SessionError::NoRows)?;
        let radius = radius_scale(rows, config.size_field, config.radius_range)
            .ok_or(SessionError::NoRows)?;
        let scales = build_scales(
            &limits.padded(config.x_padding, config.y_padding),
            PixelRange {
                x: config.x_range(),
                y: config.y_range(),
            },
            config.x_field,
            config.y_field,
        );

        let mut renderer = Renderer::new(&config);
        renderer.draw_axes(&scales);
        renderer.plot_points(&dataset, &scales, &radius)?;
        renderer.draw_labels();
        let mut surface = renderer.into_surface();

        let selector = YearSelector::new(dataset.years(), &config.initial_year);
        let plan = filter_points(rows, selector.selected_year());
        apply_visibility(&mut surface, &plan);

        Ok(Self {
            config,
            dataset,
            limits,
            scales,
            radius,
            surface,
            selector,
            tooltip: Tooltip::new(),
        })
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn limits(&self) -> &AxisLimits {
        &self.limits
    }

    pub fn scales(&self) -> &ScaleMapping {
        &self.scales
    }

    pub fn radius(&self) -> &LinearScale {
        &self.radius
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn selector(&self) -> &YearSelector {
        &self.selector
    }

    pub fn selected_year(&self) -> &str {
        self.selector.selected_year()
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Run one transition and apply its display instructions.
    pub fn handle(&mut self, event: UiEvent) -> Response {
        let mut resp = Response::default();
        match event {
            UiEvent::SelectYear(y) => resp.visibility = self.select(YearEvent::Change(y)),
            UiEvent::Prev => resp.visibility = self.select(YearEvent::Prev),
            UiEvent::Next => resp.visibility = self.select(YearEvent::Next),
            UiEvent::PointerEnter { row, x, y } => {
                if let Some(r) = self.dataset.row(row) {
                    resp.tooltip = Some(self.tooltip.enter(row, r, (x, y)));
                }
            }
            UiEvent::PointerLeave { row } => {
                if self.tooltip.hovered() == Some(row) {
                    resp.tooltip = Some(self.tooltip.leave());
                }
            }
        }
        resp
    }

    fn select(&mut self, event: YearEvent) -> Option<VisibilityPlan> {
        let year = self.selector.handle(event)?.to_string();
        let plan = filter_points(self.dataset.rows(), &year);
        apply_visibility(&mut self.surface, &plan);
        Some(plan)
    }
}

/// A rendered page: either a live session or the visible load-failure state.
#[derive(Debug, Clone)]
pub enum Page {
    Ready(Box<Session>),
    Failed { surface: Surface, message: String },
}

impl Page {
    /// Fetch, parse and draw. Never fails: errors become the error surface.
    pub fn load(source: &DataSource, config: PlotConfig) -> Self {
        let loaded = Loader::new().and_then(|l| l.load(source));
        Self::from_result(loaded, config)
    }

    pub fn from_result(loaded: Result<Dataset, LoadError>, config: PlotConfig) -> Self {
        match loaded {
            Ok(data) => match Session::new(data, config.clone()) {
                Ok(s) => Page::Ready(Box::new(s)),
                Err(e) => Self::failed(&config, e.to_string()),
            },
            Err(e) => {
                log::error!("load failed: {e}");
                Self::failed(&config, e.to_string())
            }
        }
    }

    pub fn failed(config: &PlotConfig, message: String) -> Self {
        let mut renderer = Renderer::new(config);
        renderer.draw_error(&message);
        Page::Failed {
            surface: renderer.into_surface(),
            message,
        }
    }

    pub fn surface(&self) -> &Surface {
        match self {
            Page::Ready(s) => s.surface(),
            Page::Failed { surface, .. } => surface,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Page::Ready(s) => Some(s.as_ref()),
            Page::Failed { .. } => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        match self {
            Page::Ready(s) => Some(s.as_mut()),
            Page::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Page::Ready(_) => None,
            Page::Failed { message, .. } => Some(message.as_str()),
        }
    }
}
