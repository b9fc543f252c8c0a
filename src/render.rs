//! Renderer: the only writer of axes, labels and markers on the [`Surface`].
//!
//! - Bottom x-axis and left y-axis with nice ticks
//! - Static title and axis captions
//! - One marker per row, sized by population, tagged with [`MARKER_CLASS`]
//! - A visible error state when there is nothing to draw

use crate::config::PlotConfig;
use crate::models::Dataset;
use crate::scale::{LinearScale, ScaleMapping};
use crate::surface::{Axis, AxisOrient, Display, Label, MARKER_CLASS, Marker, Node, Surface, Tick};
use crate::tooltip::tooltip_lines;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("points were already plotted on this surface")]
    AlreadyPlotted,
}

pub const TITLE_FONT_PT: f64 = 14.0;
pub const CAPTION_FONT_PT: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct Renderer {
    surface: Surface,
    config: PlotConfig,
    plotted: bool,
}

impl Renderer {
    /// Create the single drawing surface.
    pub fn new(config: &PlotConfig) -> Self {
        Self {
            surface: Surface::new(config.width, config.height),
            config: config.clone(),
            plotted: false,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn into_surface(self) -> Surface {
        self.surface
    }

    /// Bottom x-axis along the lower edge of the plotting range, left y-axis along its left edge.
    pub fn draw_axes(&mut self, scales: &ScaleMapping) {
        let count = self.config.tick_count;
        let (_, bottom) = ordered(scales.y_scale.range());
        let (left, _) = ordered(scales.x_scale.range());

        self.surface.push(Node::Axis(Axis {
            orient: AxisOrient::Bottom,
            translate: (0.0, bottom),
            range: scales.x_scale.range(),
            ticks: ticks_for(&scales.x_scale, count),
        }));
        self.surface.push(Node::Axis(Axis {
            orient: AxisOrient::Left,
            translate: (left, 0.0),
            range: ordered(scales.y_scale.range()),
            ticks: ticks_for(&scales.y_scale, count),
        }));
    }

    /// Title and the two axis captions at fixed positions.
    pub fn draw_labels(&mut self) {
        let w = f64::from(self.config.width);
        let h = f64::from(self.config.height);
        let labels = [
            Label {
                x: w * 0.2,
                y: self.config.margin * 0.8,
                rotate: None,
                font_size_pt: TITLE_FONT_PT,
                text: self.config.title.clone(),
                class: Some("title".into()),
            },
            Label {
                x: w * 0.26,
                y: h - 10.0,
                rotate: None,
                font_size_pt: CAPTION_FONT_PT,
                text: self.config.x_caption.clone(),
                class: Some("caption".into()),
            },
            Label {
                x: 15.0,
                y: h * 0.6,
                rotate: Some(-90.0),
                font_size_pt: CAPTION_FONT_PT,
                text: self.config.y_caption.clone(),
                class: Some("caption".into()),
            },
        ];
        for l in labels {
            self.surface.push(Node::Label(l));
        }
    }

    /// One marker per row. All markers start visible; filtering happens afterwards.
    pub fn plot_points(
        &mut self,
        data: &Dataset,
        scales: &ScaleMapping,
        radius: &LinearScale,
    ) -> Result<usize, RenderError> {
        if self.plotted {
            return Err(RenderError::AlreadyPlotted);
        }
        for (idx, row) in data.rows().iter().enumerate() {
            self.surface.push(Node::Marker(Marker {
                class: MARKER_CLASS.to_string(),
                cx: scales.x(row),
                cy: scales.y(row),
                r: radius.map(self.config.size_field.value(row)),
                fill: self.config.marker_fill.clone(),
                row: idx,
                time: row.time.clone(),
                tooltip: tooltip_lines(row),
                display: Display::Inline,
            }));
        }
        self.plotted = true;
        log::debug!("plotted {} markers", data.len());
        Ok(data.len())
    }

    /// Load-failure state: a visible message instead of an empty plot.
    pub fn draw_error(&mut self, message: &str) {
        let w = f64::from(self.config.width);
        let h = f64::from(self.config.height);
        self.surface.push(Node::Label(Label {
            x: w * 0.1,
            y: h / 2.0,
            rotate: None,
            font_size_pt: CAPTION_FONT_PT,
            text: format!("Could not load data: {message}"),
            class: Some("error".into()),
        }));
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn ticks_for(scale: &LinearScale, count: usize) -> Vec<Tick> {
    scale
        .tick_labels(count)
        .into_iter()
        .map(|(v, label)| Tick {
            offset: scale.map(v),
            label,
        })
        .collect()
}
