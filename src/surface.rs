//! In-memory drawing surface: axis groups, labelled text and point markers.
//!
//! The renderer is the only writer of nodes; interaction code only flips
//! [`Display`] on markers. [`Surface::to_svg`] serialises the current state.

use maud::{Markup, Render, html};

/// Class shared by every data point, used for bulk selection.
pub const MARKER_CLASS: &str = "circles";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Inline,
    None,
}

impl Display {
    pub fn as_str(self) -> &'static str {
        match self {
            Display::Inline => "inline",
            Display::None => "none",
        }
    }

    pub fn is_visible(self) -> bool {
        matches!(self, Display::Inline)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Position along the axis in pixels.
    pub offset: f64,
    pub label: String,
}

/// One axis group, translated into place.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orient: AxisOrient,
    pub translate: (f64, f64),
    /// Pixel extent of the domain line.
    pub range: (f64, f64),
    pub ticks: Vec<Tick>,
}

/// Static text placed at a fixed position.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    /// Degrees, applied after translating to (x, y).
    pub rotate: Option<f64>,
    pub font_size_pt: f64,
    pub text: String,
    pub class: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub class: String,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: String,
    /// Index of the attached row in the dataset.
    pub row: usize,
    /// Year of the attached row; markers are filtered by it.
    pub time: String,
    /// Text shown by the tooltip on hover.
    pub tooltip: Vec<String>,
    pub display: Display,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Axis(Axis),
    Label(Label),
    Marker(Marker),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    nodes: Vec<Node>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            nodes: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn axes(&self) -> impl Iterator<Item = &Axis> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Axis(a) => Some(a),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Label(l) => Some(l),
            _ => None,
        })
    }

    /// All markers carrying `class`, in drawing order.
    pub fn select<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Marker> + 'a {
        self.nodes.iter().filter_map(move |n| match n {
            Node::Marker(m) if m.class == class => Some(m),
            _ => None,
        })
    }

    pub fn select_mut<'a>(
        &'a mut self,
        class: &'a str,
    ) -> impl Iterator<Item = &'a mut Marker> + 'a {
        self.nodes.iter_mut().filter_map(move |n| match n {
            Node::Marker(m) if m.class == class => Some(m),
            _ => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.select(MARKER_CLASS)
    }

    pub fn marker_for_row(&self, row: usize) -> Option<&Marker> {
        self.markers().find(|m| m.row == row)
    }

    pub fn visible_markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers().filter(|m| m.display.is_visible())
    }

    /// Serialise to a standalone `<svg>` element.
    pub fn to_svg(&self) -> String {
        self.render().into_string()
    }
}

impl Render for Surface {
    fn render(&self) -> Markup {
        let view_box = format!("0 0 {} {}", self.width, self.height);
        html! {
            svg
                xmlns="http://www.w3.org/2000/svg"
                width=(self.width)
                height=(self.height)
                viewBox=(view_box) {
                @for node in &self.nodes {
                    @match node {
                        Node::Axis(a) => { (a) },
                        Node::Label(l) => { (l) },
                        Node::Marker(m) => { (m) },
                    }
                }
            }
        }
    }
}

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

impl Render for Axis {
    fn render(&self) -> Markup {
        let (r0, r1) = self.range;
        let (kind, anchor) = match self.orient {
            AxisOrient::Bottom => ("axis axis-bottom", "middle"),
            AxisOrient::Left => ("axis axis-left", "end"),
        };
        let domain = match self.orient {
            AxisOrient::Bottom => format!(
                "M{},{}V0.5H{}V{}",
                num(r0 + 0.5),
                num(TICK_SIZE),
                num(r1 + 0.5),
                num(TICK_SIZE)
            ),
            AxisOrient::Left => format!(
                "M{},{}H0.5V{}H{}",
                num(-TICK_SIZE),
                num(r0 + 0.5),
                num(r1 + 0.5),
                num(-TICK_SIZE)
            ),
        };
        let transform = format!(
            "translate({}, {})",
            num(self.translate.0),
            num(self.translate.1)
        );
        html! {
            g
                class=(kind)
                transform=(transform)
                fill="none"
                font-size="10"
                font-family="sans-serif"
                text-anchor=(anchor) {
                path class="domain" stroke="currentColor" d=(domain) {}
                @for t in &self.ticks {
                    @match self.orient {
                        AxisOrient::Bottom => {
                            @let at = format!("translate({},0)", num(t.offset + 0.5));
                            g class="tick" transform=(at) {
                                line stroke="currentColor" y2=(num(TICK_SIZE)) {}
                                @let y = num(TICK_SIZE + TICK_PADDING);
                                text fill="currentColor" y=(y) dy="0.71em" {
                                    (t.label)
                                }
                            }
                        },
                        AxisOrient::Left => {
                            @let at = format!("translate(0,{})", num(t.offset + 0.5));
                            g class="tick" transform=(at) {
                                line stroke="currentColor" x2=(num(-TICK_SIZE)) {}
                                @let x = num(-(TICK_SIZE + TICK_PADDING));
                                text fill="currentColor" x=(x) dy="0.32em" {
                                    (t.label)
                                }
                            }
                        },
                    }
                }
            }
        }
    }
}

impl Render for Label {
    fn render(&self) -> Markup {
        // rotated labels are placed by transform, the rest by x/y
        let (x, y, transform) = match self.rotate {
            Some(deg) => (
                None,
                None,
                Some(format!(
                    "translate({}, {})rotate({})",
                    num(self.x),
                    num(self.y),
                    num(deg)
                )),
            ),
            None => (Some(num(self.x)), Some(num(self.y)), None),
        };
        let style = format!("font-size: {}pt", num(self.font_size_pt));
        html! {
            text class=[self.class.as_deref()] x=[x] y=[y] transform=[transform] style=(style) {
                (self.text)
            }
        }
    }
}

impl Render for Marker {
    fn render(&self) -> Markup {
        html! {
            circle
                class=(self.class)
                cx=(num(self.cx))
                cy=(num(self.cy))
                r=(num(self.r))
                fill=(self.fill)
                display=(self.display.as_str())
                data-row=(self.row)
                data-time=(self.time)
                data-tooltip=(self.tooltip.join("\n")) {}
        }
    }
}

/// Compact number for attributes: at most 3 decimals, no trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
