//! Static snapshot of the surface as **SVG** or **PNG** through `plotters` backends.
//!
//! Only what is currently visible is drawn: axes, labels and the markers of the
//! selected year. The backend is picked from the output extension.

use crate::surface::{Axis, AxisOrient, Label, Marker, Node, Surface};
use anyhow::{Context, Result, anyhow, bail};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontFamily, FontStyle, FontTransform};
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;
use std::sync::OnceLock;

/// Set once a TTF has been registered for the `ab_glyph` text path.
static FONT_READY: OnceLock<()> = OnceLock::new();

/// Register `path` as the "sans-serif" family. `ab_glyph` doesn't discover OS fonts,
/// so bitmap output only gets text after this has been called.
pub fn register_font_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if FONT_READY.get().is_some() {
        return Ok(());
    }
    let bytes = std::fs::read(path).with_context(|| format!("read font {}", path.display()))?;
    // plotters keeps a 'static reference to the font data
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font("sans-serif", FontStyle::Normal, bytes)
        .map_err(|_| anyhow!("{} is not a usable font", path.display()))?;
    let _ = FONT_READY.set(());
    Ok(())
}

fn fonts_ready() -> bool {
    FONT_READY.get().is_some()
}

/// Draw the visible surface to `out_path` (`.svg` or `.png`).
pub fn save_snapshot<P: AsRef<Path>>(surface: &Surface, out_path: P) -> Result<()> {
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let size = (surface.width(), surface.height());

    match out_path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .as_deref()
    {
        Some("svg") => {
            // SVG text is written as <text> elements and needs no font data
            let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
            draw_surface(&root, surface, true)?;
            root.present().map_err(|e| anyhow!("{:?}", e))?;
        }
        Some("png") => {
            let with_text = fonts_ready();
            if !with_text {
                log::warn!(
                    "no font registered, {} will have no text",
                    out_path.display()
                );
            }
            let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
            draw_surface(&root, surface, with_text)?;
            root.present().map_err(|e| anyhow!("{:?}", e))?;
        }
        other => bail!("unsupported snapshot format: {:?}", other.unwrap_or("")),
    }
    Ok(())
}

fn draw_surface<DB>(
    root: &DrawingArea<DB, Shift>,
    surface: &Surface,
    with_text: bool,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    for node in surface.nodes() {
        match node {
            Node::Axis(a) => draw_axis(root, a, with_text)?,
            Node::Label(l) if with_text => draw_label(root, l)?,
            Node::Label(_) => {}
            Node::Marker(m) if m.display.is_visible() => draw_marker(root, m)?,
            Node::Marker(_) => {}
        }
    }
    Ok(())
}

const TICK_SIZE: i32 = 6;

fn px(v: f64) -> i32 {
    v.round() as i32
}

fn draw_axis<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    a: &Axis,
    with_text: bool,
) -> Result<()> {
    let (tx, ty) = (px(a.translate.0), px(a.translate.1));
    let (r0, r1) = (px(a.range.0), px(a.range.1));
    let stroke = BLACK.stroke_width(1);
    let domain = match a.orient {
        AxisOrient::Bottom => vec![(r0, ty), (r1, ty)],
        AxisOrient::Left => vec![(tx, r0), (tx, r1)],
    };
    root.draw(&PathElement::new(domain, stroke))
        .map_err(|e| anyhow!("{:?}", e))?;

    let font = (FontFamily::SansSerif, 10).into_font();
    for t in &a.ticks {
        let o = px(t.offset);
        let (line, anchor, pos) = match a.orient {
            AxisOrient::Bottom => (
                vec![(o, ty), (o, ty + TICK_SIZE)],
                Pos::new(HPos::Center, VPos::Top),
                (o, ty + TICK_SIZE + 3),
            ),
            AxisOrient::Left => (
                vec![(tx - TICK_SIZE, o), (tx, o)],
                Pos::new(HPos::Right, VPos::Center),
                (tx - TICK_SIZE - 3, o),
            ),
        };
        root.draw(&PathElement::new(line, stroke))
            .map_err(|e| anyhow!("{:?}", e))?;
        if with_text {
            let style = font.color(&BLACK).pos(anchor);
            root.draw(&Text::new(t.label.clone(), pos, style))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }
    Ok(())
}

fn draw_label<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, l: &Label) -> Result<()> {
    // points to pixels
    let size = l.font_size_pt * 4.0 / 3.0;
    let mut font = (FontFamily::SansSerif, size).into_font();
    if matches!(l.rotate, Some(deg) if (deg + 90.0).abs() < f64::EPSILON) {
        font = font.transform(FontTransform::Rotate270);
    }
    let style = font
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Bottom));
    root.draw(&Text::new(l.text.clone(), (px(l.x), px(l.y)), style))
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn draw_marker<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, m: &Marker) -> Result<()> {
    let color = parse_hex_color(&m.fill).unwrap_or(RGBColor(66, 134, 244));
    let r = m.r.max(0.0).round() as u32;
    root.draw(&Circle::new((px(m.cx), px(m.cy)), r, color.filled()))
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// `#rrggbb` → RGB.
pub fn parse_hex_color(s: &str) -> Option<RGBColor> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let c = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(RGBColor(c(0)?, c(2)?, c(4)?))
}
