//! Standalone HTML page: the surface as inline SVG, the year controls and the tooltip panel.
//!
//! The document is fully rendered for the selected year, so it reads correctly even
//! before the binding script runs. The script only replays the same transitions
//! (filter by year, prev/next at the dropdown bounds, tooltip fades) in the browser.

use crate::controller::YearSelector;
use crate::session::Page;
use crate::tooltip::{FADE_IN_MS, FADE_OUT_MS, POINTER_OFFSET, VISIBLE_OPACITY};
use anyhow::{Context, Result};
use maud::{DOCTYPE, Markup, PreEscaped, Render, html};
use std::path::Path;

const SCRIPT: &str = include_str!("../assets/page.js");

const STYLE: &str = "\
body { font-family: sans-serif; }
#controls { margin: 8px 0; }
.tooltip {
  position: absolute;
  pointer-events: none;
  white-space: pre-line;
  padding: 6px 8px;
  font-size: 12px;
  background: #ffffff;
  border: 1px solid #999999;
  border-radius: 4px;
}
.error { fill: #b00020; }
";

/// Render the whole document.
pub fn render_html(page: &Page, title: &str) -> String {
    let session = page.session();
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                div id="controls" {
                    div id="filter" {
                        @if let Some(session) = session {
                            (YearDropdown(session.selector()))
                        }
                    }
                    button id="prev" disabled[session.is_none()] { "prev" }
                    button id="next" disabled[session.is_none()] { "next" }
                }
                (page.surface())
                div
                    class="tooltip"
                    style="opacity: 0"
                    data-opacity=(VISIBLE_OPACITY)
                    data-fade-in=(FADE_IN_MS)
                    data-fade-out=(FADE_OUT_MS)
                    data-dx=(POINTER_OFFSET.0)
                    data-dy=(POINTER_OFFSET.1) {}
                @if session.is_some() {
                    script { (PreEscaped(SCRIPT)) }
                }
            }
        }
    }
    .into_string()
}

/// `<select>` with one option per year, the selected index marked.
struct YearDropdown<'a>(&'a YearSelector);

impl Render for YearDropdown<'_> {
    fn render(&self) -> Markup {
        let selected = self.0.selected_index();
        html! {
            select name="country-list" {
                @for (i, year) in self.0.years().iter().enumerate() {
                    option value=(year) selected[i == selected] { (year) }
                }
            }
        }
    }
}

/// Write the document to `path`.
pub fn save_html<P: AsRef<Path>>(page: &Page, title: &str, path: P) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, render_html(page, title))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
