//! fertility_scatter
//!
//! A lightweight Rust library for drawing a fertility rate vs. life expectancy scatter
//! plot from country-year data, with a year filter and per-point tooltips. Pairs with
//! the `fscatter` CLI.
//!
//! ### Features
//! - Load the table from a local CSV or over HTTP; malformed rows are reported, not fatal
//! - Padded axis domains and linear, clamped data-to-pixel scales
//! - Marker radius proportional to population
//! - Year selection (dropdown + prev/next) as an explicit state machine
//! - Standalone HTML page, or SVG/PNG snapshots of a single year
//!
//! ### Example
//! ```no_run
//! use fertility_scatter::{DataSource, Page, PlotConfig, UiEvent};
//!
//! let mut page = Page::load(&DataSource::parse("data/dataEveryYear.csv"), PlotConfig::default());
//! if let Some(session) = page.session_mut() {
//!     session.handle(UiEvent::Next);
//!     println!("showing {}", session.selected_year());
//! }
//! fertility_scatter::page::save_html(&page, "Fertility vs. Life Expectancy", "scatter.html")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod controller;
pub mod export;
pub mod format;
pub mod loader;
pub mod models;
pub mod page;
pub mod render;
pub mod scale;
pub mod session;
pub mod surface;
pub mod tooltip;

pub use config::PlotConfig;
pub use format::number_with_commas;
pub use loader::{DataSource, LoadError, Loader};
pub use models::{Dataset, NumericField, Row, YearSet};
pub use session::{Page, Session, UiEvent};
