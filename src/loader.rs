//! Dataset loading: fetch the CSV from disk or over HTTP and parse it into [`Dataset`].
//!
//! ### Notes
//! - Sources beginning with `http://` or `https://` go through a blocking client with
//!   the same timeouts as a regular API client (30s total, 10s connect). There is no retry:
//!   a failed fetch is reported to the caller, which renders an error state instead.
//! - Malformed rows never abort the load. They are logged and kept aside as
//!   [`RejectedRow`]s so callers can report them.
//!
//! Typical usage:
//! ```no_run
//! # use fertility_scatter::loader::{DataSource, Loader};
//! let loader = Loader::new()?;
//! let data = loader.load(&DataSource::parse("data/dataEveryYear.csv"))?;
//! println!("{} rows", data.len());
//! # Ok::<(), fertility_scatter::loader::LoadError>(())
//! ```

use crate::models::{Dataset, REQUIRED_COLUMNS, RawRow, RejectedRow, Row, RowError};
use csv::{ReaderBuilder, Trim};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Where the delimited table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    /// Classify a user-provided location: URLs by scheme, everything else as a path.
    pub fn parse(s: &str) -> Self {
        let t = s.trim();
        let lower = t.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(t.to_string())
        } else {
            DataSource::Path(PathBuf::from(t))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(p) => write!(f, "{}", p.display()),
            DataSource::Url(u) => f.write_str(u),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} failed with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("dataset is empty")]
    Empty,
    #[error("no valid rows ({rejected} rejected)")]
    NoValidRows { rejected: usize },
}

/// Fetches and parses datasets.
#[derive(Debug, Clone)]
pub struct Loader {
    http: HttpClient,
}

impl Loader {
    pub fn new() -> Result<Self, LoadError> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("fertility_scatter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| LoadError::Http {
                url: String::new(),
                source,
            })?;
        Ok(Self { http })
    }

    /// Fetch the raw bytes of a source.
    pub fn fetch(&self, source: &DataSource) -> Result<Vec<u8>, LoadError> {
        match source {
            DataSource::Path(path) => std::fs::read(path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            }),
            DataSource::Url(url) => {
                let http_err = |source| LoadError::Http {
                    url: url.clone(),
                    source,
                };
                let resp = self.http.get(url).send().map_err(http_err)?;
                if !resp.status().is_success() {
                    return Err(LoadError::Status {
                        url: url.clone(),
                        status: resp.status(),
                    });
                }
                Ok(resp.bytes().map_err(http_err)?.to_vec())
            }
        }
    }

    /// Fetch and parse a source into a [`Dataset`].
    pub fn load(&self, source: &DataSource) -> Result<Dataset, LoadError> {
        let bytes = self.fetch(source)?;
        let data = parse_csv(bytes.as_slice())?;
        log::info!(
            "loaded {} rows from {} ({} rejected)",
            data.len(),
            source,
            data.rejected().len()
        );
        Ok(data)
    }
}

/// Parse a comma-delimited table with a header row.
///
/// Column order is free and extra columns are ignored; every name in
/// [`REQUIRED_COLUMNS`] must be present.
pub fn parse_csv<R: Read>(input: R) -> Result<Dataset, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(false)
        .from_reader(input);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::Empty);
    }
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(LoadError::MissingColumn(col));
        }
    }

    let mut rows = Vec::new();
    let mut rejected = Vec::new();
    for (i, rec) in rdr.deserialize::<RawRow>().enumerate() {
        // header occupies line 1
        let line = i as u64 + 2;
        let raw = match rec {
            Ok(raw) => raw,
            Err(e) if is_record_error(&e) => {
                let error = RowError::Malformed(e.to_string());
                log::warn!("skipping line {line}: {error}");
                rejected.push(RejectedRow { line, error });
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        match Row::try_from(raw) {
            Ok(row) => rows.push(row),
            Err(error) => {
                log::warn!("skipping line {line}: {error}");
                rejected.push(RejectedRow { line, error });
            }
        }
    }

    if rows.is_empty() {
        if rejected.is_empty() {
            return Err(LoadError::Empty);
        }
        return Err(LoadError::NoValidRows {
            rejected: rejected.len(),
        });
    }
    Ok(Dataset::with_rejected(rows, rejected))
}

/// Errors confined to a single record; the reader can continue past them.
fn is_record_error(e: &csv::Error) -> bool {
    matches!(
        e.kind(),
        csv::ErrorKind::Deserialize { .. } | csv::ErrorKind::UnequalLengths { .. }
    )
}
