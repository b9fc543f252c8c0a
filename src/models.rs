use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Columns the loader requires in the header row.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "location",
    "time",
    "fertility_rate",
    "life_expectancy",
    "pop_mlns",
];

/// Raw record as it appears in the CSV (all text, trimmed by the reader).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawRow {
    pub location: String,
    pub time: String,
    pub fertility_rate: String,
    pub life_expectancy: String,
    pub pop_mlns: String,
}

/// Tidy structure used by this crate (one row = one country-year observation).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Row {
    pub location: String,
    /// Year exactly as written in the source; filtering compares strings.
    pub time: String,
    pub fertility_rate: f64,
    pub life_expectancy: f64,
    /// Population in millions.
    pub pop_mlns: f64,
    /// Source spelling of the numbers shown in the tooltip.
    #[serde(skip)]
    pub text: SourceText,
}

/// Numeric fields exactly as written in the source (`2.00` stays `2.00`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceText {
    pub fertility_rate: String,
    pub life_expectancy: String,
}

impl Row {
    /// Row built in memory; display text falls back to the numbers themselves.
    pub fn new(
        location: impl Into<String>,
        time: impl Into<String>,
        fertility_rate: f64,
        life_expectancy: f64,
        pop_mlns: f64,
    ) -> Self {
        Self {
            location: location.into(),
            time: time.into(),
            fertility_rate,
            life_expectancy,
            pop_mlns,
            text: SourceText::default(),
        }
    }

    pub fn fertility_rate_text(&self) -> String {
        display_text(&self.text.fertility_rate, self.fertility_rate)
    }

    pub fn life_expectancy_text(&self) -> String {
        display_text(&self.text.life_expectancy, self.life_expectancy)
    }
}

fn display_text(source: &str, value: f64) -> String {
    if source.is_empty() {
        value.to_string()
    } else {
        source.to_string()
    }
}

/// Why a raw record could not become a [`Row`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RowError {
    #[error("field `{field}` is empty")]
    MissingField { field: &'static str },
    #[error("field `{field}` is not a finite number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("malformed record: {0}")]
    Malformed(String),
}

fn parse_finite(field: &'static str, value: &str) -> Result<f64, RowError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(RowError::MissingField { field });
    }
    match v.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(RowError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}

impl TryFrom<RawRow> for Row {
    type Error = RowError;

    fn try_from(raw: RawRow) -> Result<Self, Self::Error> {
        let time = raw.time.trim().to_string();
        if time.is_empty() {
            return Err(RowError::MissingField { field: "time" });
        }
        Ok(Self {
            fertility_rate: parse_finite("fertility_rate", &raw.fertility_rate)?,
            life_expectancy: parse_finite("life_expectancy", &raw.life_expectancy)?,
            pop_mlns: parse_finite("pop_mlns", &raw.pop_mlns)?,
            text: SourceText {
                fertility_rate: raw.fertility_rate.trim().to_string(),
                life_expectancy: raw.life_expectancy.trim().to_string(),
            },
            location: raw.location,
            time,
        })
    }
}

/// Numeric columns that can drive an axis or the marker size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    FertilityRate,
    LifeExpectancy,
    PopMlns,
}

impl NumericField {
    pub fn value(self, row: &Row) -> f64 {
        match self {
            NumericField::FertilityRate => row.fertility_rate,
            NumericField::LifeExpectancy => row.life_expectancy,
            NumericField::PopMlns => row.pop_mlns,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            NumericField::FertilityRate => "fertility_rate",
            NumericField::LifeExpectancy => "life_expectancy",
            NumericField::PopMlns => "pop_mlns",
        }
    }
}

/// A source record that was excluded during loading.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 1-based line in the source file (header is line 1).
    pub line: u64,
    pub error: RowError,
}

/// Ordered rows in source order, immutable after load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<Row>,
    rejected: Vec<RejectedRow>,
}

impl Dataset {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            rejected: Vec::new(),
        }
    }

    pub fn with_rejected(rows: Vec<Row>, rejected: Vec<RejectedRow>) -> Self {
        Self { rows, rejected }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&Row> {
        self.rows.get(idx)
    }

    pub fn rejected(&self) -> &[RejectedRow] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct `time` values in first-occurrence order.
    pub fn years(&self) -> YearSet {
        YearSet::from_rows(&self.rows)
    }
}

/// Distinct years, order preserved by first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearSet {
    years: Vec<String>,
}

impl YearSet {
    pub fn from_rows(rows: &[Row]) -> Self {
        let mut years: Vec<String> = Vec::new();
        for r in rows {
            if !years.iter().any(|y| *y == r.time) {
                years.push(r.time.clone());
            }
        }
        Self { years }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.years.get(idx).map(String::as_str)
    }

    pub fn position(&self, year: &str) -> Option<usize> {
        self.years.iter().position(|y| y == year)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.years.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(time: &str, fert: &str, life: &str, pop: &str) -> RawRow {
        RawRow {
            location: "Xland".into(),
            time: time.into(),
            fertility_rate: fert.into(),
            life_expectancy: life.into(),
            pop_mlns: pop.into(),
        }
    }

    #[test]
    fn parses_valid_row() {
        let row = Row::try_from(raw("1960", "5.1", "50.2", "10")).unwrap();
        assert_eq!(row.time, "1960");
        assert_eq!(row.fertility_rate, 5.1);
        assert_eq!(row.pop_mlns, 10.0);
    }

    #[test]
    fn keeps_source_spelling_for_display() {
        let row = Row::try_from(raw("1960", " 2.00 ", "67.70", "94.1")).unwrap();
        assert_eq!(row.fertility_rate, 2.0);
        assert_eq!(row.fertility_rate_text(), "2.00");
        assert_eq!(row.life_expectancy_text(), "67.70");
        let built = Row::new("X", "1960", 2.0, 67.5, 1.0);
        assert_eq!(built.fertility_rate_text(), "2");
        assert_eq!(built.life_expectancy_text(), "67.5");
    }

    #[test]
    fn rejects_non_numeric_and_non_finite() {
        let e = Row::try_from(raw("1960", "abc", "50", "1")).unwrap_err();
        assert!(matches!(
            e,
            RowError::InvalidNumber {
                field: "fertility_rate",
                ..
            }
        ));
        let e = Row::try_from(raw("1960", "1", "NaN", "1")).unwrap_err();
        assert!(matches!(
            e,
            RowError::InvalidNumber {
                field: "life_expectancy",
                ..
            }
        ));
        let e = Row::try_from(raw("1960", "1", "2", "")).unwrap_err();
        assert_eq!(e, RowError::MissingField { field: "pop_mlns" });
    }

    #[test]
    fn year_set_keeps_first_occurrence_order() {
        let rows: Vec<Row> = ["1970", "1960", "1970", "1980", "1960"]
            .iter()
            .map(|t| Row::try_from(raw(t, "1", "2", "3")).unwrap())
            .collect();
        let years = YearSet::from_rows(&rows);
        assert_eq!(years.as_slice(), ["1970", "1960", "1980"]);
        assert_eq!(years.position("1980"), Some(2));
    }
}
