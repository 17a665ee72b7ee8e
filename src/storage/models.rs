//! Data models for storage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fiscal quarter of an earnings report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for quarter strings outside Q1..Q4.
#[derive(Debug, Error)]
#[error("invalid quarter '{0}': expected Q1, Q2, Q3, or Q4")]
pub struct ParseQuarterError(String);

impl FromStr for Quarter {
    type Err = ParseQuarterError;

    /// Parse "q1" / "Q1" style input, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Q1" => Ok(Self::Q1),
            "Q2" => Ok(Self::Q2),
            "Q3" => Ok(Self::Q3),
            "Q4" => Ok(Self::Q4),
            _ => Err(ParseQuarterError(s.to_string())),
        }
    }
}

/// A cached earnings report transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Database row id
    pub id: i64,

    /// Company name as given on the command line
    pub company: String,

    /// Fiscal quarter
    pub quarter: Quarter,

    /// Fiscal year
    pub year: i32,

    /// Full transcript text
    pub text: String,

    /// When the report was cached
    pub created_at: DateTime<Utc>,
}

/// A generated summary for a cached report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub id: i64,

    /// Report this summary belongs to
    pub report_id: i64,

    /// Concatenated per-section summary text
    pub text: String,

    /// Model that produced the summary, when known
    pub model: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Listing row for a cached report, without the transcript body.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub id: i64,
    pub company: String,
    pub quarter: Quarter,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub has_summary: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_parses_case_insensitively() {
        assert_eq!("q1".parse::<Quarter>().unwrap(), Quarter::Q1);
        assert_eq!("Q3".parse::<Quarter>().unwrap(), Quarter::Q3);
        assert_eq!(" q4 ".parse::<Quarter>().unwrap(), Quarter::Q4);
    }

    #[test]
    fn invalid_quarter_is_rejected() {
        let err = "Q5".parse::<Quarter>().unwrap_err();
        assert!(err.to_string().contains("Q5"));
        assert!("first".parse::<Quarter>().is_err());
    }

    #[test]
    fn quarter_round_trips_through_as_str() {
        for quarter in [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4] {
            assert_eq!(quarter.as_str().parse::<Quarter>().unwrap(), quarter);
        }
    }
}
