use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One month of the normalized series.
///
/// `adjusted_open` is on the same split/dividend-adjusted scale as
/// `adjusted_close`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyObservation {
    pub date: NaiveDate,
    pub adjusted_open: f64,
    pub adjusted_close: f64,
}

impl MonthlyObservation {
    pub fn new(date: NaiveDate, adjusted_open: f64, adjusted_close: f64) -> Self {
        Self {
            date,
            adjusted_open,
            adjusted_close,
        }
    }

    /// Calendar month identity (year, month).
    pub fn month(&self) -> (i32, u32) {
        (self.date.year(), self.date.month())
    }

    /// Month label such as "June 2021".
    pub fn month_label(&self) -> String {
        self.date.format("%B %Y").to_string()
    }
}

/// A selectable start month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthOption {
    pub index: usize,
    pub date: NaiveDate,
    pub label: String,
    pub months_ago: String,
}

impl MonthOption {
    fn months_ago_label(index: usize) -> String {
        match index {
            0 => "Just invested".to_string(),
            1 => "1 month ago".to_string(),
            n => format!("{} months ago", n),
        }
    }
}

/// Start-month choices for a descending series, newest first.
pub fn month_options(observations: &[MonthlyObservation]) -> Vec<MonthOption> {
    observations
        .iter()
        .enumerate()
        .map(|(index, observation)| MonthOption {
            index,
            date: observation.date,
            label: observation.month_label(),
            months_ago: MonthOption::months_ago_label(index),
        })
        .collect()
}
