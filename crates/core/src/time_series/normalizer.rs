//! Raw monthly bars to a sorted, adjusted observation sequence.
//!
//! Normalization is all-or-nothing: one unparsable date or price, a zero or
//! negative price, or two bars in the same calendar month reject the whole
//! series.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use log::warn;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

use dca_market_data::MonthlyBar;

use super::time_series_model::MonthlyObservation;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Price field of a raw bar, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    Open,
    Close,
    AdjustedClose,
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PriceField::Open => "open",
            PriceField::Close => "close",
            PriceField::AdjustedClose => "adjusted close",
        };
        f.write_str(name)
    }
}

/// Why a raw series was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error("invalid {field} '{value}' on {date}")]
    InvalidPrice {
        date: String,
        field: PriceField,
        value: String,
    },

    #[error("{field} must be positive on {date}")]
    NonPositivePrice { date: String, field: PriceField },

    #[error("adjusted open is out of range on {0}")]
    AdjustmentOverflow(String),

    #[error("more than one bar for the month of {0}")]
    DuplicateMonth(String),
}

/// Normalize a date-keyed series, newest first.
///
/// Returns an empty sequence when the series is malformed; the reason is
/// logged. Use [`try_normalize`] to get it as an error instead.
pub fn normalize(bars: &HashMap<String, MonthlyBar>) -> Vec<MonthlyObservation> {
    match try_normalize(bars) {
        Ok(observations) => observations,
        Err(e) => {
            warn!("Rejecting monthly series of {} bars: {}", bars.len(), e);
            Vec::new()
        }
    }
}

/// Normalize a date-keyed series, newest first, reporting the first defect.
///
/// An empty input yields an empty sequence.
pub fn try_normalize(
    bars: &HashMap<String, MonthlyBar>,
) -> Result<Vec<MonthlyObservation>, NormalizeError> {
    // Key order only decides which defect gets reported first.
    let mut entries: Vec<(&String, &MonthlyBar)> = bars.iter().collect();
    entries.sort_by(|a, b| b.0.cmp(a.0));

    let mut observations = entries
        .into_iter()
        .map(|(date, bar)| normalize_bar(date, bar))
        .collect::<Result<Vec<_>, _>>()?;

    observations.sort_by(|a, b| b.date.cmp(&a.date));

    if let Some(pair) = observations.windows(2).find(|w| w[0].month() == w[1].month()) {
        return Err(NormalizeError::DuplicateMonth(
            pair[0].date.format("%Y-%m").to_string(),
        ));
    }

    Ok(observations)
}

fn normalize_bar(date_str: &str, bar: &MonthlyBar) -> Result<MonthlyObservation, NormalizeError> {
    let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT)
        .map_err(|_| NormalizeError::InvalidDate(date_str.to_string()))?;

    let open = parse_price(date_str, PriceField::Open, &bar.open)?;
    let close = parse_price(date_str, PriceField::Close, &bar.close)?;
    let adjusted_close = parse_price(date_str, PriceField::AdjustedClose, &bar.adjusted_close)?;

    // Rescale the unadjusted open by the close -> adjusted close ratio.
    let adjusted_open = open
        .checked_mul(adjusted_close)
        .and_then(|scaled| scaled.checked_div(close))
        .ok_or_else(|| NormalizeError::AdjustmentOverflow(date_str.to_string()))?;

    Ok(MonthlyObservation {
        date,
        adjusted_open: to_price(date_str, adjusted_open)?,
        adjusted_close: to_price(date_str, adjusted_close)?,
    })
}

fn parse_price(date: &str, field: PriceField, value: &str) -> Result<Decimal, NormalizeError> {
    let invalid = || NormalizeError::InvalidPrice {
        date: date.to_string(),
        field,
        value: value.to_string(),
    };
    // Decimal parsing tolerates `_` digit separators; provider prices never carry them.
    if value.contains('_') {
        return Err(invalid());
    }
    let price = Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| invalid())?;

    if price <= Decimal::ZERO {
        return Err(NormalizeError::NonPositivePrice {
            date: date.to_string(),
            field,
        });
    }

    Ok(price)
}

fn to_price(date: &str, value: Decimal) -> Result<f64, NormalizeError> {
    value
        .to_f64()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| NormalizeError::AdjustmentOverflow(date.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(rows: &[(&str, &str, &str, &str)]) -> HashMap<String, MonthlyBar> {
        rows.iter()
            .map(|(date, open, close, adjusted)| {
                (date.to_string(), MonthlyBar::new(*open, *close, *adjusted))
            })
            .collect()
    }

    fn winning_series() -> HashMap<String, MonthlyBar> {
        bars(&[
            ("2021-01-20", "100", "110", "110"),
            ("2021-02-20", "110", "120", "120"),
            ("2021-03-20", "120", "130", "130"),
            ("2021-04-20", "130", "140", "140"),
            ("2021-05-20", "140", "150", "150"),
            ("2021-06-20", "150", "160", "160"),
        ])
    }

    #[test]
    fn test_sorted_descending_nothing_dropped() {
        let observations = normalize(&winning_series());

        assert_eq!(observations.len(), 6);
        assert!(observations.windows(2).all(|w| w[0].date > w[1].date));
        assert_eq!(observations[0].date.to_string(), "2021-06-20");
        assert_eq!(observations[0].adjusted_open, 150.0);
        assert_eq!(observations[0].adjusted_close, 160.0);
        assert_eq!(observations[5].adjusted_open, 100.0);
    }

    #[test]
    fn test_adjusted_open_rescales_by_close_ratio() {
        // 2:1 split after the month: adjusted close is half the raw close.
        let observations = try_normalize(&bars(&[("2020-03-31", "90", "100", "50")])).unwrap();
        assert_eq!(observations[0].adjusted_open, 45.0);
        assert_eq!(observations[0].adjusted_close, 50.0);
    }

    #[test]
    fn test_one_bad_price_rejects_everything() {
        let mut series = winning_series();
        series.insert(
            "2020-12-20".to_string(),
            MonthlyBar::new("95", "abc", "100"),
        );

        assert!(normalize(&series).is_empty());
        assert_eq!(
            try_normalize(&series),
            Err(NormalizeError::InvalidPrice {
                date: "2020-12-20".to_string(),
                field: PriceField::Close,
                value: "abc".to_string(),
            })
        );
    }

    #[test]
    fn test_bad_date_rejects_everything() {
        let mut series = winning_series();
        series.insert("20-12-2020".to_string(), MonthlyBar::new("95", "100", "100"));

        assert!(normalize(&series).is_empty());
        assert_eq!(
            try_normalize(&series),
            Err(NormalizeError::InvalidDate("20-12-2020".to_string()))
        );
    }

    #[test]
    fn test_zero_close_rejects_everything() {
        let mut series = winning_series();
        series.insert("2020-12-20".to_string(), MonthlyBar::new("95", "0", "100"));

        assert!(normalize(&series).is_empty());
        assert!(matches!(
            try_normalize(&series),
            Err(NormalizeError::NonPositivePrice {
                field: PriceField::Close,
                ..
            })
        ));
    }

    #[test]
    fn test_negative_adjusted_close_rejected() {
        let series = bars(&[("2021-01-29", "10", "10", "-1")]);
        assert!(matches!(
            try_normalize(&series),
            Err(NormalizeError::NonPositivePrice {
                field: PriceField::AdjustedClose,
                ..
            })
        ));
    }

    #[test]
    fn test_nan_and_infinity_rejected() {
        assert!(normalize(&bars(&[("2021-01-29", "NaN", "10", "10")])).is_empty());
        assert!(normalize(&bars(&[("2021-01-29", "10", "inf", "10")])).is_empty());
    }

    #[test]
    fn test_digit_separators_rejected() {
        assert!(normalize(&bars(&[("2021-01-29", "1_000", "10", "10")])).is_empty());
        assert!(matches!(
            try_normalize(&bars(&[("2021-01-29", "10", "10", "1_0.5")])),
            Err(NormalizeError::InvalidPrice {
                field: PriceField::AdjustedClose,
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_month_rejected() {
        let series = bars(&[
            ("2021-06-01", "150", "160", "160"),
            ("2021-06-30", "150", "160", "160"),
        ]);
        assert_eq!(
            try_normalize(&series),
            Err(NormalizeError::DuplicateMonth("2021-06".to_string()))
        );
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        assert_eq!(try_normalize(&HashMap::new()), Ok(Vec::new()));
    }

    #[test]
    fn test_provider_precision_strings() {
        let observations =
            try_normalize(&bars(&[("2021-06-30", "143.8100", "146.5900", "139.2251")])).unwrap();
        let expected = 143.81 * 139.2251 / 146.59;
        assert!((observations[0].adjusted_open - expected).abs() < 1e-9);
    }
}
