//! Descriptive statistics over realized disclosure-window returns.

use serde::Serialize;

use crate::error::InsufficientDataError;
use crate::{format, AlignedTable};

/// Summary of the realized return distribution.
///
/// `std_dev` is the sample standard deviation (n − 1 denominator); with a
/// single eligible return it is `NaN` and renders as `nan%`. Percentiles use
/// linear interpolation between the closest ranks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

impl SummaryStats {
    /// Summarize an aligned table.
    ///
    /// Eligible values are the returns of realized rows whose window is
    /// defined; the upcoming placeholder is excluded by variant, never by
    /// position.
    pub fn from_table(table: &AlignedTable) -> Result<Self, InsufficientDataError> {
        let returns: Vec<f64> = table.realized_returns().collect();
        Self::from_returns(&returns)
    }

    /// Summarize raw decimal returns (0.05 means +5%).
    pub fn from_returns(returns: &[f64]) -> Result<Self, InsufficientDataError> {
        if returns.is_empty() {
            return Err(InsufficientDataError);
        }

        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let std_dev = if returns.len() < 2 {
            f64::NAN
        } else {
            let sum_sq = returns
                .iter()
                .map(|value| (value - mean) * (value - mean))
                .sum::<f64>();
            (sum_sq / (n - 1.0)).sqrt()
        };

        let mut sorted = returns.to_vec();
        sorted.sort_by(f64::total_cmp);

        Ok(Self {
            mean,
            std_dev,
            min: sorted[0],
            p25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            p75: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }

    /// Fixed-order rows for rendering, each value as a percent string.
    pub fn rows(&self) -> [(&'static str, String); 7] {
        [
            ("Mean", format::percent(self.mean)),
            ("Std Dev", format::percent(self.std_dev)),
            ("Min", format::percent(self.min)),
            ("25th percentile", format::percent(self.p25)),
            ("Median", format::percent(self.median)),
            ("75th percentile", format::percent(self.p75)),
            ("Max", format::percent(self.max)),
        ]
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        sorted[lower] + (position - lower as f64) * (sorted[upper] - sorted[lower])
    }
}
