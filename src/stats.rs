//! Descriptive statistics for per-ROI attribute aggregation.

use serde::Serialize;

/// Two-sided Student-t critical values at 95% confidence for small degrees
/// of freedom; the normal quantile takes over from df = 30.
const T_TABLE_95: [f64; 30] = [
    12.706, 4.303, 3.182, 2.776, 2.571, 2.447, 2.365, 2.306, 2.262, 2.228, 2.201, 2.179, 2.160,
    2.145, 2.131, 2.120, 2.110, 2.101, 2.093, 2.086, 2.080, 2.074, 2.069, 2.064, 2.060, 2.056,
    2.052, 2.048, 2.045, 2.042,
];

fn t_critical_95(df: usize) -> f64 {
    if df == 0 {
        return 0.0;
    }
    if df <= T_TABLE_95.len() {
        T_TABLE_95[df - 1]
    } else {
        1.96
    }
}

/// Mean, sample SD, Student-t 95% confidence interval and five-number
/// summary of one attribute sample.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub n: usize,
    pub mean: f64,
    pub std_dev: f64,
    /// Lower and upper bound of the 95% confidence interval of the mean.
    pub ci95: (f64, f64),
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl SummaryStats {
    /// Summarizes `values`, or `None` when the sample is empty. A single
    /// observation gets an SD of zero and a degenerate interval.
    pub fn from_samples(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len();
        let n_f = n as f64;
        let mean = values.iter().sum::<f64>() / n_f;
        let std_dev = if n > 1 {
            let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
            (ss / (n_f - 1.0)).sqrt()
        } else {
            0.0
        };
        let half_width = if n > 1 {
            t_critical_95(n - 1) * std_dev / n_f.sqrt()
        } else {
            0.0
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        Some(Self {
            n,
            mean,
            std_dev,
            ci95: (mean - half_width, mean + half_width),
            min: sorted[0],
            q1: percentile(&sorted, 0.25),
            median: percentile(&sorted, 0.5),
            q3: percentile(&sorted, 0.75),
            max: sorted[n - 1],
        })
    }
}

/// Linear-interpolated percentile over a sorted sample, `q` in `[0, 1]`.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}
