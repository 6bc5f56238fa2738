use serde::{Deserialize, Serialize};

/// How a metric summarises the spread of its samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spread {
    #[default]
    StdDev,
    Variance,
}

impl Spread {
    /// Population spread of `values`; NaN when empty.
    pub fn of(self, values: &[f64]) -> f64 {
        let var = variance(values);
        match self {
            Spread::StdDev => var.sqrt(),
            Spread::Variance => var,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Spread::StdDev => "stddev",
            Spread::Variance => "variance",
        }
    }
}

/// Arithmetic mean; NaN when empty.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance; NaN when empty.
pub fn variance(values: &[f64]) -> f64 {
    let m = mean(values);
    if m.is_nan() {
        return f64::NAN;
    }
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

/// Quantile `q` of ascending `sorted`, interpolating linearly between the
/// neighboring order statistics. `q` is clamped to `[0,1]`; an empty slice
/// gives NaN.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = (lo + 1).min(n - 1);
            let frac = pos - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}
