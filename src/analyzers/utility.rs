/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// A fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least-squares fit over `(x, y)` points.
///
/// Returns `None` for empty input. When every `x` is the same (including the
/// single-point case) the fit is the horizontal line through the mean of `y`.
pub fn fit_line(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.is_empty() {
        return None;
    }

    let x_mean = points.iter().map(|&(x, _)| x).sum::<f64>() / points.len() as f64;
    let y_mean = points.iter().map(|&(_, y)| y).sum::<f64>() / points.len() as f64;

    let (mut sxy, mut sxx) = (0.0, 0.0);
    for &(x, y) in points {
        let dx = x - x_mean;
        sxy += dx * (y - y_mean);
        sxx += dx * dx;
    }

    if sxx == 0.0 {
        return Some(LinearFit {
            slope: 0.0,
            intercept: y_mean,
        });
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    Some(LinearFit { slope, intercept })
}

/// Clamps `value` into `[lo, hi]`.
pub fn clip(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}
