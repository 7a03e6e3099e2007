//! Linear trendline fitting for the price/revenue scatter.

use statrs::statistics::Statistics;

/// Degree-1 least squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation; `None` when `y` has no variance.
    pub correlation: Option<f64>,
}

impl LinearFit {
    /// Fit over `(x, y)` pairs. Needs two points and a non-constant `x`.
    pub fn fit(points: &[[f64; 2]]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }

        let xs: Vec<f64> = points.iter().map(|p| p[0]).collect();
        let ys: Vec<f64> = points.iter().map(|p| p[1]).collect();

        let x_var = xs.iter().variance();
        if !x_var.is_finite() || x_var <= 0.0 {
            return None;
        }

        let cov = xs.iter().covariance(ys.iter());
        let slope = cov / x_var;
        let intercept = ys.iter().mean() - slope * xs.iter().mean();

        let y_var = ys.iter().variance();
        let correlation = (y_var > 0.0).then(|| cov / (x_var.sqrt() * y_var.sqrt()));

        Some(Self {
            slope,
            intercept,
            correlation,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}
