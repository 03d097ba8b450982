//! Descriptive statistics for numeric columns

/// count, mean, std, min, quartiles and max over the non-missing values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl NumericSummary {
    pub const LABELS: [&'static str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        if count == 0 {
            return Self {
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q25: f64::NAN,
                median: f64::NAN,
                q75: f64::NAN,
                max: f64::NAN,
            };
        }

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let variance =
                sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        } else {
            f64::NAN
        };

        Self {
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        }
    }

    /// Values in the order of `LABELS`
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_simple_series() {
        let summary = NumericSummary::from_values([4.0, 1.0, 3.0, 2.0]);

        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 2.5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 4.0);
        assert_eq!(summary.q25, 1.75);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.q75, 3.25);
        assert!((summary.std - 1.2909944487358056).abs() < 1e-12);
    }

    #[test]
    fn test_summary_of_single_value_has_no_std() {
        let summary = NumericSummary::from_values([7.0]);

        assert_eq!(summary.count, 1);
        assert_eq!(summary.median, 7.0);
        assert!(summary.std.is_nan());
    }

    #[test]
    fn test_summary_of_empty_series() {
        let summary = NumericSummary::from_values(std::iter::empty());

        assert_eq!(summary.count, 0);
        assert!(summary.mean.is_nan());
        assert!(summary.max.is_nan());
    }
}
