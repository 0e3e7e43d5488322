/// Descriptive statistics over a non-empty sample of counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    pub min: usize,
    pub max: usize,
    /// Population standard deviation; 0 for fewer than two samples.
    pub std_dev: f64,
}

impl Summary {
    /// `None` for an empty sample.
    #[allow(clippy::cast_precision_loss)]
    pub fn of(samples: &[usize]) -> Option<Self> {
        let min = *samples.iter().min()?;
        let max = *samples.iter().max()?;
        let n = samples.len() as f64;

        let mean = samples.iter().map(|&v| v as f64).sum::<f64>() / n;

        let mut sorted = samples.to_vec();
        sorted.sort_unstable();
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
        } else {
            sorted[mid] as f64
        };

        let std_dev = if samples.len() < 2 {
            0.0
        } else {
            let variance = samples
                .iter()
                .map(|&v| (v as f64 - mean).powi(2))
                .sum::<f64>()
                / n;
            variance.sqrt()
        };

        Some(Self {
            mean,
            median,
            min,
            max,
            std_dev,
        })
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
