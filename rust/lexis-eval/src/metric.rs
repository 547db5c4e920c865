//! Ratio arithmetic shared by the evaluators.
//!
//! A metric whose denominator is zero is undefined and reported as `None`
//! rather than NaN or a division fault.

/// `numerator / denominator`, or `None` for an empty denominator.
pub fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}

/// Harmonic mean of two defined metrics; 0 when both are 0.
pub fn harmonic_mean(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    let (a, b) = (a?, b?);
    if a + b == 0.0 {
        Some(0.0)
    } else {
        Some(2.0 * a * b / (a + b))
    }
}

/// A running `hits / total` count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub hits: usize,
    pub total: usize,
}

impl Tally {
    pub fn add(&mut self, hits: usize, total: usize) {
        self.hits += hits;
        self.total += total;
    }

    pub fn record(&mut self, hit: bool) {
        self.add(usize::from(hit), 1);
    }

    pub fn ratio(&self) -> Option<f64> {
        ratio(self.hits, self.total)
    }
}
