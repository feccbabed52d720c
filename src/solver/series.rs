//! Sampled time series.

/// Evenly spaced samples over `[start, stop]`, both ends included.
///
/// One sample yields `[start]`; zero samples yield an empty vector. The last
/// sample is exactly `stop` so consecutive phases share their boundary time.
pub fn linspace(start: f64, stop: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// An ordered sequence of `(time, value)` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    time: Vec<f64>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Build a series by evaluating `f` at each sample time.
    pub fn from_fn(time: Vec<f64>, f: impl Fn(f64) -> f64) -> Self {
        let values = time.iter().map(|&t| f(t)).collect();
        Self { time, values }
    }

    /// Derive a series on the same time base by mapping each value.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            time: self.time.clone(),
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Last sample as `(time, value)`.
    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.time.last()?, *self.values.last()?))
    }

    /// Iterate over `(time, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let t = linspace(0.0, 5.0, 1000);
        assert_eq!(t.len(), 1000);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[999], 5.0);
        assert!((t[1] - 5.0 / 999.0).abs() < 1e-15);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert_eq!(linspace(4.0, 4.0, 3), vec![4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_series_map_keeps_time_base() {
        let s = TimeSeries::from_fn(linspace(0.0, 1.0, 3), |t| 2.0 * t);
        let half = s.map(|v| v / 2.0);
        assert_eq!(half.time(), s.time());
        assert_eq!(half.values(), &[0.0, 0.5, 1.0]);
        assert_eq!(s.last(), Some((1.0, 2.0)));
    }
}
