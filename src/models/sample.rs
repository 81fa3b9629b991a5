//! Price samples and the chronological series built from them

/// A single (price, timestamp) observation, price already in CNH per gram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub price: f64,
    /// Unix seconds; `None` when the upstream timestamp could not be parsed
    pub timestamp_seconds: Option<i64>,
}

impl Sample {
    #[cfg(test)]
    pub fn new(price: f64, timestamp_seconds: i64) -> Self {
        Self {
            price,
            timestamp_seconds: Some(timestamp_seconds),
        }
    }
}

/// Chronologically ordered samples (oldest first) for one refresh cycle.
///
/// The ordering is fixed here, once, so the trend evaluator and the chart
/// never have to care which way the feed delivered its records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    /// Build a series, sorting by timestamp when every sample has one.
    /// Otherwise arrival order is kept as-is.
    pub fn from_samples(mut samples: Vec<Sample>) -> Self {
        if samples.iter().all(|s| s.timestamp_seconds.is_some()) {
            samples.sort_by_key(|s| s.timestamp_seconds);
        }
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Most recent sample
    pub fn current(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Sample right before the most recent one
    pub fn previous(&self) -> Option<&Sample> {
        self.samples.len().checked_sub(2).map(|i| &self.samples[i])
    }

    /// Prices in chronological order, as fed to the chart
    pub fn prices(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.price).collect()
    }
}
