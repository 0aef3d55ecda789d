//! Per-name running statistics

use serde::{Deserialize, Serialize};

/// Aggregated timing statistics for one named span.
///
/// All times are in milliseconds. Every field is zero until the first
/// accepted sample; after that `min_time <= average_time <= max_time`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSample {
    /// Span name
    pub name: String,
    /// Sum of all recorded durations
    pub total_time: f64,
    /// `total_time / call_count`
    pub average_time: f64,
    /// Shortest recorded duration
    pub min_time: f64,
    /// Longest recorded duration
    pub max_time: f64,
    /// Number of recorded durations
    pub call_count: u64,
    /// Most recent duration
    pub last_time: f64,
}

impl ProfileSample {
    /// Create an empty sample
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Fold one duration into the running statistics
    pub fn record(&mut self, elapsed_ms: f64) {
        if self.call_count == 0 {
            self.min_time = elapsed_ms;
            self.max_time = elapsed_ms;
        } else {
            self.min_time = self.min_time.min(elapsed_ms);
            self.max_time = self.max_time.max(elapsed_ms);
        }

        self.total_time += elapsed_ms;
        self.call_count += 1;
        self.last_time = elapsed_ms;
        self.average_time = self.total_time / self.call_count as f64;
    }

    /// Whether any duration has been recorded
    pub fn has_data(&self) -> bool {
        self.call_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_new_is_empty() {
        let sample = ProfileSample::new("update");
        assert_eq!(sample.name, "update");
        assert_eq!(sample.call_count, 0);
        assert_eq!(sample.total_time, 0.0);
        assert!(!sample.has_data());
    }

    #[test]
    fn test_sample_first_record_sets_min_max() {
        let mut sample = ProfileSample::new("update");
        sample.record(4.0);

        assert_eq!(sample.min_time, 4.0);
        assert_eq!(sample.max_time, 4.0);
        assert_eq!(sample.average_time, 4.0);
        assert_eq!(sample.last_time, 4.0);
        assert_eq!(sample.call_count, 1);
    }

    #[test]
    fn test_sample_running_stats() {
        let mut sample = ProfileSample::new("render");
        for d in [3.0, 1.0, 5.0, 3.0] {
            sample.record(d);
        }

        assert_eq!(sample.call_count, 4);
        assert_eq!(sample.total_time, 12.0);
        assert_eq!(sample.min_time, 1.0);
        assert_eq!(sample.max_time, 5.0);
        assert_eq!(sample.last_time, 3.0);
        assert!((sample.average_time - 3.0).abs() < 1e-12);
        assert!(sample.min_time <= sample.average_time && sample.average_time <= sample.max_time);
    }

    #[test]
    fn test_sample_json_field_names() {
        let mut sample = ProfileSample::new("io");
        sample.record(2.5);

        let value = serde_json::to_value(&sample).unwrap();
        assert_eq!(value["name"], "io");
        assert_eq!(value["totalTime"], 2.5);
        assert_eq!(value["averageTime"], 2.5);
        assert_eq!(value["minTime"], 2.5);
        assert_eq!(value["maxTime"], 2.5);
        assert_eq!(value["callCount"], 1);
        assert_eq!(value["lastTime"], 2.5);
    }
}
