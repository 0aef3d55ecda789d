//! Integration tests for probe_profiler
//!
//! Aggregation, threshold filtering, frame history bounds and export round-trips

use probe_profiler::*;

fn initialized() -> Profiler {
    let mut profiler = Profiler::new();
    profiler.initialize();
    profiler
}

#[test]
fn test_aggregation_matches_inputs() {
    let mut profiler = initialized();
    let durations = [0.75, 12.5, 3.25, 8.0, 0.125, 5.5];

    for d in durations {
        profiler.update_profile_data("span", d);
    }

    let sample = profiler.sample("span").unwrap();
    let total: f64 = durations.iter().sum();
    assert_eq!(sample.call_count, durations.len() as u64);
    assert!((sample.total_time - total).abs() < 1e-9);
    assert_eq!(sample.min_time, 0.125);
    assert_eq!(sample.max_time, 12.5);
    assert_eq!(sample.last_time, 5.5);
    assert!((sample.average_time - total / durations.len() as f64).abs() < 1e-9);
    assert!(sample.min_time <= sample.average_time);
    assert!(sample.average_time <= sample.max_time);
}

#[test]
fn test_threshold_filter_leaves_sample_untouched() {
    let mut profiler = initialized();
    profiler.set_min_time(2.0);

    profiler.update_profile_data("span", 1.999);
    assert!(profiler.sample("span").is_none());

    profiler.update_profile_data("span", 3.0);
    profiler.update_profile_data("span", 0.5);

    let sample = profiler.sample("span").unwrap();
    assert_eq!(sample.call_count, 1);
    assert_eq!(sample.total_time, 3.0);
    assert_eq!(sample.min_time, 3.0);
}

#[test]
fn test_frame_ring_buffer_bound() {
    let mut profiler = initialized();
    profiler.set_max_history(5);

    for i in 1..=12 {
        profiler.update(i as f64 / 1000.0);
    }

    let history: Vec<f64> = profiler.frame_history().iter().collect();
    assert_eq!(history.len(), 5);
    let expected = [8.0, 9.0, 10.0, 11.0, 12.0];
    for (got, want) in history.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9);
    }
    assert_eq!(profiler.frame_count(), 12);
}

#[test]
fn test_average_fps_formula() {
    let mut profiler = initialized();
    assert_eq!(profiler.average_fps(), 0.0);

    profiler.update(0.010);
    profiler.update(0.030);

    // 2 frames in 40ms
    assert!((profiler.average_fps() - 50.0).abs() < 1e-6);
}

#[test]
fn test_json_export_round_trip() {
    let mut profiler = initialized();
    for (name, d) in [("update", 1.1), ("update", 2.3), ("render", 7.7), ("io", 0.3333)] {
        profiler.update_profile_data(name, d);
    }
    profiler.update(0.016);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    profiler.export_json(&path).unwrap();

    let json = std::fs::read_to_string(&path).unwrap();
    let report = ProfileReport::from_json(&json).unwrap();

    assert_eq!(report.profiles.len(), profiler.sample_count());
    for sample in profiler.samples() {
        let parsed = report.profile(&sample.name).unwrap();
        assert_eq!(parsed.total_time, sample.total_time);
        assert_eq!(parsed.call_count, sample.call_count);
        assert_eq!(parsed.min_time, sample.min_time);
        assert_eq!(parsed.max_time, sample.max_time);
        assert_eq!(parsed.average_time, sample.average_time);
        assert_eq!(parsed.last_time, sample.last_time);
    }
    assert_eq!(report.frame_count, 1);
    assert_eq!(report.average_fps, profiler.average_fps());
}

#[test]
fn test_csv_export_to_file() {
    let mut profiler = initialized();
    profiler.update_profile_data("tick", 4.0);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.csv");
    profiler.export_csv(&path).unwrap();

    let csv = std::fs::read_to_string(&path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("Name,Total Time,Average Time,Min Time,Max Time,Call Count,Last Time")
    );
    assert_eq!(lines.next(), Some("tick,4,4,4,4,1,4"));
}

#[test]
fn test_reset_profile_only_touches_named_sample() {
    let mut profiler = initialized();
    profiler.update_profile_data("a", 1.0);
    profiler.update_profile_data("b", 1.0);
    profiler.update(0.016);

    profiler.reset_profile("a");

    assert!(profiler.sample("a").is_none());
    assert!(profiler.sample("b").is_some());
    assert_eq!(profiler.frame_count(), 1);
}

#[test]
fn test_shared_profiler_nested_scopes() {
    let shared = SharedProfiler::new(initialized());
    {
        let _frame = shared.scope("frame");
        {
            let _update = shared.scope("update");
        }
        let _render = shared.scope("render");
    }

    let profiler = shared.lock();
    for name in ["frame", "update", "render"] {
        assert_eq!(profiler.sample(name).unwrap().call_count, 1, "{}", name);
    }
}
