//! Flat-file snapshots
//!
//! CSV layout: a header row, one row per sample (times in ms, names not
//! quoted), then a blank line and two summary rows for frame count and
//! average FPS.
//!
//! JSON layout: `{ "profiles": [...], "frameCount": n, "averageFPS": x }`,
//! each profile carrying `name`, `totalTime`, `averageTime`, `minTime`,
//! `maxTime`, `callCount` and `lastTime`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ProfileSample, Profiler, ProfilerError};

/// CSV header row
pub const CSV_HEADER: &str = "Name,Total Time,Average Time,Min Time,Max Time,Call Count,Last Time";

/// Serializable snapshot of the profiler, also the JSON export document
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub profiles: Vec<ProfileSample>,
    #[serde(rename = "frameCount")]
    pub frame_count: u64,
    #[serde(rename = "averageFPS")]
    pub average_fps: f64,
}

impl ProfileReport {
    /// Look up a sample by name
    pub fn profile(&self, name: &str) -> Option<&ProfileSample> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Parse a JSON export
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Profiler {
    /// Snapshot of every sample plus frame totals
    pub fn report(&self) -> ProfileReport {
        ProfileReport {
            profiles: self.samples().cloned().collect(),
            frame_count: self.frame_count(),
            average_fps: self.average_fps(),
        }
    }

    /// Serialize the snapshot to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.report())
    }

    /// Write the CSV snapshot to any writer
    pub fn write_csv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{}", CSV_HEADER)?;
        for sample in self.samples() {
            writeln!(
                writer,
                "{},{},{},{},{},{},{}",
                sample.name,
                sample.total_time,
                sample.average_time,
                sample.min_time,
                sample.max_time,
                sample.call_count,
                sample.last_time,
            )?;
        }
        writeln!(writer)?;
        writeln!(writer, "Frame Count,{}", self.frame_count())?;
        writeln!(writer, "Average FPS,{}", self.average_fps())?;
        writer.flush()
    }

    /// Write the CSV snapshot to a file
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<(), ProfilerError> {
        let path = path.as_ref();
        let result = create(path).and_then(|file| {
            self.write_csv(file).map_err(|source| ProfilerError::Io {
                path: path.to_path_buf(),
                source,
            })
        });
        log_export("CSV", path, &result);
        result
    }

    /// Write the JSON snapshot to a file
    pub fn export_json(&self, path: impl AsRef<Path>) -> Result<(), ProfilerError> {
        let path = path.as_ref();
        let result = create(path).and_then(|mut file| {
            serde_json::to_writer_pretty(&mut file, &self.report())?;
            file.flush().map_err(|source| ProfilerError::Io {
                path: path.to_path_buf(),
                source,
            })
        });
        log_export("JSON", path, &result);
        result
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, ProfilerError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| ProfilerError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn log_export(format: &str, path: &Path, result: &Result<(), ProfilerError>) {
    match result {
        Ok(()) => log::info!("Exported profiler {} to {}", format, path.display()),
        Err(e) => log::warn!("Profiler {} export failed: {}", format, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profiler_with_data() -> Profiler {
        let mut profiler = Profiler::new();
        profiler.initialize();
        profiler.update_profile_data("render", 2.0);
        profiler.update_profile_data("render", 4.0);
        profiler.update_profile_data("audio", 0.5);
        profiler.update(0.02);
        profiler
    }

    #[test]
    fn test_report_contents() {
        let report = profiler_with_data().report();
        assert_eq!(report.profiles.len(), 2);
        assert_eq!(report.frame_count, 1);
        assert!((report.average_fps - 50.0).abs() < 1e-9);

        let render = report.profile("render").unwrap();
        assert_eq!(render.call_count, 2);
        assert_eq!(render.average_time, 3.0);
    }

    #[test]
    fn test_json_top_level_keys() {
        let json = profiler_with_data().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["profiles"].is_array());
        assert_eq!(value["frameCount"], 1);
        assert!(value["averageFPS"].is_number());
    }

    #[test]
    fn test_csv_layout() {
        let mut out = Vec::new();
        profiler_with_data().write_csv(&mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], CSV_HEADER);
        // Samples are ordered by name
        assert_eq!(lines[1], "audio,0.5,0.5,0.5,0.5,1,0.5");
        assert_eq!(lines[2], "render,6,3,2,4,2,4");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Frame Count,1");
        assert!(lines[5].starts_with("Average FPS,"));
    }

    #[test]
    fn test_export_to_bad_path_fails_quietly() {
        let profiler = profiler_with_data();
        let result = profiler.export_csv("/nonexistent-dir/for/sure/profile.csv");
        assert!(matches!(result, Err(ProfilerError::Io { .. })));

        let result = profiler.export_json("/nonexistent-dir/for/sure/profile.json");
        assert!(matches!(result, Err(ProfilerError::Io { .. })));
    }
}
