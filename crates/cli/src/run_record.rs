//! Run records: a JSON file next to each converted GeoJSON that says how it
//! was produced and what the reconciliation did.
//!
//! Written as `<stem>.run.json` beside the output, e.g. `plots.geojson` →
//! `plots.run.json`.

use anyhow::{Context, Result};
use plotgrid::Reconciled;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Counters from one `convert` run. Reconciliation-only fields are `None`
/// for raw output.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RunStats {
    /// Records read from the input table.
    pub rows: usize,
    /// Rings written.
    pub plots: usize,
    /// Global rotation applied to corner offsets (radians).
    pub rotation: f64,
    pub distance_error: Option<f64>,
    pub buckets: Option<usize>,
    pub shared_buckets: Option<usize>,
    pub snap_tested: Option<usize>,
    pub snap_moved: Option<usize>,
}

impl RunStats {
    pub fn raw(rows: usize, plots: usize, rotation: f64) -> Self {
        Self {
            rows,
            plots,
            rotation,
            ..Self::default()
        }
    }

    pub fn reconciled(rows: usize, out: &Reconciled) -> Self {
        Self {
            rows,
            plots: out.rings.len(),
            rotation: out.rotation,
            distance_error: Some(out.distance_error),
            buckets: Some(out.buckets),
            shared_buckets: Some(out.shared_buckets),
            snap_tested: Some(out.snap.tested),
            snap_moved: Some(out.snap.moved),
        }
    }
}

/// Everything recorded for one run. `S` carries the command's settings.
#[derive(Serialize)]
pub struct RunRecord<'a, S: Serialize> {
    pub version: &'static str,
    pub code_rev: String,
    pub input: &'a Path,
    pub output: &'a Path,
    pub settings: &'a S,
    pub stats: &'a RunStats,
}

impl<'a, S: Serialize> RunRecord<'a, S> {
    pub fn new(input: &'a Path, output: &'a Path, settings: &'a S, stats: &'a RunStats) -> Self {
        Self {
            version: plotgrid::VERSION,
            code_rev: code_revision(),
            input,
            output,
            settings,
            stats,
        }
    }

    /// Write the record beside `self.output`; returns the record's path.
    pub fn write(&self) -> Result<PathBuf> {
        let path = record_path(self.output);
        fs::write(&path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

fn record_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    output.with_file_name(format!("{stem}.run.json"))
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`.
pub fn code_revision() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string())
}

fn git_head() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    String::from_utf8(out.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotgrid::synth::{synthetic_grid, GridSpec};
    use plotgrid::{reconcile, ReconcileCfg};
    use serde_json::Value;
    use tempfile::tempdir;

    #[derive(Serialize)]
    struct Settings {
        snap: bool,
    }

    #[test]
    fn record_sits_beside_the_output() {
        let out = Path::new("/tmp/output/plots.geojson");
        assert_eq!(record_path(out), Path::new("/tmp/output/plots.run.json"));
    }

    #[test]
    fn reconciled_stats_copy_the_run_counters() {
        let spec = GridSpec {
            rows: 2,
            cols: 3,
            ..GridSpec::default()
        };
        let out = reconcile(&synthetic_grid(&spec, 2), &ReconcileCfg::default()).unwrap();
        let stats = RunStats::reconciled(6, &out);
        assert_eq!(stats.plots, 6);
        assert_eq!(stats.buckets, Some(3 * 4));
        assert_eq!(stats.shared_buckets, Some(3 * 4 - 4));
        assert_eq!(stats.snap_moved, Some(out.snap.moved));
        assert!((stats.distance_error.unwrap() - 20.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn written_record_carries_settings_and_stats() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("plots.geojson");
        let input = dir.path().join("plots.csv");
        let stats = RunStats::raw(3, 3, 0.0);
        let settings = Settings { snap: false };
        let path = RunRecord::new(&input, &output, &settings, &stats)
            .write()
            .unwrap();
        let doc: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(doc["version"], plotgrid::VERSION);
        assert_eq!(doc["output"], output.to_string_lossy().as_ref());
        assert_eq!(doc["settings"]["snap"], false);
        assert_eq!(doc["stats"]["rows"], 3);
        assert!(doc["stats"]["distance_error"].is_null());
    }
}
