use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use plotgrid::pipeline::estimate_rotation;
use plotgrid::synth::{synthetic_grid, GridSpec};
use plotgrid::{raw_rings, reconcile, LonLat, MergeRule, ReconcileCfg};
use run_record::{RunRecord, RunStats};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod geojson_out;
mod run_record;
mod table;

#[derive(Parser)]
#[command(name = "plotgrid")]
#[command(about = "Convert plot centers and areas into reconciled polygon boundaries")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Convert a CSV of plot centers and areas into GeoJSON plot boundaries
    Convert(ConvertArgs),
    /// Write a CSV of a synthetic plot grid
    Synth(SynthArgs),
    /// Print version and code revision as JSON
    Report,
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Input CSV with FID, Area, Longitude and Latitude columns
    input: PathBuf,
    /// Two left/right adjacent plots, e.g. "12,13", used to estimate the grid angle
    #[arg(short = 'a', long = "adjacent-plots", value_parser = parse_fid_pair)]
    adjacent_plots: Option<(i64, i64)>,
    /// Output GeoJSON path (stdout if omitted); also writes `<stem>.run.json`
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = MergeArg::FirstSample)]
    merge_rule: MergeArg,
    /// Merge/snap tolerance is sqrt(smallest area) / divisor
    #[arg(long, default_value_t = 3.0)]
    tolerance_divisor: f64,
    /// Skip snapping vertices onto larger neighbors' edges
    #[arg(long)]
    no_snap: bool,
    /// Emit each plot's own rectangle with no corner reconciliation
    #[arg(long)]
    raw: bool,
}

#[derive(clap::Args)]
struct SynthArgs {
    #[arg(long)]
    rows: usize,
    #[arg(long)]
    cols: usize,
    /// Area of every plot in m²
    #[arg(long, default_value_t = 400.0)]
    area: f64,
    /// Longitude of the first plot's center
    #[arg(long, default_value_t = -96.7, allow_negative_numbers = true)]
    lon: f64,
    /// Latitude of the first plot's center
    #[arg(long, default_value_t = 40.8, allow_negative_numbers = true)]
    lat: f64,
    /// Grid rotation in degrees, counterclockwise
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    rotation_deg: f64,
    /// Max per-axis center displacement in meters
    #[arg(long, default_value_t = 0.0)]
    jitter: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
enum MergeArg {
    /// Compare against each bucket's first corner
    FirstSample,
    /// Compare against each bucket's running mean
    Centroid,
}

impl From<MergeArg> for MergeRule {
    fn from(m: MergeArg) -> Self {
        match m {
            MergeArg::FirstSample => MergeRule::FirstSample,
            MergeArg::Centroid => MergeRule::Centroid,
        }
    }
}

/// `convert` settings as recorded in the run record.
#[derive(Serialize)]
struct ConvertSettings {
    adjacent_plots: Option<(i64, i64)>,
    merge_rule: MergeArg,
    tolerance_divisor: f64,
    snap: bool,
    raw: bool,
}

fn parse_fid_pair(s: &str) -> Result<(i64, i64), String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [a, b] = parts.as_slice() else {
        return Err(format!("expected two comma-separated FIDs, got {s:?}"));
    };
    let parse = |v: &str| v.parse::<i64>().map_err(|e| format!("bad FID {v:?}: {e}"));
    Ok((parse(*a)?, parse(*b)?))
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Convert(args) => convert(args),
        Action::Synth(args) => synth(args),
        Action::Report => report(),
    }
}

fn convert(args: ConvertArgs) -> Result<()> {
    tracing::info!(
        input = %args.input.display(),
        adjacent_plots = ?args.adjacent_plots,
        raw = args.raw,
        "convert"
    );
    let records = table::read_records(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    tracing::info!(rows = records.len(), "input_records");

    let rows = records.len();
    let (rings, stats) = if args.raw {
        let rotation = estimate_rotation(&records, args.adjacent_plots)?;
        let rings = raw_rings(&records, rotation)?;
        let stats = RunStats::raw(rows, rings.len(), rotation);
        (rings, stats)
    } else {
        let cfg = ReconcileCfg {
            reference_pair: args.adjacent_plots,
            merge_rule: args.merge_rule.into(),
            tolerance_divisor: args.tolerance_divisor,
            snap: !args.no_snap,
        };
        let out = reconcile(&records, &cfg)?;
        tracing::info!(
            distance_error = out.distance_error,
            rotation = out.rotation,
            buckets = out.buckets,
            shared_buckets = out.shared_buckets,
            snap_tested = out.snap.tested,
            snap_moved = out.snap.moved,
            "reconciled"
        );
        let stats = RunStats::reconciled(rows, &out);
        (out.rings, stats)
    };

    let collection = geojson_out::feature_collection(&rings)?;
    match &args.out {
        Some(path) => {
            create_parent_dir(path)?;
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut w = BufWriter::new(file);
            serde_json::to_writer(&mut w, &collection)?;
            w.flush()?;

            let settings = ConvertSettings {
                adjacent_plots: args.adjacent_plots,
                merge_rule: args.merge_rule,
                tolerance_divisor: args.tolerance_divisor,
                snap: !args.no_snap,
                raw: args.raw,
            };
            let record = RunRecord::new(&args.input, path, &settings, &stats).write()?;
            tracing::info!(out = %path.display(), record = %record.display(), "written");
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer(&mut w, &collection)?;
            writeln!(w)?;
        }
    }
    Ok(())
}

fn synth(args: SynthArgs) -> Result<()> {
    tracing::info!(rows = args.rows, cols = args.cols, seed = args.seed, "synth");
    let spec = GridSpec {
        rows: args.rows,
        cols: args.cols,
        area: args.area,
        origin: LonLat::new(args.lon, args.lat),
        rotation: args.rotation_deg.to_radians(),
        jitter: args.jitter,
    };
    let records = synthetic_grid(&spec, args.seed);
    create_parent_dir(&args.out)?;
    table::write_records(&args.out, &records)?;
    tracing::info!(out = %args.out.display(), plots = records.len(), "written");
    Ok(())
}

#[derive(Serialize)]
struct BuildInfo {
    version: &'static str,
    code_rev: String,
}

fn report() -> Result<()> {
    let info = BuildInfo {
        version: plotgrid::VERSION,
        code_rev: run_record::code_revision(),
    };
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotgrid::PlotRecord;

    #[test]
    fn fid_pair_accepts_spaces() {
        assert_eq!(parse_fid_pair("12, 13").unwrap(), (12, 13));
        assert!(parse_fid_pair("12").is_err());
        assert!(parse_fid_pair("12,x").is_err());
        assert!(parse_fid_pair("1,2,3").is_err());
    }

    #[test]
    fn convert_writes_geojson_and_run_record() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("plots.csv");
        let spec = GridSpec {
            rows: 2,
            cols: 2,
            ..GridSpec::default()
        };
        table::write_records(&input, &synthetic_grid(&spec, 5)).unwrap();
        let out = dir.path().join("out/plots.geojson");
        convert(ConvertArgs {
            input,
            adjacent_plots: Some((1, 2)),
            out: Some(out.clone()),
            merge_rule: MergeArg::FirstSample,
            tolerance_divisor: 3.0,
            no_snap: false,
            raw: false,
        })
        .unwrap();
        let doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["features"].as_array().unwrap().len(), 4);
        assert_eq!(doc["plots"], doc["features"]);
        let record = dir.path().join("out/plots.run.json");
        let record: serde_json::Value =
            serde_json::from_slice(&std::fs::read(record).unwrap()).unwrap();
        assert_eq!(record["settings"]["merge_rule"], "first-sample");
        assert_eq!(record["stats"]["rows"], 4);
        assert_eq!(record["stats"]["plots"], 4);
        assert_eq!(record["stats"]["buckets"], 9);
        assert_eq!(record["stats"]["shared_buckets"], 5);
        assert!(record["stats"]["snap_tested"].is_u64());
    }

    fn fids(doc: &serde_json::Value) -> Vec<i64> {
        doc["features"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["properties"]["FID"].as_i64().unwrap())
            .collect()
    }

    fn convert_three_plots(dir: &Path, raw: bool) -> serde_json::Value {
        // different areas, far apart on one latitude
        let input = dir.join("mixed.csv");
        let at = |dlon: f64| LonLat::new(-96.7 + dlon, 40.8);
        let records = vec![
            PlotRecord::new(1, 100.0, at(0.0)),
            PlotRecord::new(2, 400.0, at(0.002)),
            PlotRecord::new(3, 225.0, at(0.004)),
        ];
        table::write_records(&input, &records).unwrap();
        let out = dir.join(if raw { "raw.geojson" } else { "fit.geojson" });
        convert(ConvertArgs {
            input,
            adjacent_plots: Some((1, 2)),
            out: Some(out.clone()),
            merge_rule: MergeArg::FirstSample,
            tolerance_divisor: 3.0,
            no_snap: false,
            raw,
        })
        .unwrap();
        serde_json::from_slice(&std::fs::read(out).unwrap()).unwrap()
    }

    #[test]
    fn raw_convert_keeps_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let raw = convert_three_plots(dir.path(), true);
        assert_eq!(fids(&raw), vec![1, 2, 3]);
        assert_eq!(raw["plots"], raw["features"]);
        let record: serde_json::Value =
            serde_json::from_slice(&std::fs::read(dir.path().join("raw.run.json")).unwrap())
                .unwrap();
        assert_eq!(record["settings"]["raw"], true);
        assert!(record["stats"]["rotation"].as_f64().unwrap().abs() < 1e-6);
        assert!(record["stats"]["distance_error"].is_null());
        assert!(record["stats"]["buckets"].is_null());

        // reconciled output is ordered by descending area instead
        let fitted = convert_three_plots(dir.path(), false);
        assert_eq!(fids(&fitted), vec![2, 3, 1]);
    }

    #[test]
    fn convert_rejects_unknown_reference() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("plots.csv");
        table::write_records(&input, &synthetic_grid(&GridSpec::default(), 0)).unwrap();
        let err = convert(ConvertArgs {
            input,
            adjacent_plots: Some((1, 42)),
            out: Some(dir.path().join("x.geojson")),
            merge_rule: MergeArg::FirstSample,
            tolerance_divisor: 3.0,
            no_snap: false,
            raw: false,
        })
        .unwrap_err();
        assert!(err.to_string().contains("42"));
    }
}
