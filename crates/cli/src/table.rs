//! CSV plot tables via Polars.
//!
//! Required columns: `FID` (integer), `Area`, `Longitude`, `Latitude` (reals).
//! Extra columns are ignored. Any value that fails a strict numeric cast, or
//! is missing, aborts the read; rows are never skipped.

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use plotgrid::{LonLat, PlotRecord};
use polars::prelude::*;

pub const FID: &str = "FID";
pub const AREA: &str = "Area";
pub const LONGITUDE: &str = "Longitude";
pub const LATITUDE: &str = "Latitude";

/// Read all records in file order.
pub fn read_records(path: &Path) -> Result<Vec<PlotRecord>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(None)
        .finish()?
        .select([
            col(FID).strict_cast(DataType::Int64),
            col(AREA).strict_cast(DataType::Float64),
            col(LONGITUDE).strict_cast(DataType::Float64),
            col(LATITUDE).strict_cast(DataType::Float64),
        ])
        .collect()?;

    let fid = df.column(FID)?.i64()?;
    let area = df.column(AREA)?.f64()?;
    let lon = df.column(LONGITUDE)?.f64()?;
    let lat = df.column(LATITUDE)?.f64()?;

    let mut out = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let (Some(fid), Some(area), Some(lon), Some(lat)) =
            (fid.get(row), area.get(row), lon.get(row), lat.get(row))
        else {
            bail!("row {}: missing FID, Area, Longitude or Latitude", row + 1);
        };
        out.push(PlotRecord::new(fid, area, LonLat::new(lon, lat)));
    }
    Ok(out)
}

/// Write records with the same header `read_records` expects.
pub fn write_records(path: &Path, records: &[PlotRecord]) -> Result<()> {
    let mut df = df!(
        FID => records.iter().map(|r| r.fid).collect::<Vec<_>>(),
        AREA => records.iter().map(|r| r.area).collect::<Vec<_>>(),
        LONGITUDE => records.iter().map(|r| r.center.lon).collect::<Vec<_>>(),
        LATITUDE => records.iter().map(|r| r.center.lat).collect::<Vec<_>>()
    )?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;
    Ok(())
}
