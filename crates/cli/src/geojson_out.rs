//! GeoJSON output: one Polygon feature per ring with an `FID` property.
//!
//! The same features appear twice: under the standard `features` member, so
//! ordinary viewers render them, and under a top-level `plots` member for
//! consumers that look for plots specifically.

use anyhow::Result;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use plotgrid::Ring;

pub const PLOTS_MEMBER: &str = "plots";

pub fn ring_feature(ring: &Ring) -> Feature {
    let exterior = ring.points.iter().map(|p| p.to_position()).collect();
    let mut properties = JsonObject::new();
    properties.insert("FID".to_string(), JsonValue::from(ring.fid));
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![exterior]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn feature_collection(rings: &[Ring]) -> Result<FeatureCollection> {
    let features: Vec<Feature> = rings.iter().map(ring_feature).collect();
    let mut foreign = JsonObject::new();
    foreign.insert(PLOTS_MEMBER.to_string(), serde_json::to_value(&features)?);
    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign),
    })
}
