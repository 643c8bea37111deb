//! Fixed numeric constants for the spherical embedding and snapping.
//!
//! Policy
//! - Constants, not knobs. The run-level tolerance (`distance_error`) is data
//!   driven and lives in `pipeline`; these never change between runs.

/// Globally averaged Earth radius in meters (spherical model).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Projection parameters within this margin of a segment endpoint are treated
/// as the endpoint itself; such points are left where they are.
pub const ENDPOINT_MARGIN: f64 = 1e-4;

/// Squared-length floor below which a segment counts as degenerate (m²).
pub(crate) const DEGENERATE_LEN2: f64 = 1e-18;
