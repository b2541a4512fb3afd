//! Per-node connectivity statistics relative to communities

pub mod degree;
pub mod participation;

pub use degree::{induced_in_degrees, within_community_z_scores, ZERO_VARIANCE_EPSILON};
pub use participation::participation_coefficients;
