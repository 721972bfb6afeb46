// HAVERSINE BENCH - GEODESY
pub mod haversine;

pub use haversine::{pair_distance, reference_haversine, EARTH_RADIUS};
