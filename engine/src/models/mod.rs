// HAVERSINE BENCH - DATA MODELS
pub mod point;
pub mod aggregate;

pub use point::{Point, PointPair};
pub use aggregate::DistanceAggregate;
