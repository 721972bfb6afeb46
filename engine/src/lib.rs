// HAVERSINE BENCH - ROOT LIBRARY
// Status: CLEAN REWRITE

// 1. تعريف الوحدات (Modules)
pub mod error;
pub mod utils;
pub mod models;
pub mod geo;
pub mod generator;
pub mod scanner;
pub mod hardware;
pub mod app;

// 2. التصدير العام (Re-exports)
pub use error::{HaversineError, HaversineResult};
pub use models::{DistanceAggregate, Point, PointPair};
pub use geo::{reference_haversine, EARTH_RADIUS};
pub use generator::{GeneratorContext, SpatialClusterModel};
pub use scanner::{scan_file, scan_pairs, RecordScanner, ScanSummary};
pub use hardware::TimingHarness;
pub use utils::{init_logger, PipelineConfig};

pub mod prelude {
    pub use crate::HaversineError;
    pub use crate::PointPair;
    pub use crate::PipelineConfig;
}
