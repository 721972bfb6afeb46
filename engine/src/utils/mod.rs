// HAVERSINE BENCH - AMBIENT UTILITIES
pub mod config_loader;
pub mod logger;

pub use config_loader::PipelineConfig;
pub use logger::init_logger;
