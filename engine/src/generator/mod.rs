/*
 * HAVERSINE BENCH - WORKLOAD GENERATOR MODULE
 * =================================================================
 * Component Name: engine/src/generator/mod.rs
 * Core Responsibility: منتج عبء العمل: عناقيد مكانية ← أزواج نقاط ← مصفوفة سجلات نصية.
 * =================================================================
 */

pub mod cluster;
pub mod record_gen;

pub use cluster::{Cluster, Domain, SpatialClusterModel, DOMAIN_MAX, DOMAIN_MIN};
pub use record_gen::{expected_line, GenerationSummary, GeneratorContext, PAIRS_KEY};
