// Layered Config

/*
 * HAVERSINE BENCH - PIPELINE CONFIGURATION LOADER
 * =================================================================
 * Component Name: engine/src/utils/config_loader.rs
 * Core Responsibility: تحميل إعدادات خط الأنابيب من الطبقات: افتراضي ← ملف TOML ← متغيرات البيئة.
 * Design Pattern: Layered Configuration / Validate-on-Load
 * Forensic Impact: المولد والماسح يقرآن نفس نصف القطر ونفس معاملات العناقيد. أي اختلاف
 *                  هنا يظهر كعدم تطابق في المتوسط وليس كخطأ صريح، لذلك نسجل القيم المحملة.
 * =================================================================
 */

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use crate::error::{HaversineError, HaversineResult};
use crate::generator::cluster::{DOMAIN_MAX, DOMAIN_MIN};

/// اسم ملف الإعدادات الافتراضي (اختياري)
pub const DEFAULT_CONFIG_FILE: &str = "haversine.toml";
/// متغير البيئة الذي يشير إلى ملف إعدادات بديل
pub const CONFIG_PATH_ENV: &str = "HAVERSINE_CONFIG";
const ENV_PREFIX: &str = "HAVERSINE";

// =================================================================
// تعريفات هيكل الإعدادات (Configuration Schema)
// =================================================================

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PipelineConfig {
    pub earth_radius: f64,
    pub cluster_count: usize,
    pub radius_min: f64,
    pub radius_max: f64,
    pub calibration_ms: u64,
    pub pin_core: Option<usize>,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            earth_radius: crate::geo::EARTH_RADIUS,
            cluster_count: 64,
            radius_min: 0.5,
            radius_max: 50.0,
            calibration_ms: 100,
            pin_core: None,
            log_level: "warn".to_string(),
            log_dir: None,
        }
    }
}

impl PipelineConfig {
    /// التحميل الكامل: الملف المحدد في `HAVERSINE_CONFIG` أو `haversine.toml` إن وجد، ثم البيئة.
    pub fn load() -> HaversineResult<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(Some(&path), true)
    }

    /// دالة التحميل من الطبقات (Pure Builder)
    ///
    /// A missing file is only tolerated for the implicit default path; an
    /// explicitly requested file that does not exist is a configuration error.
    pub fn load_from(path: Option<&Path>, with_env: bool) -> HaversineResult<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("earth_radius", defaults.earth_radius)?
            .set_default("cluster_count", defaults.cluster_count as i64)?
            .set_default("radius_min", defaults.radius_min)?
            .set_default("radius_max", defaults.radius_max)?
            .set_default("calibration_ms", defaults.calibration_ms as i64)?
            .set_default("log_level", defaults.log_level.clone())?;

        if let Some(path) = path {
            if path != Path::new(DEFAULT_CONFIG_FILE) && !path.exists() {
                return Err(HaversineError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(
                File::from(path).format(FileFormat::Toml).required(false),
            );
        }

        if with_env {
            builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));
        }

        let settings = builder
            .build()
            .map_err(|e| HaversineError::Config(format!("Build Error: {}", e)))?;

        let config = settings
            .try_deserialize::<PipelineConfig>()
            .map_err(|e| HaversineError::Config(format!("Parse Error: {}", e)))?;

        config.validate()?;
        info!(
            "CONFIG: radius={} clusters={} offset=[{}, {}) calibration={}ms",
            config.earth_radius,
            config.cluster_count,
            config.radius_min,
            config.radius_max,
            config.calibration_ms
        );
        debug!(?config, "CONFIG: Loaded pipeline configuration");
        Ok(config)
    }

    /// التحقق من سلامة القيم قبل استخدامها
    pub fn validate(&self) -> HaversineResult<()> {
        let width = DOMAIN_MAX - DOMAIN_MIN;

        if !(self.earth_radius.is_finite() && self.earth_radius > 0.0) {
            return Err(HaversineError::Config(format!(
                "earth_radius must be positive, got {}",
                self.earth_radius
            )));
        }
        if self.cluster_count == 0 {
            return Err(HaversineError::Config("cluster_count must be at least 1".into()));
        }
        // المقص يعكس مرة واحدة فقط، لذا يجب ألا تتجاوز أي إزاحة عرض المجال
        let radius_ok = self.radius_min > 0.0
            && self.radius_min < self.radius_max
            && self.radius_max < width;
        if !radius_ok {
            return Err(HaversineError::Config(format!(
                "cluster radius bounds must satisfy 0 < radius_min < radius_max < {}, got [{}, {})",
                width, self.radius_min, self.radius_max
            )));
        }
        if self.calibration_ms == 0 {
            return Err(HaversineError::Config("calibration_ms must be at least 1".into()));
        }
        Ok(())
    }
}
