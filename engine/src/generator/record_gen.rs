// Workload Producer

/*
 * HAVERSINE BENCH - RECORD GENERATOR
 * =================================================================
 * Component Name: engine/src/generator/record_gen.rs
 * Core Responsibility: إنتاج N زوج نقاط وكتابتها كمصفوفة سجلات، مع حساب المتوسط المتوقع (Workload Pillar).
 * Design Pattern: Explicit Generator Context (no ambient RNG state)
 * Forensic Impact: القيمة المتوقعة تُحسب من نفس القيم المكتوبة على السلك، لذا أي اختلاف لاحق
 *                  في الماسح هو خطأ في الماسح وليس في المولد.
 * =================================================================
 */

use std::io::Write;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use crate::error::HaversineResult;
use crate::geo::haversine::pair_distance;
use crate::models::aggregate::DistanceAggregate;
use crate::models::point::PointPair;
use crate::utils::config_loader::PipelineConfig;
use super::cluster::{Domain, SpatialClusterModel};

/// مفتاح المصفوفة الوحيد في الملف
pub const PAIRS_KEY: &str = "pairs";

/// ملخص تمريرة التوليد
#[derive(Debug, Clone, Copy)]
pub struct GenerationSummary {
    pub seed: u64,
    pub aggregate: DistanceAggregate,
}

impl GenerationSummary {
    /// المتوسط المتوقع (خطأ EmptyAggregate عند N = 0)
    pub fn expected(&self) -> HaversineResult<f64> {
        self.aggregate.mean()
    }
}

/// سياق المولد: البذرة، جدول العناقيد، حالة RNG وعدد السحوبات.
pub struct GeneratorContext {
    seed: u64,
    rng: StdRng,
    model: SpatialClusterModel,
    earth_radius: f64,
    draws: u64,
}

impl GeneratorContext {
    /// تهيئة سياق حتمي من البذرة والإعدادات
    pub fn new(seed: u64, config: &PipelineConfig) -> HaversineResult<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let model = SpatialClusterModel::build(
            &mut rng,
            Domain::default(),
            config.cluster_count,
            config.radius_min,
            config.radius_max,
        )?;

        debug!("GENERATOR: Built {} clusters for seed {}", model.len(), seed);

        Ok(Self {
            seed,
            rng,
            model,
            earth_radius: config.earth_radius,
            draws: 0,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// عدد الأزواج المسحوبة حتى الآن
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// سحب زوج واحد: عنقود مستقل لكل نقطة، ثم القص
    pub fn next_pair(&mut self) -> PointPair {
        let p0 = self.model.sample_clipped(&mut self.rng);
        let p1 = self.model.sample_clipped(&mut self.rng);
        self.draws += 1;
        PointPair::from_points(p0, p1)
    }

    /// كتابة `count` سجل إلى `out` بصيغة `{"pairs":[ ... ]}` وإرجاع المجمّع المتوقع.
    pub fn write_pairs<W: Write>(
        &mut self,
        count: u64,
        out: &mut W,
    ) -> HaversineResult<GenerationSummary> {
        let mut aggregate = DistanceAggregate::new();

        writeln!(out, "{{\"{}\":[", PAIRS_KEY)?;
        for i in 0..count {
            let pair = self.next_pair();
            aggregate.push(pair_distance(&pair, self.earth_radius));

            write!(out, "{}", pair)?;
            if i + 1 != count {
                out.write_all(b",")?;
            }
            out.write_all(b"\n")?;
        }
        writeln!(out, "]}}")?;
        out.flush()?;

        info!(
            "GENERATOR: Wrote {} pairs (seed={}, clusters={})",
            aggregate.count(),
            self.seed,
            self.model.len()
        );

        Ok(GenerationSummary { seed: self.seed, aggregate })
    }
}

/// سطر التشخيص: `Expected sum: <mean>` أو صيغة العدد غير المعرّف عند N = 0
pub fn expected_line(summary: &GenerationSummary) -> String {
    match summary.expected() {
        Ok(mean) => format!("Expected sum: {:.16}", mean),
        Err(_) => format!("Expected sum: undefined ({} pairs)", summary.aggregate.count()),
    }
}
