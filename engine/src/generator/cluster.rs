// Spatial Clusters

/*
 * HAVERSINE BENCH - SPATIAL CLUSTER MODEL
 * =================================================================
 * Component Name: engine/src/generator/cluster.rs
 * Core Responsibility: توليد مناطق دائرية ثابتة (عناقيد) وسحب نقاط مترابطة مكانياً منها.
 * Design Pattern: Immutable Lookup Table + Explicit RNG Context
 * Forensic Impact: نفس البذرة = نفس العناقيد = نفس الملف بايت ببايت. هذا ما يجعل عبء العمل قابلاً للتكرار.
 * =================================================================
 */

use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use crate::error::{HaversineError, HaversineResult};
use crate::models::point::Point;

/// حدود المجال الخام قبل إعادة التمركز
pub const DOMAIN_MIN: f64 = 0.0;
pub const DOMAIN_MAX: f64 = 360.0;

// =================================================================
// المجال والمقص (Domain & Clip)
// =================================================================

/// المجال نصف المفتوح [min, max) الذي تُسحب منه مراكز العناقيد.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Default for Domain {
    fn default() -> Self {
        Self { min: DOMAIN_MIN, max: DOMAIN_MAX }
    }
}

impl Domain {
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// نقطة المنتصف التي تُطرح لإعادة التمركز (180 للمجال الافتراضي)
    pub fn center(&self) -> f64 {
        self.min + self.width() / 2.0
    }

    /// Folds `n` back into `[min, max)` by at most one domain width in each
    /// direction. Inputs displaced by more than one width are not brought
    /// into range; cluster radii are validated to stay below the width.
    #[inline]
    pub fn wrap(&self, n: f64) -> f64 {
        let mut n = n;
        if n < self.min {
            n += self.width();
        }
        // يلتقط أيضاً حالة التقريب: -1e-17 + 360 == 360
        if n >= self.max {
            n -= self.width();
        }
        n
    }

    /// المقص الكامل: طيّ مرة واحدة ثم إعادة التمركز إلى [-180, 180)
    #[inline]
    pub fn clip(&self, n: f64) -> f64 {
        self.wrap(n) - self.center()
    }

    /// هل القيمة المقصوصة داخل المجال المُعاد تمركزه؟
    pub fn contains_clipped(&self, v: f64) -> bool {
        let half = self.width() / 2.0;
        v >= -half && v < half
    }
}

// =================================================================
// العنقود (Cluster)
// =================================================================

/// منطقة دائرية: مركز + نصف قطر ثابت يحدد توزيع الإزاحة [-r, r] على كل محور.
#[derive(Debug, Clone, Copy)]
pub struct Cluster {
    pub center: Point,
    pub radius: f64,
    offset: Uniform<f64>,
}

impl Cluster {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            offset: Uniform::new_inclusive(-radius, radius),
        }
    }

    /// سحب نقطة خام (قبل القص): المركز + إزاحة مستقلة لكل محور
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let x = self.center.x + self.offset.sample(rng);
        let y = self.center.y + self.offset.sample(rng);
        Point::new(x, y)
    }
}

// =================================================================
// نموذج العناقيد (Cluster Model)
// =================================================================

/// جدول العناقيد. يُبنى مرة واحدة لكل تمريرة ثم يُقرأ فقط.
#[derive(Debug, Clone)]
pub struct SpatialClusterModel {
    domain: Domain,
    clusters: Vec<Cluster>,
}

impl SpatialClusterModel {
    /// بناء `count` عنقود: المراكز منتظمة على [min, max) لكل محور، ونصف القطر منتظم على [radius_min, radius_max).
    pub fn build<R: Rng + ?Sized>(
        rng: &mut R,
        domain: Domain,
        count: usize,
        radius_min: f64,
        radius_max: f64,
    ) -> HaversineResult<Self> {
        if count == 0 {
            return Err(HaversineError::Config("cluster count must be at least 1".into()));
        }
        if !(radius_min > 0.0 && radius_min < radius_max) {
            return Err(HaversineError::Config(format!(
                "invalid cluster radius range [{}, {})",
                radius_min, radius_max
            )));
        }

        let center_dist = Uniform::new(domain.min, domain.max);
        let radius_dist = Uniform::new(radius_min, radius_max);

        let clusters = (0..count)
            .map(|_| {
                let cx = center_dist.sample(rng);
                let cy = center_dist.sample(rng);
                let r = radius_dist.sample(rng);
                Cluster::new(Point::new(cx, cy), r)
            })
            .collect();

        Ok(Self { domain, clusters })
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub(crate) fn len(&self) -> usize {
        self.clusters.len()
    }

    /// اختيار عنقود بشكل منتظم ثم سحب نقطة منه وقصها إلى المجال المُعاد تمركزه
    pub fn sample_clipped<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let idx = rng.gen_range(0..self.clusters.len());
        let raw = self.clusters[idx].sample(rng);
        Point::new(self.domain.clip(raw.x), self.domain.clip(raw.y))
    }
}
