// Running Mean

/*
 * HAVERSINE BENCH - DISTANCE AGGREGATE
 * =================================================================
 * Component Name: engine/src/models/aggregate.rs
 * Core Responsibility: مجموع جارٍ وعدّاد لحساب متوسط المسافة عبر تمريرة واحدة.
 * Design Pattern: Accumulator
 * Forensic Impact: يوجد منه نسختان مستقلتان (متوقعة من المولد، ومرصودة من الماسح).
 *                  تطابقهما هو شرط صحة خط الأنابيب بالكامل.
 * =================================================================
 */

use crate::error::{HaversineError, HaversineResult};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DistanceAggregate {
    sum: f64,
    count: u64,
}

impl DistanceAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// إضافة مسافة سجل واحد (مرة واحدة فقط لكل سجل مفكوك بنجاح)
    #[inline]
    pub fn push(&mut self, distance: f64) {
        self.sum += distance;
        self.count += 1;
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// المتوسط النهائي. صفر سجلات = عدد غير معرّف، وليس NaN.
    pub fn mean(&self) -> HaversineResult<f64> {
        if self.is_empty() {
            return Err(HaversineError::EmptyAggregate);
        }
        Ok(self.sum / self.count as f64)
    }
}
