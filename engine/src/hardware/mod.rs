// HAVERSINE BENCH - HARDWARE INSTRUMENTATION
// Status: FINAL PRODUCTION

pub mod cycle_counter;
pub mod timing;

pub use cycle_counter::{read_cpu_timer, read_os_timer, OS_TIMER_FREQ};
pub use timing::{estimate_cpu_frequency, CpuCalibration, Elapsed, TimingHarness};

use crate::error::{HaversineError, HaversineResult};

/// تثبيت الخيط الحالي على نواة معينة حتى لا ينتقل بين أنوية بعدادات مختلفة أثناء القياس
pub fn pin_to_core(core_id: usize) -> HaversineResult<()> {
    // 1. الحصول على الأنوية المتاحة
    let core_ids = core_affinity::get_core_ids()
        .ok_or_else(|| HaversineError::Config("Failed to retrieve processor cores".to_string()))?;

    // 2. التحقق من وجود النواة المطلوبة
    let core = core_ids.get(core_id).copied().ok_or_else(|| {
        HaversineError::Config(format!(
            "Core {} is not available. System has {} cores.",
            core_id,
            core_ids.len()
        ))
    })?;

    // 3. تثبيت الخيط
    if core_affinity::set_for_current(core) {
        Ok(())
    } else {
        Err(HaversineError::Config(format!("OS refused to pin thread to Core {}", core_id)))
    }
}
