// Cycle Timing Harness

/*
 * HAVERSINE BENCH - CPU FREQUENCY CALIBRATION & TIMING HARNESS
 * =================================================================
 * Component Name: engine/src/hardware/timing.rs
 * Core Responsibility: معايرة تردد عداد الدورات بسباقه ضد مؤقت النظام لمدة ثابتة، ثم تحويل الدورات المنقضية إلى ثوانٍ.
 * Design Pattern: Busy-Wait Calibration / Bracketed Measurement
 * Forensic Impact: أداة قياس بأفضل جهد وليست ضماناً زمنياً. التردد الصفري يعني "غير متاح"، لا قسمة على صفر.
 * =================================================================
 */

use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};
use super::cycle_counter::{cpu_timer_source, read_cpu_timer, read_os_timer, OS_TIMER_FREQ};

// =================================================================
// نتيجة المعايرة (Calibration Result)
// =================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuCalibration {
    /// التردد المقدَّر بالهرتز (صفر = غير متاح)
    pub freq_hz: u64,
    pub cpu_ticks: u64,
    pub os_ticks: u64,
}

impl CpuCalibration {
    /// freq = os_freq * cpu_elapsed / os_elapsed, or 0 when no wall time elapsed.
    pub fn from_deltas(cpu_ticks: u64, os_ticks: u64) -> Self {
        let freq_hz = if os_ticks == 0 {
            0
        } else {
            ((OS_TIMER_FREQ as u128 * cpu_ticks as u128) / os_ticks as u128) as u64
        };
        Self { freq_hz, cpu_ticks, os_ticks }
    }

    pub fn is_available(&self) -> bool {
        self.freq_hz != 0
    }
}

/// Races the CPU counter against the OS timer for `wait`.
///
/// The loop is a plain busy-poll on the monotonic OS timer and exits as soon
/// as at least `wait` of wall time has elapsed, so it is bounded by `wait`
/// plus one OS timer read.
pub fn estimate_cpu_frequency(wait: Duration) -> CpuCalibration {
    let os_wait = (wait.as_nanos() as u128 * OS_TIMER_FREQ as u128 / 1_000_000_000) as u64;

    let cpu_start = read_cpu_timer();
    let os_start = read_os_timer();
    let mut os_elapsed = 0u64;
    while os_elapsed < os_wait {
        let os_end = read_os_timer();
        os_elapsed = os_end.saturating_sub(os_start);
    }
    let cpu_end = read_cpu_timer();

    let calibration = CpuCalibration::from_deltas(cpu_end.wrapping_sub(cpu_start), os_elapsed);
    debug!(
        "CALIBRATION: source={} cpu_ticks={} os_ticks={} freq={} Hz",
        cpu_timer_source(),
        calibration.cpu_ticks,
        calibration.os_ticks,
        calibration.freq_hz
    );
    calibration
}

// =================================================================
// الزمن المنقضي (Elapsed Measurement)
// =================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    pub ticks: u64,
    pub freq_hz: u64,
}

impl Elapsed {
    /// الثواني المنقضية، أو None إذا كان التردد غير معروف
    pub fn seconds(&self) -> Option<f64> {
        if self.freq_hz == 0 {
            None
        } else {
            Some(self.ticks as f64 / self.freq_hz as f64)
        }
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.seconds() {
            Some(secs) => write!(
                f,
                "Elapsed: {:.6}s ({} ticks @ {} Hz)",
                secs, self.ticks, self.freq_hz
            ),
            None => write!(f, "Elapsed: unavailable ({} ticks @ 0 Hz)", self.ticks),
        }
    }
}

// =================================================================
// حزام التوقيت (Timing Harness)
// =================================================================

/// يعاير مرة واحدة عند الإنشاء، ثم يقيس أي عملية محاطة به.
pub struct TimingHarness {
    calibration: CpuCalibration,
}

impl TimingHarness {
    pub fn calibrate(wait: Duration) -> Self {
        let calibration = estimate_cpu_frequency(wait);

        if calibration.is_available() {
            info!(
                "TIMING: Calibrated {} at {:.3} GHz over {} ms",
                cpu_timer_source(),
                calibration.freq_hz as f64 / 1e9,
                wait.as_millis()
            );
        } else {
            warn!("TIMING: Calibration produced zero frequency. Elapsed seconds unavailable.");
        }

        // مقارنة جنائية مع ما يبلغ عنه النظام (قد لا يطابق عداداً ثابت التردد)
        match sys_info::cpu_speed() {
            Ok(mhz) => info!("TIMING: OS-reported CPU speed {} MHz", mhz),
            Err(e) => debug!("TIMING: OS CPU speed unavailable: {}", e),
        }

        Self { calibration }
    }

    pub fn from_calibration(calibration: CpuCalibration) -> Self {
        Self { calibration }
    }

    /// تنفيذ `op` بين قراءتين للعداد
    pub fn measure<T>(&self, op: impl FnOnce() -> T) -> (T, Elapsed) {
        let start = read_cpu_timer();
        let out = op();
        let end = read_cpu_timer();
        let elapsed = Elapsed { ticks: end.wrapping_sub(start), freq_hz: self.calibration.freq_hz };
        (out, elapsed)
    }
}
