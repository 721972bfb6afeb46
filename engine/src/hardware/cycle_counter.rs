// Free-running Counters

/*
 * HAVERSINE BENCH - HARDWARE & OS TIMER SOURCES
 * =================================================================
 * Component Name: engine/src/hardware/cycle_counter.rs
 * Core Responsibility: قراءة عداد الدورات الحر في المعالج، وقراءة مؤقت نظام التشغيل كمرجع للساعة الجدارية.
 * Design Pattern: Hardware Intrinsic Wrapper / Compile-time Dispatch
 * Forensic Impact: rdtsc على x86_64، و cntvct_el0 على aarch64، وإلا نعود لمؤقت النظام نفسه (دقة أقل).
 * =================================================================
 */

use std::sync::OnceLock;
use std::time::Instant;

/// تردد مؤقت نظام التشغيل: نانوثانية
pub const OS_TIMER_FREQ: u64 = 1_000_000_000;

static OS_TIMER_ANCHOR: OnceLock<Instant> = OnceLock::new();

/// Monotonic OS timer in ticks of `OS_TIMER_FREQ`, anchored at first use.
#[inline]
pub fn read_os_timer() -> u64 {
    let anchor = OS_TIMER_ANCHOR.get_or_init(Instant::now);
    anchor.elapsed().as_nanos() as u64
}

/// قراءة عداد الدورات الحر في المعالج
#[inline(always)]
pub fn read_cpu_timer() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        // SAFETY: rdtsc متاح على كل معالجات x86_64 ولا يلمس الذاكرة
        unsafe { std::arch::x86_64::_rdtsc() }
    }

    #[cfg(target_arch = "aarch64")]
    {
        let ticks: u64;
        // SAFETY: قراءة سجل العداد الافتراضي مسموحة من مساحة المستخدم على Linux و macOS
        unsafe {
            std::arch::asm!("mrs {}, cntvct_el0", out(reg) ticks, options(nomem, nostack));
        }
        ticks
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        read_os_timer()
    }
}

/// اسم مصدر العداد (للسجلات)
pub fn cpu_timer_source() -> &'static str {
    if cfg!(target_arch = "x86_64") {
        "rdtsc"
    } else if cfg!(target_arch = "aarch64") {
        "cntvct_el0"
    } else {
        "os-timer"
    }
}
