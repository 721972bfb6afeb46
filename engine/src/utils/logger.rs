// Non-blocking Logger

/*
 * HAVERSINE BENCH - DIAGNOSTIC LOGGER
 * =================================================================
 * Component Name: engine/src/utils/logger.rs
 * Core Responsibility: تسجيل الأحداث دون تلويث قنوات المخرجات (stdout للنتائج، stderr لسطر التشخيص).
 * Design Pattern: Async Appender / Layered Subscriber
 * Status: HYBRID (Rolling File when configured, compact stderr otherwise)
 * =================================================================
 */

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// تهيئة نظام التسجيل العالمي.
/// يجب استدعاء هذه الدالة مرة واحدة فقط في نقطة دخول الثنائي.
/// عند وجود مجلد سجلات تعيد `WorkerGuard` الذي يجب الاحتفاظ به حياً حتى نهاية البرنامج.
pub fn init_logger(log_dir: Option<&Path>, file_name: &str, level: &str) -> Option<WorkerGuard> {
    // الفلتر: RUST_LOG يتغلب على المستوى المُعد
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log_dir {
        Some(dir) => {
            // أ. ملف دوري يومي خلف كاتب غير متزامن
            let file_appender = tracing_appender::rolling::daily(dir, file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = fmt::layer()
                .with_writer(non_blocking_file)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_ansi(false)
                .compact();

            // try_init: الاختبارات قد تهيئ أكثر من مرة في نفس العملية
            let _ = tracing_subscriber::registry().with(filter).with(file_layer).try_init();

            tracing::info!(
                "LOGGER: Initialized non-blocking logging at {}/{}",
                dir.display(),
                file_name
            );
            Some(guard)
        }
        None => {
            // ب. stderr مضغوط. المستوى الافتراضي warn يبقي سطر التشخيص نظيفاً
            let stderr_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact();

            let _ = tracing_subscriber::registry().with(filter).with(stderr_layer).try_init();
            None
        }
    }
}
