/*
 * HAVERSINE BENCH - COMMAND LINE DRIVERS
 * =================================================================
 * Component Name: engine/src/app.rs
 * Core Responsibility: ربط الثنائيات الثلاثة بالمكتبة: تحليل المعاملات، تشغيل التمريرة، اختيار رمز الخروج.
 * Design Pattern: Thin Driver / Injected Writers (قابل للاختبار دون تشغيل عمليات)
 * Forensic Impact: أي فشل = رمز خروج 1 ورسالة على قناة التشخيص، ولا يُطبع سطر متوسط أبداً عند الفشل.
 * =================================================================
 */

use std::io::Write;
use std::path::Path;
use std::time::Duration;
use anyhow::Context;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use crate::error::HaversineError;
use crate::generator::record_gen::{expected_line, GeneratorContext};
use crate::hardware::{self, TimingHarness};
use crate::scanner::record_scanner::{open_input, scan_pairs, ScanSummary};
use crate::utils::config_loader::PipelineConfig;
use crate::utils::logger::init_logger;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// وضع الماسح: عادي أو محاط بحزام التوقيت
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Plain,
    Timed,
}

/// تحميل الإعدادات (مع .env) ثم تهيئة السجلات. الفشل يُطبع على stderr.
pub fn bootstrap(log_file: &str) -> Result<(PipelineConfig, Option<WorkerGuard>), u8> {
    dotenv::dotenv().ok();
    let config = match PipelineConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return Err(EXIT_FAILURE);
        }
    };
    let guard = init_logger(config.log_dir.as_deref(), log_file, &config.log_level);
    Ok((config, guard))
}

/// سطر النتيجة للماسح
pub fn mean_line(mean: f64) -> String {
    format!("Average distance between pairs: {:.16}", mean)
}

fn program_name(args: &[String], fallback: &str) -> String {
    args.first().cloned().unwrap_or_else(|| fallback.to_string())
}

/// Maps a failed run to exit status 1. Usage errors print their own message;
/// everything else prints the full context chain.
fn report_failure<E: Write>(err: anyhow::Error, diag: &mut E) -> u8 {
    match err.downcast_ref::<HaversineError>() {
        Some(usage @ HaversineError::Usage(_)) => {
            let _ = writeln!(diag, "{}", usage);
        }
        _ => {
            let _ = writeln!(diag, "Error: {:#}", err);
        }
    }
    EXIT_FAILURE
}

// =================================================================
// المولد (Generator CLI): <seed> <num_to_gen>
// =================================================================

pub fn run_generate<O: Write, E: Write>(
    args: &[String],
    config: &PipelineConfig,
    out: &mut O,
    diag: &mut E,
) -> u8 {
    match generate(args, config, out, diag) {
        Ok(()) => EXIT_OK,
        Err(e) => report_failure(e, diag),
    }
}

/// Accepts any signed 64-bit seed, plus unsigned seeds above `i64::MAX`.
/// Negative seeds map onto the RNG seed by two's complement, so `-1` and
/// `18446744073709551615` select the same stream.
pub fn parse_seed(text: &str) -> Option<u64> {
    text.parse::<i64>()
        .map(|seed| seed as u64)
        .or_else(|_| text.parse::<u64>())
        .ok()
}

fn generate<O: Write, E: Write>(
    args: &[String],
    config: &PipelineConfig,
    out: &mut O,
    diag: &mut E,
) -> anyhow::Result<()> {
    let prog = program_name(args, "haversine_gen");
    let usage = format!("{} <seed> <num_to_gen>", prog);
    if args.len() < 3 {
        return Err(HaversineError::Usage(usage).into());
    }

    let seed = parse_seed(&args[1]).ok_or_else(|| {
        HaversineError::Usage(format!("{} (seed must be an integer, got {:?})", usage, args[1]))
    })?;
    let count: u64 = args[2].parse().map_err(|_| {
        HaversineError::Usage(format!(
            "{} (count must be an unsigned integer, got {:?})",
            usage, args[2]
        ))
    })?;

    let mut ctx = GeneratorContext::new(seed, config).context("building cluster model")?;
    let summary = ctx
        .write_pairs(count, out)
        .with_context(|| format!("writing {} pairs for seed {}", count, args[1]))?;

    writeln!(diag, "{}", expected_line(&summary))?;
    Ok(())
}

// =================================================================
// الماسح (Scanner CLI): <filename.json>
// =================================================================

pub fn run_scan<O: Write, E: Write>(
    args: &[String],
    config: &PipelineConfig,
    mode: ScanMode,
    out: &mut O,
    diag: &mut E,
) -> u8 {
    match scan(args, config, mode, out) {
        Ok(()) => EXIT_OK,
        Err(e) => report_failure(e, diag),
    }
}

fn scan<O: Write>(
    args: &[String],
    config: &PipelineConfig,
    mode: ScanMode,
    out: &mut O,
) -> anyhow::Result<()> {
    let prog = program_name(args, "haversine_scan");
    if args.len() < 2 {
        return Err(HaversineError::Usage(format!("{} <filename.json>", prog)).into());
    }
    let path = Path::new(&args[1]);

    // الفتح قبل المعايرة: الملف المفقود يفشل فوراً
    let reader = open_input(path)?;

    let harness = match mode {
        ScanMode::Plain => None,
        ScanMode::Timed => {
            if let Some(core) = config.pin_core {
                match hardware::pin_to_core(core) {
                    Ok(()) => info!("TIMING: Thread pinned to core {}", core),
                    Err(e) => warn!("TIMING: {}. Running unpinned.", e),
                }
            }
            Some(TimingHarness::calibrate(Duration::from_millis(config.calibration_ms)))
        }
    };

    let (scanned, elapsed) = match &harness {
        Some(h) => {
            let (res, elapsed) = h.measure(|| scan_pairs(reader, config.earth_radius));
            (res, Some(elapsed))
        }
        None => (scan_pairs(reader, config.earth_radius), None),
    };
    let summary: ScanSummary =
        scanned.with_context(|| format!("scanning {}", path.display()))?;

    // لا متوسط بدون سجلات: EmptyAggregate يصعد كخطأ
    let mean = summary.mean().with_context(|| format!("aggregating {}", path.display()))?;
    writeln!(out, "{}", mean_line(mean))?;

    if let Some(elapsed) = elapsed {
        writeln!(out, "{}", elapsed)?;
        if let Some(secs) = elapsed.seconds().filter(|s| *s > 0.0) {
            info!(
                "TIMING: {:.3} MB/s over {} bytes",
                summary.bytes_consumed as f64 / secs / (1024.0 * 1024.0),
                summary.bytes_consumed
            );
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run_gen(list: &[&str]) -> (u8, Vec<u8>, String) {
        let mut out = Vec::new();
        let mut diag = Vec::new();
        let code = run_generate(&args(list), &PipelineConfig::default(), &mut out, &mut diag);
        (code, out, String::from_utf8(diag).unwrap())
    }

    #[test]
    fn test_generate_usage_on_missing_args() {
        let (code, out, diag) = run_gen(&["gen", "1"]);
        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert_eq!(diag, "Usage: gen <seed> <num_to_gen>\n");
    }

    #[test]
    fn test_seed_accepts_signed_and_wide_unsigned() {
        assert_eq!(parse_seed("42"), Some(42));
        assert_eq!(parse_seed("-1"), Some(u64::MAX));
        assert_eq!(parse_seed("18446744073709551615"), Some(u64::MAX));
        assert_eq!(parse_seed("-9223372036854775808"), Some(1 << 63));
        assert_eq!(parse_seed("abc"), None);
        assert_eq!(parse_seed("1.5"), None);
    }

    #[test]
    fn test_negative_seed_generates_and_scans() {
        let (code, out, diag) = run_gen(&["gen", "-7", "25"]);
        assert_eq!(code, EXIT_OK, "diag: {}", diag);
        assert!(diag.starts_with("Expected sum: "));

        let expected: f64 = diag.trim().rsplit(' ').next().unwrap().parse().unwrap();
        let summary = scan_pairs(&out[..], PipelineConfig::default().earth_radius).unwrap();
        assert_eq!(summary.pairs(), 25);
        let rel = ((summary.mean().unwrap() - expected) / expected).abs();
        assert!(rel < 1e-9, "rel {}", rel);

        // -1 و u64::MAX نفس البذرة
        let (_, a, _) = run_gen(&["gen", "-1", "5"]);
        let (_, b, _) = run_gen(&["gen", "18446744073709551615", "5"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_negative_count_is_usage_error() {
        let (code, out, diag) = run_gen(&["gen", "1", "-3"]);
        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert!(diag.starts_with("Usage: gen <seed> <num_to_gen> (count"));
    }

    #[test]
    fn test_scan_usage_on_missing_path() {
        let mut out = Vec::new();
        let mut diag = Vec::new();
        let config = PipelineConfig::default();
        let code = run_scan(&args(&["scan"]), &config, ScanMode::Plain, &mut out, &mut diag);
        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert!(String::from_utf8(diag).unwrap().starts_with("Usage: scan <filename.json>"));
    }

    #[test]
    fn test_timed_missing_file_fails_before_calibration() {
        // معايرة طويلة عمداً: لو سبقت الفتح لتجاوزنا الحد بكثير
        let config = PipelineConfig { calibration_ms: 5_000, ..PipelineConfig::default() };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json").to_string_lossy().into_owned();

        let mut out = Vec::new();
        let mut diag = Vec::new();
        let started = Instant::now();
        let code = run_scan(&args(&["scan", &path]), &config, ScanMode::Timed, &mut out, &mut diag);

        assert_eq!(code, EXIT_FAILURE);
        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(out.is_empty());
        assert!(String::from_utf8(diag).unwrap().contains("Could not open file"));
    }

    #[test]
    fn test_mean_line_format() {
        assert_eq!(mean_line(1.25), "Average distance between pairs: 1.2500000000000000");
    }
}
