/*
 * HAVERSINE BENCH - FULL PIPELINE INTEGRATION TEST
 * =================================================================
 * Component Name: engine/tests/pipeline_test.rs
 * Core Responsibility: التحقق من أن المولد والماسح يتفقان على المتوسط (End-to-End Flow).
 * Design Pattern: Black Box Testing
 * Forensic Impact: إذا اختلف المتوسط المرصود عن المتوقع، فإن الماسح (المكون قيد الاختبار) قد أسقط أو أفسد سجلاً.
 * =================================================================
 */

use std::io::Write;
use haversine_engine::app::{self, ScanMode, EXIT_FAILURE, EXIT_OK};
use haversine_engine::generator::GeneratorContext;
use haversine_engine::scanner::{scan_file, scan_pairs};
use haversine_engine::PipelineConfig;

// =================================================================
// أدوات المساعدة للاختبار (Test Helpers)
// =================================================================

fn generate(seed: u64, count: u64) -> (Vec<u8>, Option<f64>) {
    let config = PipelineConfig::default();
    let mut ctx = GeneratorContext::new(seed, &config).unwrap();
    let mut buf = Vec::new();
    let summary = ctx.write_pairs(count, &mut buf).unwrap();
    (buf, summary.expected().ok())
}

fn assert_close(observed: f64, expected: f64) {
    let rel = ((observed - expected) / expected).abs();
    assert!(rel < 1e-9, "observed {observed} vs expected {expected} (rel {rel})");
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// قيمة الرقم بعد ": " في سطر مثل "Expected sum: 123.4"
fn trailing_number(line: &str) -> f64 {
    line.rsplit(' ').next().unwrap().trim().parse().unwrap()
}

// =================================================================
// سيناريوهات الاختبار (Test Scenarios)
// =================================================================

#[test]
fn test_round_trip_matches_expected_mean() {
    for (seed, count) in [(1u64, 1u64), (2, 10), (1234, 1000), (u64::MAX, 257)] {
        let (bytes, expected) = generate(seed, count);
        let summary = scan_pairs(&bytes[..], haversine_engine::EARTH_RADIUS).unwrap();

        assert_eq!(summary.pairs(), count, "seed {seed}");
        assert_close(summary.mean().unwrap(), expected.unwrap());
    }
}

#[test]
fn test_file_scan_matches_in_memory_scan() {
    let (bytes, expected) = generate(-42i64 as u64, 500);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();

    let from_file = scan_file(file.path(), haversine_engine::EARTH_RADIUS).unwrap();
    let in_memory = scan_pairs(&bytes[..], haversine_engine::EARTH_RADIUS).unwrap();

    assert_eq!(from_file.pairs(), 500);
    assert_eq!(from_file.bytes_consumed, in_memory.bytes_consumed);
    assert_eq!(from_file.mean().unwrap(), in_memory.mean().unwrap());
    assert_close(from_file.mean().unwrap(), expected.unwrap());
}

#[test]
fn test_negative_seed_through_cli_round_trip() {
    let config = PipelineConfig::default();
    let mut out = Vec::new();
    let mut diag = Vec::new();
    let code = app::run_generate(&args(&["gen", "-1", "3"]), &config, &mut out, &mut diag);
    assert_eq!(code, EXIT_OK, "diag: {}", String::from_utf8_lossy(&diag));

    let diag = String::from_utf8(diag).unwrap();
    let expected = trailing_number(diag.lines().next().unwrap());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&out).unwrap();
    let path_str = file.path().to_string_lossy().into_owned();

    let mut scan_out = Vec::new();
    let mut scan_diag = Vec::new();
    let code = app::run_scan(
        &args(&["scan", &path_str]),
        &config,
        ScanMode::Plain,
        &mut scan_out,
        &mut scan_diag,
    );
    assert_eq!(code, EXIT_OK);
    let line = String::from_utf8(scan_out).unwrap();
    assert_close(trailing_number(line.trim_end()), expected);
}

#[test]
fn test_generated_output_is_valid_json_with_exact_fields() {
    // مُحلل مستقل تماماً عن الماسح
    let (bytes, _) = generate(77, 200);
    let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    let pairs = doc["pairs"].as_array().expect("pairs array");
    assert_eq!(pairs.len(), 200);

    for pair in pairs {
        let obj = pair.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        for key in ["x0", "y0", "x1", "y1"] {
            let v = obj[key].as_f64().unwrap_or_else(|| panic!("{key} missing or not numeric"));
            assert!((-180.0..180.0).contains(&v), "{key} = {v} out of range");
        }
    }
}

#[test]
fn test_seed_one_count_three_scenario() {
    let config = PipelineConfig::default();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pairs.json");

    // 1. التوليد عبر نفس مسار الثنائي
    let mut out = Vec::new();
    let mut diag = Vec::new();
    let code = app::run_generate(&args(&["gen", "1", "3"]), &config, &mut out, &mut diag);
    assert_eq!(code, EXIT_OK);
    std::fs::File::create(&path).unwrap().write_all(&out).unwrap();

    let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(doc["pairs"].as_array().unwrap().len(), 3);

    let diag = String::from_utf8(diag).unwrap();
    let diag_lines: Vec<&str> = diag.lines().collect();
    assert_eq!(diag_lines.len(), 1);
    assert!(diag_lines[0].starts_with("Expected sum: "));
    let expected = trailing_number(diag_lines[0]);

    // 2. المسح
    let mut out = Vec::new();
    let mut diag = Vec::new();
    let path_str = path.to_string_lossy().into_owned();
    let code = app::run_scan(
        &args(&["scan", &path_str]),
        &config,
        ScanMode::Plain,
        &mut out,
        &mut diag,
    );
    assert_eq!(code, EXIT_OK, "diag: {}", String::from_utf8_lossy(&diag));

    let out = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Average distance between pairs: "));
    assert_close(trailing_number(lines[0]), expected);
}

#[test]
fn test_timed_scan_prints_elapsed_line() {
    let config = PipelineConfig { calibration_ms: 5, ..PipelineConfig::default() };
    let (bytes, expected) = generate(9, 50);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();
    let path_str = file.path().to_string_lossy().into_owned();

    let mut out = Vec::new();
    let mut diag = Vec::new();
    let code = app::run_scan(
        &args(&["scan", &path_str]),
        &config,
        ScanMode::Timed,
        &mut out,
        &mut diag,
    );
    assert_eq!(code, EXIT_OK);

    let out = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_close(trailing_number(lines[0]), expected.unwrap());
    assert!(lines[1].starts_with("Elapsed: "), "second line: {}", lines[1]);
    assert!(lines[1].contains("Hz"));
}

#[test]
fn test_zero_record_generation_and_scan() {
    let config = PipelineConfig::default();

    let mut out = Vec::new();
    let mut diag = Vec::new();
    let code = app::run_generate(&args(&["gen", "5", "0"]), &config, &mut out, &mut diag);
    assert_eq!(code, EXIT_OK);
    assert_eq!(String::from_utf8(diag).unwrap(), "Expected sum: undefined (0 pairs)\n");

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&out).unwrap();
    let path_str = file.path().to_string_lossy().into_owned();

    // صفر سجلات: رمز خروج 1، ولا سطر متوسط
    let mut out = Vec::new();
    let mut diag = Vec::new();
    let code = app::run_scan(
        &args(&["scan", &path_str]),
        &config,
        ScanMode::Plain,
        &mut out,
        &mut diag,
    );
    assert_eq!(code, EXIT_FAILURE);
    assert!(out.is_empty());
    assert!(String::from_utf8(diag).unwrap().contains("Undefined record count"));
}

#[test]
fn test_custom_radius_flows_through_both_sides() {
    let config = PipelineConfig { earth_radius: 1.0, ..PipelineConfig::default() };
    let mut ctx = GeneratorContext::new(3, &config).unwrap();
    let mut buf = Vec::new();
    let summary = ctx.write_pairs(100, &mut buf).unwrap();

    let scanned = scan_pairs(&buf[..], config.earth_radius).unwrap();
    assert_close(scanned.mean().unwrap(), summary.expected().unwrap());
    // نصف القطر 1 => المسافة لا تتجاوز π
    assert!(scanned.mean().unwrap() <= std::f64::consts::PI);
}
