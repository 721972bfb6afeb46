/*
 * HAVERSINE BENCH - INSTRUMENTED SCANNER ENTRY POINT
 * =================================================================
 * Component: engine/src/bin/haversine_scan_timed.rs
 * Responsibility: نفس الماسح، محاطاً بعداد الدورات بعد معايرته ضد مؤقت النظام.
 * Usage: haversine_scan_timed <filename.json>
 * =================================================================
 */

use std::io::{self, BufWriter};
use std::process::ExitCode;

use haversine_engine::app::{self, ScanMode};

fn main() -> ExitCode {
    let (config, _guard) = match app::bootstrap("haversine_scan_timed.log") {
        Ok(boot) => boot,
        Err(code) => return ExitCode::from(code),
    };

    let args: Vec<String> = std::env::args_os().map(|a| a.to_string_lossy().into_owned()).collect();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut diag = io::stderr().lock();

    ExitCode::from(app::run_scan(&args, &config, ScanMode::Timed, &mut out, &mut diag))
}
