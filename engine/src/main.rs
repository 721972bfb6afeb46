/*
 * HAVERSINE BENCH - SCANNER ENTRY POINT
 * =================================================================
 * Component: engine/src/main.rs
 * Responsibility: قراءة ملف مصفوفة السجلات وطباعة متوسط مسافة هافرساين.
 * Usage: haversine_scan <filename.json>
 * =================================================================
 */

use std::io::{self, BufWriter};
use std::process::ExitCode;

use haversine_engine::app::{self, ScanMode};

fn main() -> ExitCode {
    // أ. الإعدادات والصندوق الأسود (Config + Logging)
    let (config, _guard) = match app::bootstrap("haversine_scan.log") {
        Ok(boot) => boot,
        Err(code) => return ExitCode::from(code),
    };

    let args: Vec<String> = std::env::args_os().map(|a| a.to_string_lossy().into_owned()).collect();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut diag = io::stderr().lock();

    ExitCode::from(app::run_scan(&args, &config, ScanMode::Plain, &mut out, &mut diag))
}
