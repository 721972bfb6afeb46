/*
 * HAVERSINE BENCH - GENERATOR ENTRY POINT
 * =================================================================
 * Component: engine/src/bin/haversine_gen.rs
 * Responsibility: توليد N زوج نقاط من عناقيد مكانية إلى stdout، والمتوسط المتوقع إلى stderr.
 * Usage: haversine_gen <seed> <num_to_gen> > pairs.json
 * =================================================================
 */

use std::io::{self, BufWriter};
use std::process::ExitCode;

use haversine_engine::app;

fn main() -> ExitCode {
    let (config, _guard) = match app::bootstrap("haversine_gen.log") {
        Ok(boot) => boot,
        Err(code) => return ExitCode::from(code),
    };

    let args: Vec<String> = std::env::args_os().map(|a| a.to_string_lossy().into_owned()).collect();

    // المصفوفة كبيرة: كاتب مخزّن على stdout
    let stdout = io::stdout();
    let mut out = BufWriter::with_capacity(1 << 20, stdout.lock());
    let mut diag = io::stderr().lock();

    ExitCode::from(app::run_generate(&args, &config, &mut out, &mut diag))
}
