//! Build script for zenertest-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates tester.toml and emits it as a `const TesterConfig`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use zenertest_core::config::TesterConfig;

/// Sections tester.toml may contain
const KNOWN_SECTIONS: &[&str] = &["front_end", "thresholds", "scan", "ui"];

fn main() {
    setup_linker();
    let config = load_config();
    emit_config(&config);
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse and validate tester.toml
fn load_config() -> TesterConfig {
    // Re-run if tester.toml changes
    println!("cargo:rerun-if-changed=tester.toml");

    let config_path = Path::new("tester.toml");

    if !config_path.exists() {
        fail(
            "tester.toml not found!",
            &["The firmware requires a tester.toml configuration file".to_string()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read tester.toml", &[e.to_string()]),
    };

    // Syntax and section names first, for readable errors
    let value: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in tester.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    if let Some(table) = value.as_table() {
        let unknown: Vec<String> = table
            .keys()
            .filter(|k| !KNOWN_SECTIONS.contains(&k.as_str()))
            .map(|k| format!("Unknown section [{}]", k))
            .collect();
        if !unknown.is_empty() {
            fail("Invalid tester.toml", &unknown);
        }
    }

    let config: TesterConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => fail(
            "Invalid values in tester.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    if let Err(e) = config.validate() {
        fail("Invalid tester configuration", &[e.to_string()]);
    }

    if config.front_end.adc_max != 4095 {
        println!(
            "cargo:warning=front_end.adc_max = {} but the RP2040 ADC is 12-bit (4095)",
            config.front_end.adc_max
        );
    }

    println!("cargo:warning=tester.toml validated successfully");
    config
}

/// Write `TESTER_CONFIG` into OUT_DIR for `include!`
fn emit_config(config: &TesterConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let fe = &config.front_end;
    let th = &config.thresholds;
    let scan = &config.scan;
    let ui = &config.ui;

    let source = format!(
        "/// Configuration fixed at build time from tester.toml\n\
         pub const TESTER_CONFIG: TesterConfig = TesterConfig {{\n\
         \x20   front_end: FrontEndConfig {{ full_scale_uv: {}, adc_max: {} }},\n\
         \x20   thresholds: ThresholdConfig {{ open_dv: {}, short_dv: {} }},\n\
         \x20   scan: ScanTiming {{\n\
         \x20       settle_ms: {},\n\
         \x20       inter_sample_us: {},\n\
         \x20       acquisition_ms: {},\n\
         \x20       smoothing_passes: {},\n\
         \x20       conversion_poll_us: {},\n\
         \x20       conversion_poll_limit: {},\n\
         \x20   }},\n\
         \x20   ui: UiTiming {{ startup_ms: {}, poll_interval_ms: {} }},\n\
         }};\n",
        fe.full_scale_uv,
        fe.adc_max,
        th.open_dv,
        th.short_dv,
        scan.settle_ms,
        scan.inter_sample_us,
        scan.acquisition_ms,
        scan.smoothing_passes,
        scan.conversion_poll_us,
        scan.conversion_poll_limit,
        ui.startup_ms,
        ui.poll_interval_ms,
    );

    fs::write(out_dir.join("tester_config.rs"), source).expect("write tester_config.rs");
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(lines)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
