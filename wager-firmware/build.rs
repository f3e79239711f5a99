//! Build script for wager-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates prop.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

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

/// Keys accepted in each section, with their expected type
const INTEGER: &str = "integer";
const BOOLEAN: &str = "boolean";

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    ("input", &[("long_press_iterations", INTEGER)]),
    (
        "homing",
        &[
            ("travel_steps", INTEGER),
            ("max_speed", INTEGER),
            ("acceleration", INTEGER),
            ("home_offset", INTEGER),
            ("timeout_ms", INTEGER),
            ("attempts", INTEGER),
            ("limit_active_high", BOOLEAN),
        ],
    ),
    (
        "actuator",
        &[
            ("max_speed", INTEGER),
            ("acceleration", INTEGER),
            ("standby_position", INTEGER),
            ("bet_position", INTEGER),
        ],
    ),
    (
        "lights",
        &[("frame_interval_ticks", INTEGER), ("dot_spacing", INTEGER)],
    ),
];

const STRIP_KEYS: &[(&str, &str)] = &[("pin", INTEGER), ("len", INTEGER)];

/// Validate prop.toml configuration at compile time
fn validate_config() {
    // Re-run if prop.toml changes
    println!("cargo:rerun-if-changed=prop.toml");

    let config_path = Path::new("prop.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: prop.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds prop.toml as its calibration file.          ║\n\
            ║  Please create one in the wager-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read prop.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in prop.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_strips(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid prop.toml configuration                          ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=prop.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check a table's keys and value types
fn validate_keys(
    path: &str,
    table: &toml::Table,
    allowed: &[(&str, &str)],
    errors: &mut Vec<String>,
) {
    for (key, value) in table {
        let Some((_, kind)) = allowed.iter().find(|(name, _)| name == key) else {
            errors.push(format!("[{}] unknown key '{}'", path, key));
            continue;
        };

        let ok = match *kind {
            INTEGER => value.is_integer(),
            _ => value.is_bool(),
        };
        if !ok {
            errors.push(format!("[{}] '{}' must be an {}", path, key, kind));
        }
    }
}

/// Validate the fixed sections
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        if name == "strip" {
            continue;
        }
        let Some((_, keys)) = SECTIONS.iter().find(|(section, _)| section == name) else {
            errors.push(format!("unknown section [{}]", name));
            continue;
        };
        match value.as_table() {
            Some(table) => validate_keys(name, table, keys, errors),
            None => errors.push(format!("[{}] must be a table", name)),
        }
    }

    if let Some(toml::Value::Integer(n)) = config
        .get("input")
        .and_then(|input| input.get("long_press_iterations"))
    {
        if *n <= 0 {
            errors.push("[input] long_press_iterations must be positive".to_string());
        }
    }

    if let Some(toml::Value::Integer(n)) = config
        .get("homing")
        .and_then(|homing| homing.get("attempts"))
    {
        if !(1..=255).contains(n) {
            errors.push("[homing] attempts must be 1-255".to_string());
        }
    }
}

/// Validate strip sections
fn validate_strips(config: &toml::Value, errors: &mut Vec<String>) {
    let strips = match config.get("strip") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[strip] must contain [strip.<name>] tables".to_string());
            return;
        }
        None => return,
    };

    if strips.len() > 3 {
        errors.push(format!("{} strips defined, the prop has 3", strips.len()));
    }

    for (name, strip) in strips {
        let path = format!("strip.{}", name);
        let Some(strip) = strip.as_table() else {
            errors.push(format!("[{}] must be a table", path));
            continue;
        };
        validate_keys(&path, strip, STRIP_KEYS, errors);

        if let Some(toml::Value::Integer(len)) = strip.get("len") {
            if !(1..=300).contains(len) {
                errors.push(format!("[{}] len must be 1-300", path));
            }
        }
    }
}
