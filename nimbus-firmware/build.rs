//! Build script for nimbus-firmware
//!
//! Validates the embedded face.toml at compile time so a broken default
//! never reaches the binary.

use std::fs;
use std::path::Path;

const PATH_KEYS: [&str; 4] = ["storage_dir", "asset_dir", "feed_path", "frame_path"];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=face.toml");

    let config_path = Path::new("face.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read face.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in face.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_paths(&config, &mut errors);
    validate_surface(&config, &mut errors);
    validate_style(&config, &mut errors);
    validate_palette(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid values in face.toml", &errors);
    }
}

/// Abort the build with a boxed message
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.clone()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

fn validate_paths(config: &toml::Value, errors: &mut Vec<String>) {
    for key in PATH_KEYS {
        match config.get(key) {
            Some(toml::Value::String(s)) if !s.is_empty() => {}
            Some(_) => errors.push(format!("'{}' must be a non-empty string", key)),
            None => errors.push(format!("missing '{}'", key)),
        }
    }
}

fn validate_surface(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(surface) = config.get("surface") else {
        return;
    };
    for key in ["width", "height"] {
        if let Some(value) = surface.get(key) {
            match value.as_integer() {
                Some(n) if n > 0 && n <= 4096 => {}
                _ => errors.push(format!("[surface] {} must be 1-4096", key)),
            }
        }
    }
}

fn validate_style(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(style) = config.get("face").and_then(|f| f.get("style")) else {
        return;
    };
    let allowed = [
        ("peek_mode", ["short", "variable"]),
        ("background_visibility", ["interruptive", "persistent"]),
    ];
    for (key, values) in allowed {
        if let Some(value) = style.get(key) {
            if !value.as_str().is_some_and(|v| values.contains(&v)) {
                errors.push(format!(
                    "[face.style] {} must be '{}' or '{}'",
                    key, values[0], values[1]
                ));
            }
        }
    }
}

fn validate_palette(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(toml::Value::Table(palette)) = config.get("face").and_then(|f| f.get("palette"))
    else {
        return;
    };
    for (name, value) in palette {
        match value.as_integer() {
            Some(rgb) if (0..=0xFF_FFFF).contains(&rgb) => {}
            _ => errors.push(format!("[face.palette] {} must be 0x000000-0xFFFFFF", name)),
        }
    }
}
