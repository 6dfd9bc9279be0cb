use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Load KEY=VALUE pairs from .env into compile-time env vars (read via option_env!)
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    // Variables already set in the environment win over .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env.example");
    for key in [
        "BACKEND_URL",
        "API_PREFIX",
        "REFRESH_INTERVAL_MS",
        "ENABLE_LOGGING",
        "DEFAULT_MAP_CENTER_LAT",
        "DEFAULT_MAP_CENTER_LNG",
        "DEFAULT_MAP_ZOOM",
        "MAP_TILE_URL",
        "HEAT_RADIUS",
        "HEAT_INTENSITY",
        "ROUTE_LINE_COLOR",
    ] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
}
