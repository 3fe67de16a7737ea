use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Cargar variables de entorno del mapa desde .env si existe
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                // KEY=VALUE
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    // Solo configurar si no está ya definida
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
    for key in [
        "DEFAULT_MAP_CENTER_LAT",
        "DEFAULT_MAP_CENTER_LNG",
        "DEFAULT_MAP_ZOOM",
        "SINGLE_MARKER_ZOOM",
        "MAP_BOUNDS_PADDING_PX",
        "MAP_TILE_URL",
    ] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
}
