use std::env;
use std::fs;
use std::path::Path;

/// Keys read by `config.rs` through `option_env!`
const CONFIG_KEYS: &[&str] = &[
    "NAVER_CLIENT_ID",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "DEFAULT_MAP_CENTER_LAT",
    "DEFAULT_MAP_CENTER_LNG",
    "DEFAULT_MAP_ZOOM",
    "MARKER_NAVIGATION_DELAY_MS",
];

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value.trim().trim_matches('"').trim_matches('\'')))
}

fn main() {
    let env_file = Path::new(".env");

    match fs::read_to_string(env_file) {
        Ok(contents) => {
            println!("cargo:rerun-if-changed=.env");
            for (key, value) in contents.lines().filter_map(parse_line) {
                if !CONFIG_KEYS.contains(&key) {
                    println!("cargo:warning=.env: unknown key {} ignored", key);
                    continue;
                }
                // The real environment wins over .env
                if env::var(key).is_err() {
                    println!("cargo:rustc-env={}={}", key, value);
                }
            }
        }
        Err(_) => {
            println!("cargo:warning=No .env file found. Without NAVER_CLIENT_ID the map renders a configuration error.");
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
}
