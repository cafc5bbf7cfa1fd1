use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use toml::Value;
use whatcanicook_core::config::{AppConfig, LoadOptions};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "storage.database_url",
        &config.storage.database_url,
        source(
            "storage.database_url",
            &["WHATCANICOOK_STORAGE_DATABASE_URL", "WHATCANICOOK_DATABASE_URL"],
        ),
    ));
    lines.push(render_line(
        "storage.max_connections",
        &config.storage.max_connections.to_string(),
        source("storage.max_connections", &["WHATCANICOOK_STORAGE_MAX_CONNECTIONS"]),
    ));
    lines.push(render_line(
        "storage.timeout_secs",
        &config.storage.timeout_secs.to_string(),
        source("storage.timeout_secs", &["WHATCANICOOK_STORAGE_TIMEOUT_SECS"]),
    ));

    lines.push(render_line(
        "recipes.directory",
        &config.recipes.directory.display().to_string(),
        source("recipes.directory", &["WHATCANICOOK_RECIPES_DIRECTORY"]),
    ));
    let files = if config.recipes.files.is_empty() {
        "<all *.json in directory>".to_string()
    } else {
        config.recipes.files.join(", ")
    };
    lines.push(render_line(
        "recipes.files",
        &files,
        source("recipes.files", &["WHATCANICOOK_RECIPES_FILES"]),
    ));

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source("logging.level", &["WHATCANICOOK_LOGGING_LEVEL", "WHATCANICOOK_LOG_LEVEL"]),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source("logging.format", &["WHATCANICOOK_LOGGING_FORMAT", "WHATCANICOOK_LOG_FORMAT"]),
    ));

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("whatcanicook.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/whatcanicook.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
