#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use std::path::PathBuf;

use crate::error::{Result, WorkforceError};
use crate::filter::FeaturedList;

pub const DEFAULT_CONFIG_PATH: &str = ".workforce/config.toml";
pub const DEFAULT_DATABASE_PATH: &str = ".workforce/missions.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub featured: FeaturedList,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            catalog_path: None,
            featured: FeaturedList::default(),
        }
    }
}

/// Settings present in a config file; absent keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub database_path: Option<String>,
    pub catalog_path: Option<String>,
    pub featured: Option<Vec<String>>,
}

/// Loads `path` (or the default location) and applies environment overrides.
/// A missing file yields the defaults.
///
/// # Errors
/// Returns `WorkforceError::ConfigError` if the file exists but cannot be read.
pub async fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let file = if config_path.exists() {
        let content = tokio::fs::read_to_string(&config_path)
            .await
            .map_err(|e| WorkforceError::ConfigError(format!("Failed to read config: {e}")))?;
        parse_config_content(&content)
    } else {
        ConfigFile::default()
    };

    Ok(resolve_config(file, |key| std::env::var(key).ok()))
}

/// Environment wins over the file, the file over built-in defaults.
pub fn resolve_config<F>(file: ConfigFile, env_lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |value: String| {
        let trimmed = value.trim().to_string();
        (!trimmed.is_empty()).then_some(trimmed)
    };

    let database_path = env_lookup("WORKFORCE_DATABASE_PATH")
        .and_then(non_empty)
        .or_else(|| file.database_path.and_then(non_empty))
        .map_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH), PathBuf::from);

    let catalog_path = env_lookup("WORKFORCE_CATALOG_PATH")
        .and_then(non_empty)
        .or_else(|| file.catalog_path.and_then(non_empty))
        .map(PathBuf::from);

    let featured = file
        .featured
        .filter(|names| !names.is_empty())
        .map_or_else(FeaturedList::default, FeaturedList::new);

    Config {
        database_path,
        catalog_path,
        featured,
    }
}

#[must_use]
pub fn parse_config_content(content: &str) -> ConfigFile {
    let mut file = ConfigFile::default();

    for line in content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
    {
        if let Some(value) = parse_key_value(line, "database_path") {
            file.database_path = Some(expand_env_vars(value));
        }
        if let Some(value) = parse_key_value(line, "catalog_path") {
            file.catalog_path = Some(expand_env_vars(value));
        }
        if let Some(value) = parse_key_value(line, "featured") {
            file.featured = Some(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(ToString::to_string)
                    .collect(),
            );
        }
    }

    file
}

fn expand_env_vars(input: &str) -> String {
    let mut result = input.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_part = &result[start + 2..start + end];
            let (var_name, default) = var_part.split_once(":-").unwrap_or((var_part, ""));
            let value = std::env::var(var_name).unwrap_or_else(|_| default.to_string());
            result.replace_range(start..=(start + end), &value);
        } else {
            break;
        }
    }
    result
}

#[must_use]
pub fn parse_key_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.split_once('=')
        .and_then(|(lhs, rhs)| (lhs.trim() == key).then_some(rhs.trim().trim_matches('"')))
}
