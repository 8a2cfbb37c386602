#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::collections::HashMap;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::infrastructure::backends::DEFAULT_BACKEND_URL;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    BackendURL,
    BackendHealthCheckTimeout,
    ConfigFile,
}

fn validate(key: ConfigKey, val: &str) -> Result<()> {
    match key {
        ConfigKey::BackendURL => {
            if val.is_empty() {
                return Ok(());
            }
            let url = match reqwest::Url::parse(val) {
                Ok(url) => url,
                Err(err) => bail!(format!("Invalid value for '{key}': {val} ({err})")),
            };
            if url.scheme() != "http" && url.scheme() != "https" {
                bail!(format!(
                    "Invalid value for '{key}': {val} (only http and https are supported)"
                ));
            }
        }
        ConfigKey::BackendHealthCheckTimeout => {
            if val.parse::<u64>().is_err() {
                bail!(format!(
                    "Invalid value for '{key}': {val} (expected milliseconds)"
                ));
            }
        }
        ConfigKey::ConfigFile => {}
    }

    return Ok(());
}

/// Process wide configuration. Loaded once at startup by the CLI, and only
/// read afterwards.
pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let config_path = dirs::config_dir()
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join("promptsmith/config.toml");

        let res = match key {
            ConfigKey::BackendURL => DEFAULT_BACKEND_URL.to_string(),
            ConfigKey::BackendHealthCheckTimeout => "1000".to_string(),
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
        };

        return res;
    }

    /// Resolves every key from defaults, then the config file, then
    /// environment variables and flags. Nothing is stored unless every value
    /// is valid.
    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        let mut values: HashMap<ConfigKey, String> = HashMap::new();
        for key in ConfigKey::iter() {
            values.insert(key, Config::default(key));
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(&config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    if let Some(val_int) = val.as_integer() {
                        values.insert(key, val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if let Err(err) = validate(key, val_str) {
                            bail!(format!("{config_file} has an invalid value. {err}"));
                        }
                        values.insert(key, val_str.to_string());
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    values.insert(key, val.to_string());
                }
            }
        }

        for (key, val) in values.iter() {
            validate(*key, val)?;
        }

        for (key, val) in values.iter() {
            Config::set(*key, val);
        }

        tracing::debug!(
            backend_url = Config::get(ConfigKey::BackendURL),
            backend_health_check_timeout = Config::get(ConfigKey::BackendHealthCheckTimeout),
            config_file = Config::get(ConfigKey::ConfigFile),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i32>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
