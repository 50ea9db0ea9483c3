/// Config file loading and creation for the pairrank CLI.
///
/// Config lives at ~/.config/pairrank/config.toml.
/// All fields are optional — CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PairrankConfig {
    /// Where `rank` saves progress when no --save/--resume path is given.
    pub state_file: Option<String>,
    /// Seed for pair selection.
    pub seed: Option<u64>,
    /// Print rankings as JSON by default.
    pub json: Option<bool>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# pairrank configuration
# All values here can be overridden by CLI flags.

# Save session progress here (same format as the `e` export)
# state_file = \"/home/me/.local/share/pairrank/state.json\"

# Fixed seed for a reproducible order of questions
# seed = 42

# Print rankings as JSON instead of a table
# json = false
";

/// Returns the default config path: ~/.config/pairrank/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("pairrank").join("config.toml")
}

/// Parse config text. Separate from `load_config` so errors can be reported with the path.
pub fn parse_config(content: &str) -> Result<PairrankConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> PairrankConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            PairrankConfig::default()
        }
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!("Config file already exists at {}", path.display()));
    }

    // Create parent directories
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {e}", parent.display()))?;
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .map_err(|e| format!("Failed to write config to {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_parses_to_empty_config() {
        assert_eq!(parse_config(DEFAULT_CONFIG_TEMPLATE).unwrap(), PairrankConfig::default());
    }

    #[test]
    fn test_parse_all_fields() {
        let cfg = parse_config("state_file = \"s.json\"\nseed = 9\njson = true\n").unwrap();
        assert_eq!(cfg.state_file.as_deref(), Some("s.json"));
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.json, Some(true));
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(parse_config("endpoint = \"http://x\"").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("nope.toml"));
        assert_eq!(cfg, PairrankConfig::default());
    }

    #[test]
    fn test_create_default_config_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        create_default_config(&path).unwrap();
        assert_eq!(load_config(&path), PairrankConfig::default());
        assert!(create_default_config(&path).is_err());
    }
}
