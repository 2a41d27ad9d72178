use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::uri::{DEFAULT_SCHEME, UriCodec};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: u32,
    #[serde(default)]
    pub codec: CodecConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub decode: DecodeConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }

    pub fn codec(&self) -> anyhow::Result<UriCodec> {
        UriCodec::new(self.codec.scheme.as_str()).with_context(|| "Invalid [codec] section")
    }

    /// Catalog path, relative paths taken from the directory of the config file
    pub fn catalog_path(&self, config_path: &Path) -> PathBuf {
        match config_path.parent() {
            Some(dir) => dir.join(&self.catalog.path),
            None => self.catalog.path.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CodecConfig {
    #[serde(default = "default_scheme")]
    pub scheme: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
        }
    }
}

fn default_scheme() -> String {
    DEFAULT_SCHEME.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DecodeConfig {
    /// How many elements of an inbound track array are looked at
    #[serde(default = "default_max_tracks")]
    pub max_tracks: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_tracks: default_max_tracks(),
        }
    }
}

fn default_max_tracks() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_config_toml() -> anyhow::Result<()> {
        let toml_str = r#"
version = 1

[codec]
scheme = "tunes"

[catalog]
path = "/srv/catalog.toml"

[decode]
max_tracks = 25
"#;

        let cfg: Config = toml::from_str(toml_str)?;

        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.codec.scheme, "tunes");
        assert_eq!(cfg.catalog.path, PathBuf::from("/srv/catalog.toml"));
        assert_eq!(cfg.decode.max_tracks, 25);
        assert_eq!(cfg.codec()?.scheme(), "tunes");

        Ok(())
    }

    #[test]
    fn test_optional_sections_use_defaults() -> anyhow::Result<()> {
        let toml_str = r#"
version = 1

[catalog]
path = "catalog.toml"
"#;

        let cfg: Config = toml::from_str(toml_str)?;

        assert_eq!(cfg.codec.scheme, "spotify");
        assert_eq!(cfg.decode.max_tracks, 100);

        Ok(())
    }

    #[test]
    fn test_invalid_scheme_is_reported() -> anyhow::Result<()> {
        let toml_str = r#"
version = 1

[codec]
scheme = "no:colons"

[catalog]
path = "catalog.toml"
"#;

        let cfg: Config = toml::from_str(toml_str)?;

        assert!(cfg.codec().is_err());
        Ok(())
    }

    #[test]
    fn test_load_resolves_relative_catalog_path() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "version = 1\n[catalog]\npath = \"catalog.toml\"\n")?;

        let cfg = Config::load(&config_path)?;

        assert_eq!(cfg.catalog_path(&config_path), dir.path().join("catalog.toml"));
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();

        assert!(Config::load(&dir.path().join("missing.toml")).is_err());
    }
}
