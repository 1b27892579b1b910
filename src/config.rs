use crate::error::{CropFitError, Result};
use crate::logic::{ReferenceTables, ScoringProfile, SuitabilityEngine, Variant};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Built-in constant set to start from.
    #[serde(default)]
    pub variant: Variant,
    /// Partial scoring profile, merged over the variant's constants. Any key
    /// left out, at any depth, keeps the variant's value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<serde_yaml::Value>,
    /// Replaces the variant's reference tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceTables>,
    /// Catalog used when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

impl Config {
    /// Load from an explicit path, or the first config found in the standard
    /// locations. With no config anywhere, the defaults are used.
    pub fn load(config_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(CropFitError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p.to_path_buf()
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found; using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| CropFitError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::parse(&config_str)?;
        tracing::info!(path = %config_path.display(), variant = %config.variant, "Loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = Self::substitute_env_vars(content);

        serde_yaml::from_str(&content)
            .map_err(|e| CropFitError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for a config file in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/cropfit.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        let xdg_config = dirs::config_dir()?.join("cropfit").join("config.yaml");
        xdg_config.exists().then_some(xdg_config)
    }

    /// Default path for writing new config files (~/.config/cropfit/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CropFitError::Config("Cannot determine config directory".into()))?
            .join("cropfit");
        Ok(config_dir.join("config.yaml"))
    }

    /// Write this config as YAML, refusing to replace an existing file unless
    /// `force` is set.
    pub fn write(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(CropFitError::Config(format!(
                "{:?} already exists; pass --force to overwrite",
                path
            )));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| CropFitError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# cropfit configuration\n# Generated by `cropfit init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }

    /// A starter config that spells out every standard constant, ready to edit.
    pub fn starter() -> Result<Self> {
        Ok(Self {
            variant: Variant::Standard,
            scoring: Some(serde_yaml::to_value(ScoringProfile::standard())?),
            reference: None,
            catalog: None,
        })
    }

    pub fn profile(&self) -> Result<ScoringProfile> {
        let base = self.variant.profile();
        match &self.scoring {
            Some(overrides) => base.with_overrides(overrides),
            None => Ok(base),
        }
    }

    pub fn reference_tables(&self) -> ReferenceTables {
        self.reference.clone().unwrap_or_else(|| match self.variant {
            Variant::Standard => ReferenceTables::builtin(),
            Variant::Legacy => ReferenceTables::legacy(),
        })
    }

    /// Build an engine, validating any overridden constants.
    pub fn build_engine(&self) -> Result<SuitabilityEngine> {
        SuitabilityEngine::new(self.profile()?, self.reference_tables())
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return result;
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}
