//! File-based settings (YAML)
//!
//! User-level settings live at `~/.config/scoutllm/config.yaml`.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ConfigError, ConfigResult};
use super::settings::Settings;

/// Reads and writes `Settings` as YAML
///
/// # Example
///
/// ```no_run
/// use scoutllm_core::config::FileConfigProvider;
///
/// let settings = FileConfigProvider::user().load().unwrap_or_default();
/// assert!(settings.max_tokens > 0);
/// ```
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    /// Create a provider for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Provider for the user-level file (~/.config/scoutllm/config.yaml)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("scoutllm").join("config.yaml"))
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the config file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load and validate settings; a missing file yields defaults
    pub fn load(&self) -> ConfigResult<Settings> {
        if !self.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }

        let settings: Settings =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings, creating parent directories as needed
    pub fn save(&self, settings: &Settings) -> ConfigResult<()> {
        settings.validate()?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(settings)
            .map_err(|e| ConfigError::Other(format!("Failed to serialize YAML: {}", e)))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl std::fmt::Debug for FileConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigProvider")
            .field("path", &self.path)
            .field("exists", &self.exists())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProviderKind;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let provider = FileConfigProvider::new(dir.path().join("config.yaml"));

        assert!(!provider.exists());
        assert_eq!(provider.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let provider = FileConfigProvider::new(&path);

        let settings = Settings::new()
            .with_max_tokens(1500)
            .with_api_base(ProviderKind::Cohere, "http://localhost:8080");
        provider.save(&settings).unwrap();

        assert!(provider.exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("max_tokens: 1500"));
        assert!(content.contains("cohere"));

        assert_eq!(provider.load().unwrap(), settings);
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "max_tokens: [not, a, number]").unwrap();

        let err = FileConfigProvider::new(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "default_provider: mistral\n").unwrap();

        assert!(matches!(
            FileConfigProvider::new(&path).load(),
            Err(ConfigError::Other(_))
        ));
    }

    #[test]
    fn test_user_path() {
        let provider = FileConfigProvider::user();
        assert!(provider.path().ends_with("scoutllm/config.yaml"));
    }
}
