//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Prefix of environment overrides, e.g. `ESTATEDESK_API__BASE_URL`
pub const ENV_PREFIX: &str = "ESTATEDESK_";

const PROJECT_CONFIG_FILES: [&str; 2] = ["estatedesk.toml", ".estatedesk.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `ESTATEDESK_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./estatedesk.toml` or `./.estatedesk.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/estatedesk/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Self::file_figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        );
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        figment.extract().map_err(Box::new)
    }

    /// Merge defaults and the given files, lowest priority first
    fn file_figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }
        figment
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/estatedesk/config.toml if set,
    /// otherwise falls back to ~/.config/estatedesk/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("estatedesk").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");
        println!("  [  env] {}*", ENV_PREFIX);

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./estatedesk.toml or ./.estatedesk.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.output.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("estatedesk"));
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let explicit = dir.path().join("explicit.toml");
        std::fs::File::create(&global)
            .unwrap()
            .write_all(b"[api]\nbase_url = \"https://global.test\"\ntimeout_seconds = 5\n")
            .unwrap();
        std::fs::File::create(&explicit)
            .unwrap()
            .write_all(b"[api]\nbase_url = \"https://explicit.test\"\n")
            .unwrap();

        let config: FileConfig =
            ConfigLoader::file_figment(Some(&global), None, Some(&explicit))
                .extract()
                .unwrap();
        assert_eq!(config.api.base_url, "https://explicit.test");
        assert_eq!(config.api.timeout_seconds, Some(5));
    }

    #[test]
    fn test_missing_global_file_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config: FileConfig =
            ConfigLoader::file_figment(Some(&dir.path().join("absent.toml")), None, None)
                .extract()
                .unwrap();
        assert_eq!(config.api.base_url, super::super::file_config::DEFAULT_BASE_URL);
    }
}
