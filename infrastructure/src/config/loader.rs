//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Project-level config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "council-gate.toml";

/// Prefix for environment overrides; `__` separates nested keys
pub const ENV_PREFIX: &str = "COUNCIL_GATE_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `COUNCIL_GATE_SECTION__KEY`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./council-gate.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/council-gate/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// File sources only, without environment overrides
    fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("council-gate").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [ENV  ] {}SECTION__KEY", ENV_PREFIX);

        if let Some(path) = config_path {
            let found = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", found, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./{}", PROJECT_CONFIG_FILE);
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
        assert!(config.council.members.is_empty());
        assert!(config.council.use_default_council);
        assert_eq!(config.thresholds.human_required_usd, 2000.0);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path().unwrap();
        assert!(path.to_string_lossy().contains("council-gate"));
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[thresholds]
human_required_usd = 5000

[council]
members = ["openai/gpt-4o"]
"#
        )
        .unwrap();

        let config: FileConfig = ConfigLoader::figment(Some(&path)).extract().unwrap();
        assert_eq!(config.thresholds.human_required_usd, 5000.0);
        // untouched keys keep their defaults
        assert_eq!(config.thresholds.auto_approve_usd, 100.0);
        assert_eq!(config.council.members.len(), 1);
        assert_eq!(config.metrics.prometheus_port, 9090);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[thresholds]\nauto_approve_usd = \"lots\"\n").unwrap();

        let result: Result<FileConfig, _> = ConfigLoader::figment(Some(&path)).extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_nested_override_merges_by_key() {
        let config: FileConfig = ConfigLoader::figment(None)
            .merge(Serialized::default("gateway.api_key", "sk-override"))
            .merge(Serialized::default("metrics.prometheus_enabled", true))
            .extract()
            .unwrap();
        assert_eq!(config.gateway.api_key.as_deref(), Some("sk-override"));
        assert!(config.metrics.prometheus_enabled);
        assert_eq!(config.gateway.base_url, crate::config::DEFAULT_BASE_URL);
    }
}
