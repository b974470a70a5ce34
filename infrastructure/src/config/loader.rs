//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

const APP_DIR: &str = "bloom-checkin";
const PROJECT_FILES: [&str; 2] = ["checkin.toml", ".checkin.toml"];
const ENV_PREFIX: &str = "CHECKIN_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. `CHECKIN_*` environment variables (`__` separates sections)
    /// 3. Project root: `./checkin.toml` or `./.checkin.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/bloom-checkin/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&project_path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/bloom-checkin/config.toml if set,
    /// otherwise the platform config directory equivalent.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for --show-config)
    pub fn describe_sources(explicit: Option<&PathBuf>) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        if let Some(path) = explicit {
            let marker = if path.exists() { "FOUND" } else { "MISSING" };
            lines.push(format!("  [{marker:^7}] Explicit: {}", path.display()));
        }

        lines.push(format!("  [  ENV  ] Environment: {ENV_PREFIX}*"));

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [ FOUND ] Project: {}", path.display())),
            None => lines.push("  [       ] Project: ./checkin.toml or ./.checkin.toml".to_string()),
        }

        if let Some(path) = Self::global_config_path() {
            let marker = if path.exists() { " FOUND " } else { "       " };
            lines.push(format!("  [{marker}] Global:  {}", path.display()));
        }

        lines.push("  [       ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkin_domain::GatewayMode;
    use figment::Jail;
    use std::io::Write;

    /// Point the global config directory into the jail
    fn isolate_global(jail: &mut Jail) -> PathBuf {
        let config_home = jail.directory().join("xdg");
        jail.set_env("XDG_CONFIG_HOME", config_home.display());
        config_home.join(APP_DIR).join("config.toml")
    }

    fn write_global(path: &PathBuf, contents: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.gateway.mode, GatewayMode::Mock);
        assert_eq!(config.http.timeout_seconds, 30);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("bloom-checkin"));
    }

    #[test]
    fn test_load_without_sources_is_default() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            let config = ConfigLoader::load(None).unwrap();
            assert_eq!(config.gateway.mode, GatewayMode::Mock);
            assert_eq!(config.http.base_url, "http://localhost:8000");
            assert!(config.http.api_key.is_none());
            Ok(())
        });
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_project_file_overrides_global() {
        Jail::expect_with(|jail| {
            let global = isolate_global(jail);
            write_global(&global, "[gateway]\nmode = \"live\"\n\n[http]\ntimeout_seconds = 10\n");
            jail.create_file("checkin.toml", "[http]\ntimeout_seconds = 20\n")?;

            let config = ConfigLoader::load(None).unwrap();
            assert_eq!(config.gateway.mode, GatewayMode::Live);
            assert_eq!(config.http.timeout_seconds, 20);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_project_file() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            jail.create_file(
                ".checkin.toml",
                "[http]\napi_key = \"from-file\"\ntimeout_seconds = 20\n",
            )?;
            jail.set_env("CHECKIN_HTTP__API_KEY", "from-env");
            jail.set_env("CHECKIN_GATEWAY__MODE", "live");

            let config = ConfigLoader::load(None).unwrap();
            assert_eq!(config.http.api_key.as_deref(), Some("from-env"));
            assert_eq!(config.http.timeout_seconds, 20);
            assert_eq!(config.gateway.mode, GatewayMode::Live);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_overrides_env() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            jail.set_env("CHECKIN_HTTP__TIMEOUT_SECONDS", "15");
            jail.set_env("CHECKIN_HTTP__API_KEY", "from-env");

            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "[http]\ntimeout_seconds = 45").unwrap();
            let explicit = file.path().to_path_buf();

            let config = ConfigLoader::load(Some(&explicit)).unwrap();
            assert_eq!(config.http.timeout_seconds, 45);
            assert_eq!(config.http.api_key.as_deref(), Some("from-env"));
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_bad_mode() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            jail.create_file("explicit.toml", "[gateway]\nmode = \"pigeon\"\n")?;
            assert!(ConfigLoader::load(Some(&PathBuf::from("explicit.toml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_describe_sources_lists_defaults() {
        let lines = ConfigLoader::describe_sources(None);
        assert!(lines.iter().any(|l| l.contains("Default")));
        assert!(lines.iter().any(|l| l.contains("CHECKIN_")));
    }
}
