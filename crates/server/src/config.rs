use shared_types::AppConfig;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Overrides the config file location.
pub const CONFIG_PATH_VAR: &str = "CASEBOOK_CONFIG";
/// Overrides `[server].bind_addr`.
pub const BIND_ADDR_VAR: &str = "CASEBOOK_BIND_ADDR";

/// Read `.env` and the config file, apply env overrides, and store the
/// result in the global `OnceLock`. Only the first call has effect.
///
/// A missing or unparseable file yields defaults.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let config = match std::fs::read_to_string(&path) {
            Ok(contents) => parse_config(&contents).unwrap_or_else(|e| {
                tracing::warn!(%path, error = %e, "Failed to parse config, using defaults");
                AppConfig::default()
            }),
            Err(e) => {
                tracing::warn!(%path, error = %e, "Config file not found, using defaults");
                AppConfig::default()
            }
        };

        let config = apply_env_overrides(config, |key| std::env::var(key).ok());
        tracing::info!(
            bind_addr = %config.server.bind_addr,
            latency_ms = config.providers.latency_ms,
            seed_demo_data = config.seed_demo_data,
            "Configuration loaded"
        );
        config
    })
}

/// The loaded config, or defaults if `load_config()` hasn't run yet.
pub fn app_config() -> AppConfig {
    CONFIG.get().cloned().unwrap_or_default()
}

pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Apply environment overrides using `lookup` to resolve variables.
pub fn apply_env_overrides(
    mut config: AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> AppConfig {
    if let Some(addr) = lookup(BIND_ADDR_VAR).filter(|a| !a.trim().is_empty()) {
        config.server.bind_addr = addr.trim().to_string();
    }
    config
}
