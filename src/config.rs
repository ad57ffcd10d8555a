use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Which trained model this process serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Allocation,
    Fertility,
}

impl Variant {
    /// Port the variant binds when server.port is not set
    pub fn default_port(self) -> u16 {
        match self {
            Variant::Allocation => 5001,
            Variant::Fertility => 5000,
        }
    }

    /// Artifact file name looked up next to the executable when model.path
    /// is not set
    pub fn artifact_file_name(self) -> &'static str {
        match self {
            Variant::Allocation => "final_water_model.gbdt",
            Variant::Fertility => "fertility_model.gbdt",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Allocation => "allocation",
            Variant::Fertility => "fertility",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    /// Defaults per variant (5001 allocation, 5000 fertility) when unset
    pub port: Option<u16>,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { host: default_host(), port: None, workers: None }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSettings {
    #[serde(default = "default_variant")]
    pub variant: Variant,
    /// Fertility only: include the derived allocatedVolume field
    #[serde(default = "default_include_allocated_volume")]
    pub include_allocated_volume: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            variant: default_variant(),
            include_allocated_volume: default_include_allocated_volume(),
        }
    }
}

fn default_variant() -> Variant {
    Variant::Fertility
}

fn default_include_allocated_volume() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelSettings {
    /// Override for the artifact path; defaults to a per-variant file
    /// co-located with the executable
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: default_log_level(), format: default_log_format() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with AGRI_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with AGRI_)
            // e.g., AGRI_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("AGRI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("AGRI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Port this process binds, falling back to the variant default
    pub fn resolved_port(&self) -> u16 {
        self.server.port.unwrap_or_else(|| self.service.variant.default_port())
    }
}

/// Apply well-known environment shortcuts on top of the layered config
///
/// MODEL_PATH is checked first, then AGRI_MODEL__PATH via the normal
/// environment source.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(model_path) = env::var("MODEL_PATH") {
        builder = builder.set_override("model.path", model_path)?;
    }

    builder.build()
}
