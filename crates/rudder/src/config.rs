//! Application configuration and the `--appconfig` override.
//!
//! Configuration is an ordinary serde mapping loaded once at startup. A
//! reserved command-line option, `--appconfig=<path>`, replaces the
//! in-memory configuration wholesale with the contents of a file before
//! anything else happens. A missing override file is a broken invocation
//! and fails fast, never a recoverable error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the reserved configuration-override option.
pub const OPTION_APPCONFIG: &str = "appconfig";

fn default_route() -> String {
    "help".to_string()
}

/// Application settings.
///
/// Carries the route used when an invocation names none, plus an open map
/// of arbitrary settings that actions can read through the dispatch
/// context. Deserializes from JSON or YAML; unknown keys land in
/// `settings`.
///
/// # Example
///
/// ```rust
/// use rudder::Config;
///
/// let config: Config = serde_yaml::from_str("default_route: greet\ngreeting: hello\n").unwrap();
/// assert_eq!(config.default_route, "greet");
/// assert_eq!(config.setting("greeting").and_then(|v| v.as_str()), Some("hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Route dispatched when the argument vector contains none.
    #[serde(default = "default_route")]
    pub default_route: String,

    /// All remaining settings, keyed by name.
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl Config {
    /// Creates a configuration with the default route (`help`) and no
    /// settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a setting by name, if present.
    pub fn setting(&self, name: &str) -> Option<&Value> {
        self.settings.get(name)
    }

    /// Loads a configuration from a file.
    ///
    /// Files ending in `.json` are parsed as JSON; everything else is
    /// parsed as YAML (which accepts JSON, so unsuffixed files still
    /// load).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Unreadable`] if the file cannot be read and
    /// [`ConfigError::Invalid`] if it cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;

        let parsed = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(anyhow::Error::from),
            _ => serde_yaml::from_str(&content).map_err(anyhow::Error::from),
        };
        parsed.map_err(|source| ConfigError::Invalid {
            path: path.display().to_string(),
            source,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_route: default_route(),
            settings: Map::new(),
        }
    }
}

/// Errors produced while loading configuration.
///
/// All of these are fail-fast at the process boundary: the message goes to
/// the error stream and nothing is dispatched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The override option named a path that is not an existing file.
    #[error("The configuration file does not exist: {path}")]
    Missing {
        /// The path as given on the command line.
        path: String,
    },

    /// The file exists but could not be read.
    #[error("failed to read configuration file {path}")]
    Unreadable {
        /// The resolved file path.
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but could not be parsed.
    #[error("invalid configuration file {path}")]
    Invalid {
        /// The resolved file path.
        path: String,
        #[source]
        source: anyhow::Error,
    },
}

type PathResolver = Box<dyn Fn(&str) -> PathBuf>;

/// Loads the configuration to use for one invocation.
///
/// Scans the argument vector for the first `--appconfig=<path>` token. When
/// found, the path is resolved (through [`resolve_path_with`] if set) and
/// the file's contents replace the default configuration entirely — the two
/// are never merged. Without the option, the default is returned unchanged.
///
/// [`resolve_path_with`]: ConfigLoader::resolve_path_with
///
/// # Example
///
/// ```rust
/// use rudder::{Config, ConfigLoader};
///
/// let loader = ConfigLoader::new();
/// let config = loader.load(["greet", "--name=Ada"], Config::new()).unwrap();
/// assert_eq!(config.default_route, "help");
/// ```
#[derive(Default)]
pub struct ConfigLoader {
    resolve: Option<PathResolver>,
}

impl ConfigLoader {
    /// Creates a loader that uses command-line paths as-is.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a hook that maps the path given on the command line to a
    /// filesystem location, for alias schemes like `@app/config.yaml`.
    pub fn resolve_path_with<F>(mut self, resolve: F) -> Self
    where
        F: Fn(&str) -> PathBuf + 'static,
    {
        self.resolve = Some(Box::new(resolve));
        self
    }

    /// Produces the configuration for the given argument vector.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the override option is present
    /// but its path is empty or does not name an existing file, and the
    /// read/parse errors from [`Config::from_file`] otherwise.
    pub fn load<I, S>(&self, args: I, default: Config) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let option = format!("--{OPTION_APPCONFIG}=");
        for arg in args {
            let Some(path) = arg.as_ref().strip_prefix(option.as_str()) else {
                continue;
            };
            if !path.is_empty() {
                let resolved = match &self.resolve {
                    Some(resolve) => resolve(path),
                    None => PathBuf::from(path),
                };
                if resolved.is_file() {
                    return Config::from_file(&resolved);
                }
            }
            return Err(ConfigError::Missing {
                path: path.to_string(),
            });
        }
        Ok(default)
    }
}

impl fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("resolve", &self.resolve.is_some())
            .finish()
    }
}
