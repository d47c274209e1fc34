//! Configuration management for layercake.
//!
//! Parses `layercake.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Path values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `course.templates_dir`
//! - `course.output_dir`
//! - `course.deps_file`
//! - `course.solicitation_file`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override template source directory.
    pub templates_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override dependency graph file.
    pub deps_file: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "layercake.toml";

/// Default location of the course tooling, relative to the course root.
const SCRIPT_DIR: &str = "scripts/l4y3rc4k3";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Course layout configuration (paths are relative strings from TOML).
    #[serde(default)]
    course: CourseConfigRaw,
    /// Navigation table configuration.
    pub navigation: NavigationConfig,

    /// Resolved course configuration (set after loading).
    #[serde(skip)]
    pub course_resolved: CourseConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw course configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CourseConfigRaw {
    templates_dir: Option<String>,
    output_dir: Option<String>,
    deps_file: Option<String>,
    solicitation_file: Option<String>,
    root_label: Option<String>,
    root_page: Option<String>,
}

/// Resolved course configuration with absolute paths.
#[derive(Debug, Default)]
pub struct CourseConfig {
    /// Root of the page template tree.
    pub templates_dir: PathBuf,
    /// Root of the rendered output tree.
    pub output_dir: PathBuf,
    /// Dependency graph file (`deps.yml`).
    pub deps_file: PathBuf,
    /// Boilerplate substituted for the solicitation placeholder.
    pub solicitation_file: PathBuf,
    /// Label of the implicit root page.
    pub root_label: String,
    /// Template-relative path of the root page.
    pub root_page: PathBuf,
}

/// Navigation table configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Heading line printed above the navigation table.
    pub heading: String,
    /// File name suffix marking answers pages (`FooAnswers.md`).
    pub answers_suffix: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            heading: "# From here, you can go somewhere!".to_owned(),
            answers_suffix: "Answers".to_owned(),
        }
    }
}

fn default_root_label() -> String {
    "Cryptol Course".to_owned()
}

fn default_root_page() -> String {
    "README.md".to_owned()
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Configuration file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`course.output_dir`").
        field: String,
        /// Error message (e.g., "${`COURSE_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `layercake.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(templates_dir) = &settings.templates_dir {
            self.course_resolved.templates_dir.clone_from(templates_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.course_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(deps_file) = &settings.deps_file {
            self.course_resolved.deps_file.clone_from(deps_file);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let script_dir = base.join(SCRIPT_DIR);
        Self {
            course: CourseConfigRaw::default(),
            navigation: NavigationConfig::default(),
            course_resolved: CourseConfig {
                templates_dir: script_dir.join("templates"),
                output_dir: base.to_path_buf(),
                deps_file: script_dir.join("deps.yml"),
                solicitation_file: script_dir.join("solicitation.md"),
                root_label: default_root_label(),
                root_page: PathBuf::from(default_root_page()),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_course()?;
        require_non_empty(&self.navigation.answers_suffix, "navigation.answers_suffix")?;
        Ok(())
    }

    /// Validate course configuration.
    fn validate_course(&self) -> Result<(), ConfigError> {
        let course = &self.course_resolved;
        require_non_empty(&course.root_label, "course.root_label")?;

        if course.root_page.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "course.root_page cannot be empty".to_owned(),
            ));
        }
        if course.root_page.extension().is_none_or(|e| e != "md") {
            return Err(ConfigError::Validation(
                "course.root_page must be a .md file".to_owned(),
            ));
        }
        if course.root_page.is_absolute() {
            return Err(ConfigError::Validation(
                "course.root_page must be relative to course.templates_dir".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let course = &mut self.course;
        for (value, field) in [
            (&mut course.templates_dir, "course.templates_dir"),
            (&mut course.output_dir, "course.output_dir"),
            (&mut course.deps_file, "course.deps_file"),
            (&mut course.solicitation_file, "course.solicitation_file"),
        ] {
            if let Some(raw) = value.as_deref() {
                *value = Some(expand::expand_env(raw, field)?);
            }
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));
        let script_dir = Path::new(SCRIPT_DIR);

        self.course_resolved = CourseConfig {
            templates_dir: resolve(
                self.course.templates_dir.as_deref(),
                &script_dir.join("templates").to_string_lossy(),
            ),
            output_dir: self
                .course
                .output_dir
                .as_deref()
                .map_or_else(|| config_dir.to_path_buf(), |dir| config_dir.join(dir)),
            deps_file: resolve(
                self.course.deps_file.as_deref(),
                &script_dir.join("deps.yml").to_string_lossy(),
            ),
            solicitation_file: resolve(
                self.course.solicitation_file.as_deref(),
                &script_dir.join("solicitation.md").to_string_lossy(),
            ),
            root_label: self
                .course
                .root_label
                .clone()
                .unwrap_or_else(default_root_label),
            root_page: PathBuf::from(
                self.course
                    .root_page
                    .clone()
                    .unwrap_or_else(default_root_page),
            ),
        };
    }
}
