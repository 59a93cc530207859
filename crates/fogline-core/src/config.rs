//! Configuration discovery and layering.
//!
//! Sources are merged with figment, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. user config: `~/.config/fogline/config.<ext>` (platform equivalent
//!    elsewhere)
//! 3. project config: `.fogline.<ext>` then `fogline.<ext>`, from the closest
//!    directory at or above the search root that has any. The walk stops at a
//!    `.git` directory.
//! 4. files added with [`ConfigLoader::with_file`], in order
//! 5. `FOGLINE_*` environment variables (`FOGLINE_MAX_GRADE=9`)
//!
//! `<ext>` is `toml`, `yaml`, `yml` or `json`. Files of several formats in the
//! same directory are all merged, in that order.
//!
//! ```no_run
//! use camino::Utf8PathBuf;
//! use fogline_core::config::ConfigLoader;
//!
//! let cwd = Utf8PathBuf::try_from(std::env::current_dir().unwrap()).unwrap();
//! let (config, sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("{:?} from {:?}", config.max_grade, sources.primary_file());
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::DEFAULT_MAX_INPUT_BYTES;
use crate::dictionaries::abbreviations::AbbreviationSet;
use crate::error::{ConfigError, ConfigResult};

/// Settings for fogline.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level (debug, info, warn, error).
    pub log_level: LogLevel,
    /// Directory for JSONL log files. Unset means no file logging.
    pub log_dir: Option<Utf8PathBuf>,
    /// Abbreviations added to the built-in list for sentence splitting.
    pub abbreviations: Option<Vec<String>>,
    /// Pronunciation dictionary for exact syllable counts.
    pub pronunciation_dict: Option<Utf8PathBuf>,
    /// Highest acceptable Flesch-Kincaid grade for `analyze`.
    pub max_grade: Option<f64>,
    /// Lowest acceptable Flesch Reading Ease for `analyze`.
    pub min_flesch: Option<f64>,
    /// Input size limit in bytes. Defaults to 5 MiB.
    pub max_input_bytes: Option<usize>,
    /// Turn the input size limit off. `max_input_bytes` is then ignored.
    pub disable_input_limit: bool,
}

impl Config {
    /// The effective input limit: `None` when disabled, else the configured
    /// value or [`DEFAULT_MAX_INPUT_BYTES`].
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
        }
    }

    /// The seeded abbreviation set plus any configured extras.
    pub fn abbreviation_set(&self) -> AbbreviationSet {
        let mut set = AbbreviationSet::seeded();
        if let Some(extra) = &self.abbreviations {
            set.extend(extra);
        }
        set
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogLevel {
    /// Everything, including per-call analysis details.
    Debug,
    /// Normal operation (default).
    #[default]
    Info,
    /// Recoverable problems, such as an unreadable dictionary.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// The level as a lowercase filter directive.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which files contributed to a loaded [`Config`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project files from the closest directory, low to high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Files passed explicitly, such as `--config`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The highest-precedence file loaded, if any.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .or_else(|| self.project_files.last())
            .map(Utf8PathBuf::as_path)
            .or(self.user_file.as_deref())
    }
}

const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

const APP_NAME: &str = "fogline";

const ENV_PREFIX: &str = "FOGLINE_";

/// Builder that discovers and merges configuration sources.
#[derive(Debug)]
pub struct ConfigLoader {
    project_search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    boundary_marker: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that reads user config and stops project search at `.git`.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Search for project config starting at `path` and walking up.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Include or skip the user config file.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Stop the upward walk at a directory containing `marker`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Walk all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Merge `path` after discovered files. Later calls win.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge every source and deserialize the result.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config {
            sources.user_file = find_user_config();
        }
        if let Some(root) = &self.project_search_root {
            sources.project_files = self.find_project_configs(root);
        }

        let files = sources
            .user_file
            .iter()
            .chain(&sources.project_files)
            .chain(&self.explicit_files);
        for file in files {
            figment = merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        figment = figment.merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            files = sources.project_files.len() + sources.explicit_files.len(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Like [`load`](Self::load), but fail when no file at all was found.
    pub fn load_or_error(self) -> ConfigResult<(Config, ConfigSources)> {
        let has_user = self.include_user_config && find_user_config().is_some();
        let has_project = self
            .project_search_root
            .as_ref()
            .is_some_and(|root| !self.find_project_configs(root).is_empty());

        if !has_user && !has_project && self.explicit_files.is_empty() {
            return Err(ConfigError::NotFound);
        }
        self.load()
    }

    /// Config files in the closest directory at or above `start` that has
    /// any, dotfiles first.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        for dir in start.ancestors() {
            let found: Vec<Utf8PathBuf> = candidate_names()
                .map(|name| dir.join(name))
                .filter(|path| path.is_file())
                .collect();
            if !found.is_empty() {
                return found;
            }

            // The marker directory itself is still searched, its parents are not.
            if let Some(marker) = &self.boundary_marker
                && dir != start
                && dir.join(marker).exists()
            {
                break;
            }
        }
        Vec::new()
    }
}

/// Project file names in merge order: `.fogline.<ext>` then `fogline.<ext>`.
fn candidate_names() -> impl Iterator<Item = String> {
    let dotfiles = CONFIG_EXTENSIONS
        .iter()
        .map(|ext| format!(".{APP_NAME}.{ext}"));
    let regular = CONFIG_EXTENSIONS
        .iter()
        .map(|ext| format!("{APP_NAME}.{ext}"));
    dotfiles.chain(regular)
}

fn find_user_config() -> Option<Utf8PathBuf> {
    let dir = user_config_dir()?;
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}

/// The user config directory: `~/.config/fogline/` on Linux,
/// `~/Library/Application Support/fogline/` on macOS.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()
}
