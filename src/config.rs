//! Repository configuration
//!
//! Stored as TOML at `.minivc/config.toml`. Missing keys take their defaults,
//! and a handful of environment variables override the file:
//!
//! - `MINIVC_AUTHOR_NAME`, `MINIVC_AUTHOR_EMAIL`: commit author
//! - `MINIVC_AUTHOR_DATE`: pin the commit timestamp (`%Y-%m-%d %H:%M:%S %z`
//!   or RFC 2822)
//! - `MINIVC_EXTENSIONS`: comma separated list of tracked file suffixes

use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::objects::commit::Author;
use crate::errors::{IoContext, VcError, VcResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Suffix entry that lets every file through the extension policy
pub const ANY_EXTENSION: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub core: CoreConfig,
    pub workspace: WorkspaceConfig,
    pub author: AuthorConfig,
    /// Timestamp override, only ever taken from the environment
    #[serde(skip)]
    pub author_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub default_branch: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// File suffixes (without the dot) that `add .`, checkout and status
    /// consider part of the working set
    pub extensions: Vec<String>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["txt".to_string(), "md".to_string()],
        }
    }
}

impl WorkspaceConfig {
    /// Check a working-relative path against the tracked-extension policy
    pub fn is_tracked_extension(&self, path: &Path) -> bool {
        if self.extensions.iter().any(|ext| ext == ANY_EXTENSION) {
            return true;
        }

        path.extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| *allowed == ext))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    pub email: String,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "minivc".to_string(),
            email: "minivc@localhost".to_string(),
        }
    }
}

impl Config {
    /// Read the configuration file, falling back to defaults if it is absent
    pub fn load(path: &Path) -> VcResult<Self> {
        if !path.exists() {
            tracing::debug!("config not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .io_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .map_err(|e| VcError::Config(format!("{}: {e}", path.display())))?;

        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> VcResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| VcError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .io_context(|| format!("unable to write config file {}", path.display()))
    }

    /// Apply `MINIVC_*` environment overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(name) = std::env::var("MINIVC_AUTHOR_NAME") {
            self.author.name = name;
        }
        if let Ok(email) = std::env::var("MINIVC_AUTHOR_EMAIL") {
            self.author.email = email;
        }
        if let Ok(date) = std::env::var("MINIVC_AUTHOR_DATE") {
            self.author_date = Some(date);
        }
        if let Ok(extensions) = std::env::var("MINIVC_EXTENSIONS") {
            self.workspace.extensions = extensions
                .split(',')
                .map(|ext| ext.trim().trim_start_matches('.').to_string())
                .filter(|ext| !ext.is_empty())
                .collect();
        }

        self
    }

    /// Build the author for a commit recorded now
    ///
    /// An unparseable `MINIVC_AUTHOR_DATE` is ignored in favour of the clock.
    pub fn author(&self) -> Author {
        let timestamp = self
            .author_date
            .as_deref()
            .and_then(Author::parse_timestamp);

        match timestamp {
            Some(ts) => Author::new_with_timestamp(
                self.author.name.clone(),
                self.author.email.clone(),
                ts,
            ),
            None => Author::new(self.author.name.clone(), self.author.email.clone()),
        }
    }
}
