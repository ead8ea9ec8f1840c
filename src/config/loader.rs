use std::path::{Path, PathBuf};
use tracing::debug;

use super::{global_config_path, Config, ConfigError, PROJECT_CONFIG_FILE};

/// Builds a [`Config`] from the layered sources
pub struct ConfigLoader {
    global_path: Option<PathBuf>,
    project_path: Option<PathBuf>,
    project_required: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Global file from the platform config dir, project file from the working directory
    pub fn new() -> Self {
        Self {
            global_path: global_config_path(),
            project_path: Some(PathBuf::from(PROJECT_CONFIG_FILE)),
            project_required: false,
        }
    }

    /// Use an explicit project file; it must exist
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = Some(path.into());
        self.project_required = true;
        self
    }

    /// Load files and apply the process environment
    pub fn load(&self) -> Result<Config, ConfigError> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    pub fn load_with_env(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Config, ConfigError> {
        let mut table = toml::Table::new();

        if let Some(path) = &self.global_path {
            if let Some(global) = read_table(path, false)? {
                merge_tables(&mut table, global);
            }
        }

        if let Some(path) = &self.project_path {
            if let Some(project) = read_table(path, self.project_required)? {
                merge_tables(&mut table, project);
            }
        }

        let mut config: Config =
            toml::Value::Table(table)
                .try_into()
                .map_err(|source| ConfigError::Parse {
                    path: self
                        .project_path
                        .clone()
                        .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE)),
                    source,
                })?;

        config.merge_env(lookup);
        config.validate()?;
        Ok(config)
    }
}

fn read_table(path: &Path, required: bool) -> Result<Option<toml::Table>, ConfigError> {
    if !path.exists() {
        return if required {
            Err(ConfigError::NotFound(path.to_path_buf()))
        } else {
            Ok(None)
        };
    }

    debug!(path = %path.display(), "Loading configuration file");
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let table = toml::from_str::<toml::Table>(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(table))
}

/// Recursively overlay `overlay` onto `base`; nested tables merge, other values replace
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
