//! Profile builder for flexible profile loading

use crate::{ConfigError, ConfigResult, Profile};
use config::{ConfigBuilder as ConfigBuilderInner, Environment, File, FileFormat};
use std::path::{Path, PathBuf};

/// Profile builder for loading a profile from multiple sources
///
/// Later sources override earlier ones; environment variables override
/// everything else.
#[derive(Debug)]
pub struct ProfileBuilder {
    inner: ConfigBuilderInner<config::builder::DefaultState>,
    sources: Vec<ProfileSource>,
    env_separator: String,
}

#[derive(Debug, Clone)]
enum ProfileSource {
    File { path: PathBuf, format: FileFormat },
    Environment { prefix: String },
}

impl ProfileBuilder {
    /// Create a new profile builder
    pub fn new() -> Self {
        Self {
            inner: config::Config::builder(),
            sources: Vec::new(),
            env_separator: "__".to_string(),
        }
    }

    /// Add a profile file source, detecting the format from the extension
    pub fn add_source_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = Self::detect_format(&path);
        self.sources.push(ProfileSource::File { path, format });
        self
    }

    /// Add environment variable source with prefix
    pub fn add_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.sources.push(ProfileSource::Environment {
            prefix: prefix.into(),
        });
        self
    }

    /// Set environment variable separator (default: "__")
    pub fn env_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.env_separator = separator.into();
        self
    }

    /// Build and validate the profile
    pub fn build(mut self) -> ConfigResult<Profile> {
        let defaults = Profile::default();
        let defaults_value = serde_json::to_value(&defaults)
            .map_err(|e| ConfigError::other(format!("Failed to serialize defaults: {}", e)))?;
        self.inner = self
            .inner
            .add_source(config::Config::try_from(&defaults_value)?);

        for source in &self.sources {
            match source {
                ProfileSource::File { path, format } => {
                    if path.exists() {
                        self.inner = self
                            .inner
                            .add_source(File::from(path.clone()).format(*format));
                    }
                }
                ProfileSource::Environment { prefix } => {
                    self.inner = self.inner.add_source(
                        Environment::with_prefix(prefix).separator(&self.env_separator),
                    );
                }
            }
        }

        let config = self.inner.build()?;
        let profile: Profile = config.try_deserialize()?;

        Self::validate(&profile)?;
        Ok(profile)
    }

    /// Detect file format from extension
    fn detect_format(path: &Path) -> FileFormat {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("toml") => FileFormat::Toml,
            // Profiles are historically JSON
            _ => FileFormat::Json,
        }
    }

    /// Validate the profile, failing fast on missing or inconsistent fields
    fn validate(profile: &Profile) -> ConfigResult<()> {
        if profile.server.trim().is_empty() {
            return Err(ConfigError::missing_required("server"));
        }
        if profile.dest_path.as_os_str().is_empty() {
            return Err(ConfigError::missing_required("dest_path"));
        }
        if profile.snapshot_path.as_os_str().is_empty() {
            return Err(ConfigError::missing_required("snapshot_path"));
        }
        if profile.source_path.as_os_str().is_empty() {
            return Err(ConfigError::missing_required("source_path"));
        }
        if profile.dest_path == profile.snapshot_path {
            return Err(ConfigError::validation(
                "dest_path and snapshot_path must be distinct trees",
            ));
        }
        if profile.formats.video.is_empty() {
            return Err(ConfigError::invalid_value(
                "formats.video",
                "at least one video extension is required",
            ));
        }
        for root in &profile.paths {
            if root.source.trim().is_empty() {
                return Err(ConfigError::invalid_value(
                    "paths.source",
                    "source root name must not be empty",
                ));
            }
        }
        if profile.sync.enabled {
            if profile.sync.path.trim().is_empty() {
                return Err(ConfigError::missing_required("sync.path"));
            }
            if profile.sync.drive.trim().is_empty() {
                return Err(ConfigError::missing_required("sync.drive"));
            }
        }
        Ok(())
    }
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
