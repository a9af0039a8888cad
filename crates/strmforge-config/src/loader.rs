//! Profile loader utilities

use crate::{ConfigError, ConfigResult, Profile, ProfileBuilder};
use std::path::{Path, PathBuf};

/// Environment variable naming the profile file to load
pub const PROFILE_ENV: &str = "STRMFORGE_PROFILE";

/// Environment variable prefix for profile field overrides
pub const ENV_PREFIX: &str = "STRMFORGE";

/// Profile loader with common loading patterns
pub struct ProfileLoader;

impl ProfileLoader {
    /// Load the profile from the default location
    ///
    /// The location is taken from `STRMFORGE_PROFILE` when set, otherwise the
    /// first existing file among the default candidates is used. A missing
    /// profile file is fatal.
    pub fn load_default() -> ConfigResult<Profile> {
        if let Ok(path) = std::env::var(PROFILE_ENV) {
            return Self::load_from_file(path);
        }

        let path = Self::get_default_profile_paths()
            .into_iter()
            .find(|path| path.exists())
            .ok_or_else(|| ConfigError::Io {
                path: PathBuf::from("profile.json"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "Profile not found"),
            })?;

        Self::load_from_file(path)
    }

    /// Load the profile from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Profile> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "Profile not found"),
            });
        }

        ProfileBuilder::new()
            .add_source_file(path)
            .add_env_prefix(ENV_PREFIX)
            .build()
    }

    /// Save a profile to a file, picking the format from the extension
    pub fn save_to_file<P: AsRef<Path>>(profile: &Profile, path: P) -> ConfigResult<()> {
        let path = path.as_ref();

        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::to_string(profile)?,
            Some("toml") => {
                toml::to_string_pretty(profile).map_err(|e| ConfigError::Serialization {
                    message: e.to_string(),
                })?
            }
            _ => serde_json::to_string_pretty(profile)?,
        };

        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Generate a default profile file
    pub fn generate_default_profile<P: AsRef<Path>>(path: P) -> ConfigResult<()> {
        let profile = Profile::default();
        Self::save_to_file(&profile, path)
    }

    /// Default profile file locations in order of preference
    fn get_default_profile_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from("profile.json"),
            PathBuf::from("profile.yaml"),
            PathBuf::from("profile.toml"),
            PathBuf::from("strmforge.json"),
            PathBuf::from("strmforge.yaml"),
            PathBuf::from("strmforge.toml"),
        ]
    }
}
