use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Environment variable naming the store root.
pub const DATA_DIR_ENV: &str = "MOUND_DATA_DIR";

/// Store root configuration.
///
/// The default value is *unconfigured*: there is no fallback scratch
/// directory, and [`StoreConfig::root`] fails until a root is set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base directory under which all record directories are sharded.
    pub root: Option<PathBuf>,
}

impl StoreConfig {
    /// Configuration rooted at `root`. Fails on an empty path.
    pub fn new(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        validate_root(&root)?;
        Ok(Self { root: Some(root) })
    }

    /// An explicitly unconfigured value.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Parse a TOML document such as `root = "/var/lib/mound"`.
    pub fn from_toml_str(s: &str) -> StoreResult<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| StoreError::Serialization(e.to_string()))?;
        if let Some(ref root) = config.root {
            validate_root(root)?;
        }
        Ok(config)
    }

    /// Read the root from `MOUND_DATA_DIR`. An unset variable yields an
    /// unconfigured value; a set but empty one is an error.
    pub fn from_env() -> StoreResult<Self> {
        Self::from_env_value(std::env::var_os(DATA_DIR_ENV))
    }

    fn from_env_value(value: Option<OsString>) -> StoreResult<Self> {
        match value {
            Some(value) => Self::new(PathBuf::from(value)),
            None => Ok(Self::unconfigured()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.root.is_some()
    }

    /// The configured root, or [`StoreError::Unconfigured`].
    pub fn root(&self) -> StoreResult<&Path> {
        self.root.as_deref().ok_or(StoreError::Unconfigured)
    }
}

pub(crate) fn validate_root(root: &Path) -> StoreResult<()> {
    if root.as_os_str().is_empty() {
        return Err(StoreError::InvalidArgument(
            "store root may not be an empty path".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unconfigured() {
        let config = StoreConfig::default();
        assert!(!config.is_configured());
        assert!(matches!(config.root(), Err(StoreError::Unconfigured)));
    }

    #[test]
    fn new_sets_root() {
        let config = StoreConfig::new("/srv/mound").unwrap();
        assert_eq!(config.root().unwrap(), Path::new("/srv/mound"));
    }

    #[test]
    fn empty_root_rejected() {
        let err = StoreConfig::new("").unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
    }

    #[test]
    fn toml_with_root() {
        let config = StoreConfig::from_toml_str("root = \"/data/mound\"\n").unwrap();
        assert_eq!(config.root().unwrap(), Path::new("/data/mound"));
    }

    #[test]
    fn toml_without_root_is_unconfigured() {
        let config = StoreConfig::from_toml_str("").unwrap();
        assert!(!config.is_configured());
    }

    #[test]
    fn toml_empty_root_rejected() {
        let err = StoreConfig::from_toml_str("root = \"\"").unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
    }

    #[test]
    fn toml_malformed() {
        let err = StoreConfig::from_toml_str("root = ").unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn env_value_handling() {
        assert!(!StoreConfig::from_env_value(None).unwrap().is_configured());
        let config = StoreConfig::from_env_value(Some("/tmp/m".into())).unwrap();
        assert_eq!(config.root().unwrap(), Path::new("/tmp/m"));
        assert!(StoreConfig::from_env_value(Some(OsString::new())).is_err());
    }
}
