//! Config loading and field lookup.

use super::model::Configuration;
use crate::error::{FactoryError, Result};
use serde::de::Error as _;
use serde_json::Value;
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

impl Configuration {
    /// Load the configuration from a JSON file.
    ///
    /// # Returns
    ///
    /// * `Ok(Configuration)` - Successfully parsed config
    /// * `Err(FactoryError::Io)` - The file could not be opened or read
    /// * `Err(FactoryError::ConfigParse)` - The content is not a valid config object
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| FactoryError::io("open config", path, e))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| FactoryError::io("read config", path, e))?;

        let config = Self::from_json(&content).map_err(|source| FactoryError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            path = %path.display(),
            extra_keys = config.extra.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Parse a configuration from JSON text.
    ///
    /// Only the first JSON value is decoded; anything after it is ignored.
    /// That value must be an object or `null`, which yields the zero config.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let first = serde_json::Deserializer::from_str(json)
            .into_iter::<Option<Self>>()
            .next()
            .ok_or_else(|| serde_json::Error::custom("no JSON value found"))??;
        Ok(first.unwrap_or_default())
    }

    /// Return this configuration with `Package` replaced.
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Resolve a field path such as `["Count"]` or `["Dims", "Width"]`.
    ///
    /// The first segment names a typed field or an extra key; each further
    /// segment descends into a JSON object. Returns `None` when any segment
    /// does not resolve.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<Cow<'_, Value>> {
        let (first, rest) = path.split_first()?;

        let root = match first.as_ref() {
            "Package" => return scalar(rest, Value::from(self.package.as_str())),
            "Count" => return scalar(rest, Value::from(self.count)),
            "Material" => return scalar(rest, Value::from(self.material.as_str())),
            other => self.extra.get(other)?,
        };

        rest.iter()
            .try_fold(root, |value, segment| value.get(segment.as_ref()))
            .map(Cow::Borrowed)
    }
}

/// Typed fields are scalars; a path that continues past one never resolves.
fn scalar<S>(rest: &[S], value: Value) -> Option<Cow<'static, Value>> {
    rest.is_empty().then_some(Cow::Owned(value))
}
