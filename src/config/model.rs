//! Configuration struct definition.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// In-memory form of the generator's JSON config file.
///
/// Field names on the wire are case-sensitive and PascalCase (`Package`,
/// `Count`, `Material`). Any other top-level key is collected into
/// [`Configuration::extra`] and can be referenced from templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Configuration {
    /// Package name of the generated file. Always replaced by the
    /// `--package` argument before rendering.
    #[serde(default, deserialize_with = "null_as_default")]
    pub package: String,

    /// Number of items.
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: i64,

    /// What the items are made of.
    #[serde(default, deserialize_with = "null_as_default")]
    pub material: String,

    /// User-defined template variables, keyed exactly as written in the file.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Treat an explicit JSON `null` the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
