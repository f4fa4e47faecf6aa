use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::parse_config;

/// Settings of a data source instance as persisted by the host.
///
/// `json_data` holds the plain options which are readable by the frontend,
/// `secure_json_data` holds secrets which only ever reach the backend.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceConfig {
    /// The unique ID of the data source
    #[serde(default)]
    pub uid: String,
    /// The display name of the data source
    pub name: Option<String>,
    /// The plugin type of the data source
    #[serde(default)]
    pub r#type: String,
    /// Connector specific options
    #[serde(default = "empty_mapping")]
    pub json_data: serde_yaml::Value,
    /// Secret options, never returned to the frontend
    #[serde(default)]
    pub secure_json_data: HashMap<String, String>,
}

fn empty_mapping() -> serde_yaml::Value {
    serde_yaml::Value::Mapping(Default::default())
}

impl DataSourceConfig {
    pub fn new(json_data: serde_yaml::Value, secure_json_data: HashMap<String, String>) -> Self {
        Self {
            uid: String::new(),
            name: None,
            r#type: String::new(),
            json_data,
            secure_json_data,
        }
    }

    /// Parses the data source settings from a yaml document
    pub fn parse(conf_str: &str) -> Result<Self> {
        serde_yaml::from_value(parse_config(conf_str)?)
            .context("Failed to parse data source settings")
    }

    /// Reports which secrets are configured, without exposing their values
    pub fn secure_json_fields(&self) -> BTreeMap<String, bool> {
        self.secure_json_data
            .iter()
            .map(|(k, v)| (k.clone(), !v.is_empty()))
            .collect()
    }

    /// Gets a configured secret, treating empty values as unset
    pub fn secret(&self, key: &str) -> Option<&str> {
        self.secure_json_data
            .get(key)
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }
}
