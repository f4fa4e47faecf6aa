use std::{fs, path::Path};

use duckds_core::{
    config::DataSourceConfig,
    err::{Context, Result},
};
use duckds_logging::info;
use once_cell::sync::OnceCell;

/// The default location of the data source settings
pub const DEFAULT_CONFIG_PATH: &str = "/etc/duckds/datasource.yml";

static DATASOURCE_CONFIG: OnceCell<DataSourceConfig> = OnceCell::new();

/// Loads the data source settings from a yaml file
pub fn load_conf(path: &Path) -> Result<DataSourceConfig> {
    let conf_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

    DataSourceConfig::parse(&conf_str)
}

/// Initialises the global data source settings
pub fn init_conf(path: &Path) -> Result<&'static DataSourceConfig> {
    info!("Loading configuration from {}", path.display());

    DATASOURCE_CONFIG.get_or_try_init(|| load_conf(path))
}

/// Gets the global data source settings
pub fn conf() -> Result<&'static DataSourceConfig> {
    DATASOURCE_CONFIG
        .get()
        .context("Tried to retrieve data source config before initialised")
}
