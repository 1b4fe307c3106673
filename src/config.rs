//! Configuration loading: CLI flags layered over a config file layered over
//! built-in defaults, the same default/file/env layering this crate's
//! lineage uses for its own `DatabaseConfiguration`.

use serde::{Deserialize, Serialize};
use structopt::StructOpt;

use crate::error::{Error, Result};
use crate::types::{CachingKind, HierarchyKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub hierarchy_type: HierarchyKind,
    pub caching_type: CachingKind,
    pub size_type: u8,
    pub latency_type: u8,
    pub migration_frequency: u32,
    /// 0 means "replay the entire trace".
    pub operation_count: u64,
    /// Empty means no-op run (nothing to replay).
    pub file_name: String,
    pub verbose: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            hierarchy_type: HierarchyKind::DramNvmSsd,
            caching_type: CachingKind::Fifo,
            size_type: 1,
            latency_type: 1,
            migration_frequency: 3,
            operation_count: 0,
            file_name: String::new(),
            verbose: false,
        }
    }
}

impl Configuration {
    pub fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.size_type) {
            return Err(Error::Configuration(format!(
                "size_type must be 1..=5, got {}",
                self.size_type
            )));
        }
        if !(1..=5).contains(&self.latency_type) {
            return Err(Error::Configuration(format!(
                "latency_type must be 1..=5, got {}",
                self.latency_type
            )));
        }
        if self.migration_frequency == 0 {
            return Err(Error::Configuration(
                "migration_frequency must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Mirrors `bectl`'s CLI conventions: one flag per configuration field, all
/// with defaults so a bare invocation is itself a valid configuration.
#[derive(Debug, StructOpt)]
#[structopt(name = "tiersim", about = "Multi-tier storage machine simulator")]
pub struct Cli {
    #[structopt(short = "a", long, default_value = "dram-nvm-ssd")]
    pub hierarchy_type: String,

    #[structopt(short = "c", long, default_value = "fifo")]
    pub caching_type: String,

    #[structopt(short = "s", long, default_value = "1")]
    pub size_type: u8,

    #[structopt(short = "l", long, default_value = "1")]
    pub latency_type: u8,

    #[structopt(short = "m", long, default_value = "3")]
    pub migration_frequency: u32,

    #[structopt(short = "o", long, default_value = "0")]
    pub operation_count: u64,

    #[structopt(short = "f", long, default_value = "")]
    pub file_name: String,

    /// Path to an optional JSON/YAML configuration file, merged beneath the
    /// flags above and above the built-in defaults.
    #[structopt(long)]
    pub config_file: Option<std::path::PathBuf>,

    #[structopt(short = "v", long)]
    pub verbose: bool,
}

impl Cli {
    /// The CLI's own view of the configuration, independent of any config
    /// file or environment layer — used as the final, highest-precedence
    /// layer in [`load`].
    fn as_partial(&self) -> Result<Configuration> {
        Ok(Configuration {
            hierarchy_type: self.hierarchy_type.parse().map_err(Error::Configuration)?,
            caching_type: self.caching_type.parse().map_err(Error::Configuration)?,
            size_type: self.size_type,
            latency_type: self.latency_type,
            migration_frequency: self.migration_frequency,
            operation_count: self.operation_count,
            file_name: self.file_name.clone(),
            verbose: self.verbose,
        })
    }
}

#[cfg(feature = "figment_config")]
pub fn load(cli: &Cli) -> Result<Configuration> {
    use figment::providers::{Env, Format, Json, Serialized, Yaml};
    use figment::Figment;

    let mut figment = Figment::new().merge(Serialized::defaults(Configuration::default()));

    if let Some(path) = &cli.config_file {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        figment = match extension {
            "json" => figment.merge(Json::file(path)),
            _ => figment.merge(Yaml::file(path)),
        };
    }

    figment = figment
        .merge(Env::prefixed("MACHINE_"))
        .merge(Serialized::defaults(cli.as_partial()?));

    let config: Configuration = figment
        .extract()
        .map_err(|e| Error::Configuration(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

#[cfg(not(feature = "figment_config"))]
pub fn load(cli: &Cli) -> Result<Configuration> {
    let config = cli.as_partial()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_validates() {
        assert!(Configuration::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_migration_frequency() {
        let mut config = Configuration::default();
        config.migration_frequency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_size_type() {
        let mut config = Configuration::default();
        config.size_type = 9;
        assert!(config.validate().is_err());
    }
}
