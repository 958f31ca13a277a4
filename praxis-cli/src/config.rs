//! Resolves the tax-year configuration for a run.
//!
//! A configuration comes either from a built-in preset selected by year or
//! from a TOML file with the same layout as [`TaxYearConfig`]. Both are
//! validated before any calculator sees them.

use std::{fs, path::Path, path::PathBuf};

use praxis_core::{TaxConfigError, TaxYearConfig};
use thiserror::Error;
use tracing::{debug, info};

/// Tax year used when neither `--year` nor a config file is given.
pub const DEFAULT_TAX_YEAR: i32 = 2024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no built-in configuration for tax year {year} (supported: {supported:?})")]
    UnsupportedYear { year: i32, supported: [i32; 2] },

    #[error("config file is for tax year {file_year}, but {requested} was requested")]
    YearMismatch { file_year: i32, requested: i32 },

    #[error("invalid configuration: {0}")]
    Invalid(#[from] TaxConfigError),
}

/// Parses and validates a configuration from TOML text.
pub fn parse_config(
    path: &Path,
    contents: &str,
) -> Result<TaxYearConfig, ConfigError> {
    let config: TaxYearConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads and validates a configuration file.
pub fn load_config_file(path: &Path) -> Result<TaxYearConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(path, &contents)?;
    info!(path = %path.display(), tax_year = config.tax_year, "Loaded tax configuration");
    Ok(config)
}

/// Resolves the configuration from the command-line options.
///
/// A file takes precedence over the presets; when both a file and a year are
/// given, they must agree.
pub fn resolve_config(
    year: Option<i32>,
    file: Option<&Path>,
) -> Result<TaxYearConfig, ConfigError> {
    if let Some(path) = file {
        let config = load_config_file(path)?;
        return match year {
            Some(requested) if requested != config.tax_year => Err(ConfigError::YearMismatch {
                file_year: config.tax_year,
                requested,
            }),
            _ => Ok(config),
        };
    }

    let year = year.unwrap_or(DEFAULT_TAX_YEAR);
    let config = TaxYearConfig::for_year(year).ok_or(ConfigError::UnsupportedYear {
        year,
        supported: TaxYearConfig::SUPPORTED_YEARS,
    })?;
    debug!(tax_year = year, "Using built-in tax configuration");
    Ok(config)
}
