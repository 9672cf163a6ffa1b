//! config show / validate

use anyhow::Context as _;

use temizyuva_core::Config;

/// Print the resolved configuration as TOML
pub fn show(config: &Config) -> anyhow::Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    println!("{rendered}");
    println!("# session file: {}", config.session.token_path().display());
    Ok(())
}

/// Validate the configuration; loading already did, this reports it
pub fn validate(config: &Config) -> anyhow::Result<()> {
    config.validate()?;
    println!("Configuration is valid (backend: {}).", config.api.base_url());
    Ok(())
}
