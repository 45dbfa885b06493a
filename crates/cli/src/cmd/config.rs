//! Configuration management command
//!
//! Provides CLI interface to view and edit qnav configuration.

use crate::system_config::{self, SystemConfig, MAX_DEBOUNCE_MS};
use anyhow::{Context, Result};
use navbar::SortFilter;
use owo_colors::OwoColorize;

/// List all configuration values
pub async fn run_list() -> Result<()> {
    let config = system_config::load()?;
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    println!("{}", "qnav Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), config_path.display().dimmed());

    println!("{}", "[search]".yellow());
    println!(
        "  {} = {} {}",
        "debounce_ms".cyan(),
        config.search.debounce_ms,
        format!("({}ms quiet period)", config.search.debounce_ms).dimmed()
    );

    println!("\n{}", "[navigation]".yellow());
    println!(
        "  {} = {}",
        "redirect_to_login".cyan(),
        config.navigation.redirect_to_login
    );
    println!("  {} = {}", "base_url".cyan(), config.navigation.base_url);
    println!(
        "  {} = {}",
        "default_filter".cyan(),
        config.navigation.default_filter
    );

    println!("\n{}", "Valid Ranges:".bold());
    println!("  debounce_ms: 0-{}", MAX_DEBOUNCE_MS);
    println!(
        "  default_filter: {}",
        SortFilter::ALL.map(|f| f.value()).join(", ")
    );

    Ok(())
}

fn get_value(config: &SystemConfig, key: &str) -> Result<String> {
    let value = match key {
        "search.debounce_ms" => config.search.debounce_ms.to_string(),
        "navigation.redirect_to_login" => config.navigation.redirect_to_login.to_string(),
        "navigation.base_url" => config.navigation.base_url.clone(),
        "navigation.default_filter" => config.navigation.default_filter.to_string(),
        _ => anyhow::bail!(
            "Unknown config key: {}. Use 'qnav config --list' to see available keys.",
            key
        ),
    };
    Ok(value)
}

fn set_value(config: &mut SystemConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "search.debounce_ms" => {
            config.search.debounce_ms = value
                .parse()
                .context("Invalid value: must be an integer")?;
        }
        "navigation.redirect_to_login" => {
            config.navigation.redirect_to_login = value
                .parse()
                .context("Invalid value: must be 'true' or 'false'")?;
        }
        "navigation.base_url" => {
            config.navigation.base_url = value.to_string();
        }
        "navigation.default_filter" => {
            config.navigation.default_filter = value.parse()?;
        }
        _ => anyhow::bail!(
            "Unknown config key: {}. Use 'qnav config --list' to see available keys.",
            key
        ),
    }

    // Validate before saving
    config.validate().context("Invalid configuration value")
}

/// Get a single configuration value
pub async fn run_get(key: &str) -> Result<()> {
    let config = system_config::load()?;
    println!("{}", get_value(&config, key)?);
    Ok(())
}

/// Set a configuration value
pub async fn run_set(key: &str, value: &str) -> Result<()> {
    let mut config = system_config::load()?;
    set_value(&mut config, key, value)?;
    system_config::save(&config)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

/// Show the config file path and optionally create it
pub async fn run_path(create: bool) -> Result<()> {
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    if create && !config_path.exists() {
        system_config::init_if_missing()?;
        println!("{} Created config file at: {}", "✓".green(), config_path.display());
    } else if config_path.exists() {
        println!("{}", config_path.display());
    } else {
        println!("{}", config_path.display());
        println!("{}", "File does not exist. Use --create to create it.".yellow());
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    print!("{}", system_config::example_config());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_known_keys() {
        let config = SystemConfig::default();
        assert_eq!(get_value(&config, "search.debounce_ms").unwrap(), "500");
        assert_eq!(
            get_value(&config, "navigation.default_filter").unwrap(),
            "latest-created"
        );
        assert!(get_value(&config, "search.nope").is_err());
    }

    #[test]
    fn test_set_validates() {
        let mut config = SystemConfig::default();

        set_value(&mut config, "navigation.default_filter", "month").unwrap();
        assert_eq!(config.navigation.default_filter, SortFilter::VotedLastMonth);

        assert!(set_value(&mut config, "search.debounce_ms", "-1").is_err());
        assert!(set_value(&mut config, "search.debounce_ms", "soon").is_err());
        assert!(set_value(&mut config, "navigation.default_filter", "oldest").is_err());

        set_value(&mut config, "search.debounce_ms", "0").unwrap();
        assert_eq!(config.search.debounce_ms, 0);
    }
}
