//! `bonfire config ...` and `bonfire cache ...`. None of these talk to the backend.

use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bonfire_api::{ApiConfig, ConfigSource, config_path};
use bonfire_core::Variant;
use bonfire_lib::FileStorage;
use bonfire_lib::settings::{self, load_variant_from, resolve_variant, settings_path};

use crate::error::CliError;

use super::display::log_done;

fn log_file_status(label: &str, path: Option<&Path>) {
    match path {
        Some(p) if p.exists() => {
            log::info!(
                "  {}: {} {}",
                label,
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  {}: {} {}",
                label,
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  {}: {}",
                label,
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
}

/// Show the effective configuration and where each value came from.
pub(crate) fn run_config_show(api_url: Option<&str>, variant: Option<Variant>) -> Result<(), CliError> {
    let (mut config, mut sources) = ApiConfig::load()?;
    if let Some(url) = api_url {
        config = config.with_base_url(url)?;
        sources.base_url = ConfigSource::Override;
    }

    log::info!(
        "{}",
        "Bonfire Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    log_file_status("Config file  ", config_path().as_deref());
    let settings = settings_path();
    log_file_status("Settings file", Some(&settings));
    log::info!("");

    log::info!(
        "  {:<10} {} {}",
        "base_url",
        config.base_url.if_supports_color(Stdout, |t| t.bold()),
        format!("({})", sources.base_url).if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!(
        "  {:<10} {}s {}",
        "timeout",
        config.timeout.as_secs(),
        format!("({})", sources.timeout).if_supports_color(Stdout, |t| t.dimmed()),
    );

    let variant_source = if variant.is_some() {
        "command line"
    } else if load_variant_from(&settings).is_some() {
        "settings file"
    } else {
        "default"
    };
    log::info!(
        "  {:<10} {} {}",
        "variant",
        resolve_variant(variant)
            .display_name()
            .if_supports_color(Stdout, |t| t.bold()),
        format!("({})", variant_source).if_supports_color(Stdout, |t| t.dimmed()),
    );

    if let Some(contents) = settings::load_settings_string() {
        log::info!("");
        log::info!("{}", "settings.toml:".if_supports_color(Stdout, |t| t.dimmed()));
        for line in contents.lines() {
            log::info!("  {}", line);
        }
    }
    Ok(())
}

pub(crate) fn run_config_path() -> Result<(), CliError> {
    let path = config_path().ok_or_else(|| CliError::other("Could not determine config directory"))?;
    log::info!("{}", path.display());
    Ok(())
}

pub(crate) fn run_config_set_url(url: &str) -> Result<(), CliError> {
    let path = bonfire_api::config::save_base_url(url)?;
    log_done(&format!("Backend URL saved to {}", path.display()));
    Ok(())
}

pub(crate) fn run_config_set_variant(variant: Variant) -> Result<(), CliError> {
    let path = settings::save_variant(Some(variant))?;
    log_done(&format!(
        "Default storefront set to {} in {}",
        variant.display_name(),
        path.display()
    ));
    Ok(())
}

/// Delete the session file one-shot commands cache their state in.
pub(crate) fn run_cache_clear() -> Result<(), CliError> {
    let storage = FileStorage::default_location()?;
    storage.clear()?;
    log_done(&format!("Cleared {}", storage.path().display()));
    Ok(())
}
