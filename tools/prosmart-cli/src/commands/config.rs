//! Configuration management commands.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use prosmart_data::BASE_URL_ENV;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output.kv("timeout_secs", &ctx.config.api.timeout_secs.to_string());
    ctx.output
        .kv("min_loading_ms", &ctx.config.api.min_loading_ms.to_string());
    ctx.output.kv(
        "detail_min_loading_ms",
        &ctx.config.api.detail_min_loading_ms.to_string(),
    );

    ctx.output.info("");
    ctx.output.info("[display]");
    ctx.output.kv("page_size", &ctx.config.display.page_size.to_string());

    if std::env::var_os(BASE_URL_ENV).is_some() {
        ctx.output.info("");
        ctx.output
            .info(&format!("api.base_url is overridden by {}", BASE_URL_ENV));
    }

    Ok(())
}

async fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let config_path = match &ctx.config_path {
        Some(path) => path.clone(),
        None => find_config_file(&ctx.cwd)?,
    };
    let path = config_path.to_string_lossy().to_string();

    // Re-read the file so environment overrides are not written back
    let mut config = CliConfig::load(&path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Collect errors and warnings for a configuration.
fn check_config(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let base_url = &config.api.base_url;
    if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
        errors.push(format!("api.base_url '{}' must be an http(s) URL", base_url));
    } else if base_url.starts_with("http://") {
        warnings.push("api.base_url is not using https".to_string());
    }

    if config.api.timeout_secs == 0 {
        errors.push("api.timeout_secs must be greater than 0".to_string());
    }

    let ceiling_ms = config.api.timeout_secs.saturating_mul(1000);
    for (key, value) in [
        ("api.min_loading_ms", config.api.min_loading_ms),
        ("api.detail_min_loading_ms", config.api.detail_min_loading_ms),
    ] {
        if value >= ceiling_ms && ceiling_ms > 0 {
            warnings.push(format!("{} is not below the request timeout", key));
        }
    }

    if config.display.page_size == 0 {
        errors.push("display.page_size must be greater than 0".to_string());
    }

    (errors, warnings)
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => Ok(format!("\"{}\"", config.api.base_url)),
        ["api", "timeout_secs"] => Ok(config.api.timeout_secs.to_string()),
        ["api", "min_loading_ms"] => Ok(config.api.min_loading_ms.to_string()),
        ["api", "detail_min_loading_ms"] => Ok(config.api.detail_min_loading_ms.to_string()),
        ["display", "page_size"] => Ok(config.display.page_size.to_string()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => config.api.base_url = value.to_string(),
        ["api", "timeout_secs"] => config.api.timeout_secs = value.parse()?,
        ["api", "min_loading_ms"] => config.api.min_loading_ms = value.parse()?,
        ["api", "detail_min_loading_ms"] => config.api.detail_min_loading_ms = value.parse()?,
        ["display", "page_size"] => config.display.page_size = value.parse()?,
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}

fn find_config_file(cwd: &Path) -> Result<PathBuf> {
    for name in &CONFIG_FILE_NAMES {
        let path = cwd.join(name);
        if path.exists() {
            return Ok(path);
        }
    }
    bail!("No config file found. Run `prosmart config init` to create one.")
}
