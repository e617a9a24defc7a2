//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;
    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.storage_dir().display().to_string());
    ctx.output.kv("cart_key", &config.storage.cart_key);
    ctx.output.kv("wishlist_key", &config.storage.wishlist_key);

    ctx.output.info("[pricing]");
    ctx.output.kv("currency", config.pricing.currency.code());
    ctx.output.kv(
        "free_shipping_threshold",
        &config.pricing.free_shipping_threshold.to_string(),
    );
    ctx.output.kv("shipping_fee", &config.pricing.shipping_fee.to_string());

    ctx.output.info("[catalog]");
    ctx.output.kv("path", config.catalog.path.as_deref().unwrap_or("(demo)"));
    ctx.output.kv("page_size", &config.catalog.page_size.to_string());

    if !config.coupons.is_empty() {
        ctx.output.info("Coupons:");
        for coupon in &config.coupons {
            ctx.output.list_item(&coupon.code);
        }
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = collect_issues(ctx);

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

/// Config checks plus loading the catalog against the pricing currency.
fn collect_issues(ctx: &Context) -> (Vec<String>, Vec<String>) {
    let (mut errors, warnings) = ctx.config.check();
    if let Err(e) = ctx.catalog() {
        let source = ctx.config.catalog.path.as_deref().unwrap_or("(demo)");
        errors.push(format!("catalog '{}' is unusable: {:#}", source, e));
    }
    (errors, warnings)
}
