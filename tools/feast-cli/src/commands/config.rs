//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { catalog, force } => init_config(&catalog, force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let pricing = &ctx.config.pricing;
    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output.kv("currency", pricing.currency.code());
    ctx.output.kv("delivery_fee", &format!("{:.2}", pricing.delivery_fee));
    ctx.output.kv("pickup_fee", &format!("{:.2}", pricing.pickup_fee));
    for promo in &pricing.promos {
        let rule = match (promo.percent, promo.amount) {
            (Some(percent), _) => format!("{}% off", percent),
            (None, Some(amount)) => format!("{:.2} off", amount),
            (None, None) => "no discount".to_string(),
        };
        ctx.output.list_item(&format!("{}: {}", promo.code, rule));
    }

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv(
        "path",
        ctx.config.catalog.path.as_deref().unwrap_or("(not set)"),
    );

    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output.kv(
        "submit_delay_ms",
        &ctx.config.checkout.submit_delay_ms.to_string(),
    );

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", ctx.config.logging.level.as_directive());
    ctx.output.kv("format", ctx.config.logging.format.as_str());

    Ok(())
}

async fn init_config(catalog: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("feast.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config(catalog))?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    if !ctx.cwd.join(catalog).exists() {
        ctx.output.warn(&format!("Catalog file {} does not exist yet", catalog));
    }

    Ok(())
}

/// Problems found by `feast config validate`.
#[derive(Default)]
struct Report {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Report {
    fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn check_pricing(&mut self, ctx: &Context) {
        match ctx.pricing() {
            Ok(pricing) if pricing.promos.is_empty() => {
                self.warning("pricing.promos is empty; no promo code will be accepted")
            }
            Ok(_) => {}
            Err(e) => self.error(format!("{e:#}")),
        }
    }

    fn check_catalog(&mut self, ctx: &Context) {
        if ctx.config.catalog.path.is_none() {
            return self.error("catalog.path is required");
        }
        match ctx.catalog() {
            Ok(catalog) if catalog.restaurants.is_empty() => {
                self.warning("catalog has no restaurants")
            }
            Ok(catalog) => ctx.output.debug(&format!(
                "Catalog: {} restaurant(s), cuisines: {}",
                catalog.restaurants.len(),
                catalog.cuisines().join(", ")
            )),
            Err(e) => self.error(format!("{e:#}")),
        }
    }

    fn check_checkout(&mut self, ctx: &Context) {
        let delay = ctx.config.checkout.submit_delay_ms;
        if delay > 10_000 {
            self.warning(format!(
                "checkout.submit_delay_ms is {delay}ms; orders will feel slow"
            ));
        }
    }
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut report = Report::default();
    report.check_pricing(ctx);
    report.check_catalog(ctx);
    report.check_checkout(ctx);

    report.errors.iter().for_each(|e| ctx.output.error(e));
    report.warnings.iter().for_each(|w| ctx.output.warn(w));

    match (report.errors.len(), report.warnings.len()) {
        (0, 0) => ctx.output.success("Configuration is valid"),
        (0, n) => ctx
            .output
            .success(&format!("Configuration is valid ({n} warning(s))")),
        (n, _) => bail!("Configuration has {n} error(s)"),
    }
    Ok(())
}
