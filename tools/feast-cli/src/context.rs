//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use feast_commerce::cart::Pricing;
use feast_commerce::catalog::{Catalog, Restaurant};
use feast_commerce::ids::RestaurantId;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names looked up from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["feast.toml", ".feast.toml", "feast.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory the catalog path is relative to.
    pub config_dir: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_dir) = if let Some(path) = config_path {
            let dir = Path::new(path)
                .parent()
                .map(|p| cwd.join(p))
                .unwrap_or_else(|| cwd.clone());
            (CliConfig::load(path)?, dir)
        } else {
            Self::find_config(&cwd).unwrap_or_else(|| (CliConfig::default(), cwd.clone()))
        };

        Ok(Self {
            config,
            output,
            cwd,
            config_dir,
        })
    }

    /// First readable config in `start` or any of its parents.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        start.ancestors().find_map(|dir| {
            CONFIG_NAMES.iter().find_map(|name| {
                let candidate = dir.join(name);
                let config = CliConfig::load(candidate.to_str()?).ok()?;
                Some((config, dir.to_path_buf()))
            })
        })
    }

    /// Resolve a path relative to the config file's directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        // `join` keeps absolute paths as they are.
        self.config_dir.join(path)
    }

    /// Pricing rules from the `[pricing]` section.
    pub fn pricing(&self) -> Result<Pricing> {
        self.config
            .pricing
            .build()
            .context("Invalid [pricing] configuration")
    }

    /// Load the configured catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        let path = self.config.catalog.path.as_deref().context(
            "No catalog configured. Set [catalog] path in feast.toml or run `feast config init`.",
        )?;
        let path = self.resolve_path(path);
        self.output
            .debug(&format!("Loading catalog from {}", path.display()));
        Catalog::load(&path).with_context(|| format!("Failed to load catalog: {}", path.display()))
    }
}

/// Look up a restaurant by its catalog id, as written.
pub fn find_restaurant<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a Restaurant> {
    Ok(catalog.restaurant(&RestaurantId::new(id.trim()))?)
}
