//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use shop_data::FetchClient;
use shop_observability::{StructuredLogger, ViewId};
use shop_pdp::{HttpProductApi, Notifier, ProductDetailView};

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["shop.toml", ".shop.toml", "shop.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Build a product detail view for `page_path`, wired to the storefront.
    pub fn product_view(&self, page_path: &str) -> Result<ProductDetailView> {
        let logging = &self.config.logging;
        let logger = StructuredLogger::new(ViewId::generate())
            .with_component("product-detail")
            .with_route(page_path)
            .with_format(logging.log_format()?)
            .with_min_level(logging.log_level()?);

        let client = FetchClient::new().with_base_url(self.config.pdp.api_base.clone());
        let notifier: Arc<dyn Notifier> = Arc::new(self.output.clone());

        Ok(
            ProductDetailView::builder(Arc::new(HttpProductApi::new(client)), page_path)
                .notifier(notifier)
                .logger(logger)
                .config(self.config.pdp.clone())
                .build(),
        )
    }
}
