//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use shop_cache::{Cache, FileBackend};
use shop_commerce::cart::CouponBook;
use shop_commerce::catalog::Catalog;
use shop_commerce::notify::Notifier;
use shop_commerce::store::{CartStore, WishlistStore};

use crate::config::{ShopConfig, CONFIG_NAMES};
use crate::output::{ConsoleNotifier, Output};

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: ShopConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (ShopConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (ShopConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PathBuf, ShopConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match ShopConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config_path, config)),
                        Err(e) => tracing::warn!(path = %config_path.display(), "Skipping config: {:#}", e),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Directory holding cart and wishlist snapshots.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// The configured catalog, or the demo catalog.
    ///
    /// Fails if the catalog is priced in a currency other than
    /// `pricing.currency`.
    pub fn catalog(&self) -> Result<Catalog> {
        let catalog = match &self.config.catalog.path {
            Some(path) => {
                let path = self.resolve_path(path);
                self.output.debug(&format!("Loading catalog from {}", path.display()));
                Catalog::from_path(&path)
                    .with_context(|| format!("Failed to load catalog: {}", path.display()))?
            }
            None => Catalog::demo().context("Failed to build demo catalog")?,
        };
        let currency = self.config.pricing.currency;
        catalog
            .ensure_currency(currency)
            .with_context(|| format!("Catalog does not match pricing.currency {}", currency.code()))?;
        Ok(catalog)
    }

    pub fn coupons(&self) -> Result<CouponBook> {
        self.config.coupon_book()
    }

    fn cache(&self) -> Result<Cache<FileBackend>> {
        let dir = self.storage_dir();
        let backend = FileBackend::open(&dir)
            .with_context(|| format!("Failed to open storage: {}", dir.display()))?;
        Ok(Cache::new(backend))
    }

    fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::new(ConsoleNotifier::new(self.output))
    }

    /// Open the persisted cart.
    pub fn cart_store(&self) -> Result<CartStore<FileBackend>> {
        Ok(CartStore::open(
            self.cache()?,
            self.config.storage.cart_key.clone(),
            self.config.pricing,
            self.notifier(),
        ))
    }

    /// Open the persisted wishlist.
    pub fn wishlist_store(&self) -> Result<WishlistStore<FileBackend>> {
        Ok(WishlistStore::open(
            self.cache()?,
            self.config.storage.wishlist_key.clone(),
            self.notifier(),
        ))
    }
}
