//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use vault_commerce::catalog::Catalog;
use vault_commerce::config::StorefrontConfig;
use vault_commerce::Storefront;
use vault_store::Storage;

use crate::config::{self, CONFIG_NAMES};
use crate::output::Output;

/// Catalog file used when the config names none.
const DEFAULT_CATALOG: &str = "data/products.json";
/// Data directory used when neither flag nor config names one.
const DEFAULT_DATA_DIR: &str = ".vault";

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// File the config was read from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    data_dir: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, data_dir: Option<PathBuf>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve(&cwd, Path::new(path));
            (config::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (StorefrontConfig::default(), None),
            }
        };

        if let Some(ref path) = config_path {
            output.debug(&format!("Using config {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            data_dir,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(StorefrontConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match config::load(&config_path) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => tracing::warn!(path = %config_path.display(), error = %e, "Skipping unreadable config"),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory relative paths in the config are resolved against.
    fn base_dir(&self) -> &Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(self.cwd.as_path())
    }

    /// Catalog file to load.
    pub fn catalog_path(&self) -> PathBuf {
        match self.config.catalog.path {
            Some(ref path) => resolve(self.base_dir(), path),
            None => self.cwd.join(DEFAULT_CATALOG),
        }
    }

    /// Directory holding the storage slots.
    pub fn data_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.data_dir {
            return resolve(&self.cwd, dir);
        }
        match self.config.storage.dir {
            Some(ref dir) => resolve(self.base_dir(), dir),
            None => self.cwd.join(DEFAULT_DATA_DIR),
        }
    }

    /// Load the catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        let path = self.catalog_path();
        if !path.exists() {
            bail!(
                "Catalog not found: {}. Set [catalog] path in vault.toml.",
                path.display()
            );
        }
        Catalog::load(&path).with_context(|| format!("Failed to load catalog {}", path.display()))
    }

    /// Open the storefront over the catalog and data directory.
    pub fn storefront(&self) -> Result<Storefront> {
        let catalog = self.catalog()?;
        let dir = self.data_dir();
        let storage = Storage::open_dir(&dir)
            .with_context(|| format!("Failed to open data directory {}", dir.display()))?;
        self.output.debug(&format!(
            "{} products, data in {}",
            catalog.len(),
            dir.display()
        ));
        Ok(Storefront::new(catalog, &storage, &self.config))
    }
}

/// Resolve a path relative to `base`.
fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(cwd: &Path, config: StorefrontConfig, config_path: Option<PathBuf>) -> Context {
        Context {
            config,
            config_path,
            output: Output::new(false, true),
            cwd: cwd.to_path_buf(),
            data_dir: None,
        }
    }

    #[test]
    fn test_defaults_resolve_against_cwd() {
        let ctx = context(Path::new("/shop"), StorefrontConfig::default(), None);
        assert_eq!(ctx.catalog_path(), PathBuf::from("/shop/data/products.json"));
        assert_eq!(ctx.data_dir(), PathBuf::from("/shop/.vault"));
    }

    #[test]
    fn test_config_paths_resolve_against_config_dir() {
        let mut config = StorefrontConfig::default();
        config.catalog.path = Some(PathBuf::from("catalog.json"));
        config.storage.dir = Some(PathBuf::from("state"));

        let ctx = context(Path::new("/shop/sub"), config, Some(PathBuf::from("/shop/vault.toml")));
        assert_eq!(ctx.catalog_path(), PathBuf::from("/shop/catalog.json"));
        assert_eq!(ctx.data_dir(), PathBuf::from("/shop/state"));
    }

    #[test]
    fn test_data_dir_flag_wins() {
        let mut ctx = context(Path::new("/shop"), StorefrontConfig::default(), None);
        ctx.data_dir = Some(PathBuf::from("/tmp/vault-data"));
        assert_eq!(ctx.data_dir(), PathBuf::from("/tmp/vault-data"));
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vault.toml"), "[orders]\nbrand_tag = \"VW\"\n").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = Context::find_config(&nested).unwrap();
        assert_eq!(config.orders.brand_tag, "VW");
        assert_eq!(path, dir.path().join("vault.toml"));
    }

    #[tokio::test]
    async fn test_storefront_opens_catalog_and_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(
            dir.path().join("data/products.json"),
            r#"[{"Id": 7, "name": "Classic Leather Jacket", "category": "men", "price": 49.99}]"#,
        )
        .unwrap();

        let ctx = context(dir.path(), StorefrontConfig::default(), None);
        let shop = ctx.storefront().unwrap();
        shop.add_product_to_cart(vault_commerce::ProductId::new(7), 1, "M", "Black")
            .await
            .unwrap();

        assert!(dir.path().join(".vault").join("voguevault_cart.json").exists());
    }

    #[test]
    fn test_missing_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path(), StorefrontConfig::default(), None);
        let err = ctx.catalog().unwrap_err();
        assert!(err.to_string().contains("Catalog not found"));
    }
}
