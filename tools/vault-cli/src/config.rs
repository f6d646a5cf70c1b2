//! CLI configuration files.
//!
//! The file holds a [`StorefrontConfig`]; TOML unless the path ends in
//! `.json`.

use std::path::Path;

use anyhow::{Context, Result};
use vault_commerce::config::StorefrontConfig;

/// Config file names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["vault.toml", ".vault.toml", "vault.json"];

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Load config from a file.
pub fn load(path: &Path) -> Result<StorefrontConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if is_json(path) {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }
}

/// Generate a default vault.toml.
pub fn generate_default_config() -> String {
    r#"# VogueVault storefront configuration

[catalog]
path = "data/products.json"

[storage]
dir = ".vault"
cart_slot = "voguevault_cart"
wishlist_slot = "voguevault_wishlist"
orders_slot = "voguevault_orders"

[orders]
brand_tag = "VV"

[pricing]
# Orders strictly above this subtotal ship free.
free_shipping_threshold = 200.0
flat_shipping = 15.0
tax_rate = 0.08
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_commerce::Money;

    #[test]
    fn test_default_config_parses() {
        let config: StorefrontConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.orders.brand_tag, "VV");
        assert_eq!(config.pricing.free_shipping_threshold, Money::from_cents(20000));
        assert_eq!(config.storage.dir.as_deref(), Some(Path::new(".vault")));
        assert_eq!(config.catalog.path.as_deref(), Some(Path::new("data/products.json")));
    }

    #[test]
    fn test_load_toml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("vault.toml");
        let json_path = dir.path().join("vault.json");
        std::fs::write(&toml_path, "[orders]\nbrand_tag = \"VX\"\n").unwrap();
        std::fs::write(&json_path, r#"{"orders": {"brand_tag": "VX"}}"#).unwrap();

        let from_toml = load(&toml_path).unwrap();
        assert_eq!(from_toml.orders.brand_tag, "VX");
        assert_eq!(from_toml, load(&json_path).unwrap());
    }

    #[test]
    fn test_bad_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.toml");
        std::fs::write(&path, "[orders\nbrand_tag =").unwrap();

        let err = load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }
}
