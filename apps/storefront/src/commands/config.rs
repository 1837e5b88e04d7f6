//! # Config Commands
//!
//! Exposes the loaded configuration to the frontend.

use serde::Serialize;
use tracing::debug;

use crate::state::ConfigState;

/// Configuration plus values derived from it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    #[serde(flatten)]
    pub config: ConfigState,
    pub store_domain: String,
    pub storefront_endpoint: String,
}

/// Gets the current application configuration.
///
/// ## When Used
/// - App startup (to configure UI)
/// - Currency formatting on the frontend
pub fn get_config(config: &ConfigState) -> ConfigResponse {
    debug!("get_config command");
    ConfigResponse {
        store_domain: config.store_domain(),
        storefront_endpoint: config.storefront_endpoint(),
        config: config.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_shape() {
        let json = serde_json::to_value(get_config(&ConfigState::default())).unwrap();

        assert_eq!(json["storeName"], "dev-store");
        assert_eq!(json["apiVersion"], "2025-07");
        assert_eq!(json["storeDomain"], "dev-store.myshopify.com");
        assert_eq!(
            json["storefrontEndpoint"],
            "https://dev-store.myshopify.com/api/2025-07/graphql.json"
        );
    }
}
