//! Client configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:9200";
pub const DEFAULT_TENANT_HEADER: &str = "x-tenant-id";

/// Where the store lives and how the tenant travels on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(default = "default_tenant_header")]
    pub tenant_header: String,
}

fn default_tenant_header() -> String {
    DEFAULT_TENANT_HEADER.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tenant_header: default_tenant_header(),
        }
    }
}

impl ClientConfig {
    /// Read `DOCSTORE_URL` and `DOCSTORE_TENANT_HEADER`, falling back to the
    /// defaults for unset variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup("DOCSTORE_URL").unwrap_or(defaults.base_url),
            tenant_header: lookup("DOCSTORE_TENANT_HEADER").unwrap_or(defaults.tenant_header),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_header_defaults_when_omitted() {
        let config: ClientConfig = serde_json::from_str(r#"{"base_url":"http://store:9200"}"#).unwrap();
        assert_eq!(config.base_url, "http://store:9200");
        assert_eq!(config.tenant_header, DEFAULT_TENANT_HEADER);
    }

    #[test]
    fn lookup_overrides_both_fields() {
        let config = ClientConfig::from_lookup(|key| match key {
            "DOCSTORE_URL" => Some("http://store:9200".to_string()),
            "DOCSTORE_TENANT_HEADER" => Some("x-org".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "http://store:9200");
        assert_eq!(config.tenant_header, "x-org");
    }

    #[test]
    fn lookup_falls_back_per_field() {
        let config = ClientConfig::from_lookup(|key| {
            (key == "DOCSTORE_TENANT_HEADER").then(|| "x-org".to_string())
        });
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.tenant_header, "x-org");
    }

    // Only test in the crate touching these variables.
    #[test]
    fn from_env_reads_process_environment() {
        std::env::set_var("DOCSTORE_URL", "http://env-store:9200");
        std::env::set_var("DOCSTORE_TENANT_HEADER", "x-env-tenant");
        let config = ClientConfig::from_env();
        assert_eq!(config.base_url, "http://env-store:9200");
        assert_eq!(config.tenant_header, "x-env-tenant");

        std::env::remove_var("DOCSTORE_URL");
        std::env::remove_var("DOCSTORE_TENANT_HEADER");
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());
    }

    #[test]
    fn default_points_at_local_store() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.tenant_header, "x-tenant-id");
    }
}
